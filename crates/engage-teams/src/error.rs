//! Errors raised when raw parameters are checked against the contract table.

use thiserror::Error;

/// Errors that can occur while checking request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// No endpoint is registered under this name
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// The parameters are not a JSON object
    #[error("parameters for {endpoint} must be a JSON object")]
    NotAnObject { endpoint: &'static str },

    /// A required field is absent
    #[error("{endpoint} requires field `{field}`")]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
    },

    /// Neither `teamId` nor `teamName` was supplied
    #[error("{endpoint} requires either `teamId` or `teamName`")]
    MissingTeamRef { endpoint: &'static str },
}
