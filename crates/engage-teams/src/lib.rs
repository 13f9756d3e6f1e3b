//! REST API contracts for the Teams feature.
//!
//! This crate provides:
//! - Team addressing by id or by name ([`TeamRef`]) plus the structural
//!   predicates used on untyped parameter objects
//! - Domain records returned by the Teams endpoints (teams, rooms, members)
//! - Typed request and response shapes for every `teams.*` endpoint
//! - A contract table mapping endpoint names to methods and field sets

pub mod endpoints;
pub mod error;
pub mod model;
pub mod params;
pub mod responses;
pub mod team_ref;

pub use endpoints::{
    check_params, Endpoint, EndpointDescriptor, FieldSpec, HttpMethod, TeamsEndpoint,
};
pub use error::ContractError;
pub use model::{
    PaginatedRequest, PaginatedResult, Room, Team, TeamAutocompleteResult, TeamMemberInfo,
    TeamType,
};
pub use team_ref::{is_team_props_with_team_id, is_team_props_with_team_name, TeamRef};
