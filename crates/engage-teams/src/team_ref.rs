//! Addressing a team by id or by name.
//!
//! Most Teams endpoints accept either `teamId` or `teamName`. Typed code
//! carries a [`TeamRef`]; untyped JSON parameters can be narrowed with
//! [`is_team_props_with_team_id`] and [`is_team_props_with_team_name`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Reference to a team, either by its id or by its unique name.
///
/// Serializes as a single `teamId` or `teamName` field so it can be
/// flattened into request objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamRef {
    #[serde(rename = "teamId")]
    ById(String),
    #[serde(rename = "teamName")]
    ByName(String),
}

impl TeamRef {
    pub fn by_id(id: impl Into<String>) -> Self {
        TeamRef::ById(id.into())
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        TeamRef::ByName(name.into())
    }

    /// The wire field this reference is sent as.
    pub fn field_name(&self) -> &'static str {
        match self {
            TeamRef::ById(_) => "teamId",
            TeamRef::ByName(_) => "teamName",
        }
    }

    /// The id or name carried by this reference.
    pub fn value(&self) -> &str {
        match self {
            TeamRef::ById(v) | TeamRef::ByName(v) => v,
        }
    }

    /// Extract a reference from an untyped parameter object.
    ///
    /// `teamId` wins when both fields are present. Only string values are
    /// accepted here, unlike the structural predicates.
    pub fn from_params(params: &Value) -> Option<Self> {
        let obj = params.as_object()?;
        if let Some(id) = obj.get("teamId").and_then(Value::as_str) {
            return Some(TeamRef::by_id(id));
        }
        obj.get("teamName")
            .and_then(Value::as_str)
            .map(TeamRef::by_name)
    }
}

impl fmt::Display for TeamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field_name(), self.value())
    }
}

/// True iff `params` is an object with a `teamName` property.
///
/// The value is not inspected: `{"teamName": null}` still matches.
pub fn is_team_props_with_team_name(params: &Value) -> bool {
    params
        .as_object()
        .is_some_and(|obj| obj.contains_key("teamName"))
}

/// True iff `params` is an object with a `teamId` property.
pub fn is_team_props_with_team_id(params: &Value) -> bool {
    params
        .as_object()
        .is_some_and(|obj| obj.contains_key("teamId"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_team_id_predicate() {
        assert!(is_team_props_with_team_id(&json!({ "teamId": "abc" })));
        assert!(!is_team_props_with_team_id(&json!({ "teamName": "x" })));
    }

    #[test]
    fn test_team_name_predicate() {
        assert!(is_team_props_with_team_name(&json!({ "teamName": "x" })));
        assert!(!is_team_props_with_team_name(&json!({ "teamId": "abc" })));
    }

    #[test]
    fn test_predicates_ignore_value_type() {
        let params = json!({ "teamId": null, "teamName": 42 });
        assert!(is_team_props_with_team_id(&params));
        assert!(is_team_props_with_team_name(&params));
    }

    #[test]
    fn test_predicates_on_non_objects() {
        assert!(!is_team_props_with_team_id(&json!("teamId")));
        assert!(!is_team_props_with_team_name(&json!(["teamName"])));
        assert!(!is_team_props_with_team_id(&Value::Null));
    }

    #[test]
    fn test_from_params_prefers_id() {
        let params = json!({ "teamId": "abc", "teamName": "x" });
        assert_eq!(TeamRef::from_params(&params), Some(TeamRef::by_id("abc")));
    }

    #[test]
    fn test_from_params_requires_strings() {
        assert_eq!(TeamRef::from_params(&json!({ "teamId": 7 })), None);
        assert_eq!(
            TeamRef::from_params(&json!({ "teamId": 7, "teamName": "x" })),
            Some(TeamRef::by_name("x"))
        );
    }

    #[test]
    fn test_serialization_uses_wire_field() {
        let json = serde_json::to_value(TeamRef::by_name("design")).unwrap();
        assert_eq!(json, json!({ "teamName": "design" }));

        let parsed: TeamRef = serde_json::from_value(json!({ "teamId": "t1" })).unwrap();
        assert_eq!(parsed, TeamRef::by_id("t1"));
    }

    #[test]
    fn test_display() {
        assert_eq!(TeamRef::by_id("t1").to_string(), "teamId=t1");
    }
}
