//! Domain records returned by the Teams endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Visibility of a team.
///
/// Sent over the wire as an integer (`0` public, `1` private).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TeamType {
    #[default]
    Public,
    Private,
}

impl TeamType {
    pub fn code(self) -> u8 {
        match self {
            TeamType::Public => 0,
            TeamType::Private => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(TeamType::Public),
            1 => Some(TeamType::Private),
            _ => None,
        }
    }
}

impl Serialize for TeamType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.code().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for TeamType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        TeamType::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid team type: {}", code)))
    }
}

/// A team and its main room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub team_type: TeamType,
    pub room_id: String,
    pub created_by: UserRef,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "_updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Minimal user reference embedded in team records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// A room, as far as the Teams endpoints expose it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Room kind code (`c` channel, `p` private group, `d` direct)
    pub t: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub team_main: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub team_default: bool,
}

/// User details carried by a team membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Membership entry returned by `teams.members`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberInfo {
    pub user: MemberUser,
    #[serde(default)]
    pub roles: Vec<String>,
    pub created_by: UserRef,
    pub created_at: DateTime<Utc>,
}

/// Entry returned by `teams.autocomplete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamAutocompleteResult {
    #[serde(rename = "_id")]
    pub id: String,
    pub fname: String,
    pub team_id: String,
    pub name: String,
    pub t: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_e_tag: Option<String>,
}

/// Pagination fields accepted by list endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PaginatedRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    /// Sort specification, e.g. `{"name": 1}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Map<String, Value>>,
}

/// Pagination fields returned by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaginatedResult {
    pub count: u32,
    pub offset: u32,
    pub total: u32,
}

impl PaginatedResult {
    /// Whether more items remain after this page.
    pub fn has_more(&self) -> bool {
        self.offset + self.count < self.total
    }
}
