//! Typed response bodies for the `teams.*` endpoints.
//!
//! Endpoints without a body in their success response use `()`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    PaginatedResult, Room, Team, TeamAutocompleteResult, TeamMemberInfo, TeamType, UserRef,
};

/// `teams.list` and `teams.listAll`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamsPage {
    pub teams: Vec<Team>,
    #[serde(flatten)]
    pub page: PaginatedResult,
}

/// `teams.create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTeamResponse {
    pub team: Team,
}

/// `teams.addRooms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomsResponse {
    pub rooms: Vec<Room>,
}

/// `teams.removeRoom` and `teams.updateRoom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomResponse {
    pub room: Room,
}

/// `teams.members`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembersPage {
    pub members: Vec<TeamMemberInfo>,
    #[serde(flatten)]
    pub page: PaginatedResult,
}

/// `teams.info`: any subset of the team's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamInfoResponse {
    pub team_info: PartialTeam,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTeam {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub team_type: Option<TeamType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "_updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Team> for PartialTeam {
    fn from(team: Team) -> Self {
        Self {
            id: Some(team.id),
            name: Some(team.name),
            team_type: Some(team.team_type),
            room_id: Some(team.room_id),
            created_by: Some(team.created_by),
            created_at: Some(team.created_at),
            updated_at: Some(team.updated_at),
        }
    }
}

/// `teams.autocomplete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    pub teams: Vec<TeamAutocompleteResult>,
}

/// `teams.listRoomsOfUser` and `teams.listRooms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomsPage {
    pub rooms: Vec<Room>,
    #[serde(flatten)]
    pub page: PaginatedResult,
}
