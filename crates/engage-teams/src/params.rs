//! Typed request parameters for the `teams.*` endpoints.
//!
//! Endpoints that address an existing team embed a [`TeamRef`] flattened
//! into the request object, so the wire form carries exactly one of
//! `teamId` or `teamName`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{PaginatedRequest, TeamType};
use crate::team_ref::TeamRef;

/// Request body of endpoints that take no parameters (`teams.list`,
/// `teams.listAll`); serializes as `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoParams {}

/// Parameters for `teams.create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTeamParams {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub team_type: Option<TeamType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
    pub room: CreateTeamRoom,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl CreateTeamParams {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team_type: None,
            members: None,
            room: CreateTeamRoom::default(),
            owner: None,
        }
    }

    pub fn with_type(mut self, team_type: TeamType) -> Self {
        self.team_type = Some(team_type);
        self
    }

    pub fn with_members(mut self, members: Vec<String>) -> Self {
        self.members = Some(members);
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }
}

/// Settings for the main room created alongside a team.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRoom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    /// `teamId`/`teamMain` plus free-form string or boolean entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_data: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<CreateRoomOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_validation_regex: Option<String>,
    pub creator: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_extra: Option<SubscriptionExtra>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionExtra {
    pub open: bool,
    pub ls: DateTime<Utc>,
    pub prid: String,
}

/// Parameters for `teams.convertToChannel`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertToChannelParams {
    #[serde(flatten)]
    pub team: TeamRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms_to_remove: Option<Vec<String>>,
}

/// Parameters for `teams.addRooms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRoomsParams {
    #[serde(flatten)]
    pub team: TeamRef,
    pub rooms: Vec<String>,
}

/// Parameters for `teams.removeRoom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRoomParams {
    #[serde(flatten)]
    pub team: TeamRef,
    pub room_id: String,
}

/// Parameters for `teams.members`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembersParams {
    #[serde(flatten)]
    pub team: TeamRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A user together with the team roles to grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRoles {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

/// Parameters for `teams.addMembers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddMembersParams {
    #[serde(flatten)]
    pub team: TeamRef,
    pub members: Vec<MemberRoles>,
}

/// Parameters for `teams.updateMember`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMemberParams {
    #[serde(flatten)]
    pub team: TeamRef,
    pub member: MemberRoles,
}

/// Parameters for `teams.removeMember`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveMemberParams {
    #[serde(flatten)]
    pub team: TeamRef,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Vec<String>>,
}

/// Parameters for `teams.leave`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveParams {
    #[serde(flatten)]
    pub team: TeamRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<Vec<String>>,
}

/// Parameters for `teams.info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoParams {
    #[serde(flatten)]
    pub team: TeamRef,
}

/// Parameters for `teams.autocomplete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutocompleteParams {
    pub name: String,
}

/// Parameters for `teams.update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateTeamParams {
    #[serde(flatten)]
    pub team: TeamRef,
    pub data: TeamUpdateData,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamUpdateData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub team_type: Option<TeamType>,
}

/// Parameters for `teams.delete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTeamParams {
    #[serde(flatten)]
    pub team: TeamRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms_to_remove: Option<Vec<String>>,
}

/// Parameters for `teams.listRoomsOfUser`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRoomsOfUserParams {
    #[serde(flatten)]
    pub team: TeamRef,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_user_delete: Option<bool>,
}

/// Parameters for `teams.listRooms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRoomsParams {
    #[serde(flatten)]
    pub page: PaginatedRequest,
    #[serde(flatten)]
    pub team: TeamRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
}

/// Parameters for `teams.updateRoom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomParams {
    pub room_id: String,
    pub is_default: bool,
}
