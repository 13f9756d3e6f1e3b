//! Contract table for the `teams.*` REST endpoints.
//!
//! Two views of the same table:
//! - [`Endpoint`]: one marker type per endpoint binding its name and method
//!   to typed parameters and response, for request-issuing code
//! - [`TeamsEndpoint`] / [`EndpointDescriptor`]: a runtime table of field
//!   names, used to describe the API and to check untyped parameters

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ContractError;
use crate::params::*;
use crate::responses::*;
use crate::team_ref::{is_team_props_with_team_id, is_team_props_with_team_name};

/// HTTP verb accepted by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request field and whether callers must send it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
}

const fn req(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        required: true,
    }
}

const fn opt(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        required: false,
    }
}

const CREATE_REQUEST: &[FieldSpec] = &[
    req("name"),
    opt("type"),
    opt("members"),
    req("room"),
    opt("owner"),
];
const ROOMS_TO_REMOVE: &[FieldSpec] = &[opt("roomsToRemove")];
const ADD_ROOMS_REQUEST: &[FieldSpec] = &[req("rooms")];
const REMOVE_ROOM_REQUEST: &[FieldSpec] = &[req("roomId")];
const MEMBERS_REQUEST: &[FieldSpec] = &[opt("status"), opt("username"), opt("name")];
const ADD_MEMBERS_REQUEST: &[FieldSpec] = &[req("members")];
const UPDATE_MEMBER_REQUEST: &[FieldSpec] = &[req("member")];
const REMOVE_MEMBER_REQUEST: &[FieldSpec] = &[req("userId"), opt("rooms")];
const LEAVE_REQUEST: &[FieldSpec] = &[opt("rooms")];
const AUTOCOMPLETE_REQUEST: &[FieldSpec] = &[req("name")];
const UPDATE_REQUEST: &[FieldSpec] = &[req("data")];
const LIST_ROOMS_OF_USER_REQUEST: &[FieldSpec] = &[req("userId"), opt("canUserDelete")];
const LIST_ROOMS_REQUEST: &[FieldSpec] = &[
    opt("count"),
    opt("offset"),
    opt("sort"),
    opt("filter"),
    opt("type"),
];
const UPDATE_ROOM_REQUEST: &[FieldSpec] = &[req("roomId"), req("isDefault")];
const PAGINATED_FIELDS: [&str; 3] = ["count", "offset", "total"];

/// Runtime description of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EndpointDescriptor {
    pub name: &'static str,
    pub method: HttpMethod,
    /// The request must carry `teamId` or `teamName`
    pub requires_team: bool,
    pub request: &'static [FieldSpec],
    pub response: &'static [&'static str],
}

impl EndpointDescriptor {
    /// Fields that must be present in every request.
    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.request.iter().filter(|f| f.required).map(|f| f.name)
    }

    /// Whether `field` is part of the request shape.
    ///
    /// The team reference fields count when the endpoint addresses a team.
    pub fn accepts_field(&self, field: &str) -> bool {
        (self.requires_team && matches!(field, "teamId" | "teamName"))
            || self.request.iter().any(|f| f.name == field)
    }
}

/// Every endpoint of the Teams API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamsEndpoint {
    #[serde(rename = "teams.list")]
    List,
    #[serde(rename = "teams.listAll")]
    ListAll,
    #[serde(rename = "teams.create")]
    Create,
    #[serde(rename = "teams.convertToChannel")]
    ConvertToChannel,
    #[serde(rename = "teams.addRooms")]
    AddRooms,
    #[serde(rename = "teams.removeRoom")]
    RemoveRoom,
    #[serde(rename = "teams.members")]
    Members,
    #[serde(rename = "teams.addMembers")]
    AddMembers,
    #[serde(rename = "teams.updateMember")]
    UpdateMember,
    #[serde(rename = "teams.removeMember")]
    RemoveMember,
    #[serde(rename = "teams.leave")]
    Leave,
    #[serde(rename = "teams.info")]
    Info,
    #[serde(rename = "teams.autocomplete")]
    Autocomplete,
    #[serde(rename = "teams.update")]
    Update,
    #[serde(rename = "teams.delete")]
    Delete,
    #[serde(rename = "teams.listRoomsOfUser")]
    ListRoomsOfUser,
    #[serde(rename = "teams.listRooms")]
    ListRooms,
    #[serde(rename = "teams.updateRoom")]
    UpdateRoom,
}

impl TeamsEndpoint {
    pub const ALL: [TeamsEndpoint; 18] = [
        TeamsEndpoint::List,
        TeamsEndpoint::ListAll,
        TeamsEndpoint::Create,
        TeamsEndpoint::ConvertToChannel,
        TeamsEndpoint::AddRooms,
        TeamsEndpoint::RemoveRoom,
        TeamsEndpoint::Members,
        TeamsEndpoint::AddMembers,
        TeamsEndpoint::UpdateMember,
        TeamsEndpoint::RemoveMember,
        TeamsEndpoint::Leave,
        TeamsEndpoint::Info,
        TeamsEndpoint::Autocomplete,
        TeamsEndpoint::Update,
        TeamsEndpoint::Delete,
        TeamsEndpoint::ListRoomsOfUser,
        TeamsEndpoint::ListRooms,
        TeamsEndpoint::UpdateRoom,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            TeamsEndpoint::List => "teams.list",
            TeamsEndpoint::ListAll => "teams.listAll",
            TeamsEndpoint::Create => "teams.create",
            TeamsEndpoint::ConvertToChannel => "teams.convertToChannel",
            TeamsEndpoint::AddRooms => "teams.addRooms",
            TeamsEndpoint::RemoveRoom => "teams.removeRoom",
            TeamsEndpoint::Members => "teams.members",
            TeamsEndpoint::AddMembers => "teams.addMembers",
            TeamsEndpoint::UpdateMember => "teams.updateMember",
            TeamsEndpoint::RemoveMember => "teams.removeMember",
            TeamsEndpoint::Leave => "teams.leave",
            TeamsEndpoint::Info => "teams.info",
            TeamsEndpoint::Autocomplete => "teams.autocomplete",
            TeamsEndpoint::Update => "teams.update",
            TeamsEndpoint::Delete => "teams.delete",
            TeamsEndpoint::ListRoomsOfUser => "teams.listRoomsOfUser",
            TeamsEndpoint::ListRooms => "teams.listRooms",
            TeamsEndpoint::UpdateRoom => "teams.updateRoom",
        }
    }

    pub const fn method(self) -> HttpMethod {
        match self {
            TeamsEndpoint::List
            | TeamsEndpoint::ListAll
            | TeamsEndpoint::Members
            | TeamsEndpoint::Info
            | TeamsEndpoint::Autocomplete
            | TeamsEndpoint::ListRoomsOfUser
            | TeamsEndpoint::ListRooms => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }

    /// Look up an endpoint by its wire name, e.g. `teams.info`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    pub fn descriptor(self) -> EndpointDescriptor {
        let (requires_team, request, response): (bool, &'static [FieldSpec], &'static [&str]) =
            match self {
                TeamsEndpoint::List | TeamsEndpoint::ListAll => {
                    (false, &[], &["teams", "count", "offset", "total"])
                }
                TeamsEndpoint::Create => (false, CREATE_REQUEST, &["team"]),
                TeamsEndpoint::ConvertToChannel => (true, ROOMS_TO_REMOVE, &[]),
                TeamsEndpoint::AddRooms => (true, ADD_ROOMS_REQUEST, &["rooms"]),
                TeamsEndpoint::RemoveRoom => (true, REMOVE_ROOM_REQUEST, &["room"]),
                TeamsEndpoint::Members => (
                    true,
                    MEMBERS_REQUEST,
                    &["members", "count", "offset", "total"],
                ),
                TeamsEndpoint::AddMembers => (true, ADD_MEMBERS_REQUEST, &[]),
                TeamsEndpoint::UpdateMember => (true, UPDATE_MEMBER_REQUEST, &[]),
                TeamsEndpoint::RemoveMember => (true, REMOVE_MEMBER_REQUEST, &[]),
                TeamsEndpoint::Leave => (true, LEAVE_REQUEST, &[]),
                TeamsEndpoint::Info => (true, &[], &["teamInfo"]),
                TeamsEndpoint::Autocomplete => (false, AUTOCOMPLETE_REQUEST, &["teams"]),
                TeamsEndpoint::Update => (true, UPDATE_REQUEST, &[]),
                TeamsEndpoint::Delete => (true, ROOMS_TO_REMOVE, &[]),
                TeamsEndpoint::ListRoomsOfUser => (
                    true,
                    LIST_ROOMS_OF_USER_REQUEST,
                    &["rooms", "count", "offset", "total"],
                ),
                TeamsEndpoint::ListRooms => (
                    true,
                    LIST_ROOMS_REQUEST,
                    &["rooms", "count", "offset", "total"],
                ),
                TeamsEndpoint::UpdateRoom => (false, UPDATE_ROOM_REQUEST, &["room"]),
            };

        EndpointDescriptor {
            name: self.name(),
            method: self.method(),
            requires_team,
            request,
            response,
        }
    }

    /// Whether the response carries pagination fields.
    pub fn is_paginated(self) -> bool {
        let response = self.descriptor().response;
        PAGINATED_FIELDS.iter().all(|f| response.contains(f))
    }
}

impl fmt::Display for TeamsEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TeamsEndpoint {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ContractError::UnknownEndpoint(s.to_string()))
    }
}

/// Check untyped request parameters against an endpoint's contract.
///
/// Only presence is checked. Unknown extra fields are allowed.
pub fn check_params(endpoint: TeamsEndpoint, params: &Value) -> Result<(), ContractError> {
    let descriptor = endpoint.descriptor();
    let obj = params.as_object().ok_or(ContractError::NotAnObject {
        endpoint: descriptor.name,
    })?;

    if descriptor.requires_team
        && !is_team_props_with_team_id(params)
        && !is_team_props_with_team_name(params)
    {
        return Err(ContractError::MissingTeamRef {
            endpoint: descriptor.name,
        });
    }

    if let Some(field) = descriptor.required_fields().find(|f| !obj.contains_key(*f)) {
        return Err(ContractError::MissingField {
            endpoint: descriptor.name,
            field,
        });
    }

    Ok(())
}

/// Compile-time binding of an endpoint to its request and response types.
pub trait Endpoint {
    const KIND: TeamsEndpoint;
    const NAME: &'static str = Self::KIND.name();
    const METHOD: HttpMethod = Self::KIND.method();

    type Params: Serialize + DeserializeOwned;
    type Response: Serialize + DeserializeOwned;
}

macro_rules! endpoint {
    ($marker:ident, $kind:ident, $params:ty => $response:ty) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $marker;

        impl Endpoint for $marker {
            const KIND: TeamsEndpoint = TeamsEndpoint::$kind;
            type Params = $params;
            type Response = $response;
        }
    };
}

endpoint!(TeamsList, List, NoParams => TeamsPage);
endpoint!(TeamsListAll, ListAll, NoParams => TeamsPage);
endpoint!(TeamsCreate, Create, CreateTeamParams => CreateTeamResponse);
endpoint!(TeamsConvertToChannel, ConvertToChannel, ConvertToChannelParams => ());
endpoint!(TeamsAddRooms, AddRooms, AddRoomsParams => RoomsResponse);
endpoint!(TeamsRemoveRoom, RemoveRoom, RemoveRoomParams => RoomResponse);
endpoint!(TeamsMembers, Members, MembersParams => MembersPage);
endpoint!(TeamsAddMembers, AddMembers, AddMembersParams => ());
endpoint!(TeamsUpdateMember, UpdateMember, UpdateMemberParams => ());
endpoint!(TeamsRemoveMember, RemoveMember, RemoveMemberParams => ());
endpoint!(TeamsLeave, Leave, LeaveParams => ());
endpoint!(TeamsInfo, Info, InfoParams => TeamInfoResponse);
endpoint!(TeamsAutocomplete, Autocomplete, AutocompleteParams => AutocompleteResponse);
endpoint!(TeamsUpdate, Update, UpdateTeamParams => ());
endpoint!(TeamsDelete, Delete, DeleteTeamParams => ());
endpoint!(TeamsListRoomsOfUser, ListRoomsOfUser, ListRoomsOfUserParams => RoomsPage);
endpoint!(TeamsListRooms, ListRooms, ListRoomsParams => RoomsPage);
endpoint!(TeamsUpdateRoom, UpdateRoom, UpdateRoomParams => RoomResponse);
