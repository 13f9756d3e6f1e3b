//! Contract table integration tests
//!
//! Typed parameters must always satisfy the runtime contract of their
//! endpoint, and the team predicates must agree with `TeamRef`.

use engage_teams::endpoints::{
    Endpoint, TeamsAddMembers, TeamsConvertToChannel, TeamsInfo, TeamsListRooms,
    TeamsListRoomsOfUser, TeamsUpdate, TeamsUpdateRoom,
};
use engage_teams::params::{
    AddMembersParams, ConvertToChannelParams, InfoParams, ListRoomsOfUserParams, ListRoomsParams,
    MemberRoles, TeamUpdateData, UpdateRoomParams, UpdateTeamParams,
};
use engage_teams::{
    check_params, is_team_props_with_team_id, is_team_props_with_team_name, HttpMethod,
    PaginatedRequest, TeamRef, TeamType, TeamsEndpoint,
};
use rstest::rstest;
use serde::Serialize;
use serde_json::{json, Value};

fn wire<E: Endpoint>(params: &E::Params) -> Value {
    serde_json::to_value(params).unwrap()
}

fn assert_satisfies<E: Endpoint>(params: &E::Params)
where
    E::Params: Serialize,
{
    let json = wire::<E>(params);
    assert_eq!(check_params(E::KIND, &json), Ok(()), "{} rejected {}", E::NAME, json);
}

// === Predicates ===

#[rstest]
#[case(json!({ "teamId": "abc" }), true, false)]
#[case(json!({ "teamName": "x" }), false, true)]
#[case(json!({ "teamId": "abc", "teamName": "x" }), true, true)]
#[case(json!({ "roomId": "r1" }), false, false)]
#[case(json!(null), false, false)]
fn test_predicates(#[case] params: Value, #[case] has_id: bool, #[case] has_name: bool) {
    assert_eq!(is_team_props_with_team_id(&params), has_id);
    assert_eq!(is_team_props_with_team_name(&params), has_name);
}

#[rstest]
#[case(TeamRef::by_id("t1"))]
#[case(TeamRef::by_name("design"))]
fn test_typed_team_ref_matches_predicates(#[case] team: TeamRef) {
    let json = wire::<TeamsInfo>(&InfoParams { team: team.clone() });

    assert_eq!(is_team_props_with_team_id(&json), matches!(team, TeamRef::ById(_)));
    assert_eq!(is_team_props_with_team_name(&json), matches!(team, TeamRef::ByName(_)));
    assert_eq!(TeamRef::from_params(&json), Some(team));
}

// === Typed params satisfy the runtime table ===

#[test]
fn test_typed_params_satisfy_contracts() {
    assert_satisfies::<TeamsConvertToChannel>(&ConvertToChannelParams {
        team: TeamRef::by_id("t1"),
        rooms_to_remove: None,
    });
    assert_satisfies::<TeamsAddMembers>(&AddMembersParams {
        team: TeamRef::by_name("design"),
        members: vec![MemberRoles {
            user_id: "u1".to_string(),
            roles: Some(vec!["moderator".to_string()]),
        }],
    });
    assert_satisfies::<TeamsUpdate>(&UpdateTeamParams {
        team: TeamRef::by_id("t1"),
        data: TeamUpdateData {
            name: None,
            team_type: Some(TeamType::Private),
        },
    });
    assert_satisfies::<TeamsListRoomsOfUser>(&ListRoomsOfUserParams {
        team: TeamRef::by_name("design"),
        user_id: "u1".to_string(),
        can_user_delete: Some(true),
    });
    assert_satisfies::<TeamsListRooms>(&ListRoomsParams {
        page: PaginatedRequest::default(),
        team: TeamRef::by_id("t1"),
        filter: None,
        room_type: None,
    });
    assert_satisfies::<TeamsUpdateRoom>(&UpdateRoomParams {
        room_id: "r1".to_string(),
        is_default: true,
    });
}

// === Table shape ===

#[test]
fn test_every_endpoint_has_descriptor() {
    for endpoint in TeamsEndpoint::ALL {
        let descriptor = endpoint.descriptor();
        assert_eq!(descriptor.name, endpoint.name());
        assert!(descriptor.name.starts_with("teams."));
    }
}

#[test]
fn test_read_endpoints_use_get() {
    let gets: Vec<&str> = TeamsEndpoint::ALL
        .into_iter()
        .filter(|e| e.method() == HttpMethod::Get)
        .map(TeamsEndpoint::name)
        .collect();

    assert_eq!(
        gets,
        vec![
            "teams.list",
            "teams.listAll",
            "teams.members",
            "teams.info",
            "teams.autocomplete",
            "teams.listRoomsOfUser",
            "teams.listRooms",
        ]
    );
}

#[test]
fn test_descriptor_serialization() {
    let json = serde_json::to_value(TeamsEndpoint::RemoveMember.descriptor()).unwrap();
    assert_eq!(
        json,
        json!({
            "name": "teams.removeMember",
            "method": "POST",
            "requires_team": true,
            "request": [
                { "name": "userId", "required": true },
                { "name": "rooms", "required": false }
            ],
            "response": []
        })
    );
}
