extern crate serde_json;
extern crate scrim_common;

use scrim_common::api::draw::{BalanceDrawRequest, TeamsResponse};
use scrim_common::api::matches::MatchSubmission;
use scrim_common::model::{MatchOutcome, Player};

#[test]
fn draw_requests_parse_the_client_payload()
{
    let raw = r#"{"playerIds": [1, 2, 3, 4, 5, 6, 7, 8, 9, 10], "metric": "kd"}"#;

    let request: BalanceDrawRequest = serde_json::from_str(raw).unwrap();

    assert_eq!(10, request.player_ids.len());
    assert_eq!("kd", request.metric);
}

#[test]
fn team_responses_serialize_camel_cased()
{
    let response = TeamsResponse::new(vec!(Player::new(1, "a")), vec!(Player::new(2, "b")));

    let value = serde_json::to_value(&response).unwrap();

    assert!(value.get("teamA").is_some());
    assert!(value.get("teamB").is_some());
    assert!(value.get("team_a").is_none());
}

#[test]
fn outcomes_use_the_lowercase_wire_names()
{
    assert_eq!("\"win\"", serde_json::to_string(&MatchOutcome::Win).unwrap());
    assert_eq!(MatchOutcome::Draw, serde_json::from_str::<MatchOutcome>("\"draw\"").unwrap());
}

#[test]
fn missing_result_columns_read_as_losses()
{
    let raw = r#"{
        "teams": {
            "team1": [{"id": 1, "kills": 10, "deaths": 5, "damage": 900}],
            "team2": [{"id": 2}]
        }
    }"#;

    let submission: MatchSubmission = serde_json::from_str(raw).unwrap();

    assert_eq!(MatchOutcome::Loss, submission.teams.team1[0].result);
    assert_eq!(MatchOutcome::Loss, submission.teams.team2[0].result);
    assert!(submission.map_id.is_none());
}

#[test]
fn incomplete_player_documents_still_deserialize()
{
    let raw = r#"{"id": 7, "name": "smurf"}"#;

    let player: Player = serde_json::from_str(raw).unwrap();

    assert_eq!(0.0, player.kd);
    assert_eq!(0, player.games);
}
