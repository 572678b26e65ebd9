use chrono::{DateTime, Utc};

use ::model::{MatchOutcome, PlayerLine};

/// One player's row as submitted by the match form.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct SubmittedLine
{
    pub id: u32,
    #[serde(default)]
    pub kills: i64,
    #[serde(default)]
    pub deaths: i64,
    #[serde(default)]
    pub assists: i64,
    #[serde(default)]
    pub headshot_percentage: f64,
    #[serde(default)]
    pub damage: i64,
    #[serde(default)]
    pub result: MatchOutcome,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct SubmittedTeams
{
    pub team1: Vec<SubmittedLine>,
    pub team2: Vec<SubmittedLine>,
}

/// Body of `POST /api/matches`. The map defaults to Dust 2 when the form sends none.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MatchSubmission
{
    pub teams: SubmittedTeams,
    #[serde(default)]
    pub map_id: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MatchCreatedResponse
{
    pub ok: bool,
    #[serde(rename = "matchId")]
    pub match_id: u32,
    pub message: String,
}

/// One row of `GET /api/matches`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MatchSummary
{
    pub id: u32,
    pub created_at: DateTime<Utc>,
    pub map_id: u32,
    pub map_name: String,
    pub player_count: u32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MatchDetailTeams
{
    pub team1: Vec<PlayerLine>,
    pub team2: Vec<PlayerLine>,
}

/// Body of `GET /api/matches/<id>`: the stored record with the map resolved.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MatchDetailsResponse
{
    pub id: u32,
    pub created_at: DateTime<Utc>,
    pub map_id: u32,
    pub map_name: String,
    pub teams: MatchDetailTeams,
}
