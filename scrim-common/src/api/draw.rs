use ::model::Player;

/// Body of `POST /api/draw/random`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct RandomDrawRequest
{
    #[serde(rename = "playerIds")]
    pub player_ids: Vec<u32>,
}

/// Body of `POST /api/draw/balance`.
///
/// `metric` stays a plain string here; the handler parses it into a
/// `balance::Metric` and rejects anything unknown before the balancer runs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct BalanceDrawRequest
{
    #[serde(rename = "playerIds")]
    pub player_ids: Vec<u32>,
    pub metric: String,
}

/// The two drawn teams, full records included so the client renders them directly.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct TeamsResponse
{
    #[serde(rename = "teamA")]
    pub team_a: Vec<Player>,
    #[serde(rename = "teamB")]
    pub team_b: Vec<Player>,
}
