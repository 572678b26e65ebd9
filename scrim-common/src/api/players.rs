/// Body of `POST /api/players`. Stats besides the two seed values start at zero.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct CreatePlayerRequest
{
    pub name: String,
    #[serde(default)]
    pub kd: f64,
    #[serde(default)]
    pub total_damage: i64,
}

/// Body of `PUT /api/players/<id>`. Only the hand-editable fields; career counters
/// move through recorded matches, not this endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct UpdatePlayerRequest
{
    pub name: String,
    #[serde(default)]
    pub kd: f64,
    #[serde(default)]
    pub total_damage: i64,
}
