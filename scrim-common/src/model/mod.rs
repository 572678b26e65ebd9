use chrono::{DateTime, Utc};

/// Career record for one player in the roster.
///
/// Every numeric field defaults to zero when missing so partially-filled records
/// (hand-created players with no matches yet) deserialize instead of erroring.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Player
{
    pub id: u32,
    pub name: String,
    /// Career kills/deaths ratio. Recomputed after every recorded match.
    #[serde(default)]
    pub kd: f64,
    #[serde(default)]
    pub total_damage: i64,
    #[serde(default)]
    pub games: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub loses: u32,
    #[serde(default)]
    pub draws: u32,
    #[serde(default)]
    pub total_kills: i64,
    #[serde(default)]
    pub total_deaths: i64,
    #[serde(default)]
    pub ave_kills: f64,
    #[serde(default)]
    pub ave_deaths: f64,
    #[serde(default)]
    pub ave_damage: f64,
}

impl Player
{
    /// Fresh roster entry with all counters at zero.
    pub fn new<S>(id: u32, name: S) -> Player
        where S: Into<String>
    {
        Player {
            id,
            name: name.into(),
            kd: 0.0,
            total_damage: 0,
            games: 0,
            wins: 0,
            loses: 0,
            draws: 0,
            total_kills: 0,
            total_deaths: 0,
            ave_kills: 0.0,
            ave_deaths: 0.0,
            ave_damage: 0.0,
        }
    }
}

/// Outcome of one match from a single player's point of view.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome
{
    Win,
    Loss,
    Draw,
}

impl Default for MatchOutcome
{
    /* Imported sheets sometimes omit the result column; a missing result reads as a loss. */
    fn default() -> MatchOutcome
    {
        MatchOutcome::Loss
    }
}

/// One player's row of one recorded match.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct PlayerLine
{
    pub player_id: u32,
    pub name: String,
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

/// A stored match: when, where, and the two 5-player line sets.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MatchRecord
{
    pub id: u32,
    pub created_at: DateTime<Utc>,
    pub map_id: u32,
    pub team1: Vec<PlayerLine>,
    pub team2: Vec<PlayerLine>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MapInfo
{
    pub id: u32,
    pub name: String,
    pub display_name: String,
}

/// The active-duty pool. Matches are only ever recorded on one of these.
pub fn standard_map_pool() -> Vec<MapInfo>
{
    vec!(
        MapInfo::new(1, String::from("dust2"), String::from("Dust 2")),
        MapInfo::new(2, String::from("nuke"), String::from("Nuke")),
        MapInfo::new(3, String::from("inferno"), String::from("Inferno")),
        MapInfo::new(4, String::from("mirage"), String::from("Mirage")),
        MapInfo::new(5, String::from("ancient"), String::from("Ancient")),
        MapInfo::new(6, String::from("overpass"), String::from("Overpass")),
        MapInfo::new(7, String::from("train"), String::from("Train")),
        MapInfo::new(8, String::from("anubis"), String::from("Anubis")),
        MapInfo::new(9, String::from("vertigo"), String::from("Vertigo")),
    )
}

pub fn map_by_id(id: u32) -> Option<MapInfo>
{
    standard_map_pool().into_iter().find(|map| map.id == id)
}
