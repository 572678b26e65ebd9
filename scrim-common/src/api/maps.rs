use ::model::MapInfo;
use ::stats::MapPlayerStats;

/// One row of `GET /api/maps`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MapWithCount
{
    pub id: u32,
    pub map_name: String,
    pub map_slug: String,
    pub match_count: u32,
}

/// The map reference embedded in the stats panel response.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MapRef
{
    pub id: u32,
    pub map_name: String,
    pub map_slug: String,
}

impl MapRef
{
    pub fn from_info(info: &MapInfo) -> MapRef
    {
        MapRef {
            id: info.id,
            map_name: info.display_name.clone(),
            map_slug: info.name.clone(),
        }
    }
}

/// Body of `GET /api/maps/<id>/stats`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MapStatsResponse
{
    pub map: MapRef,
    pub total_matches: u32,
    pub best_player: Option<MapPlayerStats>,
    pub highest_kd: Option<MapPlayerStats>,
    pub worst_player: Option<MapPlayerStats>,
    pub most_damage: Option<MapPlayerStats>,
    pub most_kills: Option<MapPlayerStats>,
    pub most_deaths: Option<MapPlayerStats>,
    pub all_players: Vec<MapPlayerStats>,
}
