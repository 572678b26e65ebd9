#[macro_use]
extern crate rocket;

#[macro_use]
extern crate log;
extern crate env_logger;

use env_logger::{Builder, Target};

use chrono::Utc;

use mongodb::IndexModel;
use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::sync::{Client, Collection};

use rand::thread_rng;

use rocket::State;
use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::Json;

use scrim_common::api::{ErrorResponse, MessageResponse};
use scrim_common::api::draw::{BalanceDrawRequest, RandomDrawRequest, TeamsResponse};
use scrim_common::api::maps::{MapRef, MapStatsResponse, MapWithCount};
use scrim_common::api::matches::{MatchCreatedResponse, MatchDetailTeams, MatchDetailsResponse,
                                 MatchSubmission, MatchSummary, SubmittedLine};
use scrim_common::api::players::{CreatePlayerRequest, UpdatePlayerRequest};
use scrim_common::balance::{self, Metric};
use scrim_common::model::{self, MatchRecord, Player, PlayerLine};
use scrim_common::stats;

use std::collections::HashMap;
use std::env;

mod store;

struct RosterConfig
{
    players: Collection<Player>,
    matches: Collection<MatchRecord>,
}

type ApiResult<T> = Result<Json<T>, Custom<Json<ErrorResponse>>>;

fn bad_request(message: &str) -> Custom<Json<ErrorResponse>>
{
    Custom(Status::BadRequest, Json(ErrorResponse::new(message)))
}

fn not_found(message: &str) -> Custom<Json<ErrorResponse>>
{
    Custom(Status::NotFound, Json(ErrorResponse::new(message)))
}

fn internal(message: &str) -> Custom<Json<ErrorResponse>>
{
    Custom(Status::InternalServerError, Json(ErrorResponse::new(message)))
}

/* The store is a collaborator that may simply be down; that is a 503, not a 500. */
fn unavailable() -> Custom<Json<ErrorResponse>>
{
    Custom(Status::ServiceUnavailable, Json(ErrorResponse::new("database unavailable")))
}

#[get("/players")]
fn list_players(config: &State<RosterConfig>) -> ApiResult<Vec<Player>>
{
    match store::all_players(&config.players)
    {
        Ok(players) => Ok(Json(players)),
        Err(error) =>
        {
            error!("Failed to fetch players because {}", error);
            Err(unavailable())
        },
    }
}

#[post("/players", data = "<request>")]
fn create_player(config: &State<RosterConfig>, request: Json<CreatePlayerRequest>) -> ApiResult<Player>
{
    let request = request.into_inner();
    if request.name.is_empty()
    {
        return Err(bad_request("name required"));
    }

    let id = match store::next_player_id(&config.players)
    {
        Ok(id) => id,
        Err(error) =>
        {
            error!("Failed to allocate a player id because {}", error);
            return Err(internal("failed to create player"));
        },
    };

    let mut player = Player::new(id, request.name);
    player.kd = request.kd;
    player.total_damage = request.total_damage;

    match store::insert_player(&config.players, &player)
    {
        Ok(_) => Ok(Json(player)),
        Err(error) =>
        {
            error!("Failed to create player because {}", error);
            Err(internal("failed to create player"))
        },
    }
}

#[put("/players/<id>", data = "<request>")]
fn update_player(config: &State<RosterConfig>, id: u32, request: Json<UpdatePlayerRequest>) -> ApiResult<Player>
{
    let request = request.into_inner();
    if request.name.is_empty()
    {
        return Err(bad_request("name required"));
    }

    let mut player = match store::find_player(&config.players, id)
    {
        Ok(Some(player)) => player,
        Ok(None) => return Err(not_found("player not found")),
        Err(error) =>
        {
            error!("Failed to fetch player: {} because {}", id, error);
            return Err(internal("failed to update player"));
        },
    };

    player.name = request.name;
    player.kd = request.kd;
    player.total_damage = request.total_damage;

    match store::replace_player(&config.players, &player)
    {
        Ok(_) => Ok(Json(player)),
        Err(error) =>
        {
            error!("Failed to update player: {} because {}", id, error);
            Err(internal("failed to update player"))
        },
    }
}

#[delete("/players/<id>")]
fn delete_player(config: &State<RosterConfig>, id: u32) -> ApiResult<MessageResponse>
{
    match store::delete_player(&config.players, id)
    {
        Ok(true) => Ok(Json(MessageResponse::new("player deleted successfully"))),
        Ok(false) => Err(not_found("player not found")),
        Err(error) =>
        {
            error!("Failed to delete player: {} because {}", id, error);
            Err(internal("failed to delete player"))
        },
    }
}

#[get("/matches")]
fn list_matches(config: &State<RosterConfig>) -> ApiResult<Vec<MatchSummary>>
{
    let records = match store::all_matches(&config.matches)
    {
        Ok(records) => records,
        Err(error) =>
        {
            error!("Failed to fetch matches because {}", error);
            return Err(internal("failed to fetch matches"));
        },
    };

    let summaries = records.into_iter()
        .map(|record|
        {
            let map_name = map_display_name(record.map_id);
            let player_count = (record.team1.len() + record.team2.len()) as u32;

            MatchSummary::new(record.id, record.created_at, record.map_id, map_name, player_count)
        })
        .collect();

    Ok(Json(summaries))
}

#[get("/matches/<id>")]
fn match_details(config: &State<RosterConfig>, id: u32) -> ApiResult<MatchDetailsResponse>
{
    match store::find_match(&config.matches, id)
    {
        Ok(Some(record)) =>
        {
            let map_name = map_display_name(record.map_id);

            Ok(Json(MatchDetailsResponse::new(
                record.id,
                record.created_at,
                record.map_id,
                map_name,
                MatchDetailTeams::new(record.team1, record.team2),
            )))
        },
        Ok(None) => Err(not_found("match not found")),
        Err(error) =>
        {
            error!("Failed to fetch match: {} because {}", id, error);
            Err(internal("failed to fetch match details"))
        },
    }
}

/// Records a finished match and folds every line into the career stats.
#[post("/matches", data = "<request>")]
fn create_match(config: &State<RosterConfig>, request: Json<MatchSubmission>) -> ApiResult<MatchCreatedResponse>
{
    let request = request.into_inner();

    if request.teams.team1.len() != balance::TEAM_SIZE || request.teams.team2.len() != balance::TEAM_SIZE
    {
        return Err(bad_request("each team must have exactly 5 players"));
    }

    let mut ids = Vec::with_capacity(2 * balance::TEAM_SIZE);
    for submitted in request.teams.team1.iter().chain(request.teams.team2.iter())
    {
        ids.push(submitted.id);
    }

    let resolved = match store::players_by_ids(&config.players, &ids)
    {
        Ok(resolved) => resolved,
        Err(error) =>
        {
            error!("Failed to resolve match players because {}", error);
            return Err(internal("failed to save match"));
        },
    };
    /* A short result means an unknown id, or one player listed on both sides. */
    if resolved.len() != ids.len()
    {
        return Err(bad_request("unknown or duplicate player id"));
    }

    let mut by_id: HashMap<u32, Player> = resolved.into_iter()
        .map(|player| (player.id, player))
        .collect();

    let team1 = to_lines(&request.teams.team1, &by_id);
    let team2 = to_lines(&request.teams.team2, &by_id);

    let match_id = match store::next_match_id(&config.matches)
    {
        Ok(id) => id,
        Err(error) =>
        {
            error!("Failed to allocate a match id because {}", error);
            return Err(internal("failed to save match"));
        },
    };

    let record = MatchRecord::new(match_id, Utc::now(), request.map_id.unwrap_or(1), team1, team2);

    if let Err(error) = store::insert_match(&config.matches, &record)
    {
        error!("Failed to save match because {}", error);
        return Err(internal("failed to save match"));
    }

    for line in record.team1.iter().chain(record.team2.iter())
    {
        if let Some(player) = by_id.get_mut(&line.player_id)
        {
            stats::apply_line(player, line);

            match store::replace_player(&config.players, player)
            {
                Ok(_) => trace!("Updated stats for player: {}", player.name),
                Err(error) => error!("Failed to update stats for player: {} because {}", player.name, error),
            }
        }
    }

    Ok(Json(MatchCreatedResponse::new(true, match_id, String::from("Match saved successfully"))))
}

/// Deletes a recorded match and backs its lines out of the career stats.
#[delete("/matches/<id>")]
fn delete_match(config: &State<RosterConfig>, id: u32) -> ApiResult<MessageResponse>
{
    let record = match store::find_match(&config.matches, id)
    {
        Ok(Some(record)) => record,
        Ok(None) => return Err(not_found("match not found")),
        Err(error) =>
        {
            error!("Failed to fetch match: {} because {}", id, error);
            return Err(internal("failed to delete match"));
        },
    };

    for line in record.team1.iter().chain(record.team2.iter())
    {
        match store::find_player(&config.players, line.player_id)
        {
            Ok(Some(mut player)) =>
            {
                stats::revert_line(&mut player, line);

                match store::replace_player(&config.players, &player)
                {
                    Ok(_) => trace!("Reverted stats for player: {}", player.name),
                    Err(error) => error!("Failed to revert stats for player: {} because {}", player.name, error),
                }
            },
            Ok(None) => warn!("Match: {} names player: {} who left the roster", id, line.player_id),
            Err(error) => error!("Failed to fetch player: {} because {}", line.player_id, error),
        }
    }

    match store::delete_match(&config.matches, id)
    {
        Ok(_) => Ok(Json(MessageResponse::new("match deleted successfully"))),
        Err(error) =>
        {
            error!("Failed to delete match: {} because {}", id, error);
            Err(internal("failed to delete match"))
        },
    }
}

#[get("/maps")]
fn list_maps(config: &State<RosterConfig>) -> ApiResult<Vec<MapWithCount>>
{
    let mut maps = Vec::new();

    for map in model::standard_map_pool()
    {
        let count = match store::count_matches_on_map(&config.matches, map.id)
        {
            Ok(count) => count,
            Err(error) =>
            {
                error!("Failed to count matches on map: {} because {}", map.name, error);
                return Err(internal("failed to fetch maps"));
            },
        };

        maps.push(MapWithCount::new(map.id, map.display_name, map.name, count as u32));
    }

    Ok(Json(maps))
}

/// The per-map panel: aggregates and headline picks over every match on one map.
#[get("/maps/<map_id>/stats")]
fn map_stats(config: &State<RosterConfig>, map_id: u32) -> ApiResult<MapStatsResponse>
{
    let map = match model::map_by_id(map_id)
    {
        Some(map) => map,
        None => return Err(not_found("map not found")),
    };

    let records = match store::matches_on_map(&config.matches, map_id)
    {
        Ok(records) => records,
        Err(error) =>
        {
            error!("Failed to fetch matches on map: {} because {}", map.name, error);
            return Err(internal("failed to fetch map statistics"));
        },
    };

    let summary = stats::map_summary(&records);

    Ok(Json(MapStatsResponse::new(
        MapRef::from_info(&map),
        summary.total_matches,
        summary.best_player,
        summary.highest_kd,
        summary.worst_player,
        summary.most_damage,
        summary.most_kills,
        summary.most_deaths,
        summary.all_players,
    )))
}

/// Deals two teams purely at random from the selected pool.
#[post("/draw/random", data = "<request>")]
fn draw_random(config: &State<RosterConfig>, request: Json<RandomDrawRequest>) -> ApiResult<TeamsResponse>
{
    let request = request.into_inner();
    if request.player_ids.len() < 2 * balance::TEAM_SIZE
    {
        return Err(bad_request("playerIds array of at least 10 required"));
    }

    let (drawn_a, drawn_b) = match balance::random_draw(request.player_ids, balance::TEAM_SIZE, &mut thread_rng())
    {
        Ok(teams) => teams,
        Err(error) => return Err(bad_request(&format!("{}", error))),
    };

    let team_a = match store::players_by_ids(&config.players, &drawn_a)
    {
        Ok(team) => team,
        Err(error) =>
        {
            error!("Failed to resolve drawn players because {}", error);
            return Err(unavailable());
        },
    };
    let team_b = match store::players_by_ids(&config.players, &drawn_b)
    {
        Ok(team) => team,
        Err(error) =>
        {
            error!("Failed to resolve drawn players because {}", error);
            return Err(unavailable());
        },
    };

    if team_a.len() != drawn_a.len() || team_b.len() != drawn_b.len()
    {
        return Err(bad_request("unknown player id"));
    }

    Ok(Json(TeamsResponse::new(team_a, team_b)))
}

/// Resolves the selected players and hands them to the balancing engine.
///
/// Validation happens out here: the metric string and the pool size are checked
/// before the engine ever runs, and the engine itself stays a pure function.
#[post("/draw/balance", data = "<request>")]
fn draw_balance(config: &State<RosterConfig>, request: Json<BalanceDrawRequest>) -> ApiResult<TeamsResponse>
{
    let request = request.into_inner();
    if request.player_ids.len() < 2 * balance::TEAM_SIZE
    {
        return Err(bad_request("playerIds array of at least 10 required"));
    }

    let metric: Metric = match request.metric.parse()
    {
        Ok(metric) => metric,
        Err(_) => return Err(bad_request("metric must be 'kd' or 'damage'")),
    };

    let mut ids = request.player_ids;
    ids.truncate(2 * balance::TEAM_SIZE);

    let players = match store::players_by_ids(&config.players, &ids)
    {
        Ok(players) => players,
        Err(error) =>
        {
            error!("Failed to resolve players for balancing because {}", error);
            return Err(unavailable());
        },
    };
    if players.len() != ids.len()
    {
        return Err(bad_request("unknown player id"));
    }

    let partition = match balance::balance_teams(players, metric, &mut thread_rng())
    {
        Ok(partition) => partition,
        Err(error) => return Err(bad_request(&format!("{}", error))),
    };

    let team_a: Vec<Player> = partition.team_a.into_iter().map(|scored| scored.player).collect();
    let team_b: Vec<Player> = partition.team_b.into_iter().map(|scored| scored.player).collect();

    Ok(Json(TeamsResponse::new(team_a, team_b)))
}

fn map_display_name(map_id: u32) -> String
{
    match model::map_by_id(map_id)
    {
        Some(map) => map.display_name,
        None => String::from("Unknown"),
    }
}

fn to_lines(submitted: &[SubmittedLine], by_id: &HashMap<u32, Player>) -> Vec<PlayerLine>
{
    submitted.iter()
        .map(|entry|
        {
            let name = match by_id.get(&entry.id)
            {
                Some(player) => player.name.clone(),
                None => String::new(),
            };

            PlayerLine::new(entry.id, name, entry.kills, entry.deaths, entry.assists,
                            entry.headshot_percentage, entry.damage, entry.result)
        })
        .collect()
}

#[rocket::main]
async fn main()
{
    /* Log */
    let mut builder = Builder::new();
    builder.target(Target::Stdout);
    if env::var("RUST_LOG").is_ok() {
        builder.parse(&env::var("RUST_LOG").unwrap());
    }
    builder.init();

    /* Mongo */
    let mongo_host = env::var("MONGO_HOST")
        .unwrap_or(String::from("localhost"));

    let mongo_port = match env::var("MONGO_PORT")
    {
        Ok(port) => port.parse::<u16>().unwrap_or(27017),
        Err(_) => 27017,
    };

    let mongo_db = env::var("MONGO_DB")
        .unwrap_or(String::from("scrim-board"));
    let players_collection = env::var("MONGO_PLAYERS_COLLECTION")
        .unwrap_or(String::from("players"));
    let matches_collection = env::var("MONGO_MATCHES_COLLECTION")
        .unwrap_or(String::from("matches"));

    let client = Client::with_uri_str(&format!("mongodb://{}:{}", mongo_host, mongo_port))
        .unwrap();
    let database = client.database(&mongo_db);

    let players = database.collection::<Player>(&players_collection);
    let matches = database.collection::<MatchRecord>(&matches_collection);

    /* Id-set lookups are the hot path for draws; the connection may still be cold
       here, so a failed index build is only a warning. */
    let player_id_index = IndexModel::builder()
        .keys(doc!{"id": 1})
        .options(IndexOptions::builder().name(String::from("player_id")).unique(true).build())
        .build();
    match players.create_index(player_id_index, None)
    {
        Ok(_) => {},
        Err(error) => warn!("Failed to create player id index: {}", error),
    }

    let config = RosterConfig {
        players,
        matches,
    };

    let launched = rocket::build()
        .mount("/api", routes![list_players, create_player, update_player, delete_player,
                               list_matches, match_details, create_match, delete_match,
                               list_maps, map_stats, draw_random, draw_balance])
        .manage(config)
        .launch()
        .await;

    if let Err(error) = launched
    {
        error!("Rocket stopped because {}", error);
    }
}
