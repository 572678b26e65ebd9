use ::model::{MatchOutcome, MatchRecord, Player, PlayerLine};

use std::collections::BTreeMap;

/// Folds one match line into a player's career record and refreshes the derived
/// fields.
///
/// # Arguments
/// * `player` - the career record to update
/// * `line` - the player's row from the match being recorded
pub fn apply_line(player: &mut Player, line: &PlayerLine)
{
    player.games += 1;

    match line.result
    {
        MatchOutcome::Win => player.wins += 1,
        MatchOutcome::Loss => player.loses += 1,
        MatchOutcome::Draw => player.draws += 1,
    }

    player.total_kills += line.kills;
    player.total_deaths += line.deaths;
    player.total_damage += line.damage;

    recompute_derived(player);
}

/// Exact inverse of `apply_line`, used when a recorded match is deleted.
///
/// Counters floor at zero so replaying a delete against an already-reverted record
/// cannot drive anything negative.
pub fn revert_line(player: &mut Player, line: &PlayerLine)
{
    player.games = player.games.saturating_sub(1);

    match line.result
    {
        MatchOutcome::Win => player.wins = player.wins.saturating_sub(1),
        MatchOutcome::Loss => player.loses = player.loses.saturating_sub(1),
        MatchOutcome::Draw => player.draws = player.draws.saturating_sub(1),
    }

    player.total_kills = (player.total_kills - line.kills).max(0);
    player.total_deaths = (player.total_deaths - line.deaths).max(0);
    player.total_damage = (player.total_damage - line.damage).max(0);

    recompute_derived(player);
}

/// Recomputes `kd` and the per-game averages from the running totals.
///
/// Rounding matches what the roster always displayed: averages to one decimal
/// (damage to none), kd to two. With no deaths on record the kd is the raw kill
/// count, not infinity.
pub fn recompute_derived(player: &mut Player)
{
    if player.games > 0
    {
        let games = player.games as f64;

        player.ave_kills = round_to(player.total_kills as f64 / games, 1);
        player.ave_deaths = round_to(player.total_deaths as f64 / games, 1);
        player.ave_damage = round_to(player.total_damage as f64 / games, 0);
    }
    else
    {
        player.ave_kills = 0.0;
        player.ave_deaths = 0.0;
        player.ave_damage = 0.0;
    }

    player.kd = if player.total_deaths > 0
    {
        round_to(player.total_kills as f64 / player.total_deaths as f64, 2)
    }
    else
    {
        player.total_kills as f64
    };
}

fn round_to(value: f64, places: u32) -> f64
{
    let scale = 10f64.powi(places as i32);

    (value * scale).round() / scale
}

/// One player's aggregate showing over a set of matches on a single map.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, new)]
pub struct MapPlayerStats
{
    pub player_id: u32,
    pub player_name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_games: u32,
    pub winrate: f64,
    pub avg_kd: f64,
    pub avg_damage: f64,
    pub total_kills: i64,
    pub total_deaths: i64,
    pub total_damage: i64,
}

/// Everything the map panel shows: per-player aggregates plus the headline picks.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MapSummary
{
    pub total_matches: u32,
    pub best_player: Option<MapPlayerStats>,
    pub highest_kd: Option<MapPlayerStats>,
    pub worst_player: Option<MapPlayerStats>,
    pub most_damage: Option<MapPlayerStats>,
    pub most_kills: Option<MapPlayerStats>,
    pub most_deaths: Option<MapPlayerStats>,
    pub all_players: Vec<MapPlayerStats>,
}

#[derive(Default)]
struct MapAccumulator
{
    name: String,
    wins: u32,
    losses: u32,
    draws: u32,
    games: u32,
    kills: i64,
    deaths: i64,
    damage: i64,
}

/// Aggregates a set of match records (all from the same map) into the per-player
/// table and the headline picks the map panel shows.
///
/// # Arguments
/// * `matches` - every recorded match on the map in question
///
/// # Return
/// * The summary; `all_players` is sorted by winrate then avg kd, both descending
pub fn map_summary(matches: &[MatchRecord]) -> MapSummary
{
    /* BTreeMap so two runs over the same records aggregate in the same order. */
    let mut accumulators: BTreeMap<u32, MapAccumulator> = BTreeMap::new();

    for record in matches
    {
        for line in record.team1.iter().chain(record.team2.iter())
        {
            let accumulator = accumulators.entry(line.player_id).or_insert_with(MapAccumulator::default);

            if accumulator.name.is_empty()
            {
                accumulator.name = line.name.clone();
            }

            match line.result
            {
                MatchOutcome::Win => accumulator.wins += 1,
                MatchOutcome::Loss => accumulator.losses += 1,
                MatchOutcome::Draw => accumulator.draws += 1,
            }

            accumulator.games += 1;
            accumulator.kills += line.kills;
            accumulator.deaths += line.deaths;
            accumulator.damage += line.damage;
        }
    }

    let mut all_players: Vec<MapPlayerStats> = accumulators.into_iter()
        .map(|(player_id, accumulator)| into_player_stats(player_id, accumulator))
        .collect();

    all_players.sort_by(|left, right|
    {
        right.winrate.partial_cmp(&left.winrate)
            .unwrap_or(::std::cmp::Ordering::Equal)
            .then(right.avg_kd.partial_cmp(&left.avg_kd).unwrap_or(::std::cmp::Ordering::Equal))
    });

    let best_player = all_players.first().cloned();

    /* Players who never died have no meaningful ratio and sit this headline out. */
    let died: Vec<MapPlayerStats> = all_players.iter()
        .filter(|player| player.total_deaths > 0)
        .cloned()
        .collect();
    let highest_kd = pick(&died, |candidate, best| candidate.avg_kd > best.avg_kd);

    let worst_player = pick(&all_players, |candidate, best|
    {
        candidate.winrate < best.winrate
            || (candidate.winrate == best.winrate && candidate.wins < best.wins)
            || (candidate.winrate == best.winrate && candidate.wins == best.wins && candidate.total_games < best.total_games)
    });

    let most_damage = pick(&all_players, |candidate, best| candidate.avg_damage > best.avg_damage);
    let most_kills = pick(&all_players, |candidate, best| candidate.total_kills > best.total_kills);
    let most_deaths = pick(&all_players, |candidate, best| candidate.total_deaths > best.total_deaths);

    MapSummary {
        total_matches: matches.len() as u32,
        best_player,
        highest_kd,
        worst_player,
        most_damage,
        most_kills,
        most_deaths,
        all_players,
    }
}

fn into_player_stats(player_id: u32, accumulator: MapAccumulator) -> MapPlayerStats
{
    let winrate = if accumulator.games > 0
    {
        round_to(accumulator.wins as f64 / accumulator.games as f64 * 100.0, 1)
    }
    else
    {
        0.0
    };

    let avg_kd = if accumulator.deaths > 0
    {
        round_to(accumulator.kills as f64 / accumulator.deaths as f64, 2)
    }
    else
    {
        accumulator.kills as f64
    };

    let avg_damage = if accumulator.games > 0
    {
        round_to(accumulator.damage as f64 / accumulator.games as f64, 0)
    }
    else
    {
        0.0
    };

    MapPlayerStats::new(
        player_id,
        accumulator.name,
        accumulator.wins,
        accumulator.losses,
        accumulator.draws,
        accumulator.games,
        winrate,
        avg_kd,
        avg_damage,
        accumulator.kills,
        accumulator.deaths,
        accumulator.damage,
    )
}

/* Strict comparisons throughout so the first qualifying player keeps a tied headline. */
fn pick<F>(players: &[MapPlayerStats], better: F) -> Option<MapPlayerStats>
    where F: Fn(&MapPlayerStats, &MapPlayerStats) -> bool
{
    let mut best: Option<&MapPlayerStats> = None;

    for candidate in players
    {
        best = match best
        {
            None => Some(candidate),
            Some(current) =>
            {
                if better(candidate, current)
                {
                    Some(candidate)
                }
                else
                {
                    Some(current)
                }
            },
        };
    }

    best.cloned()
}
