use rand::Rng;
use rand::seq::SliceRandom;

use ::errors::{Error, Result};
use ::model::Player;

use std::cmp::Ordering;
use std::str::FromStr;

/// Players per side. The service always balances two full sides, i.e. 10 candidates.
pub const TEAM_SIZE: usize = 5;

/// Number of shuffle-and-split trials the sampling strategy runs per call.
pub const SAMPLING_TRIALS: usize = 200;

/// Upper bound on full cross-team swap scans. Together with `SAMPLING_TRIALS` this is
/// the only thing keeping worst-case latency flat, so don't make it configurable.
pub const SWAP_SCAN_LIMIT: usize = 20;

/// The numeric dimension teams are balanced on.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Metric
{
    Kd,
    Damage,
}

impl Metric
{
    /// Resolves this metric's value for a player.
    ///
    /// A missing or garbage stat (NaN from a bad import, for instance) counts as 0
    /// rather than failing; an incomplete record must never sink a whole draw.
    pub fn value(&self, player: &Player) -> f64
    {
        let value = match *self
        {
            Metric::Kd => player.kd,
            Metric::Damage => player.total_damage as f64,
        };

        if value.is_finite()
        {
            value
        }
        else
        {
            0.0
        }
    }
}

impl FromStr for Metric
{
    type Err = Error;

    fn from_str(raw: &str) -> ::std::result::Result<Metric, Error>
    {
        match raw
        {
            "kd" => Ok(Metric::Kd),
            "damage" => Ok(Metric::Damage),
            _ => bail!("metric must be 'kd' or 'damage' but was: {}", raw),
        }
    }
}

/// One candidate with the metric already resolved. The full record rides along so the
/// caller can serialize the final teams without a second store lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerScore
{
    pub value: f64,
    pub player: Player,
}

/// A complete assignment of every candidate to one of two equal-size teams.
///
/// `balance` is |sum(team_a) - sum(team_b)|; lower is strictly better. Ordering inside
/// a team carries no meaning but is kept stable from construction so repeated runs with
/// the same seed compare equal.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamPartition
{
    pub team_a: Vec<PlayerScore>,
    pub team_b: Vec<PlayerScore>,
    pub balance: f64,
}

impl TeamPartition
{
    fn from_teams(team_a: Vec<PlayerScore>, team_b: Vec<PlayerScore>) -> TeamPartition
    {
        let balance = (team_sum(&team_a) - team_sum(&team_b)).abs();

        TeamPartition {
            team_a,
            team_b,
            balance,
        }
    }
}

fn team_sum(team: &[PlayerScore]) -> f64
{
    team.iter().map(|scored| scored.value).sum()
}

/// Alternating draft over the descending-sorted candidates: index 0 to team A,
/// 1 to team B, 2 to team A, and so on.
///
/// # Arguments
/// * `sorted` - candidates sorted descending by metric value
pub fn snake_draft(sorted: &[PlayerScore]) -> TeamPartition
{
    let mut team_a = Vec::with_capacity(sorted.len() / 2);
    let mut team_b = Vec::with_capacity(sorted.len() / 2);

    for (index, scored) in sorted.iter().enumerate()
    {
        if index % 2 == 0
        {
            team_a.push(scored.clone());
        }
        else
        {
            team_b.push(scored.clone());
        }
    }

    TeamPartition::from_teams(team_a, team_b)
}

/// Greedy fill: seed team A with the best candidate and team B with the second best,
/// then repeatedly place whichever (candidate, team) pair leaves the two sums closest.
///
/// Candidates are tried in descending order and, for each candidate, team A strictly
/// before team B. Only a strictly smaller imbalance wins, so on a tie the earlier
/// pair keeps the slot. Keep that evaluation order; changing it changes the output
/// on tied inputs.
///
/// # Arguments
/// * `sorted` - candidates sorted descending by metric value, at least two of them
pub fn greedy_assignment(sorted: &[PlayerScore]) -> TeamPartition
{
    let mut remaining: Vec<PlayerScore> = sorted.to_vec();

    let mut team_a = vec!(remaining.remove(0));
    let mut team_b = vec!(remaining.remove(0));

    while !remaining.is_empty()
    {
        let sum_a = team_sum(&team_a);
        let sum_b = team_sum(&team_b);

        let mut best: Option<(usize, bool)> = None;
        let mut best_difference = ::std::f64::INFINITY;

        for (index, candidate) in remaining.iter().enumerate()
        {
            let difference_a = ((sum_a + candidate.value) - sum_b).abs();
            if difference_a < best_difference
            {
                best_difference = difference_a;
                best = Some((index, true));
            }

            let difference_b = (sum_a - (sum_b + candidate.value)).abs();
            if difference_b < best_difference
            {
                best_difference = difference_b;
                best = Some((index, false));
            }
        }

        match best
        {
            Some((index, to_team_a)) =>
            {
                let candidate = remaining.remove(index);
                if to_team_a
                {
                    team_a.push(candidate);
                }
                else
                {
                    team_b.push(candidate);
                }
            },
            /* Cannot happen with finite values, but the fallback keeps the pathological
               case from spinning: hand the next candidate to the emptier team. */
            None =>
            {
                let candidate = remaining.remove(0);
                if team_a.len() <= team_b.len()
                {
                    team_a.push(candidate);
                }
                else
                {
                    team_b.push(candidate);
                }
            },
        }
    }

    TeamPartition::from_teams(team_a, team_b)
}

/// Randomized sampling: `SAMPLING_TRIALS` independent shuffle-and-split trials,
/// keeping the single best split seen.
///
/// # Arguments
/// * `players` - the candidate pool, any order, non-empty
/// * `rng` - random source; inject a seeded one for reproducible output
pub fn random_sampling<R>(players: &[PlayerScore], rng: &mut R) -> TeamPartition
    where R: Rng
{
    let mut pool = players.to_vec();
    let half = pool.len() / 2;

    pool.shuffle(rng);
    let mut best = TeamPartition::from_teams(pool[..half].to_vec(), pool[half..].to_vec());

    for _ in 1..SAMPLING_TRIALS
    {
        pool.shuffle(rng);
        let candidate = TeamPartition::from_teams(pool[..half].to_vec(), pool[half..].to_vec());

        if candidate.balance < best.balance
        {
            best = candidate;
        }
    }

    best
}

/// Local search over cross-team swaps.
///
/// Each scan snapshots the current best teams and tries all pairs (i in A, j in B);
/// an accepted swap must strictly beat the best balance seen so far, so the last
/// acceptance of a scan is that scan's best improving swap. Scans repeat until one
/// finds nothing or `SWAP_SCAN_LIMIT` is reached.
///
/// # Arguments
/// * `start` - the partition to improve on
pub fn cross_team_swaps(start: &TeamPartition) -> TeamPartition
{
    let mut best = start.clone();
    let mut improved = true;
    let mut scans = 0;

    while improved && scans < SWAP_SCAN_LIMIT
    {
        improved = false;
        scans += 1;

        let current_a = best.team_a.clone();
        let current_b = best.team_b.clone();

        for i in 0..current_a.len()
        {
            for j in 0..current_b.len()
            {
                let mut team_a = current_a.clone();
                let mut team_b = current_b.clone();
                ::std::mem::swap(&mut team_a[i], &mut team_b[j]);

                let candidate = TeamPartition::from_teams(team_a, team_b);
                if candidate.balance < best.balance
                {
                    best = candidate;
                    improved = true;
                }
            }
        }
    }

    best
}

/// Final single pass of swaps inside each team, team A first then team B.
///
/// A within-team swap cannot move the sums in exact arithmetic; this pass exists to
/// mop up float-summation-order residue left behind by the cross-team search and is
/// deliberately not iterated.
///
/// # Arguments
/// * `start` - the partition to improve on
pub fn intra_team_swaps(start: &TeamPartition) -> TeamPartition
{
    let mut best = start.clone();

    for i in 0..best.team_a.len()
    {
        for j in (i + 1)..best.team_a.len()
        {
            let mut team_a = best.team_a.clone();
            team_a.swap(i, j);

            let candidate = TeamPartition::from_teams(team_a, best.team_b.clone());
            if candidate.balance < best.balance
            {
                best = candidate;
            }
        }
    }

    for i in 0..best.team_b.len()
    {
        for j in (i + 1)..best.team_b.len()
        {
            let mut team_b = best.team_b.clone();
            team_b.swap(i, j);

            let candidate = TeamPartition::from_teams(best.team_a.clone(), team_b);
            if candidate.balance < best.balance
            {
                best = candidate;
            }
        }
    }

    best
}

/// Splits the given players into two teams of equal size with career metric sums as
/// close as each other as the strategy ensemble can manage.
///
/// Runs the snake draft, the greedy fill, and the randomized sampling as independent
/// candidates, then polishes the best of them with the two swap searches. Candidates
/// only ever replace the running best on a strictly smaller imbalance, so ties go to
/// the earliest strategy and a seeded `rng` makes the whole call reproducible.
///
/// # Arguments
/// * `players` - the full candidate pool; its length must be even and non-zero
/// * `metric` - which career stat to balance on
/// * `rng` - random source for the sampling strategy
///
/// # Return
/// * The best `TeamPartition` found; its teams partition `players` exactly
pub fn balance_teams<R>(players: Vec<Player>, metric: Metric, rng: &mut R) -> Result<TeamPartition>
    where R: Rng
{
    if players.is_empty() || players.len() % 2 != 0
    {
        bail!("balancing needs a positive even number of players but was given: {}", players.len());
    }

    let mut scored: Vec<PlayerScore> = players.into_iter()
        .map(|player| PlayerScore { value: metric.value(&player), player: player })
        .collect();

    /* Descending by metric; the draft and the greedy seeding both rely on this order. */
    scored.sort_by(|left, right| right.value.partial_cmp(&left.value).unwrap_or(Ordering::Equal));

    let mut best = snake_draft(&scored);
    trace!("snake draft imbalance: {}", best.balance);

    let candidate = greedy_assignment(&scored);
    trace!("greedy fill imbalance: {}", candidate.balance);
    if candidate.balance < best.balance
    {
        best = candidate;
    }

    let candidate = random_sampling(&scored, rng);
    trace!("sampling imbalance: {}", candidate.balance);
    if candidate.balance < best.balance
    {
        best = candidate;
    }

    let best = cross_team_swaps(&best);
    let best = intra_team_swaps(&best);

    debug!("balanced {} players on {:?}, final imbalance: {}", best.team_a.len() + best.team_b.len(), metric, best.balance);

    Ok(best)
}

/// Uniformly shuffles the pool, keeps the first `2 * team_size` entries, and deals
/// them into two teams. No balancing objective at all.
///
/// Generic over the element so callers can draw ids or full records alike.
///
/// # Arguments
/// * `pool` - at least `2 * team_size` entries
/// * `team_size` - players per side
/// * `rng` - random source
///
/// # Return
/// * The two drawn teams, `team_size` entries each
pub fn random_draw<T, R>(pool: Vec<T>, team_size: usize, rng: &mut R) -> Result<(Vec<T>, Vec<T>)>
    where R: Rng
{
    if pool.len() < 2 * team_size
    {
        bail!("a draw needs at least {} players but was given: {}", 2 * team_size, pool.len());
    }

    let mut drawn = pool;
    drawn.shuffle(rng);
    drawn.truncate(2 * team_size);

    let team_b = drawn.split_off(team_size);

    Ok((drawn, team_b))
}
