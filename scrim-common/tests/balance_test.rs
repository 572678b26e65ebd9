extern crate rand;
extern crate scrim_common;

use rand::SeedableRng;
use rand::rngs::StdRng;

use scrim_common::balance::{balance_teams, cross_team_swaps, greedy_assignment, intra_team_swaps,
                            random_draw, snake_draft, Metric, PlayerScore, TeamPartition};
use scrim_common::model::Player;

use std::collections::HashSet;

fn rng() -> StdRng
{
    StdRng::seed_from_u64(1337)
}

fn player_with_kd(id: u32, kd: f64) -> Player
{
    let mut player = Player::new(id, format!("Player{}", id));
    player.kd = kd;

    player
}

fn squad(kds: &[f64]) -> Vec<Player>
{
    kds.iter()
        .enumerate()
        .map(|(index, kd)| player_with_kd(index as u32 + 1, *kd))
        .collect()
}

fn scored(values: &[f64]) -> Vec<PlayerScore>
{
    values.iter()
        .enumerate()
        .map(|(index, value)| PlayerScore {
            value: *value,
            player: player_with_kd(index as u32 + 1, *value),
        })
        .collect()
}

fn ids_of(team: &[PlayerScore]) -> HashSet<u32>
{
    team.iter().map(|entry| entry.player.id).collect()
}

#[test]
fn five_a_side_pools_split_five_and_five()
{
    let players = squad(&[1.2, 0.8, 2.4, 0.3, 1.0, 1.7, 0.9, 1.1, 0.5, 3.0]);

    let partition = balance_teams(players, Metric::Kd, &mut rng()).unwrap();

    assert_eq!(5, partition.team_a.len());
    assert_eq!(5, partition.team_b.len());
}

#[test]
fn teams_partition_the_pool_exactly()
{
    let players = squad(&[1.2, 0.8, 2.4, 0.3, 1.0, 1.7, 0.9, 1.1, 0.5, 3.0]);
    let expected: HashSet<u32> = players.iter().map(|player| player.id).collect();

    let partition = balance_teams(players, Metric::Kd, &mut rng()).unwrap();

    let team_a = ids_of(&partition.team_a);
    let team_b = ids_of(&partition.team_b);

    assert!(team_a.is_disjoint(&team_b));

    let drawn: HashSet<u32> = team_a.union(&team_b).cloned().collect();
    assert_eq!(expected, drawn);
}

#[test]
fn never_worse_than_the_snake_draft_alone()
{
    let kds = [1.2, 0.8, 2.4, 0.3, 1.0, 1.7, 0.9, 1.1, 0.5, 3.0];

    let mut descending = kds.to_vec();
    descending.sort_by(|left, right| right.partial_cmp(left).unwrap());

    let mut sum_a: f64 = 0.0;
    let mut sum_b: f64 = 0.0;
    for (index, kd) in descending.iter().enumerate()
    {
        if index % 2 == 0
        {
            sum_a += *kd;
        }
        else
        {
            sum_b += *kd;
        }
    }
    let snake_balance = (sum_a - sum_b).abs();

    let partition = balance_teams(squad(&kds), Metric::Kd, &mut rng()).unwrap();

    assert!(partition.balance <= snake_balance);
}

#[test]
fn seeded_runs_are_identical()
{
    let kds = [1.2, 0.8, 2.4, 0.3, 1.0, 1.7, 0.9, 1.1, 0.5, 3.0];

    let first = balance_teams(squad(&kds), Metric::Kd, &mut StdRng::seed_from_u64(7)).unwrap();
    let second = balance_teams(squad(&kds), Metric::Kd, &mut StdRng::seed_from_u64(7)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn uniform_pool_balances_to_zero()
{
    let players = squad(&[5.0; 10]);

    let partition = balance_teams(players, Metric::Kd, &mut rng()).unwrap();

    assert_eq!(0.0, partition.balance);
}

#[test]
fn two_tier_pool_bottoms_out_at_nine()
{
    /* Five tens and five ones: with both sides forced to five players the closest
       split is three tens and two ones (32) against the rest (23). Anything below
       nine would mean a team ended up with the wrong number of players. */
    let players = squad(&[10.0, 10.0, 10.0, 10.0, 10.0, 1.0, 1.0, 1.0, 1.0, 1.0]);

    let partition = balance_teams(players, Metric::Kd, &mut rng()).unwrap();

    assert_eq!(9.0, partition.balance);
}

#[test]
fn garbage_metric_counts_as_zero()
{
    let mut players = squad(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
    players[9].kd = ::std::f64::NAN;

    let partition = balance_teams(players, Metric::Kd, &mut rng()).unwrap();

    /* Nine ones and a zero across two teams of five can never split closer than one. */
    assert_eq!(1.0, partition.balance);
}

#[test]
fn odd_pools_are_rejected()
{
    let players = squad(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);

    assert!(balance_teams(players, Metric::Kd, &mut rng()).is_err());
}

#[test]
fn empty_pools_are_rejected()
{
    assert!(balance_teams(Vec::new(), Metric::Kd, &mut rng()).is_err());
}

#[test]
fn any_even_pool_size_works()
{
    let players = squad(&[4.0, 3.0, 2.0, 1.0]);

    let partition = balance_teams(players, Metric::Kd, &mut rng()).unwrap();

    assert_eq!(2, partition.team_a.len());
    assert_eq!(2, partition.team_b.len());
    /* 4+1 against 3+2 is reachable, so the ensemble must land on zero. */
    assert_eq!(0.0, partition.balance);
}

#[test]
fn damage_metric_balances_on_damage()
{
    let mut players = squad(&[0.0; 10]);
    for (index, player) in players.iter_mut().enumerate()
    {
        player.total_damage = 1000 + index as i64;
    }

    let partition = balance_teams(players, Metric::Damage, &mut rng()).unwrap();

    /* Sum is 10045; an odd total over two integer-valued teams can't do better than one. */
    assert_eq!(1.0, partition.balance);
}

#[test]
fn metric_parses_the_two_known_names()
{
    assert_eq!(Metric::Kd, "kd".parse::<Metric>().unwrap());
    assert_eq!(Metric::Damage, "damage".parse::<Metric>().unwrap());
    assert!("headshots".parse::<Metric>().is_err());
}

#[test]
fn snake_draft_alternates_over_the_sorted_pool()
{
    let partition = snake_draft(&scored(&[4.0, 3.0, 2.0, 1.0]));

    assert_eq!(vec!(4.0, 2.0), partition.team_a.iter().map(|entry| entry.value).collect::<Vec<f64>>());
    assert_eq!(vec!(3.0, 1.0), partition.team_b.iter().map(|entry| entry.value).collect::<Vec<f64>>());
    assert_eq!(2.0, partition.balance);
}

#[test]
fn greedy_assignment_is_deterministic_on_ties()
{
    /* 4 and 3 seed the teams; 1 then joins B for a perfect tie on the remaining
       comparisons, and 2 goes to A because A is always evaluated first. */
    let partition = greedy_assignment(&scored(&[4.0, 3.0, 2.0, 1.0]));

    assert_eq!(vec!(4.0, 2.0), partition.team_a.iter().map(|entry| entry.value).collect::<Vec<f64>>());
    assert_eq!(vec!(3.0, 1.0), partition.team_b.iter().map(|entry| entry.value).collect::<Vec<f64>>());
}

#[test]
fn cross_team_swaps_fix_a_fixable_draft()
{
    let start = snake_draft(&scored(&[4.0, 3.0, 2.0, 1.0]));
    assert_eq!(2.0, start.balance);

    let improved = cross_team_swaps(&start);

    /* Trading the four for the three lands both teams on five. */
    assert_eq!(0.0, improved.balance);
}

#[test]
fn intra_team_swaps_never_change_membership()
{
    let start = snake_draft(&scored(&[4.0, 3.0, 2.0, 1.0]));

    let polished = intra_team_swaps(&start);

    assert_eq!(ids_of(&start.team_a), ids_of(&polished.team_a));
    assert_eq!(ids_of(&start.team_b), ids_of(&polished.team_b));
    assert_eq!(start.balance, polished.balance);
}

#[test]
fn random_draw_deals_two_full_teams()
{
    let pool: Vec<u32> = (1..13).collect();

    let (team_a, team_b) = random_draw(pool.clone(), 5, &mut rng()).unwrap();

    assert_eq!(5, team_a.len());
    assert_eq!(5, team_b.len());

    let drawn: HashSet<u32> = team_a.iter().chain(team_b.iter()).cloned().collect();
    assert_eq!(10, drawn.len());
    assert!(drawn.iter().all(|id| pool.contains(id)));
}

#[test]
fn random_draw_needs_a_big_enough_pool()
{
    let pool: Vec<u32> = (1..9).collect();

    assert!(random_draw(pool, 5, &mut rng()).is_err());
}

#[test]
fn partitions_compare_by_value()
{
    let left = TeamPartition {
        team_a: scored(&[2.0]),
        team_b: scored(&[1.0]),
        balance: 1.0,
    };
    let right = left.clone();

    assert_eq!(left, right);
}
