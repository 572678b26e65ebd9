extern crate chrono;
extern crate scrim_common;

use chrono::{TimeZone, Utc};

use scrim_common::model::{MatchOutcome, MatchRecord, Player, PlayerLine};
use scrim_common::stats::{apply_line, map_summary, recompute_derived, revert_line};

fn line(player_id: u32, kills: i64, deaths: i64, damage: i64, result: MatchOutcome) -> PlayerLine
{
    PlayerLine::new(player_id, format!("Player{}", player_id), kills, deaths, 2, 40.0, damage, result)
}

fn record(id: u32, map_id: u32, team1: Vec<PlayerLine>, team2: Vec<PlayerLine>) -> MatchRecord
{
    MatchRecord::new(id, Utc.ymd(2024, 3, 1).and_hms(20, 0, 0), map_id, team1, team2)
}

#[test]
fn applying_a_line_moves_every_counter()
{
    let mut player = Player::new(1, "Player1");

    apply_line(&mut player, &line(1, 21, 14, 2450, MatchOutcome::Win));

    assert_eq!(1, player.games);
    assert_eq!(1, player.wins);
    assert_eq!(0, player.loses);
    assert_eq!(21, player.total_kills);
    assert_eq!(14, player.total_deaths);
    assert_eq!(2450, player.total_damage);
    assert_eq!(1.5, player.kd);
    assert_eq!(21.0, player.ave_kills);
    assert_eq!(14.0, player.ave_deaths);
    assert_eq!(2450.0, player.ave_damage);
}

#[test]
fn apply_then_revert_round_trips()
{
    let mut player = Player::new(3, "Player3");
    apply_line(&mut player, &line(3, 18, 12, 2100, MatchOutcome::Win));

    let before = player.clone();
    let extra = line(3, 7, 20, 1300, MatchOutcome::Loss);

    apply_line(&mut player, &extra);
    revert_line(&mut player, &extra);

    assert_eq!(before, player);
}

#[test]
fn kd_rounds_to_two_decimals()
{
    let mut player = Player::new(1, "Player1");

    apply_line(&mut player, &line(1, 7, 3, 900, MatchOutcome::Loss));

    assert_eq!(2.33, player.kd);
}

#[test]
fn kd_without_deaths_is_the_raw_kill_count()
{
    let mut player = Player::new(1, "Player1");

    apply_line(&mut player, &line(1, 7, 0, 900, MatchOutcome::Win));

    assert_eq!(7.0, player.kd);
}

#[test]
fn averages_round_per_field()
{
    let mut player = Player::new(1, "Player1");

    apply_line(&mut player, &line(1, 7, 4, 1203, MatchOutcome::Win));
    apply_line(&mut player, &line(1, 6, 5, 1200, MatchOutcome::Loss));

    /* Kills and deaths keep one decimal, damage keeps none. */
    assert_eq!(6.5, player.ave_kills);
    assert_eq!(4.5, player.ave_deaths);
    assert_eq!(1202.0, player.ave_damage);
}

#[test]
fn reverting_an_empty_record_floors_at_zero()
{
    let mut player = Player::new(1, "Player1");

    revert_line(&mut player, &line(1, 9, 9, 900, MatchOutcome::Win));

    assert_eq!(0, player.games);
    assert_eq!(0, player.wins);
    assert_eq!(0, player.total_kills);
    assert_eq!(0.0, player.kd);
}

#[test]
fn derived_fields_zero_out_with_no_games()
{
    let mut player = Player::new(1, "Player1");
    player.ave_kills = 12.0;
    player.kd = 3.0;

    recompute_derived(&mut player);

    assert_eq!(0.0, player.ave_kills);
    assert_eq!(0.0, player.kd);
}

#[test]
fn map_summary_aggregates_across_matches()
{
    let matches = vec!(
        record(1, 1,
               vec!(line(1, 20, 10, 2000, MatchOutcome::Win), line(2, 10, 15, 1200, MatchOutcome::Win)),
               vec!(line(3, 12, 18, 1500, MatchOutcome::Loss))),
        record(2, 1,
               vec!(line(1, 10, 10, 1000, MatchOutcome::Loss)),
               vec!(line(3, 25, 5, 2600, MatchOutcome::Win))),
    );

    let summary = map_summary(&matches);

    assert_eq!(2, summary.total_matches);
    assert_eq!(3, summary.all_players.len());

    let one = summary.all_players.iter().find(|stats| stats.player_id == 1).unwrap();
    assert_eq!(2, one.total_games);
    assert_eq!(1, one.wins);
    assert_eq!(50.0, one.winrate);
    assert_eq!(1.5, one.avg_kd);
    assert_eq!(1500.0, one.avg_damage);
    assert_eq!(30, one.total_kills);
}

#[test]
fn map_summary_picks_the_headlines()
{
    let matches = vec!(
        record(1, 1,
               vec!(line(1, 20, 10, 2000, MatchOutcome::Win), line(2, 10, 15, 1200, MatchOutcome::Win)),
               vec!(line(3, 12, 18, 1500, MatchOutcome::Loss))),
        record(2, 1,
               vec!(line(1, 10, 10, 1000, MatchOutcome::Loss)),
               vec!(line(3, 25, 5, 2600, MatchOutcome::Win))),
    );

    let summary = map_summary(&matches);

    /* Player 2 is the only one at 100% winrate; player 3 leads on kills and deaths. */
    assert_eq!(2, summary.best_player.unwrap().player_id);
    assert_eq!(3, summary.most_kills.unwrap().player_id);
    assert_eq!(3, summary.most_deaths.unwrap().player_id);
    assert_eq!(3, summary.highest_kd.unwrap().player_id);
    assert_eq!(3, summary.worst_player.unwrap().player_id);
}

#[test]
fn map_summary_of_nothing_is_empty()
{
    let summary = map_summary(&[]);

    assert_eq!(0, summary.total_matches);
    assert!(summary.best_player.is_none());
    assert!(summary.all_players.is_empty());
}
