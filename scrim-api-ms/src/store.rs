use mongodb::bson::doc;
use mongodb::options::FindOneOptions;
use mongodb::sync::Collection;

use scrim_common::errors::Result;
use scrim_common::model::{MatchRecord, Player};

use std::collections::HashMap;

pub fn all_players(players: &Collection<Player>) -> Result<Vec<Player>>
{
    let mut found = Vec::new();
    for player in players.find(None, None)?
    {
        found.push(player?);
    }

    found.sort_by_key(|player| player.id);

    Ok(found)
}

/// Resolves a set of ids to their records, preserving the order of `ids`.
///
/// Unknown ids are skipped, so a shorter result than `ids` means the request named
/// players that are not on the roster.
pub fn players_by_ids(players: &Collection<Player>, ids: &[u32]) -> Result<Vec<Player>>
{
    let id_list: Vec<i64> = ids.iter().map(|id| *id as i64).collect();

    let mut by_id = HashMap::new();
    for player in players.find(doc!{"id": {"$in": id_list}}, None)?
    {
        let player = player?;
        by_id.insert(player.id, player);
    }

    let mut ordered = Vec::with_capacity(ids.len());
    for id in ids
    {
        if let Some(player) = by_id.remove(id)
        {
            ordered.push(player);
        }
    }

    Ok(ordered)
}

pub fn find_player(players: &Collection<Player>, id: u32) -> Result<Option<Player>>
{
    Ok(players.find_one(doc!{"id": id as i64}, None)?)
}

/* Roster ids are handed out sequentially; with one writer that is just max + 1. */
pub fn next_player_id(players: &Collection<Player>) -> Result<u32>
{
    let options = FindOneOptions::builder()
        .sort(doc!{"id": -1})
        .build();

    match players.find_one(None, options)?
    {
        Some(player) => Ok(player.id + 1),
        None => Ok(1),
    }
}

pub fn insert_player(players: &Collection<Player>, player: &Player) -> Result<()>
{
    players.insert_one(player, None)?;

    Ok(())
}

pub fn replace_player(players: &Collection<Player>, player: &Player) -> Result<()>
{
    players.replace_one(doc!{"id": player.id as i64}, player, None)?;

    Ok(())
}

pub fn delete_player(players: &Collection<Player>, id: u32) -> Result<bool>
{
    let result = players.delete_one(doc!{"id": id as i64}, None)?;

    Ok(result.deleted_count > 0)
}

/// Every recorded match, newest first.
pub fn all_matches(matches: &Collection<MatchRecord>) -> Result<Vec<MatchRecord>>
{
    let mut found = Vec::new();
    for record in matches.find(None, None)?
    {
        found.push(record?);
    }

    found.sort_by(|left, right| right.created_at.cmp(&left.created_at));

    Ok(found)
}

pub fn find_match(matches: &Collection<MatchRecord>, id: u32) -> Result<Option<MatchRecord>>
{
    Ok(matches.find_one(doc!{"id": id as i64}, None)?)
}

pub fn next_match_id(matches: &Collection<MatchRecord>) -> Result<u32>
{
    let options = FindOneOptions::builder()
        .sort(doc!{"id": -1})
        .build();

    match matches.find_one(None, options)?
    {
        Some(record) => Ok(record.id + 1),
        None => Ok(1),
    }
}

pub fn insert_match(matches: &Collection<MatchRecord>, record: &MatchRecord) -> Result<()>
{
    matches.insert_one(record, None)?;

    Ok(())
}

pub fn delete_match(matches: &Collection<MatchRecord>, id: u32) -> Result<bool>
{
    let result = matches.delete_one(doc!{"id": id as i64}, None)?;

    Ok(result.deleted_count > 0)
}

pub fn matches_on_map(matches: &Collection<MatchRecord>, map_id: u32) -> Result<Vec<MatchRecord>>
{
    let mut found = Vec::new();
    for record in matches.find(doc!{"map_id": map_id as i64}, None)?
    {
        found.push(record?);
    }

    Ok(found)
}

pub fn count_matches_on_map(matches: &Collection<MatchRecord>, map_id: u32) -> Result<u64>
{
    Ok(matches.count_documents(doc!{"map_id": map_id as i64}, None)?)
}
