// src/normalize/mod.rs
//! `GameNode` → `GameRecord`.
//!
//! Everything the record needs is required: a node missing its statistics
//! block, a name, or carrying a non-numeric count is a fault for the whole
//! pull. The only soft spots are the polls (no votes → `None`) and unranked
//! types (`"Not Ranked"` → `None`).

pub mod polls;

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::consts::{BASE_TYPE, NON_GAME_CATEGORIES, NOT_RANKED, NO_DESCRIPTION};
use crate::core::sanitize::{canonical_name, trim_markup_padding};
use crate::error::NodeFault;
use crate::record::{GameRecord, TypeRank};
use crate::specs::game::{GameNode, RankEntry, Statistics};

// "Strategy Game Rank" → "Strategy Game"
static RANK_LABEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.+)\sRank").unwrap());

/// Build the record for one (non-inbound) node.
/// `short_text` is the listing blurb for this id, if the id list had one.
pub fn normalize(node: &GameNode, short_text: Option<&str>) -> Result<GameRecord, NodeFault> {
    let id = node
        .id
        .as_deref()
        .ok_or(NodeFault::MissingAttribute { element: "boardgame", attr: "objectid" })?;
    let name = node.name.clone().ok_or(NodeFault::MissingElement("name[primary=true]"))?;

    let stats = node.statistics.as_ref().ok_or(NodeFault::MissingElement("statistics"))?;
    let TypeRanks { num_types, ranks: type_ranks, labels: rank_labels } = type_ranks(stats)?;

    let categories = node.categories.clone();
    let is_boardgame = !categories.iter().any(|c| NON_GAME_CATEGORIES.contains(&c.as_str()));
    let mechanics = node.mechanics.clone();

    Ok(GameRecord {
        id: s!(id),
        is_boardgame,
        name_coerced: canonical_name(&name),
        name,
        year_published: number(&node.year_published, "yearpublished")?,
        short_description: s!(short_text.unwrap_or(NO_DESCRIPTION)),
        min_players: number(&node.min_players, "minplayers")?,
        max_players: number(&node.max_players, "maxplayers")?,
        playing_time: number(&node.playing_time, "playingtime")?,
        min_play_time: number(&node.min_play_time, "minplaytime")?,
        max_play_time: number(&node.max_play_time, "maxplaytime")?,
        age: number(&node.age, "age")?,
        suggested_playerage: polls::suggested_player_age(node)?,
        suggested_numplayers: polls::suggested_num_players(node)?,
        suggested_language: polls::suggested_language(node)?,
        num_ratings: number(&stats.users_rated, "usersrated")?,
        geek_rating: number(&stats.average, "average")?,
        num_types,
        type_ranks,
        rank_labels,
        num_categories: categories.len() as u32,
        categories,
        num_mechanics: mechanics.len() as u32,
        mechanics,
        average_weight: number(&stats.average_weight, "averageweight")?,
        long_description: required(&node.description, "description")?.to_owned(),
        image_url: trim_markup_padding(required(&node.image, "image")?),
    })
}

/// Strip the trailing " Rank" from a friendly name.
pub fn type_label(friendly_name: &str) -> Result<String, NodeFault> {
    RANK_LABEL
        .captures(friendly_name)
        .and_then(|c| c.get(1))
        .map(|m| s!(m.as_str()))
        .ok_or_else(|| NodeFault::RankLabel(s!(friendly_name)))
}

struct TypeRanks {
    num_types: u32,
    ranks: Vec<(String, TypeRank)>,
    labels: Vec<String>,
}

/// Every rank entry other than the baseline counts toward the type count.
/// A label seen twice keeps its first position and takes the later value;
/// `labels` still lists it twice.
fn type_ranks(stats: &Statistics) -> Result<TypeRanks, NodeFault> {
    let mut num_types = 0u32;
    let mut ranks: Vec<(String, TypeRank)> = Vec::with_capacity(stats.ranks.len());
    let mut labels = Vec::with_capacity(stats.ranks.len());

    for entry in &stats.ranks {
        let label = type_label(rank_attr(&entry.friendly_name, "friendlyname")?)?;
        if label != BASE_TYPE {
            num_types += 1;
        }
        let rank = read_rank(entry)?;
        labels.push(label.clone());
        match ranks.iter_mut().find(|(l, _)| *l == label) {
            Some(slot) => slot.1 = rank,
            None => ranks.push((label, rank)),
        }
    }
    Ok(TypeRanks { num_types, ranks, labels })
}

fn read_rank(entry: &RankEntry) -> Result<TypeRank, NodeFault> {
    Ok(TypeRank {
        rating: ranked(rank_attr(&entry.bayes_average, "bayesaverage")?, "bayesaverage")?,
        rank: ranked(rank_attr(&entry.value, "value")?, "value")?,
    })
}

fn rank_attr<'a>(v: &'a Option<String>, attr: &'static str) -> Result<&'a str, NodeFault> {
    v.as_deref().ok_or(NodeFault::MissingAttribute { element: "rank", attr })
}

fn ranked<T: FromStr>(raw: &str, field: &'static str) -> Result<Option<T>, NodeFault> {
    if raw.trim() == NOT_RANKED {
        return Ok(None);
    }
    parse_num(field, raw).map(Some)
}

/* ---------------- helpers ---------------- */

pub(crate) fn parse_num<T: FromStr>(field: &'static str, raw: &str) -> Result<T, NodeFault> {
    raw.trim()
        .parse()
        .map_err(|_| NodeFault::BadNumber { field, value: s!(raw) })
}

fn required<'a>(v: &'a Option<String>, element: &'static str) -> Result<&'a str, NodeFault> {
    v.as_deref().ok_or(NodeFault::MissingElement(element))
}

fn number<T: FromStr>(v: &Option<String>, element: &'static str) -> Result<T, NodeFault> {
    parse_num(element, required(v, element)?)
}
