// src/record.rs
use serde::{Serialize, Serializer};

/// One normalized catalog entry. Built once by `normalize`, never mutated after.
///
/// Serialized field names follow the files the pull has always produced
/// (`yearpublished`, `geek_rating`, …) and `bgg_type_info` maps each label to
/// a `[rating, rank]` pair, so downstream readers keep working.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameRecord {
    #[serde(rename = "bgg_id")]
    pub id: String,
    pub is_boardgame: bool,
    pub name: String,
    pub name_coerced: String,
    #[serde(rename = "yearpublished")]
    pub year_published: i32,
    #[serde(rename = "shortdescription")]
    pub short_description: String,
    #[serde(rename = "minplayers")]
    pub min_players: u32,
    #[serde(rename = "maxplayers")]
    pub max_players: u32,
    #[serde(rename = "playingtime")]
    pub playing_time: u32,
    #[serde(rename = "minplaytime")]
    pub min_play_time: u32,
    #[serde(rename = "maxplaytime")]
    pub max_play_time: u32,
    pub age: u32,

    // Poll outcomes; null when nobody voted, and then left out of the JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_playerage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_numplayers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_language: Option<String>,

    pub num_ratings: u32,
    pub geek_rating: f64,
    /// Type labels other than the "Board Game" baseline.
    pub num_types: u32,
    #[serde(rename = "bgg_type_info", serialize_with = "ordered_map")]
    pub type_ranks: Vec<(String, TypeRank)>,
    /// One label per rank entry, repeats included. Feeds the type counter.
    #[serde(skip)]
    pub rank_labels: Vec<String>,
    pub num_categories: u32,
    pub categories: Vec<String>,
    pub num_mechanics: u32,
    pub mechanics: Vec<String>,
    #[serde(rename = "averageweight")]
    pub average_weight: f64,
    pub long_description: String,
    pub image_url: String,
}

/// Sub-rating and sub-rank for one type label. `None` means "Not Ranked".
/// Serialized as a two-element `[rating, rank]` array.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(into = "(Option<f64>, Option<u32>)")]
pub struct TypeRank {
    pub rating: Option<f64>,
    pub rank: Option<u32>,
}

impl From<TypeRank> for (Option<f64>, Option<u32>) {
    fn from(t: TypeRank) -> Self {
        (t.rating, t.rank)
    }
}

impl GameRecord {
    pub fn type_rank(&self, label: &str) -> Option<&TypeRank> {
        self.type_ranks.iter().find(|(l, _)| l == label).map(|(_, r)| r)
    }

    pub fn has_category(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c == label)
    }

    pub fn has_mechanic(&self, label: &str) -> bool {
        self.mechanics.iter().any(|m| m == label)
    }
}

// Keeps first-seen label order in the JSON object.
fn ordered_map<S: Serializer>(entries: &[(String, TypeRank)], ser: S) -> Result<S::Ok, S::Error> {
    ser.collect_map(entries.iter().map(|(k, v)| (k, v)))
}
