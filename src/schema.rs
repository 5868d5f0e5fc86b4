// src/schema.rs
//! Phase two: the output table.
//!
//! The column set is data-dependent. Type columns exist for every type label
//! the pull ever saw (first-seen order), and the category/mechanic columns are
//! the ten most frequent labels of the whole pull. None of that is known
//! before the last batch, so this only ever runs on a finished `PullOutput`.

use std::fmt;

use crate::config::consts::{EXPANSION_CATEGORY, TOP_N};
use crate::counters::Counters;
use crate::pull::PullOutput;
use crate::record::GameRecord;

const LEADING: [&str; 18] = [
    "bgg_id",
    "is_boardgame",
    "name",
    "name_coerced",
    "yearpublished",
    "shortdescription",
    "minplayers",
    "maxplayers",
    "playingtime",
    "minplaytime",
    "maxplaytime",
    "age",
    "suggested_playerage",
    "suggested_numplayers",
    "suggested_language",
    "num_ratings",
    "geek_rating",
    "num_types",
];
const TRAILING: [&str; 3] = ["averageweight", "long_description", "image_url"];

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

/// CSV rendering: `True`/`False` for flags, empty for null.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Float(x) => write!(f, "{x:?}"),
            Cell::Bool(true) => f.write_str("True"),
            Cell::Bool(false) => f.write_str("False"),
            Cell::Null => Ok(()),
        }
    }
}

impl From<Option<&String>> for Cell {
    fn from(v: Option<&String>) -> Self {
        v.map_or(Cell::Null, |s| Cell::Text(s.clone()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    pub columns: Vec<String>,
    pub type_labels: Vec<String>,
    pub category_columns: Vec<String>,
    pub mechanic_columns: Vec<String>,
}

impl Schema {
    pub fn assemble(counters: &Counters) -> Self {
        let type_labels: Vec<String> = counters.types.labels().map(String::from).collect();
        let category_columns = counters.categories.top(TOP_N, &[EXPANSION_CATEGORY]);
        let mechanic_columns = counters.mechanics.top(TOP_N, &[]);

        let mut columns: Vec<String> = LEADING.iter().map(|c| s!(*c)).collect();
        for label in &type_labels {
            columns.push(label.clone());
            columns.push(join!(label, "_avg_rating"));
            columns.push(join!(label, "_rank"));
        }
        columns.push(s!("num_categories"));
        columns.extend(category_columns.iter().cloned());
        columns.push(s!("num_mechanics"));
        columns.extend(mechanic_columns.iter().cloned());
        columns.extend(TRAILING.iter().map(|c| s!(*c)));

        Self { columns, type_labels, category_columns, mechanic_columns }
    }

    /// One row, same width and order as `columns`.
    pub fn row(&self, rec: &GameRecord) -> Vec<Cell> {
        let mut row = Vec::with_capacity(self.columns.len());
        row.extend([
            Cell::Text(rec.id.clone()),
            Cell::Bool(rec.is_boardgame),
            Cell::Text(rec.name.clone()),
            Cell::Text(rec.name_coerced.clone()),
            Cell::Int(rec.year_published.into()),
            Cell::Text(rec.short_description.clone()),
            Cell::Int(rec.min_players.into()),
            Cell::Int(rec.max_players.into()),
            Cell::Int(rec.playing_time.into()),
            Cell::Int(rec.min_play_time.into()),
            Cell::Int(rec.max_play_time.into()),
            Cell::Int(rec.age.into()),
            Cell::from(rec.suggested_playerage.as_ref()),
            Cell::from(rec.suggested_numplayers.as_ref()),
            Cell::from(rec.suggested_language.as_ref()),
            Cell::Int(rec.num_ratings.into()),
            Cell::Float(rec.geek_rating),
            Cell::Int(rec.num_types.into()),
        ]);

        for label in &self.type_labels {
            match rec.type_rank(label) {
                Some(tr) => row.extend([
                    Cell::Bool(true),
                    tr.rating.map_or(Cell::Null, Cell::Float),
                    tr.rank.map_or(Cell::Null, |r| Cell::Int(r.into())),
                ]),
                None => row.extend([Cell::Bool(false), Cell::Bool(false), Cell::Bool(false)]),
            }
        }

        row.push(Cell::Int(rec.num_categories.into()));
        row.extend(self.category_columns.iter().map(|c| Cell::Bool(rec.has_category(c))));
        row.push(Cell::Int(rec.num_mechanics.into()));
        row.extend(self.mechanic_columns.iter().map(|m| Cell::Bool(rec.has_mechanic(m))));

        row.extend([
            Cell::Float(rec.average_weight),
            Cell::Text(rec.long_description.clone()),
            Cell::Text(rec.image_url.clone()),
        ]);
        row
    }
}

/// Schema plus one row per record, in pull order.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub schema: Schema,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn build(out: &PullOutput) -> Self {
        let schema = Schema::assemble(&out.counters);
        let rows = out.records.iter().map(|r| schema.row(r)).collect();
        Self { schema, rows }
    }
}
