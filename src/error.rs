// src/error.rs
//! Error taxonomy for a pull.
//!
//! Everything in here is fatal: a run that returns one of these produced no
//! usable output. Business-rule edge cases (zero-vote polls, empty label
//! lists, duplicate ids) are handled by policy and never show up here.

use std::io;
use std::ops::RangeInclusive;

use thiserror::Error;

/// Failure talking to the remote catalog.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },
}

/// A required piece of one game node is missing or unreadable.
#[derive(Debug, Error, PartialEq)]
pub enum NodeFault {
    #[error("missing element <{0}>")]
    MissingElement(&'static str),
    #[error("missing attribute `{attr}` on <{element}>")]
    MissingAttribute { element: &'static str, attr: &'static str },
    #[error("field `{field}` is not a number: {value:?}")]
    BadNumber { field: &'static str, value: String },
    #[error("rank name {0:?} has no \" Rank\" suffix")]
    RankLabel(String),
}

#[derive(Debug, Error)]
pub enum PullError {
    #[error("invalid pull options: {0}")]
    Options(String),

    #[error("batch {batch} (IDs {}-{}): {source}", .range.start(), .range.end())]
    Transport {
        batch: usize,
        range: RangeInclusive<usize>,
        #[source]
        source: TransportError,
    },

    #[error("batch {batch} (IDs {}-{}): response is not well-formed XML: {source}", .range.start(), .range.end())]
    Markup {
        batch: usize,
        range: RangeInclusive<usize>,
        #[source]
        source: roxmltree::Error,
    },

    #[error("batch {batch}: game {id}: {fault}")]
    Node {
        batch: usize,
        id: String,
        #[source]
        fault: NodeFault,
    },

    #[error("identifier list: {0}")]
    Ids(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PullError {
    /// Id of the game that aborted the run, when the fault is per-node.
    pub fn game_id(&self) -> Option<&str> {
        match self {
            PullError::Node { id, .. } => Some(id),
            _ => None,
        }
    }

    /// 1-based batch ordinal the fault happened in, if any.
    pub fn batch(&self) -> Option<usize> {
        match self {
            PullError::Transport { batch, .. }
            | PullError::Markup { batch, .. }
            | PullError::Node { batch, .. } => Some(*batch),
            _ => None,
        }
    }
}
