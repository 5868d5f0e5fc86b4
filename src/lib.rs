// src/lib.rs

#[macro_use]
pub mod macros;

pub mod config;
pub mod core;
pub mod specs;

pub mod counters;
pub mod csv;
pub mod error;
pub mod export;
pub mod ids;
pub mod log;
pub mod normalize;
pub mod progress;
pub mod pull;
pub mod record;
pub mod schema;

#[cfg(feature = "cli")]
pub mod cli;
