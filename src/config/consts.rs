// src/config/consts.rs
use std::time::Duration;

// Net config
pub const API_BASE: &str = "https://boardgamegeek.com/xmlapi/boardgame/";
pub const API_QUERY: &str = "?stats=1";
pub const USER_AGENT: &str = "bgg_pull/0.3";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// Batching
pub const DEFAULT_LIMIT: usize = 5000;
pub const DEFAULT_BATCH_SIZE: usize = 100;
pub const MAX_BATCH_SIZE: usize = 500; // exclusive; the API misbehaves at 500+
pub const DEFAULT_START: usize = 1;
pub const MIN_PAUSE: Duration = Duration::from_secs(5); // be polite

// Normalization
pub const NO_DESCRIPTION: &str = "[No Description]";
pub const BASE_TYPE: &str = "Board Game";
pub const NOT_RANKED: &str = "Not Ranked";
pub const EXPANSION_CATEGORY: &str = "Expansion for Base-game";
pub const NON_GAME_CATEGORIES: [&str; 3] = [EXPANSION_CATEGORY, "Fan Expansion", "Game System"];

// Schema
pub const TOP_N: usize = 10;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const GAMES_STEM: &str = "all_games";
pub const COUNTS_STEM: &str = "_counts";

// Local logs
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "pull.log";
