// src/specs/mod.rs
//! # Response “specs” module
//!
//! This module hosts the **shape-specific reading** of remote responses.
//! A spec knows *where the ground truth lives in the markup* and turns it into
//! a typed node, nothing more.
//!
//! ## What lives here
//! - **Pure markup reading** for the catalog XML API (`/xmlapi/boardgame/<ids>?stats=1`).
//! - **Typed nodes** (`GameNode`, `Poll`, `Statistics`, …) with named optional
//!   fields instead of free-form attribute lookups.
//!
//! ## What does **not** live here
//! - **Business rules** – poll tie-breaks, classification, required-field checks
//!   and number parsing all belong to `normalize`.
//! - **Fetching, pacing, counting** – see `pull` and `counters`.
//!
//! ## Typical call chain
//! ```text
//! pull::run       → Transport::fetch → specs::game::parse
//!                                   ↘  Vec<GameNode>
//!                   normalize::normalize (per non-inbound node)
//! ```
//!
//! ## Conventions & invariants
//! - A missing element or attribute is `None`, never an error; the normalizer
//!   decides what is required.
//! - Repeated sub-elements (polls, ranks, categories, mechanics) keep document order
//!   and keep duplicates.
//! - Only a body that is not XML at all fails here.
pub mod game;
