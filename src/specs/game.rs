// src/specs/game.rs
//! Reads one batch response of the catalog XML API.
//!
//! Shape (trimmed):
//! ```text
//! <boardgames>
//!   <boardgame objectid="13">
//!     <yearpublished>1995</yearpublished> <minplayers>3</minplayers> …
//!     <name primary="true" sortindex="1">CATAN</name>
//!     <description>…</description> <image>https://…</image>
//!     <boardgamecategory objectid="1021">Economic</boardgamecategory>
//!     <boardgamemechanic objectid="2072">Dice Rolling</boardgamemechanic>
//!     <poll name="suggested_numplayers" totalvotes="2000">
//!       <results numplayers="3"><result value="Best" numvotes="..."/>…</results>
//!     </poll>
//!     <statistics><ratings>
//!       <usersrated>…</usersrated> <average>…</average>
//!       <ranks><rank friendlyname="Board Game Rank" value="…" bayesaverage="…"/></ranks>
//!       <averageweight>…</averageweight>
//!     </ratings></statistics>
//!   </boardgame>
//!   <boardgame objectid="141023" inbound="true">…</boardgame>
//! </boardgames>
//! ```
//! The service sometimes slips `inbound="true"` nodes in next to the real
//! results; they are kept here (flagged) and dropped by the pull loop.

use roxmltree::{Document, Node};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GameNode {
    pub id: Option<String>,
    pub inbound: bool,
    /// Primary name only; alternate names are ignored.
    pub name: Option<String>,
    pub year_published: Option<String>,
    pub min_players: Option<String>,
    pub max_players: Option<String>,
    pub playing_time: Option<String>,
    pub min_play_time: Option<String>,
    pub max_play_time: Option<String>,
    pub age: Option<String>,
    pub polls: Vec<Poll>,
    pub statistics: Option<Statistics>,
    pub categories: Vec<String>,
    pub mechanics: Vec<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl GameNode {
    pub fn poll(&self, name: &str) -> Option<&Poll> {
        self.polls.iter().find(|p| p.name == name)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Poll {
    pub name: String,
    pub total_votes: Option<String>,
    pub groups: Vec<PollGroup>,
}

/// One `<results>` block. Only the player-count poll sets `num_players`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PollGroup {
    pub num_players: Option<String>,
    pub results: Vec<PollResult>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PollResult {
    pub value: Option<String>,
    pub num_votes: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statistics {
    pub users_rated: Option<String>,
    pub average: Option<String>,
    pub average_weight: Option<String>,
    pub ranks: Vec<RankEntry>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RankEntry {
    pub friendly_name: Option<String>,
    pub value: Option<String>,
    pub bayes_average: Option<String>,
}

/// Every top-level `<boardgame>` in document order, inbound ones included.
pub fn parse(raw: &str) -> Result<Vec<GameNode>, roxmltree::Error> {
    let doc = Document::parse(raw)?;
    Ok(doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("boardgame"))
        .map(read_game)
        .collect())
}

fn read_game(game: Node) -> GameNode {
    GameNode {
        id: attr(game, "objectid"),
        inbound: game.attribute("inbound").is_some(),
        name: game
            .descendants()
            .find(|n| n.has_tag_name("name") && n.attribute("primary") == Some("true"))
            .map(text),
        year_published: first_text(game, "yearpublished"),
        min_players: first_text(game, "minplayers"),
        max_players: first_text(game, "maxplayers"),
        playing_time: first_text(game, "playingtime"),
        min_play_time: first_text(game, "minplaytime"),
        max_play_time: first_text(game, "maxplaytime"),
        age: first_text(game, "age"),
        polls: all(game, "poll").map(read_poll).collect(),
        statistics: first(game, "statistics").map(read_statistics),
        categories: all(game, "boardgamecategory").map(text).collect(),
        mechanics: all(game, "boardgamemechanic").map(text).collect(),
        description: first_text(game, "description"),
        image: first_text(game, "image"),
    }
}

fn read_poll(poll: Node) -> Poll {
    Poll {
        name: attr(poll, "name").unwrap_or_default(),
        total_votes: attr(poll, "totalvotes"),
        groups: poll
            .children()
            .filter(|n| n.has_tag_name("results"))
            .map(|group| PollGroup {
                num_players: attr(group, "numplayers"),
                results: group
                    .children()
                    .filter(|n| n.has_tag_name("result"))
                    .map(|r| PollResult {
                        value: attr(r, "value"),
                        num_votes: attr(r, "numvotes"),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn read_statistics(stats: Node) -> Statistics {
    Statistics {
        users_rated: first_text(stats, "usersrated"),
        average: first_text(stats, "average"),
        average_weight: first_text(stats, "averageweight"),
        ranks: all(stats, "rank")
            .map(|r| RankEntry {
                friendly_name: attr(r, "friendlyname"),
                value: attr(r, "value"),
                bayes_average: attr(r, "bayesaverage"),
            })
            .collect(),
    }
}

/* ---------------- helpers ---------------- */

fn attr(node: Node, name: &str) -> Option<String> {
    node.attribute(name).map(String::from)
}

/// All descendant text, entities decoded.
fn text(node: Node) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

fn first<'a, 'i>(node: Node<'a, 'i>, tag: &str) -> Option<Node<'a, 'i>> {
    node.descendants().skip(1).find(|n| n.has_tag_name(tag))
}

fn first_text(node: Node, tag: &str) -> Option<String> {
    first(node, tag).map(text)
}

fn all<'a, 'i>(node: Node<'a, 'i>, tag: &'a str) -> impl Iterator<Item = Node<'a, 'i>> {
    node.descendants().skip(1).filter(move |n| n.has_tag_name(tag))
}
