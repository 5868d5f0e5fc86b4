// src/normalize/polls.rs
//! Crowd-sourced polls → one value each.
//!
//! Every poll reports `(option, votes)` pairs. Nobody voting means no answer.
//! Otherwise the options are walked in document order keeping a running best,
//! and the poll decides what a tie does:
//!
//! | poll                    | compare | on a tie                                   |
//! |-------------------------|---------|--------------------------------------------|
//! | suggested player age    | `>`     | earlier option stays (the lower age)       |
//! | suggested player count  | `>=`    | later option wins (the larger count)       |
//! | language dependence     | `>=`    | later option wins (the higher dependence)  |
//!
//! The asymmetry is long-standing output behavior; keep it unless every
//! consumer of the files agrees to change.

use crate::error::NodeFault;
use crate::specs::game::{GameNode, Poll, PollGroup};

use super::parse_num;

pub const PLAYER_AGE: &str = "suggested_playerage";
pub const NUM_PLAYERS: &str = "suggested_numplayers";
pub const LANGUAGE: &str = "language_dependence";

const BEST: &str = "Best";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreak {
    /// Strictly more votes needed to replace the current best.
    KeepEarlier,
    /// Equal votes replace the current best.
    PreferLater,
}

/// Running-best walk over `(option, votes)`.
/// The first option always takes the lead, even with zero votes.
pub fn resolve<'a, I>(options: I, tie: TieBreak) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let mut best: Option<(&str, u64)> = None;

    for (option, votes) in options {
        let wins = match (best, tie) {
            (None, _) => true,
            (Some((_, lead)), TieBreak::KeepEarlier) => votes > lead,
            (Some((_, lead)), TieBreak::PreferLater) => votes >= lead,
        };
        if wins {
            best = Some((option, votes));
        }
    }
    best.map(|(option, _)| option)
}

pub fn suggested_player_age(node: &GameNode) -> Result<Option<String>, NodeFault> {
    let poll = require_poll(node, PLAYER_AGE, "poll[suggested_playerage]")?;
    if total_votes(poll)? == 0 {
        return Ok(None);
    }
    let options = value_votes(first_group(poll)?)?;
    Ok(resolve(options.iter().map(|(o, v)| (o.as_str(), *v)), TieBreak::KeepEarlier).map(String::from))
}

/// Each `<results numplayers="N">` group is one option; its weight is the
/// number of "Best" votes.
pub fn suggested_num_players(node: &GameNode) -> Result<Option<String>, NodeFault> {
    let poll = require_poll(node, NUM_PLAYERS, "poll[suggested_numplayers]")?;
    if total_votes(poll)? == 0 {
        return Ok(None);
    }

    let mut options: Vec<(&str, u64)> = Vec::with_capacity(poll.groups.len());
    for group in &poll.groups {
        let players = group
            .num_players
            .as_deref()
            .ok_or(NodeFault::MissingAttribute { element: "results", attr: "numplayers" })?;
        let best = group
            .results
            .iter()
            .find(|r| r.value.as_deref() == Some(BEST))
            .ok_or(NodeFault::MissingElement("result[value=Best]"))?;
        let votes = best
            .num_votes
            .as_deref()
            .ok_or(NodeFault::MissingAttribute { element: "result", attr: "numvotes" })?;
        options.push((players, parse_num("numvotes", votes)?));
    }
    Ok(resolve(options, TieBreak::PreferLater).map(String::from))
}

pub fn suggested_language(node: &GameNode) -> Result<Option<String>, NodeFault> {
    let poll = require_poll(node, LANGUAGE, "poll[language_dependence]")?;
    if total_votes(poll)? == 0 {
        return Ok(None);
    }
    let options = value_votes(first_group(poll)?)?;
    Ok(resolve(options.iter().map(|(o, v)| (o.as_str(), *v)), TieBreak::PreferLater).map(String::from))
}

/* ---------------- helpers ---------------- */

fn require_poll<'n>(node: &'n GameNode, name: &str, what: &'static str) -> Result<&'n Poll, NodeFault> {
    node.poll(name).ok_or(NodeFault::MissingElement(what))
}

fn total_votes(poll: &Poll) -> Result<u64, NodeFault> {
    let raw = poll
        .total_votes
        .as_deref()
        .ok_or(NodeFault::MissingAttribute { element: "poll", attr: "totalvotes" })?;
    parse_num("totalvotes", raw)
}

fn first_group(poll: &Poll) -> Result<&PollGroup, NodeFault> {
    poll.groups.first().ok_or(NodeFault::MissingElement("results"))
}

fn value_votes(group: &PollGroup) -> Result<Vec<(String, u64)>, NodeFault> {
    group
        .results
        .iter()
        .map(|r| {
            let value = r
                .value
                .clone()
                .ok_or(NodeFault::MissingAttribute { element: "result", attr: "value" })?;
            let votes = r
                .num_votes
                .as_deref()
                .ok_or(NodeFault::MissingAttribute { element: "result", attr: "numvotes" })?;
            Ok((value, parse_num("numvotes", votes)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::game::PollResult;

    fn result(value: &str, votes: &str) -> PollResult {
        PollResult { value: Some(s!(value)), num_votes: Some(s!(votes)) }
    }

    fn value_poll(name: &str, total: &str, options: &[(&str, &str)]) -> Poll {
        Poll {
            name: s!(name),
            total_votes: Some(s!(total)),
            groups: vec![PollGroup {
                num_players: None,
                results: options.iter().map(|(v, n)| result(v, n)).collect(),
            }],
        }
    }

    fn players_poll(total: &str, options: &[(&str, &str)]) -> Poll {
        Poll {
            name: s!(NUM_PLAYERS),
            total_votes: Some(s!(total)),
            groups: options
                .iter()
                .map(|(players, best)| PollGroup {
                    num_players: Some(s!(*players)),
                    results: vec![result("Best", best), result("Recommended", "99")],
                })
                .collect(),
        }
    }

    fn node_with(polls: Vec<Poll>) -> GameNode {
        GameNode { polls, ..GameNode::default() }
    }

    #[test]
    fn age_tie_keeps_earlier_lower_age() {
        let node = node_with(vec![value_poll(PLAYER_AGE, "20", &[("5", "10"), ("8", "10")])]);
        assert_eq!(suggested_player_age(&node).unwrap().as_deref(), Some("5"));
    }

    #[test]
    fn age_takes_strict_maximum() {
        let node = node_with(vec![value_poll(PLAYER_AGE, "9", &[("6", "2"), ("8", "5"), ("10", "2")])]);
        assert_eq!(suggested_player_age(&node).unwrap().as_deref(), Some("8"));
    }

    #[test]
    fn player_count_tie_prefers_later_larger_count() {
        let node = node_with(vec![players_poll("20", &[("2", "10"), ("4", "10")])]);
        assert_eq!(suggested_num_players(&node).unwrap().as_deref(), Some("4"));
    }

    #[test]
    fn player_count_weighs_best_votes_only() {
        // "Recommended" carries 99 everywhere; only Best matters.
        let node = node_with(vec![players_poll("30", &[("3", "12"), ("4", "7"), ("4+", "1")])]);
        assert_eq!(suggested_num_players(&node).unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn language_tie_prefers_higher_dependence() {
        let node = node_with(vec![value_poll(
            LANGUAGE,
            "6",
            &[("No necessary in-game text", "3"), ("Some necessary text", "3"), ("Unplayable in another language", "0")],
        )]);
        assert_eq!(suggested_language(&node).unwrap().as_deref(), Some("Some necessary text"));
    }

    #[test]
    fn zero_votes_resolve_to_none() {
        let node = node_with(vec![
            value_poll(PLAYER_AGE, "0", &[("5", "0"), ("8", "0")]),
            players_poll("0", &[("2", "0")]),
            value_poll(LANGUAGE, "0", &[("No necessary in-game text", "0")]),
        ]);
        assert_eq!(suggested_player_age(&node).unwrap(), None);
        assert_eq!(suggested_num_players(&node).unwrap(), None);
        assert_eq!(suggested_language(&node).unwrap(), None);
    }

    #[test]
    fn missing_poll_or_best_result_is_a_fault() {
        let empty = GameNode::default();
        assert_eq!(
            suggested_player_age(&empty).unwrap_err(),
            NodeFault::MissingElement("poll[suggested_playerage]")
        );

        let mut poll = players_poll("4", &[("2", "4")]);
        poll.groups[0].results.retain(|r| r.value.as_deref() != Some("Best"));
        let node = node_with(vec![poll]);
        assert_eq!(
            suggested_num_players(&node).unwrap_err(),
            NodeFault::MissingElement("result[value=Best]")
        );
    }

    #[test]
    fn bad_vote_count_is_a_fault() {
        let node = node_with(vec![value_poll(PLAYER_AGE, "3", &[("5", "three")])]);
        assert!(matches!(
            suggested_player_age(&node).unwrap_err(),
            NodeFault::BadNumber { field: "numvotes", .. }
        ));
    }

    #[test]
    fn resolve_handles_full_u64_range() {
        let options = [("low", 1), ("huge", u64::MAX), ("tied", u64::MAX)];
        assert_eq!(resolve(options, TieBreak::KeepEarlier), Some("huge"));
        assert_eq!(resolve(options, TieBreak::PreferLater), Some("tied"));
        assert_eq!(resolve([("only", 0)], TieBreak::KeepEarlier), Some("only"));
    }

    #[test]
    fn resolve_on_empty_options_is_none() {
        assert_eq!(resolve(Vec::<(&str, u64)>::new(), TieBreak::PreferLater), None);
    }
}
