// tests/pipeline.rs
use std::collections::VecDeque;
use std::time::Duration;

use bgg_pull::config::options::PullOptions;
use bgg_pull::core::Transport;
use bgg_pull::error::{NodeFault, PullError, TransportError};
use bgg_pull::ids::IdList;
use bgg_pull::progress::Progress;
use bgg_pull::pull::{self, BatchWindow, Pace, PullOutput};
use bgg_pull::schema::{Cell, Table};

const BATCH_A: &str = include_str!("fixtures/batch_a.xml");
const BATCH_B: &str = include_str!("fixtures/batch_b.xml");
const MISSING_STATS: &str = include_str!("fixtures/missing_stats.xml");
const EMPTY: &str = "<boardgames></boardgames>";

/// Hands out canned bodies in order and remembers what was asked for.
#[derive(Default)]
struct Scripted {
    replies: VecDeque<Result<String, TransportError>>,
    requests: Vec<Vec<String>>,
}

impl Scripted {
    fn new<I: IntoIterator<Item = Result<String, TransportError>>>(replies: I) -> Self {
        Self { replies: replies.into_iter().collect(), requests: Vec::new() }
    }

    fn bodies(bodies: &[&str]) -> Self {
        Self::new(bodies.iter().map(|b| Ok(b.to_string())))
    }
}

impl Transport for Scripted {
    fn fetch(&mut self, ids: &[&str]) -> Result<String, TransportError> {
        self.requests.push(ids.iter().map(|s| s.to_string()).collect());
        self.replies.pop_front().unwrap_or_else(|| Ok(EMPTY.to_string()))
    }
}

#[derive(Default)]
struct Recorded(Vec<Duration>);

impl Pace for Recorded {
    fn pause(&mut self, pause: Duration) {
        self.0.push(pause);
    }
}

#[derive(Default)]
struct Events(Vec<String>);

impl Progress for Events {
    fn begin(&mut self, batches: usize, ids: usize) {
        self.0.push(format!("begin {batches} {ids}"));
    }
    fn batch_started(&mut self, w: &BatchWindow) {
        self.0.push(format!("start {}-{}", w.start, w.end));
    }
    fn batch_done(&mut self, w: &BatchWindow, added: usize) {
        self.0.push(format!("done {} +{added}", w.batch));
    }
    fn pausing(&mut self, _pause: Duration) {
        self.0.push("pause".into());
    }
    fn finish(&mut self) {
        self.0.push("finish".into());
    }
}

fn catalog_ids() -> IdList {
    IdList::new([
        ("13", "Trade, build, settle"),
        ("822", "Tiles and meeples"),
        ("141023", ""),
        ("30549", "Save the world"),
        ("13", "listed twice"),
    ])
}

fn opts(limit: usize, batch_size: usize, start: usize) -> PullOptions {
    PullOptions { limit, batch_size, start, ..PullOptions::default() }
}

fn pull_catalog() -> (PullOutput, Scripted, Recorded) {
    let ids = catalog_ids();
    let mut transport = Scripted::bodies(&[BATCH_A, BATCH_B]);
    let mut pace = Recorded::default();
    let out = pull::run(&ids, &opts(5000, 3, 1), &mut transport, &mut pace, None).unwrap();
    (out, transport, pace)
}

#[test]
fn windows_of_100_over_250_ids_pause_only_between_requests() {
    let ids = IdList::new((1..=400).map(|i| (i.to_string(), "")));
    let mut transport = Scripted::default();
    let mut pace = Recorded::default();
    let mut events = Events::default();

    pull::run(&ids, &opts(250, 100, 1), &mut transport, &mut pace, Some(&mut events)).unwrap();

    let sizes: Vec<usize> = transport.requests.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![100, 100, 50]);
    assert_eq!(transport.requests[1][0], "101");
    assert_eq!(transport.requests[2].last().map(String::as_str), Some("250"));
    assert_eq!(pace.0, vec![Duration::from_secs(5); 2]);

    assert_eq!(
        events.0,
        vec![
            "begin 3 250", "start 1-100", "done 1 +0", "pause",
            "start 101-200", "done 2 +0", "pause",
            "start 201-250", "done 3 +0", "finish",
        ]
    );
}

#[test]
fn resumed_pull_keeps_the_same_overall_end() {
    let ids = IdList::new((1..=400).map(|i| (i.to_string(), "")));
    let mut transport = Scripted::default();
    let mut pace = Recorded::default();

    pull::run(&ids, &opts(250, 100, 151), &mut transport, &mut pace, None).unwrap();

    let sizes: Vec<usize> = transport.requests.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![100]);
    assert_eq!(transport.requests[0][0], "151");
    assert!(pace.0.is_empty());
}

#[test]
fn inbound_nodes_are_dropped_and_repeats_count_once() {
    let (out, transport, pace) = pull_catalog();

    assert_eq!(transport.requests, vec![vec!["13", "822", "141023"], vec!["30549", "13"]]);
    assert_eq!(pace.0.len(), 1);

    let ids: Vec<&str> = out.records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["13", "822", "30549"]);

    let c = &out.counters;
    assert_eq!(c.categories.count("Economic"), 2);
    assert_eq!(c.mechanics.count("Trading"), 2);
    assert_eq!(c.mechanics.count("Dice Rolling"), 1);
    assert_eq!(c.types.count("Board Game"), 3);
    assert_eq!(c.types.count("Family Game"), 2);
    assert_eq!(c.types.labels().collect::<Vec<_>>(), vec!["Board Game", "Family Game", "Strategy Game"]);
}

#[test]
fn records_carry_list_text_and_resolved_polls() {
    let (out, _, _) = pull_catalog();
    let catan = &out.records[0];
    assert_eq!(catan.name, "CATAN");
    assert_eq!(catan.name_coerced, "CATAN");
    assert_eq!(catan.short_description, "Trade, build, settle");
    assert_eq!(catan.suggested_numplayers.as_deref(), Some("4"));
    assert_eq!(catan.suggested_playerage.as_deref(), Some("10"));
    assert_eq!(catan.suggested_language.as_deref(), Some("No necessary in-game text"));
    assert_eq!(catan.image_url, "https://cf.geekdo-images.com/catan.jpg");
    assert_eq!(catan.num_types, 1);

    // Ties: age keeps the lower, player count takes the larger.
    let carc = &out.records[1];
    assert_eq!(carc.suggested_playerage.as_deref(), Some("6"));
    assert_eq!(carc.suggested_numplayers.as_deref(), Some("3"));

    let pandemic = &out.records[2];
    assert!(pandemic.is_boardgame);
    assert_eq!(pandemic.suggested_numplayers, None);
    assert_eq!(pandemic.type_rank("Strategy Game").map(|t| t.rank), Some(None));
}

#[test]
fn zero_vote_polls_are_left_out_of_json() {
    let (out, _, _) = pull_catalog();

    let pandemic = serde_json::to_value(&out.records[2]).unwrap();
    let obj = pandemic.as_object().unwrap();
    assert!(!obj.contains_key("suggested_numplayers"));
    assert!(!obj.contains_key("suggested_playerage"));
    assert!(!obj.contains_key("suggested_language"));
    assert_eq!(obj["bgg_type_info"]["Strategy Game"], serde_json::json!([null, null]));

    let catan = serde_json::to_value(&out.records[0]).unwrap();
    assert_eq!(catan["suggested_numplayers"], "4");
    assert_eq!(catan["yearpublished"], 1995);
}

#[test]
fn table_flags_types_per_record() {
    let (out, _, _) = pull_catalog();
    let table = Table::build(&out);
    let col = |name: &str| table.schema.columns.iter().position(|c| c == name).unwrap();

    assert_eq!(table.rows.len(), 3);
    assert_eq!(table.rows[2][col("Family Game")], Cell::Bool(false));
    assert_eq!(table.rows[2][col("Strategy Game")], Cell::Bool(true));
    assert_eq!(table.rows[2][col("Strategy Game_rank")], Cell::Null);
    assert_eq!(table.rows[0][col("Family Game_rank")], Cell::Int(110));
    assert_eq!(table.schema.category_columns[0], "Economic");
}

#[test]
fn transport_failure_names_the_batch() {
    let ids = catalog_ids();
    let mut transport = Scripted::new([
        Ok(BATCH_A.to_string()),
        Err(TransportError::Status { status: 503, url: "http://example.test".into() }),
    ]);
    let mut pace = Recorded::default();

    let err = pull::run(&ids, &opts(5000, 3, 1), &mut transport, &mut pace, None).unwrap_err();
    assert_eq!(err.batch(), Some(2));
    assert!(matches!(err, PullError::Transport { ref range, .. } if *range == (4..=5)));
    assert!(err.to_string().contains("IDs 4-5"));
}

#[test]
fn node_without_statistics_aborts_with_its_id() {
    let ids = IdList::new([("9209", "Trains")]);
    let mut transport = Scripted::bodies(&[MISSING_STATS]);
    let mut pace = Recorded::default();

    let err = pull::run(&ids, &opts(5000, 100, 1), &mut transport, &mut pace, None).unwrap_err();
    assert_eq!(err.game_id(), Some("9209"));
    assert_eq!(err.batch(), Some(1));
    assert!(matches!(
        err,
        PullError::Node { fault: NodeFault::MissingElement("statistics"), .. }
    ));
}

#[test]
fn non_xml_body_is_a_markup_fault() {
    let ids = IdList::new([("13", "")]);
    let mut transport = Scripted::bodies(&["<html><body>Slow down"]);
    let mut pace = Recorded::default();

    let err = pull::run(&ids, &opts(5000, 100, 1), &mut transport, &mut pace, None).unwrap_err();
    assert!(matches!(err, PullError::Markup { batch: 1, .. }));
}

#[test]
fn bad_options_fail_before_any_request() {
    let ids = catalog_ids();
    let mut transport = Scripted::default();
    let mut pace = Recorded::default();

    let err = pull::run(&ids, &opts(5000, 500, 1), &mut transport, &mut pace, None).unwrap_err();
    assert!(matches!(err, PullError::Options(_)));
    assert!(transport.requests.is_empty());
}
