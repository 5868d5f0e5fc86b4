// src/pull/mod.rs
//! The batch loop and the per-run state it fills.
//!
//! A pull is two phases. Phase one (`run`) fetches window after window,
//! parses each response and folds every genuine, not-yet-seen game into the
//! run context. Phase two only starts once `Pull::finish` has frozen that
//! context into a `PullOutput`; the schema depends on counts that are not
//! known before the last batch.

mod window;

pub use window::{plan, BatchWindow};

use std::collections::HashSet;
use std::thread;
use std::time::Duration;

use log::{debug, error, info};

use crate::config::options::PullOptions;
use crate::core::Transport;
use crate::counters::Counters;
use crate::error::{NodeFault, PullError};
use crate::ids::IdList;
use crate::normalize::normalize;
use crate::progress::Progress;
use crate::record::GameRecord;
use crate::specs::game::{self, GameNode};

/// Blocking wait between two requests.
pub trait Pace {
    fn pause(&mut self, pause: Duration);
}

pub struct Sleep;

impl Pace for Sleep {
    fn pause(&mut self, pause: Duration) {
        thread::sleep(pause);
    }
}

/// What happened to one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Accepted {
    Added,
    Inbound,
    Duplicate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub nodes: usize,
    pub added: usize,
    pub inbound: usize,
    pub duplicates: usize,
}

/// Run context: everything one pull accumulates. Owned by exactly one run.
pub struct Pull<'a> {
    ids: &'a IdList,
    records: Vec<GameRecord>,
    seen: HashSet<String>,
    counters: Counters,
}

impl<'a> Pull<'a> {
    pub fn new(ids: &'a IdList) -> Self {
        Self { ids, records: Vec::new(), seen: HashSet::new(), counters: Counters::new() }
    }

    /// Fold one node into the run. Inbound nodes and ids already recorded
    /// are no-ops: no record change, no counter change.
    pub fn accept(&mut self, batch: usize, node: &GameNode) -> Result<Accepted, PullError> {
        if node.inbound {
            return Ok(Accepted::Inbound);
        }
        let Some(id) = node.id.as_deref() else {
            return Err(PullError::Node {
                batch,
                id: s!("<no objectid>"),
                fault: NodeFault::MissingAttribute { element: "boardgame", attr: "objectid" },
            });
        };
        if self.seen.contains(id) {
            return Ok(Accepted::Duplicate);
        }

        let rec = normalize(node, self.ids.short_text(id))
            .map_err(|fault| PullError::Node { batch, id: s!(id), fault })?;

        // Counts only move once the whole record is good.
        self.counters.absorb(&rec);
        self.seen.insert(rec.id.clone());
        self.records.push(rec);
        Ok(Accepted::Added)
    }

    /// Parse one response body and accept its nodes in document order.
    pub fn ingest(&mut self, window: &BatchWindow, raw: &str) -> Result<BatchReport, PullError> {
        let nodes = game::parse(raw).map_err(|source| PullError::Markup {
            batch: window.batch,
            range: window.range(),
            source,
        })?;

        let mut report = BatchReport { nodes: nodes.len(), ..BatchReport::default() };
        for node in &nodes {
            match self.accept(window.batch, node)? {
                Accepted::Added => report.added += 1,
                Accepted::Inbound => {
                    debug!("Batch {}: skipped inbound node {:?}", window.batch, node.id);
                    report.inbound += 1;
                }
                Accepted::Duplicate => {
                    debug!("Batch {}: {:?} already recorded", window.batch, node.id);
                    report.duplicates += 1;
                }
            }
        }
        Ok(report)
    }

    pub fn records(&self) -> &[GameRecord] { &self.records }
    pub fn counters(&self) -> &Counters { &self.counters }

    /// End of phase one. Nothing can be added after this.
    pub fn finish(self) -> PullOutput {
        PullOutput { records: self.records, counters: self.counters }
    }
}

/// Frozen result of phase one; the schema assembler only ever reads it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PullOutput {
    pub records: Vec<GameRecord>,
    pub counters: Counters,
}

/// Fetch, parse and normalize every planned window, one at a time.
/// Any fault stops the run; nothing collected so far is returned.
pub fn run(
    ids: &IdList,
    opts: &PullOptions,
    transport: &mut dyn Transport,
    pace: &mut dyn Pace,
    mut progress: Option<&mut dyn Progress>,
) -> Result<PullOutput, PullError> {
    opts.validate()?;

    let windows = plan(ids.len(), opts.limit, opts.batch_size, opts.start);
    let planned: usize = windows.iter().map(BatchWindow::len).sum();
    info!("Pulling {} ids in {} batches (start {}, limit {})", planned, windows.len(), opts.start, opts.limit);

    if let Some(p) = progress.as_deref_mut() {
        p.begin(windows.len(), planned);
        if windows.is_empty() {
            p.log("No ids to pull.");
        }
    }

    let mut pull = Pull::new(ids);

    for (i, window) in windows.iter().enumerate() {
        info!("Pulling IDs {}-{}", window.start, window.end);
        if let Some(p) = progress.as_deref_mut() {
            p.batch_started(window);
        }

        let batch_ids = ids.ids_in(window);
        let raw = transport.fetch(&batch_ids).map_err(|source| {
            let e = PullError::Transport { batch: window.batch, range: window.range(), source };
            error!("{e}");
            e
        })?;

        let report = pull.ingest(window, &raw).inspect_err(|e| error!("{e}"))?;
        info!(
            "Batch {}: {} nodes, {} added, {} inbound, {} repeated",
            window.batch, report.nodes, report.added, report.inbound, report.duplicates
        );
        if let Some(p) = progress.as_deref_mut() {
            p.batch_done(window, report.added);
        }

        if i + 1 < windows.len() {
            if let Some(p) = progress.as_deref_mut() {
                p.pausing(opts.pause);
            }
            pace.pause(opts.pause);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    let out = pull.finish();
    info!(
        "Pull complete: {} records, {} types, {} categories, {} mechanics",
        out.records.len(),
        out.counters.types.len(),
        out.counters.categories.len(),
        out.counters.mechanics.len()
    );
    Ok(out)
}
