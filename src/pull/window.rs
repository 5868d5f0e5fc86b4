// src/pull/window.rs
use std::ops::RangeInclusive;

/// One request's worth of ids: positions `start..=end` (1-based) of the id list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchWindow {
    /// 1-based ordinal of this batch within the run.
    pub batch: usize,
    pub start: usize,
    pub end: usize,
}

impl BatchWindow {
    pub fn range(&self) -> RangeInclusive<usize> { self.start..=self.end }
    pub fn len(&self) -> usize { self.end + 1 - self.start }

    /// The items this window covers, or `None` if the window does not fit
    /// inside `items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> Option<&'a [T]> {
        items.get(self.start.checked_sub(1)?..self.end)
    }
}

/// Cut positions `start..=min(limit, total)` into windows of `batch_size`.
/// The last window is truncated; nothing is planned past the end of the list.
pub fn plan(total: usize, limit: usize, batch_size: usize, start: usize) -> Vec<BatchWindow> {
    let mut out = Vec::new();
    if batch_size == 0 {
        return out;
    }
    let last = limit.min(total);
    let mut from = start.max(1);

    while from <= last {
        let to = (from + batch_size - 1).min(last);
        out.push(BatchWindow { batch: out.len() + 1, start: from, end: to });
        from = to + 1;
    }
    out
}
