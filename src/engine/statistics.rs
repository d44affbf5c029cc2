use std::cmp::Reverse;
use std::collections::HashMap;

/// Final (A successes, B successes) of a completed round.
pub type OutcomeKey = (u32, u32);

/// Process-lifetime tally of how completed rounds ended.
///
/// A key seen for the first time starts at 0, so the counter reads as the
/// number of *repeats* of that outcome rather than total occurrences.
#[derive(Clone, Debug, Default)]
pub struct RoundStatistics {
    counts: HashMap<OutcomeKey, u32>,
}

impl RoundStatistics {
    pub fn record(&mut self, key: OutcomeKey) {
        self.counts
            .entry(key)
            .and_modify(|count| *count += 1)
            .or_insert(0);
    }

    pub fn get(&self, key: OutcomeKey) -> Option<u32> {
        self.counts.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries ordered by descending `a + b`, ties by descending pair.
    pub fn rows(&self) -> Vec<(OutcomeKey, u32)> {
        let mut rows: Vec<(OutcomeKey, u32)> =
            self.counts.iter().map(|(&k, &v)| (k, v)).collect();
        rows.sort_by_key(|&((a, b), _)| (Reverse(a + b), Reverse((a, b))));
        rows
    }
}
