//! Reorders results arriving from worker threads
//!
//! Results are released strictly in (year, day, part) order: one arriving
//! early waits in `pending` until every expected key before it has been seen.

use crate::executor::SolverResult;
use std::collections::{BTreeMap, BTreeSet};

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

/// Buffers results and emits them in key order
pub struct ResultAggregator {
    expected: BTreeSet<ResultKey>,
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    pub fn new(expected_keys: impl IntoIterator<Item = ResultKey>) -> Self {
        Self {
            expected: expected_keys.into_iter().collect(),
            pending: BTreeMap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        let key = ResultKey::from(&result);
        if !self.expected.contains(&key) {
            log::warn!(
                "unexpected result for {}/{:02} part {}",
                key.year,
                key.day,
                key.part
            );
        }
        self.pending.insert(key, result);

        let mut ready = Vec::new();
        while let Some(&next) = self.expected.first() {
            let Some(result) = self.pending.remove(&next) else {
                break;
            };
            self.expected.remove(&next);
            ready.push(result);
        }
        ready
    }

    /// Remaining buffered results in key order
    pub fn drain(&mut self) -> Vec<SolverResult> {
        std::mem::take(&mut self.pending).into_values().collect()
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use proptest::prelude::*;

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn make_result(year: u16, day: u8, part: u8) -> SolverResult {
        SolverResult {
            year,
            day,
            part,
            answer: Ok(format!("{}_{}_{}", year, day, part)),
            solve_duration: TimeDelta::milliseconds(10),
            parse_duration: Some(TimeDelta::milliseconds(5)),
        }
    }

    #[test]
    fn test_in_order_results() {
        let mut agg = ResultAggregator::new([key(2022, 1, 1), key(2022, 1, 2)]);

        let ready = agg.add(make_result(2022, 1, 1));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 1);

        let ready = agg.add(make_result(2022, 1, 2));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].part, 2);

        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let mut agg =
            ResultAggregator::new([key(2022, 1, 1), key(2022, 1, 2), key(2022, 2, 1)]);

        assert!(agg.add(make_result(2022, 1, 2)).is_empty());
        assert!(agg.add(make_result(2022, 2, 1)).is_empty());

        let ready = agg.add(make_result(2022, 1, 1));
        let keys: Vec<_> = ready.iter().map(ResultKey::from).collect();
        assert_eq!(keys, vec![key(2022, 1, 1), key(2022, 1, 2), key(2022, 2, 1)]);
        assert!(agg.is_complete());
    }

    #[test]
    fn test_drain_remaining() {
        let mut agg = ResultAggregator::new([key(2022, 1, 1), key(2022, 1, 2)]);

        agg.add(make_result(2022, 1, 2));
        assert!(!agg.is_complete());

        let remaining = agg.drain();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].part, 2);
        assert!(agg.drain().is_empty());
    }

    proptest! {
        #[test]
        fn any_arrival_order_is_emitted_sorted(
            keys in prop::collection::btree_set((2015u16..2017, 1u8..=25, 1u8..=2), 1..30)
                .prop_map(|set| set.into_iter().collect::<Vec<_>>())
                .prop_shuffle()
        ) {
            let mut agg = ResultAggregator::new(keys.iter().map(|&(y, d, p)| key(y, d, p)));
            let mut emitted = Vec::new();
            for &(y, d, p) in &keys {
                emitted.extend(agg.add(make_result(y, d, p)).iter().map(ResultKey::from));
            }
            prop_assert!(agg.is_complete());
            prop_assert!(agg.drain().is_empty());

            let mut sorted: Vec<_> = keys.iter().map(|&(y, d, p)| key(y, d, p)).collect();
            sorted.sort();
            prop_assert_eq!(emitted, sorted);
        }
    }
}
