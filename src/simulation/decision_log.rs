//! Decision log - newest-first, capped record of advisory entries

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::core::types::Tick;

pub const DECISION_LOG_CAPACITY: usize = 10;

/// Expected effect of a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Neutral,
    Negative,
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        })
    }
}

/// Catalog text for a decision, before it is stamped into the log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: &'static str,
    pub reason: &'static str,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionLogEntry {
    pub id: u64,
    pub tick: Tick,
    /// Simulated local time, `HH:MM`
    pub time: String,
    pub action: String,
    pub reason: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecisionLog {
    entries: VecDeque<DecisionLogEntry>,
    next_id: u64,
}

impl DecisionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a decision to the front, evicting the oldest past capacity
    pub fn record(&mut self, decision: &Decision, tick: Tick, time: &str) -> &DecisionLogEntry {
        let id = self.next_id;
        self.next_id += 1;

        self.entries.push_front(DecisionLogEntry {
            id,
            tick,
            time: time.to_string(),
            action: decision.action.to_string(),
            reason: decision.reason.to_string(),
            impact: decision.impact,
        });
        self.entries.truncate(DECISION_LOG_CAPACITY);

        &self.entries[0]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&DecisionLogEntry> {
        self.entries.front()
    }

    /// Entries, newest first
    pub fn entries(&self) -> impl Iterator<Item = &DecisionLogEntry> {
        self.entries.iter()
    }

    pub fn recent(&self, n: usize) -> impl Iterator<Item = &DecisionLogEntry> {
        self.entries.iter().take(n)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: Decision = Decision {
        action: "Optimize vehicle distribution",
        reason: "Excess vehicle availability detected",
        impact: Impact::Neutral,
    };

    #[test]
    fn test_newest_entry_first() {
        let mut log = DecisionLog::new();
        log.record(&SAMPLE, 1, "08:01");
        log.record(&SAMPLE, 2, "08:02");
        assert_eq!(log.latest().unwrap().tick, 2);
        let ticks: Vec<Tick> = log.entries().map(|e| e.tick).collect();
        assert_eq!(ticks, vec![2, 1]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = DecisionLog::new();
        for tick in 0..25 {
            log.record(&SAMPLE, tick, "08:00");
            assert!(log.len() <= DECISION_LOG_CAPACITY);
        }
        assert_eq!(log.len(), DECISION_LOG_CAPACITY);
        assert_eq!(log.latest().unwrap().tick, 24);
        assert_eq!(log.entries().last().unwrap().tick, 15);
        // Ids keep counting past evictions
        assert_eq!(log.latest().unwrap().id, 24);
    }

    #[test]
    fn test_recent_takes_from_front() {
        let mut log = DecisionLog::new();
        for tick in 0..6 {
            log.record(&SAMPLE, tick, "08:00");
        }
        let recent: Vec<Tick> = log.recent(3).map(|e| e.tick).collect();
        assert_eq!(recent, vec![5, 4, 3]);
    }
}
