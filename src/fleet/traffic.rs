//! Per-area traffic congestion

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::Level;

pub type CongestionLevel = Level;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficRecord {
    pub area: String,
    pub congestion: CongestionLevel,
    pub incidents: u32,
}

impl TrafficRecord {
    pub fn new(area: impl Into<String>, congestion: CongestionLevel, incidents: u32) -> Self {
        Self {
            area: area.into(),
            congestion,
            incidents,
        }
    }

    /// With probability `chance`, reassign a uniformly random level.
    /// Returns true when a reassignment happened.
    pub fn drift<R: Rng + ?Sized>(&mut self, rng: &mut R, chance: f64) -> bool {
        if rng.gen::<f64>() < chance {
            self.congestion = Level::ALL[rng.gen_range(0..Level::ALL.len())];
            true
        } else {
            false
        }
    }
}

/// Mean congestion across all areas, bucketed back into a level
pub fn average_congestion(records: &[TrafficRecord]) -> CongestionLevel {
    if records.is_empty() {
        return Level::Low;
    }
    let total: u32 = records.iter().map(|r| r.congestion.weight()).sum();
    let avg = total as f64 / records.len() as f64;
    if avg <= 1.5 {
        Level::Low
    } else if avg <= 2.5 {
        Level::Medium
    } else {
        Level::High
    }
}
