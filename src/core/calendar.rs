//! Calendar system for simulated local time
//!
//! Maps ticks onto a 24-hour clock so demand drift can follow rush hours
//! and log entries can carry a readable timestamp.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::config::ClockConfig;
use crate::core::types::Tick;

const MINUTES_PER_DAY: u64 = 24 * 60;

/// Traffic period shown alongside congestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeakPeriod {
    MorningRush, // 08:00-10:59
    EveningRush, // 17:00-19:59
    OffPeak,
}

impl PeakPeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            8..=10 => PeakPeriod::MorningRush,
            17..=19 => PeakPeriod::EveningRush,
            _ => PeakPeriod::OffPeak,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MorningRush => "Morning Rush",
            Self::EveningRush => "Evening Rush",
            Self::OffPeak => "Off Peak",
        }
    }
}

impl fmt::Display for PeakPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar tracks simulation time with minute granularity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    tick: Tick,
    start_minute_of_day: u64,
    minutes_per_tick: u64,
}

impl Calendar {
    pub fn new(clock: &ClockConfig) -> Self {
        Self {
            tick: 0,
            start_minute_of_day: clock.start_hour as u64 * 60 + clock.start_minute as u64,
            minutes_per_tick: clock.minutes_per_tick as u64,
        }
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }

    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    fn minute_of_day(&self) -> u64 {
        (self.start_minute_of_day + self.tick * self.minutes_per_tick) % MINUTES_PER_DAY
    }

    pub fn current_hour(&self) -> u32 {
        (self.minute_of_day() / 60) as u32
    }

    pub fn current_minute(&self) -> u32 {
        (self.minute_of_day() % 60) as u32
    }

    pub fn current_peak_period(&self) -> PeakPeriod {
        PeakPeriod::from_hour(self.current_hour())
    }

    /// `HH:MM` label for the current tick
    pub fn time_label(&self) -> String {
        format!("{:02}:{:02}", self.current_hour(), self.current_minute())
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(&ClockConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_period_from_hour() {
        assert_eq!(PeakPeriod::from_hour(7), PeakPeriod::OffPeak);
        assert_eq!(PeakPeriod::from_hour(8), PeakPeriod::MorningRush);
        assert_eq!(PeakPeriod::from_hour(10), PeakPeriod::MorningRush);
        assert_eq!(PeakPeriod::from_hour(11), PeakPeriod::OffPeak);
        assert_eq!(PeakPeriod::from_hour(17), PeakPeriod::EveningRush);
        assert_eq!(PeakPeriod::from_hour(19), PeakPeriod::EveningRush);
        assert_eq!(PeakPeriod::from_hour(20), PeakPeriod::OffPeak);
    }

    #[test]
    fn test_calendar_advances() {
        let mut cal = Calendar::new(&ClockConfig {
            start_hour: 23,
            start_minute: 58,
            minutes_per_tick: 1,
        });
        assert_eq!(cal.time_label(), "23:58");

        cal.advance();
        cal.advance();
        assert_eq!(cal.current_tick(), 2);
        // Wraps past midnight
        assert_eq!(cal.time_label(), "00:00");
        assert_eq!(cal.current_hour(), 0);
    }

    #[test]
    fn test_frozen_clock() {
        let mut cal = Calendar::new(&ClockConfig {
            start_hour: 12,
            start_minute: 30,
            minutes_per_tick: 0,
        });
        for _ in 0..500 {
            cal.advance();
        }
        assert_eq!(cal.current_tick(), 500);
        assert_eq!(cal.time_label(), "12:30");
        assert_eq!(cal.current_peak_period(), PeakPeriod::OffPeak);
    }
}
