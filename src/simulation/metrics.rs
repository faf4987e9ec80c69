//! Display metrics derived from fleet state
//!
//! Metrics are observational only. Nothing here is read back by the tick.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::core::calendar::PeakPeriod;
use crate::core::types::Level;
use crate::fleet::demand;
use crate::fleet::state::FleetState;
use crate::fleet::traffic;

pub const SATISFACTION_MIN: f64 = 70.0;
pub const SATISFACTION_MAX: f64 = 98.0;

/// Number of points kept for the utilization trend
pub const UTILIZATION_HISTORY_LEN: usize = 7;
const INITIAL_UTILIZATION_HISTORY: [u32; UTILIZATION_HISTORY_LEN] = [65, 72, 78, 85, 79, 82, 78];

/// Zone counts per demand level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandDistribution {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetMetrics {
    /// Percent of the fleet that is occupied
    pub utilization: u32,
    /// Minutes, one decimal
    pub avg_response_time: f64,
    /// Percent, within [SATISFACTION_MIN, SATISFACTION_MAX]
    pub customer_satisfaction: f64,
    /// km/L, one decimal
    pub fuel_efficiency: f64,
    /// Currency units per hour
    pub revenue_per_hour: u32,
    /// Mean of utilization and satisfaction, rounded
    pub performance_score: u32,
    /// Oldest first, newest last
    pub utilization_history: VecDeque<u32>,
    pub demand_distribution: DemandDistribution,
    pub average_congestion: Level,
    pub peak_period: PeakPeriod,
}

impl FleetMetrics {
    pub fn new() -> Self {
        Self {
            utilization: 78,
            avg_response_time: 4.2,
            customer_satisfaction: 87.0,
            fuel_efficiency: 12.5,
            revenue_per_hour: 850,
            performance_score: 83,
            utilization_history: INITIAL_UTILIZATION_HISTORY.into_iter().collect(),
            demand_distribution: DemandDistribution::default(),
            average_congestion: Level::Medium,
            peak_period: PeakPeriod::OffPeak,
        }
    }

    /// Recompute everything from the current state.
    ///
    /// Utilization and the state summaries are exact; response time, fuel
    /// efficiency and revenue are jittered around fixed baselines, and
    /// satisfaction takes a bounded random walk.
    pub fn update<R: Rng + ?Sized>(&mut self, state: &FleetState, rng: &mut R, peak_period: PeakPeriod) {
        self.utilization = utilization_percent(state.occupied_count(), state.fleet_size());
        self.avg_response_time = round1(4.2 + rng.gen::<f64>() * 2.0 - 1.0);
        self.customer_satisfaction = (self.customer_satisfaction + rng.gen::<f64>() * 4.0 - 2.0)
            .clamp(SATISFACTION_MIN, SATISFACTION_MAX);
        self.fuel_efficiency = round1(12.5 + rng.gen::<f64>() * 2.0 - 1.0);
        self.revenue_per_hour = (800.0 + rng.gen::<f64>() * 200.0).round() as u32;
        self.performance_score =
            ((self.utilization as f64 + self.customer_satisfaction) / 2.0).round() as u32;

        self.utilization_history.push_back(self.utilization);
        while self.utilization_history.len() > UTILIZATION_HISTORY_LEN {
            self.utilization_history.pop_front();
        }

        let (high, medium, low) = demand::distribution(&state.demand_zones);
        self.demand_distribution = DemandDistribution { high, medium, low };
        self.average_congestion = traffic::average_congestion(&state.traffic);
        self.peak_period = peak_period;
    }
}

impl Default for FleetMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Rounded share of occupied vehicles; an empty fleet is 0%
pub fn utilization_percent(occupied: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((occupied as f64 / total as f64) * 100.0).round() as u32
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::generation::generate_initial_state;
    use crate::fleet::vehicle::VehicleStatus;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_utilization_percent() {
        assert_eq!(utilization_percent(0, 0), 0);
        assert_eq!(utilization_percent(5, 25), 20);
        assert_eq!(utilization_percent(1, 3), 33);
        assert_eq!(utilization_percent(25, 25), 100);
    }

    #[test]
    fn test_update_reflects_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut state = generate_initial_state(10, &mut rng);
        for (i, vehicle) in state.vehicles_mut().enumerate() {
            vehicle.status = if i < 4 { VehicleStatus::Occupied } else { VehicleStatus::Idle };
        }

        let mut metrics = FleetMetrics::new();
        metrics.update(&state, &mut rng, PeakPeriod::MorningRush);

        assert_eq!(metrics.utilization, 40);
        assert_eq!(metrics.utilization_history.back(), Some(&40));
        assert_eq!(metrics.utilization_history.len(), UTILIZATION_HISTORY_LEN);
        assert_eq!(metrics.peak_period, PeakPeriod::MorningRush);
        assert_eq!(
            metrics.demand_distribution,
            DemandDistribution { high: 1, medium: 3, low: 0 }
        );
    }

    #[test]
    fn test_jittered_metrics_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let state = generate_initial_state(25, &mut rng);
        let mut metrics = FleetMetrics::new();
        for _ in 0..2000 {
            metrics.update(&state, &mut rng, PeakPeriod::OffPeak);
            assert!((SATISFACTION_MIN..=SATISFACTION_MAX).contains(&metrics.customer_satisfaction));
            assert!((3.2..=5.2).contains(&metrics.avg_response_time));
            assert!((11.5..=13.5).contains(&metrics.fuel_efficiency));
            assert!((800..=1000).contains(&metrics.revenue_per_hour));
        }
    }
}
