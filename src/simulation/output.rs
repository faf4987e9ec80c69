//! Snapshot output for presentation layers and batch runs

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::Tick;
use crate::fleet::demand::DemandZone;
use crate::fleet::traffic::TrafficRecord;
use crate::fleet::vehicle::{Vehicle, VehicleStatus};
use crate::fleet::weather::WeatherState;
use crate::simulation::decision_log::DecisionLogEntry;
use crate::simulation::engine::RunState;
use crate::simulation::metrics::FleetMetrics;

/// Read-only copy of everything a dashboard would show after a tick
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub tick: Tick,
    pub time: String,
    pub run_state: RunState,
    pub fleet_size: usize,
    pub vehicles: Vec<Vehicle>,
    pub demand_zones: Vec<DemandZone>,
    pub traffic: Vec<TrafficRecord>,
    pub weather: WeatherState,
    pub metrics: FleetMetrics,
    /// Newest first
    pub decisions: Vec<DecisionLogEntry>,
}

impl FleetSnapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn status_count(&self, status: VehicleStatus) -> usize {
        self.vehicles.iter().filter(|v| v.status == status).count()
    }

    pub fn summary(&self) -> String {
        format!(
            "Tick {} ({}) [{:?}]\n{} vehicles: {} available, {} occupied, {} enroute, {} idle\n\
             Utilization {}%, satisfaction {:.0}%, traffic {}, {}\n\
             Weather {:.1}°C {}, wind {:.1} km/h\n{} decisions logged",
            self.tick,
            self.time,
            self.run_state,
            self.fleet_size,
            self.status_count(VehicleStatus::Available),
            self.status_count(VehicleStatus::Occupied),
            self.status_count(VehicleStatus::Enroute),
            self.status_count(VehicleStatus::Idle),
            self.metrics.utilization,
            self.metrics.customer_satisfaction,
            self.metrics.average_congestion,
            self.metrics.peak_period,
            self.weather.temperature,
            self.weather.condition,
            self.weather.wind_speed,
            self.decisions.len(),
        )
    }
}
