//! Fleet state model
//!
//! Vehicles, demand zones, traffic records and weather for a single city,
//! plus the routine that lays down the starting state.

pub mod demand;
pub mod generation;
pub mod landmarks;
pub mod state;
pub mod traffic;
pub mod vehicle;
pub mod weather;

pub use demand::{DemandLevel, DemandZone};
pub use generation::generate_initial_state;
pub use state::{FleetState, ResizeOutcome};
pub use traffic::{CongestionLevel, TrafficRecord};
pub use vehicle::{Route, Vehicle, VehicleStatus};
pub use weather::WeatherState;
