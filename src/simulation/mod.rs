//! Simulation core: the tick, the decision advisor, metrics, and the engine
//! that ties them together.

pub mod advisor;
pub mod decision_log;
pub mod engine;
pub mod metrics;
pub mod output;
pub mod tick;

pub use advisor::{advise, evaluate_rules};
pub use decision_log::{Decision, DecisionLog, DecisionLogEntry, Impact};
pub use engine::{RunState, SimulationEngine, TickReport};
pub use metrics::FleetMetrics;
pub use output::FleetSnapshot;
pub use tick::{run_fleet_tick, SimulationEvent, TickContext};
