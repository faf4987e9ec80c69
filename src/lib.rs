//! Fleet Sim - Real-time fleet simulation with demand, traffic, weather
//! and rule-based dispatch advice

pub mod core;
pub mod fleet;
pub mod runtime;
pub mod simulation;
