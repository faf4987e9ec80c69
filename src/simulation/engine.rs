//! SimulationEngine - owns all simulation state for one running instance
//!
//! The hosting application constructs one engine and hands it to the
//! scheduler and to whatever presents it. Configuration inputs are validated
//! here before anything is mutated.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::calendar::Calendar;
use crate::core::config::{validate_speed_multiplier, validate_tick_period, SimulationConfig};
use crate::core::error::{FleetError, Result};
use crate::core::types::Tick;
use crate::fleet::generation::generate_initial_state;
use crate::fleet::state::{FleetState, ResizeOutcome};
use crate::fleet::vehicle::Vehicle;
use crate::simulation::advisor::advise;
use crate::simulation::decision_log::{DecisionLog, DecisionLogEntry};
use crate::simulation::metrics::FleetMetrics;
use crate::simulation::output::FleetSnapshot;
use crate::simulation::tick::{run_fleet_tick, SimulationEvent, TickContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

/// What happened during one engine tick
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: Tick,
    pub time: String,
    pub events: Vec<SimulationEvent>,
    /// Entries added to the decision log this tick, in recording order
    pub decisions: Vec<DecisionLogEntry>,
    pub utilization: u32,
}

pub struct SimulationEngine {
    config: SimulationConfig,
    rng: ChaCha8Rng,
    calendar: Calendar,
    state: FleetState,
    decision_log: DecisionLog,
    metrics: FleetMetrics,
    run_state: RunState,
}

impl SimulationEngine {
    /// Build an engine with freshly generated state
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let state = generate_initial_state(config.fleet_size, &mut rng);
        Ok(Self::assemble(config, rng, state))
    }

    /// Build an engine around a caller-provided starting state.
    ///
    /// The configured fleet size follows the given state. Restarting still
    /// regenerates from the standard seed set.
    pub fn from_state(mut config: SimulationConfig, state: FleetState) -> Result<Self> {
        config.fleet_size = state.fleet_size();
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Ok(Self::assemble(config, rng, state))
    }

    fn assemble(config: SimulationConfig, rng: ChaCha8Rng, state: FleetState) -> Self {
        Self {
            calendar: Calendar::new(&config.clock),
            config,
            rng,
            state,
            decision_log: DecisionLog::new(),
            metrics: FleetMetrics::new(),
            run_state: RunState::Stopped,
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// The advisor only runs while the engine is running; manual ticks on a
    /// stopped or paused engine still move the fleet.
    pub fn tick(&mut self) -> TickReport {
        let tick = self.calendar.current_tick() + 1;
        let peak_period = self.calendar.current_peak_period();
        let ctx = TickContext {
            tick,
            hour: self.calendar.current_hour(),
            dynamics: &self.config.dynamics,
        };
        let events = run_fleet_tick(&mut self.state, &mut self.rng, &ctx);

        self.calendar.advance();
        let time = self.calendar.time_label();

        // Metrics report the hour the demand drift just used
        self.metrics.update(&self.state, &mut self.rng, peak_period);

        let decisions = if self.run_state == RunState::Running {
            advise(
                &self.state,
                &mut self.rng,
                &self.config.advisor,
                &mut self.decision_log,
                tick,
                &time,
            )
        } else {
            Vec::new()
        };

        tracing::trace!(
            tick,
            events = events.len(),
            decisions = decisions.len(),
            utilization = self.metrics.utilization,
            "Tick complete"
        );

        TickReport {
            tick,
            time,
            events,
            decisions,
            utilization: self.metrics.utilization,
        }
    }

    /// Returns false when already running
    pub fn start(&mut self) -> bool {
        if self.run_state == RunState::Running {
            return false;
        }
        self.run_state = RunState::Running;
        tracing::info!(tick = self.current_tick(), "Simulation running");
        true
    }

    /// Returns false unless the engine was running
    pub fn pause(&mut self) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        self.run_state = RunState::Paused;
        tracing::info!(tick = self.current_tick(), "Simulation paused");
        true
    }

    /// Discard all state and regenerate it from the configured seed.
    /// The engine ends up stopped with an empty decision log.
    pub fn restart(&mut self) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let state = generate_initial_state(self.config.fleet_size, &mut rng);
        self.rng = rng;
        self.state = state;
        self.calendar = Calendar::new(&self.config.clock);
        self.decision_log.clear();
        self.metrics = FleetMetrics::new();
        self.run_state = RunState::Stopped;
        tracing::info!(fleet_size = self.config.fleet_size, "Simulation restarted");
    }

    pub fn set_fleet_size(&mut self, target: usize) -> Result<ResizeOutcome> {
        let tick = self.current_tick();
        let outcome = match self.state.resize(target, &mut self.rng, tick) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!("Rejected fleet size: {}", e);
                return Err(e);
            }
        };
        self.config.fleet_size = target;
        tracing::info!(fleet_size = target, ?outcome, "Fleet resized");
        Ok(outcome)
    }

    pub fn set_tick_period(&mut self, period: Duration) -> Result<()> {
        let millis = match validate_tick_period(period) {
            Ok(millis) => millis,
            Err(e) => {
                tracing::warn!("Rejected tick period: {}", e);
                return Err(e);
            }
        };
        self.config.tick_period_ms = millis;
        tracing::info!(tick_period_ms = self.config.tick_period_ms, "Tick period updated");
        Ok(())
    }

    pub fn set_speed_multiplier(&mut self, speed: f64) -> Result<()> {
        if let Err(e) = validate_speed_multiplier(speed) {
            tracing::warn!("Rejected speed multiplier: {}", e);
            return Err(e);
        }
        self.config.speed_multiplier = speed;
        tracing::info!(speed, "Speed multiplier updated");
        Ok(())
    }

    pub fn effective_period(&self) -> Duration {
        self.config.effective_period()
    }

    pub fn vehicle(&self, id: &str) -> Result<&Vehicle> {
        self.state
            .vehicle(id)
            .ok_or_else(|| FleetError::VehicleNotFound(id.to_string()))
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &FleetState {
        &self.state
    }

    pub fn decision_log(&self) -> &DecisionLog {
        &self.decision_log
    }

    pub fn metrics(&self) -> &FleetMetrics {
        &self.metrics
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn current_tick(&self) -> Tick {
        self.calendar.current_tick()
    }

    pub fn time_label(&self) -> String {
        self.calendar.time_label()
    }

    pub fn snapshot(&self) -> FleetSnapshot {
        FleetSnapshot {
            tick: self.current_tick(),
            time: self.time_label(),
            run_state: self.run_state,
            fleet_size: self.state.fleet_size(),
            vehicles: self.state.vehicles().cloned().collect(),
            demand_zones: self.state.demand_zones.clone(),
            traffic: self.state.traffic.clone(),
            weather: self.state.weather.clone(),
            metrics: self.metrics.clone(),
            decisions: self.decision_log.entries().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::calendar::PeakPeriod;

    #[test]
    fn test_run_state_transitions() {
        let mut engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
        assert_eq!(engine.run_state(), RunState::Stopped);
        assert!(!engine.pause());

        assert!(engine.start());
        assert!(!engine.start());
        assert!(engine.pause());
        assert_eq!(engine.run_state(), RunState::Paused);
        assert!(engine.start());
        assert!(engine.is_running());
    }

    #[test]
    fn test_rejected_inputs_leave_config_untouched() {
        let mut engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
        let before = engine.config().clone();

        assert!(matches!(engine.set_fleet_size(0), Err(FleetError::InvalidFleetSize(0))));
        assert!(engine.set_tick_period(Duration::ZERO).is_err());
        assert!(engine
            .set_tick_period(Duration::from_millis(u64::MAX) + Duration::from_millis(1))
            .is_err());
        assert!(engine
            .set_tick_period(Duration::from_millis(u64::MAX) + Duration::from_millis(501))
            .is_err());
        assert!(engine.set_speed_multiplier(0.0).is_err());
        assert!(engine.set_speed_multiplier(-3.0).is_err());

        assert_eq!(engine.config(), &before);
        assert_eq!(engine.state().fleet_size(), 25);
    }

    #[test]
    fn test_effective_period_tracks_speed() {
        let mut engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
        engine.set_tick_period(Duration::from_secs(2)).unwrap();
        engine.set_speed_multiplier(4.0).unwrap();
        assert_eq!(engine.effective_period(), Duration::from_millis(500));
    }

    #[test]
    fn test_advisor_silent_unless_running() {
        let config = SimulationConfig {
            advisor: crate::core::config::AdvisorConfig {
                filler_chance: 1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut engine = SimulationEngine::new(config).unwrap();
        for _ in 0..5 {
            assert!(engine.tick().decisions.is_empty());
        }
        assert!(engine.decision_log().is_empty());

        engine.start();
        let report = engine.tick();
        assert!(!report.decisions.is_empty());
        assert_eq!(engine.decision_log().latest(), report.decisions.last());
    }

    #[test]
    fn test_peak_period_matches_drift_hour() {
        let config = SimulationConfig {
            clock: crate::core::config::ClockConfig {
                start_hour: 10,
                start_minute: 59,
                minutes_per_tick: 1,
            },
            ..Default::default()
        };
        let mut engine = SimulationEngine::new(config).unwrap();

        let report = engine.tick();
        assert_eq!(report.time, "11:00");
        assert_eq!(engine.metrics().peak_period, PeakPeriod::MorningRush);

        engine.tick();
        assert_eq!(engine.metrics().peak_period, PeakPeriod::OffPeak);
    }

    #[test]
    fn test_vehicle_lookup() {
        let engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
        assert_eq!(engine.vehicle("FL001").unwrap().id.as_str(), "FL001");
        assert!(matches!(engine.vehicle("FL999"), Err(FleetError::VehicleNotFound(_))));
    }

    #[test]
    fn test_restart_is_reproducible() {
        let mut engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
        let initial = engine.snapshot();

        engine.start();
        for _ in 0..50 {
            engine.tick();
        }
        engine.restart();

        let restarted = engine.snapshot();
        assert_eq!(restarted.tick, 0);
        assert_eq!(restarted.run_state, RunState::Stopped);
        assert!(restarted.decisions.is_empty());
        assert_eq!(restarted.vehicles, initial.vehicles);
        assert_eq!(restarted.demand_zones, initial.demand_zones);
    }
}
