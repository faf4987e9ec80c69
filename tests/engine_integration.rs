//! Integration tests for the simulation engine
//!
//! These tests drive a full engine through its public surface:
//! - Advisor rules firing on hand-built fleet states
//! - Arrival of enroute vehicles
//! - Fleet resizing round trips
//! - Decision log capacity and ordering
//! - Reproducibility from a seed

use fleet_sim::core::config::{AdvisorConfig, DynamicsConfig, SimulationConfig};
use fleet_sim::core::types::{Level, VehicleId};
use fleet_sim::fleet::generation::generate_initial_state;
use fleet_sim::fleet::state::{FleetState, ResizeOutcome};
use fleet_sim::fleet::vehicle::{VehicleStatus, ETA_MAX, ETA_MIN};
use fleet_sim::simulation::advisor::{OPTIMIZE_DISTRIBUTION, REALLOCATE_TO_DEMAND, REROUTE_AROUND_CONGESTION};
use fleet_sim::simulation::decision_log::DECISION_LOG_CAPACITY;
use fleet_sim::simulation::engine::SimulationEngine;
use fleet_sim::simulation::tick::SimulationEvent;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// No random flips, traffic shifts, weather drift or filler decisions
fn quiet_config() -> SimulationConfig {
    SimulationConfig {
        dynamics: DynamicsConfig {
            status_flip_chance: 0.0,
            traffic_shift_chance: 0.0,
            weather_drift_chance: 0.0,
            ..Default::default()
        },
        advisor: AdvisorConfig {
            filler_chance: 0.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

/// 25 vehicles: `available` of them available, the rest idle so nothing
/// arrives during the tick. Zones and traffic are set as requested.
fn fleet(available: usize, high_zones: usize, high_traffic: usize) -> FleetState {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut state = generate_initial_state(25, &mut rng);

    for (i, vehicle) in state.vehicles_mut().enumerate() {
        vehicle.status = if i < available {
            VehicleStatus::Available
        } else {
            VehicleStatus::Idle
        };
    }
    for (i, zone) in state.demand_zones.iter_mut().enumerate() {
        zone.set_requests(if i < high_zones { 20 } else { 0 });
    }
    for (i, record) in state.traffic.iter_mut().enumerate() {
        record.congestion = if i < high_traffic { Level::High } else { Level::Low };
    }
    state
}

fn running_engine(state: FleetState) -> SimulationEngine {
    let mut engine = SimulationEngine::from_state(quiet_config(), state).unwrap();
    engine.start();
    engine
}

#[test]
fn test_high_demand_low_availability_reallocates() {
    let mut engine = running_engine(fleet(2, 3, 0));
    let report = engine.tick();

    assert_eq!(report.decisions.len(), 1);
    let latest = engine.decision_log().latest().unwrap();
    assert_eq!(latest.action, REALLOCATE_TO_DEMAND.action);
    assert_eq!(latest.reason, REALLOCATE_TO_DEMAND.reason);
    assert_eq!(latest.impact, REALLOCATE_TO_DEMAND.impact);
}

#[test]
fn test_congestion_reroutes() {
    let mut engine = running_engine(fleet(10, 0, 2));
    engine.tick();

    let latest = engine.decision_log().latest().unwrap();
    assert_eq!(latest.action, REROUTE_AROUND_CONGESTION.action);
}

#[test]
fn test_reallocation_takes_precedence_over_reroute() {
    let mut engine = running_engine(fleet(2, 3, 3));
    engine.tick();

    assert_eq!(engine.decision_log().len(), 1);
    assert_eq!(engine.decision_log().latest().unwrap().action, REALLOCATE_TO_DEMAND.action);
}

#[test]
fn test_excess_availability_optimizes_distribution() {
    let mut engine = running_engine(fleet(20, 0, 0));
    engine.tick();

    let latest = engine.decision_log().latest().unwrap();
    assert_eq!(latest.action, OPTIMIZE_DISTRIBUTION.action);
}

#[test]
fn test_balanced_fleet_records_nothing() {
    // 10 of 25 available is under the 60% excess line
    let mut engine = running_engine(fleet(10, 0, 0));
    for _ in 0..5 {
        assert!(engine.tick().decisions.is_empty());
    }
    assert!(engine.decision_log().is_empty());
}

#[test]
fn test_enroute_vehicle_with_one_minute_left_arrives() {
    let mut state = fleet(10, 0, 0);
    let vehicle = state.vehicle_mut("FL001").unwrap();
    vehicle.status = VehicleStatus::Enroute;
    vehicle.eta = 1;
    let before = vehicle.position;

    let mut engine = SimulationEngine::from_state(quiet_config(), state).unwrap();
    let report = engine.tick();

    let vehicle = engine.vehicle("FL001").unwrap();
    assert_eq!(vehicle.status, VehicleStatus::Available);
    assert!(vehicle.eta >= ETA_MIN && vehicle.eta < ETA_MAX);
    assert_eq!(vehicle.last_update, 1);
    assert_ne!(vehicle.position, before);
    assert!(report.events.iter().any(|e| matches!(
        e,
        SimulationEvent::VehicleArrived { vehicle, .. } if vehicle == &VehicleId::from("FL001")
    )));
}

#[test]
fn test_resize_up_then_down_restores_ids() {
    let mut engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
    let original = engine.state().vehicle_ids();

    assert_eq!(engine.set_fleet_size(30).unwrap(), ResizeOutcome::Added(5));
    assert_eq!(engine.state().fleet_size(), 30);
    assert!(engine.vehicle("FL030").is_ok());

    assert_eq!(engine.set_fleet_size(25).unwrap(), ResizeOutcome::Removed(5));
    assert_eq!(engine.state().vehicle_ids(), original);
    assert_eq!(engine.config().fleet_size, 25);
}

#[test]
fn test_resize_below_seed_set() {
    let mut engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
    engine.set_fleet_size(3).unwrap();

    let ids: Vec<String> = engine.state().vehicles().map(|v| v.id.to_string()).collect();
    assert_eq!(ids, vec!["FL001", "FL002", "FL003"]);

    engine.restart();
    assert_eq!(engine.state().fleet_size(), 3);
}

#[test]
fn test_decision_log_is_bounded_and_newest_first() {
    let config = SimulationConfig {
        advisor: AdvisorConfig {
            filler_chance: 1.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut engine = SimulationEngine::new(config).unwrap();
    engine.start();

    for _ in 0..30 {
        engine.tick();
        assert!(engine.decision_log().len() <= DECISION_LOG_CAPACITY);
    }
    assert_eq!(engine.decision_log().len(), DECISION_LOG_CAPACITY);

    let ids: Vec<u64> = engine.decision_log().entries().map(|e| e.id).collect();
    assert!(ids.windows(2).all(|w| w[0] > w[1]));
    let ticks: Vec<u64> = engine.decision_log().entries().map(|e| e.tick).collect();
    assert!(ticks.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_same_seed_same_history() {
    let run = || {
        let mut engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
        engine.start();
        for _ in 0..200 {
            engine.tick();
        }
        engine.snapshot()
    };

    let a = run();
    let b = run();
    assert_eq!(a.vehicles, b.vehicles);
    assert_eq!(a.demand_zones, b.demand_zones);
    assert_eq!(a.decisions, b.decisions);
    assert_eq!(a.metrics, b.metrics);
}

#[test]
fn test_snapshot_serializes() {
    let mut engine = SimulationEngine::new(SimulationConfig::default()).unwrap();
    engine.tick();
    let json = engine.snapshot().to_json();

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["tick"], 1);
    assert_eq!(value["time"], "08:01");
    assert_eq!(value["vehicles"].as_array().unwrap().len(), 25);
    assert_eq!(value["vehicles"][0]["id"], "FL001");
}
