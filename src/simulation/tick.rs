//! Tick system - advances fleet state by one step
//!
//! Each tick runs, in order:
//! 1. Vehicle movement and ETA countdown (arrivals become available)
//! 2. Random status flips
//! 3. Demand drift (rising during rush hour, decaying otherwise)
//! 4. Traffic drift
//! 5. Weather drift
//!
//! Every draw comes from the injected RNG, so a seeded RNG replays exactly.

use rand::Rng;
use std::f64::consts::TAU;

use crate::core::config::DynamicsConfig;
use crate::core::types::{Level, Tick, VehicleId};
use crate::fleet::landmarks::draw_route;
use crate::fleet::state::FleetState;
use crate::fleet::vehicle::{draw_eta, VehicleStatus};

/// Events generated during a tick
///
/// Returned by `run_fleet_tick` for logging and display.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// A moving vehicle's ETA ran out and it became available
    VehicleArrived { vehicle: VehicleId, next_eta: u32 },
    /// A vehicle drew a new status at random
    StatusChanged {
        vehicle: VehicleId,
        from: VehicleStatus,
        to: VehicleStatus,
    },
    CongestionChanged { area: String, level: Level },
    WeatherDrifted { temperature: f64, wind_speed: f64 },
}

/// Inputs for a single tick besides the state itself
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub tick: Tick,
    /// Simulated local hour (0-23)
    pub hour: u32,
    pub dynamics: &'a DynamicsConfig,
}

impl TickContext<'_> {
    pub fn is_rush_hour(&self) -> bool {
        self.dynamics.rush_hours.iter().any(|w| w.contains(self.hour))
    }
}

/// Run a single fleet tick
pub fn run_fleet_tick<R: Rng + ?Sized>(
    state: &mut FleetState,
    rng: &mut R,
    ctx: &TickContext<'_>,
) -> Vec<SimulationEvent> {
    let mut events = Vec::new();

    update_vehicles(state, rng, ctx, &mut events);
    update_demand(state, rng, ctx);
    update_traffic(state, rng, ctx, &mut events);

    let dynamics = ctx.dynamics;
    if state.weather.drift(
        rng,
        dynamics.weather_drift_chance,
        dynamics.temperature_step,
        dynamics.wind_step,
    ) {
        events.push(SimulationEvent::WeatherDrifted {
            temperature: state.weather.temperature,
            wind_speed: state.weather.wind_speed,
        });
    }

    events
}

fn update_vehicles<R: Rng + ?Sized>(
    state: &mut FleetState,
    rng: &mut R,
    ctx: &TickContext<'_>,
    events: &mut Vec<SimulationEvent>,
) {
    let dynamics = ctx.dynamics;

    for vehicle in state.vehicles_mut() {
        if vehicle.status.is_moving() {
            let heading = rng.gen::<f64>() * TAU;
            vehicle.position = vehicle.position.displaced(heading, dynamics.move_distance);
            vehicle.eta = vehicle.eta.saturating_sub(1);
            vehicle.last_update = ctx.tick;

            if vehicle.eta == 0 {
                vehicle.status = VehicleStatus::Available;
                vehicle.eta = draw_eta(rng);
                events.push(SimulationEvent::VehicleArrived {
                    vehicle: vehicle.id.clone(),
                    next_eta: vehicle.eta,
                });
            }
        }

        if rng.gen::<f64>() < dynamics.status_flip_chance {
            let drawn = VehicleStatus::draw(rng);
            if drawn != vehicle.status {
                events.push(SimulationEvent::StatusChanged {
                    vehicle: vehicle.id.clone(),
                    from: vehicle.status,
                    to: drawn,
                });
                vehicle.status = drawn;
                vehicle.eta = draw_eta(rng);
                vehicle.route = draw_route(rng);
                vehicle.last_update = ctx.tick;
            }
        }
    }
}

fn update_demand<R: Rng + ?Sized>(state: &mut FleetState, rng: &mut R, ctx: &TickContext<'_>) {
    let rush_hour = ctx.is_rush_hour();
    for zone in &mut state.demand_zones {
        zone.drift(
            rng,
            rush_hour,
            ctx.dynamics.rush_increment,
            ctx.dynamics.calm_decrement,
        );
    }
}

fn update_traffic<R: Rng + ?Sized>(
    state: &mut FleetState,
    rng: &mut R,
    ctx: &TickContext<'_>,
    events: &mut Vec<SimulationEvent>,
) {
    for record in &mut state.traffic {
        if record.drift(rng, ctx.dynamics.traffic_shift_chance) {
            events.push(SimulationEvent::CongestionChanged {
                area: record.area.clone(),
                level: record.congestion,
            });
        }
    }
}
