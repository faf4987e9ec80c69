//! Initial fleet generation
//!
//! A fixed seed set of vehicles, zones and traffic records is laid down
//! first, then the fleet is filled up with random vehicles.

use rand::Rng;

use crate::core::types::{Level, Tick, VehicleId};
use crate::fleet::demand::DemandZone;
use crate::fleet::landmarks::{self, CITY_BOUNDS};
use crate::fleet::state::FleetState;
use crate::fleet::traffic::TrafficRecord;
use crate::fleet::vehicle::{draw_eta, Vehicle, VehicleStatus};
use crate::fleet::weather::WeatherState;

/// Fill-up vehicles start with at least this much fuel
pub const MIN_START_FUEL: u8 = 40;

/// (home landmark, status, fuel) for FL001..FL005
const SEED_VEHICLES: [(&str, VehicleStatus, u8); 5] = [
    ("Anna Nagar", VehicleStatus::Available, 85),
    ("T.Nagar", VehicleStatus::Occupied, 72),
    ("Velachery", VehicleStatus::Enroute, 94),
    ("Airport", VehicleStatus::Idle, 45),
    ("Marina Beach", VehicleStatus::Available, 78),
];

const SEED_DEMAND: [(&str, u32); 4] = [
    ("T.Nagar", 12),
    ("Anna Nagar", 7),
    ("OMR", 15),
    ("Central Station", 8),
];

const SEED_TRAFFIC: [(&str, Level, u32); 4] = [
    ("T.Nagar", Level::High, 2),
    ("OMR", Level::Medium, 0),
    ("Anna Nagar", Level::Low, 0),
    ("Marina Beach", Level::Medium, 1),
];

pub fn seed_demand_zones() -> Vec<DemandZone> {
    SEED_DEMAND
        .iter()
        .map(|&(name, requests)| DemandZone::new(name, landmarks::position_of(name), requests))
        .collect()
}

pub fn seed_traffic() -> Vec<TrafficRecord> {
    SEED_TRAFFIC
        .iter()
        .map(|&(area, level, incidents)| TrafficRecord::new(area, level, incidents))
        .collect()
}

/// Random vehicle placed anywhere in the city bounds
pub fn random_vehicle<R: Rng + ?Sized>(id: VehicleId, rng: &mut R, tick: Tick) -> Vehicle {
    let position = landmarks::random_point(rng, &CITY_BOUNDS);
    let status = VehicleStatus::draw(rng);
    let fuel = rng.gen_range(MIN_START_FUEL..100);
    let route = landmarks::draw_route(rng);
    let eta = draw_eta(rng);
    Vehicle::new(id, position, status, fuel, route, eta, tick)
}

/// Build the full starting state for a fleet of `fleet_size` vehicles.
///
/// Fleets smaller than the seed set keep only the first `fleet_size`
/// seed vehicles.
pub fn generate_initial_state<R: Rng + ?Sized>(fleet_size: usize, rng: &mut R) -> FleetState {
    let mut state = FleetState::new(seed_demand_zones(), seed_traffic(), WeatherState::new());

    for (i, &(home, status, fuel)) in SEED_VEHICLES.iter().take(fleet_size).enumerate() {
        let route = landmarks::draw_route(rng);
        let eta = draw_eta(rng);
        state.push_vehicle(Vehicle::new(
            VehicleId::from_index(i + 1),
            landmarks::position_of(home),
            status,
            fuel,
            route,
            eta,
            0,
        ));
    }

    for n in state.fleet_size()..fleet_size {
        state.push_vehicle(random_vehicle(VehicleId::from_index(n + 1), rng, 0));
    }

    tracing::debug!(
        vehicles = state.fleet_size(),
        zones = state.demand_zones.len(),
        "Generated initial fleet state"
    );

    state
}
