//! FleetState - the container for everything a tick mutates

use ahash::AHashMap;
use rand::Rng;
use serde::Serialize;

use crate::core::config::validate_fleet_size;
use crate::core::error::Result;
use crate::core::types::{Level, Tick, VehicleId};
use crate::fleet::demand::DemandZone;
use crate::fleet::generation::random_vehicle;
use crate::fleet::traffic::TrafficRecord;
use crate::fleet::vehicle::{Vehicle, VehicleStatus};
use crate::fleet::weather::WeatherState;

/// Vehicles, demand zones, traffic and weather for one simulation
///
/// Vehicles are kept in insertion order with an id index alongside, so the
/// most recently added vehicles are always at the tail.
#[derive(Debug, Clone, Serialize)]
pub struct FleetState {
    vehicles: Vec<Vehicle>,
    #[serde(skip)]
    index: AHashMap<VehicleId, usize>,
    pub demand_zones: Vec<DemandZone>,
    pub traffic: Vec<TrafficRecord>,
    pub weather: WeatherState,
}

/// Net effect of a resize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    Unchanged,
    Added(usize),
    Removed(usize),
}

impl FleetState {
    pub fn new(demand_zones: Vec<DemandZone>, traffic: Vec<TrafficRecord>, weather: WeatherState) -> Self {
        Self {
            vehicles: Vec::new(),
            index: AHashMap::new(),
            demand_zones,
            traffic,
            weather,
        }
    }

    /// Append a vehicle. Returns false (and leaves the fleet unchanged)
    /// when the id is already taken.
    pub(crate) fn push_vehicle(&mut self, vehicle: Vehicle) -> bool {
        if self.index.contains_key(&vehicle.id) {
            return false;
        }
        self.index.insert(vehicle.id.clone(), self.vehicles.len());
        self.vehicles.push(vehicle);
        true
    }

    pub fn fleet_size(&self) -> usize {
        self.vehicles.len()
    }

    pub fn vehicle(&self, id: &str) -> Option<&Vehicle> {
        self.index
            .get(&VehicleId::from(id))
            .and_then(|&i| self.vehicles.get(i))
    }

    pub fn vehicle_mut(&mut self, id: &str) -> Option<&mut Vehicle> {
        let i = *self.index.get(&VehicleId::from(id))?;
        self.vehicles.get_mut(i)
    }

    /// Vehicles in insertion order
    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.iter()
    }

    /// Mutable access for the step function and test setup.
    /// Vehicle ids must not be changed through this.
    pub fn vehicles_mut(&mut self) -> std::slice::IterMut<'_, Vehicle> {
        self.vehicles.iter_mut()
    }

    pub fn vehicle_ids(&self) -> Vec<VehicleId> {
        self.vehicles.iter().map(|v| v.id.clone()).collect()
    }

    /// Grow or shrink the fleet to `target` vehicles.
    ///
    /// New vehicles get the next sequential ids; shrinking removes the most
    /// recently added vehicles first. A target of zero is rejected without
    /// touching the fleet.
    pub fn resize<R: Rng + ?Sized>(&mut self, target: usize, rng: &mut R, tick: Tick) -> Result<ResizeOutcome> {
        validate_fleet_size(target)?;

        let current = self.vehicles.len();
        if target > current {
            for n in current..target {
                let vehicle = random_vehicle(VehicleId::from_index(n + 1), rng, tick);
                self.push_vehicle(vehicle);
            }
            Ok(ResizeOutcome::Added(self.vehicles.len() - current))
        } else if target < current {
            for vehicle in self.vehicles.drain(target..) {
                self.index.remove(&vehicle.id);
            }
            Ok(ResizeOutcome::Removed(current - target))
        } else {
            Ok(ResizeOutcome::Unchanged)
        }
    }

    pub fn count_status(&self, status: VehicleStatus) -> usize {
        self.vehicles.iter().filter(|v| v.status == status).count()
    }

    pub fn available_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_available()).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.count_status(VehicleStatus::Occupied)
    }

    pub fn high_demand_zone_count(&self) -> usize {
        self.demand_zones.iter().filter(|z| z.level() == Level::High).count()
    }

    pub fn high_congestion_count(&self) -> usize {
        self.traffic.iter().filter(|t| t.congestion == Level::High).count()
    }
}
