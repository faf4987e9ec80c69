//! Vehicles, their status machine inputs, and trip routes

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::{GeoPoint, Tick, VehicleId};

/// Shortest ETA a new trip can be assigned (minutes, inclusive)
pub const ETA_MIN: u32 = 5;
/// Upper bound for newly drawn ETAs (minutes, exclusive)
pub const ETA_MAX: u32 = 25;

pub const MAX_FUEL: u8 = 100;

/// Operational status of a vehicle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Occupied,
    Enroute,
    Idle,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 4] = [
        VehicleStatus::Available,
        VehicleStatus::Occupied,
        VehicleStatus::Enroute,
        VehicleStatus::Idle,
    ];

    /// Probability of this status in a fresh draw
    pub fn draw_weight(&self) -> f64 {
        match self {
            Self::Available => 0.4,
            Self::Occupied => 0.3,
            Self::Enroute => 0.2,
            Self::Idle => 0.1,
        }
    }

    /// Moving vehicles are displaced and count down their ETA each tick
    pub fn is_moving(&self) -> bool {
        matches!(self, Self::Occupied | Self::Enroute)
    }

    /// Weighted draw over all statuses
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let roll: f64 = rng.gen();
        let mut cumulative = 0.0;
        for status in Self::ALL {
            cumulative += status.draw_weight();
            if roll <= cumulative {
                return status;
            }
        }
        Self::Available
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Enroute => "enroute",
            Self::Idle => "idle",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin/destination landmark pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub origin: String,
    pub destination: String,
}

impl Route {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.origin, self.destination)
    }
}

/// A single fleet vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub position: GeoPoint,
    pub status: VehicleStatus,
    /// Percent, always within 0..=100
    fuel: u8,
    pub route: Route,
    /// Minutes until arrival
    pub eta: u32,
    pub last_update: Tick,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        position: GeoPoint,
        status: VehicleStatus,
        fuel: u8,
        route: Route,
        eta: u32,
        last_update: Tick,
    ) -> Self {
        Self {
            id,
            position,
            status,
            fuel: fuel.min(MAX_FUEL),
            route,
            eta,
            last_update,
        }
    }

    pub fn fuel(&self) -> u8 {
        self.fuel
    }

    pub fn is_available(&self) -> bool {
        self.status == VehicleStatus::Available
    }
}

/// Draw a fresh ETA in minutes
pub fn draw_eta<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(ETA_MIN..ETA_MAX)
}
