//! Demand zones: request counts and their derived level

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::types::{GeoPoint, Level};

pub type DemandLevel = Level;

/// Zones above this many requests are high demand
pub const HIGH_DEMAND_REQUESTS: u32 = 12;
/// Zones above this many requests are at least medium demand
pub const MEDIUM_DEMAND_REQUESTS: u32 = 6;

/// Demand level for a request count
pub fn level_for_requests(requests: u32) -> DemandLevel {
    if requests > HIGH_DEMAND_REQUESTS {
        Level::High
    } else if requests > MEDIUM_DEMAND_REQUESTS {
        Level::Medium
    } else {
        Level::Low
    }
}

/// Area with aggregated ride requests
///
/// The level is only ever written alongside the request count, so it can
/// never disagree with [`level_for_requests`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandZone {
    pub name: String,
    pub position: GeoPoint,
    requests: u32,
    level: DemandLevel,
}

impl DemandZone {
    pub fn new(name: impl Into<String>, position: GeoPoint, requests: u32) -> Self {
        Self {
            name: name.into(),
            position,
            requests,
            level: level_for_requests(requests),
        }
    }

    pub fn requests(&self) -> u32 {
        self.requests
    }

    pub fn level(&self) -> DemandLevel {
        self.level
    }

    pub fn set_requests(&mut self, requests: u32) {
        self.requests = requests;
        self.level = level_for_requests(requests);
    }

    /// Rush hour adds `0..increment` requests; otherwise `0..decrement` are
    /// removed, floored at zero.
    pub fn drift<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        rush_hour: bool,
        increment: u32,
        decrement: u32,
    ) {
        let requests = if rush_hour {
            self.requests.saturating_add(draw_below(rng, increment))
        } else {
            self.requests.saturating_sub(draw_below(rng, decrement))
        };
        self.set_requests(requests);
    }
}

fn draw_below<R: Rng + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    if bound == 0 {
        0
    } else {
        rng.gen_range(0..bound)
    }
}

/// Zone counts per level, as `(high, medium, low)`
pub fn distribution(zones: &[DemandZone]) -> (usize, usize, usize) {
    zones.iter().fold((0, 0, 0), |(h, m, l), z| match z.level() {
        Level::High => (h + 1, m, l),
        Level::Medium => (h, m + 1, l),
        Level::Low => (h, m, l + 1),
    })
}
