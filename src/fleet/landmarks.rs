//! Fixed Chennai geography: landmarks, city bounds, and route draws

use rand::Rng;

use crate::core::types::{GeoBounds, GeoPoint};
use crate::fleet::vehicle::Route;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub name: &'static str,
    pub position: GeoPoint,
}

const fn landmark(name: &'static str, lat: f64, lng: f64) -> Landmark {
    Landmark {
        name,
        position: GeoPoint { lat, lng },
    }
}

pub const LANDMARKS: [Landmark; 8] = [
    landmark("T.Nagar", 13.0418, 80.2341),
    landmark("Anna Nagar", 13.0850, 80.2101),
    landmark("OMR", 12.9279, 80.2397),
    landmark("Marina Beach", 13.0827, 80.2707),
    landmark("Central Station", 13.0836, 80.2753),
    landmark("Airport", 13.0067, 80.1648),
    landmark("Guindy", 13.0067, 80.2206),
    landmark("Velachery", 12.9750, 80.2200),
];

/// Landmarks that trips run between
pub const ROUTE_LANDMARKS: [&str; 5] = [
    "T.Nagar",
    "Anna Nagar",
    "OMR",
    "Marina Beach",
    "Central Station",
];

pub const CITY_CENTER: GeoPoint = GeoPoint {
    lat: 13.0878,
    lng: 80.2785,
};

/// Area random vehicles are placed in
pub const CITY_BOUNDS: GeoBounds = GeoBounds {
    north: 13.4,
    south: 12.8,
    east: 80.6,
    west: 80.0,
};

pub fn find(name: &str) -> Option<&'static Landmark> {
    LANDMARKS.iter().find(|l| l.name == name)
}

/// Position of a named landmark, falling back to the city center
pub fn position_of(name: &str) -> GeoPoint {
    find(name).map(|l| l.position).unwrap_or(CITY_CENTER)
}

/// Draw a route between two distinct route landmarks
pub fn draw_route<R: Rng + ?Sized>(rng: &mut R) -> Route {
    let n = ROUTE_LANDMARKS.len();
    let from = rng.gen_range(0..n);
    let mut to = rng.gen_range(0..n - 1);
    if to >= from {
        to += 1;
    }
    Route::new(ROUTE_LANDMARKS[from], ROUTE_LANDMARKS[to])
}

/// Uniform random point inside `bounds`
pub fn random_point<R: Rng + ?Sized>(rng: &mut R, bounds: &GeoBounds) -> GeoPoint {
    GeoPoint::new(
        bounds.south + rng.gen::<f64>() * (bounds.north - bounds.south),
        bounds.west + rng.gen::<f64>() * (bounds.east - bounds.west),
    )
}
