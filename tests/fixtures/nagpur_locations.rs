//! Nagpur locations for realistic collection-route fixtures.
//!
//! Coordinates are approximate neighbourhood centres.

#![allow(dead_code)]

use bin_route_planner::haversine::GeoPoint;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::labeled(self.lat, self.lng, self.name)
    }
}

pub const DEPOT: Location = Location::new("Municipal Depot", 21.1458, 79.0882);

// ============================================================================
// Residential and market areas (bin sites)
// ============================================================================

pub const COLLECTION_SITES: &[Location] = &[
    Location::new("Sitabuldi", 21.1466, 79.0815),
    Location::new("Dharampeth", 21.1400, 79.0700),
    Location::new("Sadar", 21.1630, 79.0800),
    Location::new("Itwari", 21.1530, 79.1130),
    Location::new("Mahal", 21.1430, 79.1100),
    Location::new("Dhantoli", 21.1350, 79.0850),
    Location::new("Ramdaspeth", 21.1380, 79.0770),
    Location::new("Civil Lines", 21.1600, 79.0700),
    Location::new("Pratap Nagar", 21.1150, 79.0560),
    Location::new("Manish Nagar", 21.0880, 79.0770),
    Location::new("Nandanvan", 21.1360, 79.1300),
    Location::new("Futala Lake", 21.1545, 79.0440),
];
