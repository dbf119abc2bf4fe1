//! Great-circle geometry for collection stops.
//!
//! Road networks are ignored: distances are straight-line haversine
//! estimates and travel time assumes a constant average driving speed.

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;

/// Average driving speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 30.0;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic coordinate with an optional human-readable label.
///
/// Coordinates are not range-checked; out-of-range values yield a defined
/// but meaningless distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon, label: None }
    }

    pub fn labeled(lat: f64, lon: f64, label: impl Into<String>) -> Self {
        Self {
            lat,
            lon,
            label: Some(label.into()),
        }
    }

    /// Parses a `"lat,lon"` string such as `"21.1458, 79.0882"`.
    pub fn parse(raw: &str) -> Result<Self, PlannerError> {
        let invalid = || PlannerError::InvalidLocation(raw.to_string());

        let (lat, lon) = raw.split_once(',').ok_or_else(invalid)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;
        let lon = lon.trim().parse::<f64>().map_err(|_| invalid())?;

        Ok(Self::labeled(lat, lon, raw.trim()))
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        haversine_km((self.lat, self.lon), (other.lat, other.lon))
    }
}

/// Calculate haversine distance between two `(lat, lon)` points in kilometers.
pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Converts driven distance into minutes at a fixed average speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelModel {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for TravelModel {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl TravelModel {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Convert distance in km to travel time in minutes.
    pub fn km_to_minutes(&self, km: f64) -> f64 {
        km / self.speed_kmh * 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_km((21.1458, 79.0882), (21.1458, 79.0882));
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Nagpur (21.1458, 79.0882) to Mumbai (19.0760, 72.8777)
        // Great-circle distance ~685 km
        let dist = haversine_km((21.1458, 79.0882), (19.0760, 72.8777));
        assert!(dist > 670.0 && dist < 700.0, "Nagpur to Mumbai should be ~685km, got {}", dist);
    }

    #[test]
    fn test_one_hundredth_degree_of_latitude() {
        let dist = haversine_km((21.0, 79.0), (21.01, 79.0));
        assert!((dist - 1.11195).abs() < 1e-4, "got {}", dist);
    }

    #[test]
    fn test_parse_location_string() {
        let point = GeoPoint::parse(" 21.1458 , 79.0882 ").unwrap();
        assert_eq!(point.lat, 21.1458);
        assert_eq!(point.lon, 79.0882);
        assert_eq!(point.label.as_deref(), Some("21.1458 , 79.0882"));
    }

    #[test]
    fn test_parse_rejects_free_text() {
        for raw in ["Sitabuldi market", "21.1,", "a,b", ""] {
            let err = GeoPoint::parse(raw).unwrap_err();
            assert_eq!(err, PlannerError::InvalidLocation(raw.to_string()));
        }
    }

    #[test]
    fn test_reasonable_travel_time() {
        let model = TravelModel::new(30.0);
        // 10 km at 30 km/h = 20 minutes
        assert!((model.km_to_minutes(10.0) - 20.0).abs() < 1e-12);
    }
}
