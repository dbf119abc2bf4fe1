//! Presentation payloads for optimized routes.
//!
//! Values are rounded here, at the boundary; tours keep full precision.

use serde::{Deserialize, Serialize};

use crate::compare::Comparison;
use crate::tour::Tour;

/// One stop of a route as handed to API clients and route storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub bin_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub fill_level: u8,
    /// 1-based position in the route.
    pub order: usize,
    pub estimated_collection_time: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Tag of the algorithm that produced the route.
    pub algorithm: String,
    pub total_distance_km: f64,
    pub estimated_time_minutes: f64,
    pub bin_count: usize,
    pub waypoints: Vec<Waypoint>,
    pub efficiency_score: f64,
}

impl RouteSummary {
    pub fn from_tour(tour: &Tour) -> Self {
        let waypoints = tour
            .stops()
            .iter()
            .enumerate()
            .map(|(index, stop)| Waypoint {
                bin_id: stop.id.clone(),
                latitude: stop.location.lat,
                longitude: stop.location.lon,
                fill_level: stop.fill_level,
                order: index + 1,
                estimated_collection_time: stop.service_minutes,
            })
            .collect::<Vec<_>>();

        Self {
            algorithm: tour.algorithm().tag().to_string(),
            total_distance_km: round_to(tour.total_distance_km(), 2),
            estimated_time_minutes: round_to(tour.total_time_minutes(), 2),
            bin_count: waypoints.len(),
            waypoints,
            efficiency_score: efficiency_score(tour),
        }
    }

    pub fn bin_ids(&self) -> Vec<&str> {
        self.waypoints.iter().map(|waypoint| waypoint.bin_id.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub algorithms: Vec<RouteSummary>,
    /// Tag of the recommended algorithm.
    pub recommended: String,
}

impl ComparisonReport {
    pub fn from_comparison(comparison: &Comparison) -> Self {
        Self {
            algorithms: comparison.tours().iter().map(RouteSummary::from_tour).collect(),
            recommended: comparison.recommended().tag().to_string(),
        }
    }
}

/// Published efficiency: stops per kilometer of the 2-decimal distance,
/// rounded to 3 decimals. 0 when the rounded distance is 0.
pub fn efficiency_score(tour: &Tour) -> f64 {
    let distance = round_to(tour.total_distance_km(), 2);
    if distance > 0.0 {
        round_to(tour.len() as f64 / distance, 3)
    } else {
        0.0
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
