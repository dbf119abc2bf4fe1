//! Tours, algorithm tags, and the tour evaluator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::haversine::{GeoPoint, TravelModel};
use crate::visit::VisitPoint;

/// The tour-construction strategies the optimizer offers.
///
/// Serialises as its selector name (`"greedy"`, `"two_opt"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Greedy,
    Priority,
    #[default]
    Hybrid,
    TwoOpt,
}

impl Algorithm {
    /// Fixed comparison order; also the tie-break order for recommendations.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Greedy,
        Algorithm::Priority,
        Algorithm::Hybrid,
        Algorithm::TwoOpt,
    ];

    /// Selector name accepted on input.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Greedy => "greedy",
            Algorithm::Priority => "priority",
            Algorithm::Hybrid => "hybrid",
            Algorithm::TwoOpt => "two_opt",
        }
    }

    /// Tag reported on produced tours.
    pub fn tag(self) -> &'static str {
        match self {
            Algorithm::Greedy => "greedy_nearest_neighbor",
            Algorithm::Priority => "priority_based",
            Algorithm::Hybrid => "hybrid_optimized",
            Algorithm::TwoOpt => "two_opt_optimized",
        }
    }

    /// Permissive lookup: unrecognised names select [`Algorithm::Hybrid`].
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for Algorithm {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| PlannerError::UnknownAlgorithm(s.to_string()))
    }
}

/// Displays the selector name, so `to_string().parse()` round-trips.
impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An ordered collection tour with aggregate metrics.
///
/// Built by [`TourEvaluator::build`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    algorithm: Algorithm,
    stops: Vec<VisitPoint>,
    total_distance_km: f64,
    total_time_minutes: f64,
}

impl Tour {
    pub fn empty(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            stops: Vec::new(),
            total_distance_km: 0.0,
            total_time_minutes: 0.0,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Stops in visiting order.
    pub fn stops(&self) -> &[VisitPoint] {
        &self.stops
    }

    pub fn stop_ids(&self) -> Vec<&str> {
        self.stops.iter().map(|stop| stop.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    pub fn total_time_minutes(&self) -> f64 {
        self.total_time_minutes
    }

    /// Stops per kilometer; 0 when the tour has no distance.
    pub fn efficiency(&self) -> f64 {
        if self.total_distance_km > 0.0 {
            self.stops.len() as f64 / self.total_distance_km
        } else {
            0.0
        }
    }

    pub fn into_stops(self) -> Vec<VisitPoint> {
        self.stops
    }
}

/// Distance and time of one ordering.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TourMetrics {
    pub distance_km: f64,
    pub time_minutes: f64,
}

/// Walks an ordering from the start, through every stop, and back to the
/// depot when one is configured.
#[derive(Debug, Clone, Copy)]
pub struct TourEvaluator<'a> {
    depot: Option<&'a GeoPoint>,
    travel: TravelModel,
}

impl<'a> TourEvaluator<'a> {
    pub fn new(depot: Option<&'a GeoPoint>, travel: TravelModel) -> Self {
        Self { depot, travel }
    }

    /// Total distance in km. An empty ordering has distance 0.
    pub fn distance_km<'p, I>(&self, start: &GeoPoint, stops: I) -> f64
    where
        I: IntoIterator<Item = &'p VisitPoint>,
    {
        self.metrics(start, stops).distance_km
    }

    /// Distance and time, including one service time per stop.
    pub fn metrics<'p, I>(&self, start: &GeoPoint, stops: I) -> TourMetrics
    where
        I: IntoIterator<Item = &'p VisitPoint>,
    {
        let mut metrics = TourMetrics::default();
        let mut current = start;
        let mut visited_any = false;

        for stop in stops {
            let leg = current.distance_to(&stop.location);
            metrics.distance_km += leg;
            metrics.time_minutes += self.travel.km_to_minutes(leg) + f64::from(stop.service_minutes);
            current = &stop.location;
            visited_any = true;
        }

        if visited_any && let Some(depot) = self.depot {
            let leg = current.distance_to(depot);
            metrics.distance_km += leg;
            metrics.time_minutes += self.travel.km_to_minutes(leg);
        }

        metrics
    }

    /// Freeze an ordering into a [`Tour`] with recomputed metrics.
    pub fn build(&self, algorithm: Algorithm, start: &GeoPoint, stops: Vec<VisitPoint>) -> Tour {
        if stops.is_empty() {
            return Tour::empty(algorithm);
        }

        let metrics = self.metrics(start, &stops);
        Tour {
            algorithm,
            stops,
            total_distance_km: metrics.distance_km,
            total_time_minutes: metrics.time_minutes,
        }
    }
}
