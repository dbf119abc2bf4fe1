//! Collection route optimizer.
//!
//! Four interchangeable strategies build a single-crew tour over a set of
//! visit points: greedy nearest neighbor, urgency order, urgency-bucketed
//! nearest neighbor, and 2-opt improvement over the greedy tour.

use tracing::{debug, info, warn};

use crate::haversine::{DEFAULT_SPEED_KMH, GeoPoint, TravelModel};
use crate::tour::{Algorithm, Tour, TourEvaluator};
use crate::visit::{DEFAULT_SERVICE_MINUTES, VisitPoint};

/// Fleet base used when no depot is configured (Nagpur municipal yard).
pub const DEFAULT_DEPOT: (f64, f64) = (21.1458, 79.0882);

pub fn default_depot() -> GeoPoint {
    GeoPoint::labeled(DEFAULT_DEPOT.0, DEFAULT_DEPOT.1, "Depot")
}

#[derive(Debug, Clone)]
pub struct OptimizerOptions {
    /// Average driving speed (km/h) used to turn distance into minutes.
    pub average_speed_kmh: f64,
    /// Service time for bins whose record carries none.
    pub default_service_minutes: u32,
    /// Urgency score at or above which a stop joins the high bucket.
    pub high_urgency_threshold: f64,
    /// Urgency score at or above which a stop joins the medium bucket.
    pub medium_urgency_threshold: f64,
    /// Run the comparator's algorithms on the rayon pool.
    pub parallel_compare: bool,
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_SPEED_KMH,
            default_service_minutes: DEFAULT_SERVICE_MINUTES,
            high_urgency_threshold: 70.0,
            medium_urgency_threshold: 40.0,
            parallel_compare: true,
        }
    }
}

/// Urgency bucket used by the hybrid strategy, visited in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrgencyBand {
    High,
    Medium,
    Low,
}

/// Builds collection tours from a start location, optionally returning to a
/// depot.
///
/// Holds no state besides its configuration; every call is a pure function
/// of its arguments.
#[derive(Debug, Clone, Default)]
pub struct RouteOptimizer {
    depot: Option<GeoPoint>,
    options: OptimizerOptions,
}

impl RouteOptimizer {
    pub fn new(options: OptimizerOptions) -> Self {
        Self { depot: None, options }
    }

    /// Every tour will end with a leg back to `depot`.
    pub fn with_depot(mut self, depot: GeoPoint) -> Self {
        self.depot = Some(depot);
        self
    }

    pub fn depot(&self) -> Option<&GeoPoint> {
        self.depot.as_ref()
    }

    pub fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    pub fn evaluator(&self) -> TourEvaluator<'_> {
        TourEvaluator::new(
            self.depot.as_ref(),
            TravelModel::new(self.options.average_speed_kmh),
        )
    }

    pub fn urgency_band(&self, point: &VisitPoint) -> UrgencyBand {
        let score = point.urgency_score();
        if score >= self.options.high_urgency_threshold {
            UrgencyBand::High
        } else if score >= self.options.medium_urgency_threshold {
            UrgencyBand::Medium
        } else {
            UrgencyBand::Low
        }
    }

    /// Run the algorithm selected by name; unknown names use the hybrid strategy.
    pub fn optimize(&self, points: &[VisitPoint], start: &GeoPoint, algorithm: &str) -> Tour {
        let selected = match algorithm.parse::<Algorithm>() {
            Ok(selected) => selected,
            Err(_) => {
                warn!(requested = algorithm, "unknown routing algorithm, falling back to hybrid");
                Algorithm::Hybrid
            }
        };

        let tour = self.run(selected, points, start);
        info!(
            algorithm = tour.algorithm().tag(),
            stops = tour.len(),
            distance_km = tour.total_distance_km(),
            time_minutes = tour.total_time_minutes(),
            "route optimized"
        );
        tour
    }

    pub fn run(&self, algorithm: Algorithm, points: &[VisitPoint], start: &GeoPoint) -> Tour {
        debug!(algorithm = algorithm.name(), points = points.len(), "building tour");

        match algorithm {
            Algorithm::Greedy => self.greedy_nearest_neighbor(points, start),
            Algorithm::Priority => self.priority_based(points, start),
            Algorithm::Hybrid => self.hybrid_optimized(points, start),
            Algorithm::TwoOpt => {
                let seed = self.greedy_nearest_neighbor(points, start);
                self.two_opt(seed.into_stops(), start)
            }
        }
    }

    /// Always drive to the closest remaining bin. Ties go to the earlier input.
    pub fn greedy_nearest_neighbor(&self, points: &[VisitPoint], start: &GeoPoint) -> Tour {
        let all: Vec<usize> = (0..points.len()).collect();
        let mut order = Vec::with_capacity(points.len());
        nearest_neighbor_sequence(points, &all, start, &mut order);

        self.evaluator()
            .build(Algorithm::Greedy, start, materialize(points, &order))
    }

    /// Visit in descending urgency, ignoring geography. Equal scores keep
    /// input order.
    pub fn priority_based(&self, points: &[VisitPoint], start: &GeoPoint) -> Tour {
        let scores: Vec<f64> = points.iter().map(VisitPoint::urgency_score).collect();
        let mut order: Vec<usize> = (0..points.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));

        self.evaluator()
            .build(Algorithm::Priority, start, materialize(points, &order))
    }

    /// Nearest neighbor inside each urgency band, bands visited high to low.
    /// The search position carries over from one band to the next.
    pub fn hybrid_optimized(&self, points: &[VisitPoint], start: &GeoPoint) -> Tour {
        let mut bands: [Vec<usize>; 3] = Default::default();
        for (index, point) in points.iter().enumerate() {
            bands[self.urgency_band(point) as usize].push(index);
        }

        let mut order = Vec::with_capacity(points.len());
        let mut current = start;
        for band in &bands {
            current = nearest_neighbor_sequence(points, band, current, &mut order);
        }

        self.evaluator()
            .build(Algorithm::Hybrid, start, materialize(points, &order))
    }

    // ========================================================================
    // Local Search
    // ========================================================================

    /// 2-opt: reverse a segment whenever that shortens the whole tour.
    ///
    /// First improvement: after each accepted move the scan restarts from
    /// the first pair. Stops after a full pass without improvement. Every
    /// candidate is evaluated over the full tour, O(n) per candidate.
    pub fn two_opt(&self, seed: Vec<VisitPoint>, start: &GeoPoint) -> Tour {
        let evaluator = self.evaluator();
        let mut route = seed;
        let n = route.len();
        let mut best = evaluator.distance_km(start, &route);
        let mut moves = 0usize;

        'search: loop {
            for i in 0..n.saturating_sub(1) {
                for j in i + 1..n {
                    route[i..=j].reverse();
                    let candidate = evaluator.distance_km(start, &route);
                    if candidate < best {
                        best = candidate;
                        moves += 1;
                        continue 'search;
                    }
                    route[i..=j].reverse();
                }
            }
            break;
        }

        debug!(moves, distance_km = best, "2-opt converged");
        evaluator.build(Algorithm::TwoOpt, start, route)
    }
}

/// Append `candidates` to `order` in nearest-neighbor order starting at
/// `start`, returning the location of the last stop appended (or `start`).
fn nearest_neighbor_sequence<'a>(
    points: &'a [VisitPoint],
    candidates: &[usize],
    start: &'a GeoPoint,
    order: &mut Vec<usize>,
) -> &'a GeoPoint {
    let mut visited = vec![false; candidates.len()];
    let mut current = start;

    for _ in 0..candidates.len() {
        let mut best: Option<(usize, f64)> = None;
        for (slot, &index) in candidates.iter().enumerate() {
            if visited[slot] {
                continue;
            }
            let d = current.distance_to(&points[index].location);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((slot, d));
            }
        }

        let Some((slot, _)) = best else { break };
        visited[slot] = true;
        order.push(candidates[slot]);
        current = &points[candidates[slot]].location;
    }

    current
}

fn materialize(points: &[VisitPoint], order: &[usize]) -> Vec<VisitPoint> {
    order.iter().map(|&index| points[index].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visit::PriorityClass;

    fn stop(id: &str, lat: f64, lon: f64, fill: u8, priority: PriorityClass) -> VisitPoint {
        VisitPoint::new(id, GeoPoint::new(lat, lon), fill, priority)
    }

    fn line_points() -> Vec<VisitPoint> {
        vec![
            stop("c", 21.03, 79.0, 10, PriorityClass::Low),
            stop("a", 21.01, 79.0, 10, PriorityClass::Low),
            stop("b", 21.02, 79.0, 10, PriorityClass::Low),
        ]
    }

    #[test]
    fn greedy_walks_the_line() {
        let optimizer = RouteOptimizer::default();
        let tour = optimizer.greedy_nearest_neighbor(&line_points(), &GeoPoint::new(21.0, 79.0));
        assert_eq!(tour.stop_ids(), vec!["a", "b", "c"]);
        assert_eq!(tour.algorithm(), Algorithm::Greedy);
    }

    #[test]
    fn greedy_tie_goes_to_first_input() {
        let optimizer = RouteOptimizer::default();
        let start = GeoPoint::new(21.0, 79.0);
        let first = stop("first", 21.01, 79.0, 10, PriorityClass::Low);
        let second = stop("second", 21.01, 79.0, 10, PriorityClass::Low);

        let tour = optimizer.greedy_nearest_neighbor(&[first.clone(), second.clone()], &start);
        assert_eq!(tour.stop_ids(), vec!["first", "second"]);

        let tour = optimizer.greedy_nearest_neighbor(&[second, first], &start);
        assert_eq!(tour.stop_ids(), vec!["second", "first"]);
    }

    #[test]
    fn urgency_bands_use_thresholds() {
        let optimizer = RouteOptimizer::default();
        // 0.7 * 100 + 10 = 80
        let high = stop("h", 0.0, 0.0, 100, PriorityClass::Low);
        // 0.7 * 0 + 30 = 30
        let low = stop("l", 0.0, 0.0, 0, PriorityClass::High);
        // 0.7 * 50 + 10 = 45
        let medium = stop("m", 0.0, 0.0, 50, PriorityClass::Low);
        assert_eq!(optimizer.urgency_band(&high), UrgencyBand::High);
        assert_eq!(optimizer.urgency_band(&medium), UrgencyBand::Medium);
        assert_eq!(optimizer.urgency_band(&low), UrgencyBand::Low);
    }

    #[test]
    fn two_opt_untangles_crossing() {
        let optimizer = RouteOptimizer::default().with_depot(GeoPoint::new(21.0, 79.0));
        let start = GeoPoint::new(21.0, 79.0);
        let crossed = vec![
            stop("a", 21.01, 79.0, 10, PriorityClass::Low),
            stop("c", 21.01, 79.01, 10, PriorityClass::Low),
            stop("b", 21.02, 79.0, 10, PriorityClass::Low),
            stop("d", 21.02, 79.01, 10, PriorityClass::Low),
        ];
        let before = optimizer.evaluator().distance_km(&start, &crossed);
        let tour = optimizer.two_opt(crossed, &start);

        assert!(tour.total_distance_km() < before);
        assert_eq!(tour.algorithm(), Algorithm::TwoOpt);
    }

    #[test]
    fn two_opt_single_stop_keeps_real_distance() {
        let optimizer = RouteOptimizer::default();
        let start = GeoPoint::new(21.0, 79.0);
        let only = vec![stop("a", 21.01, 79.0, 10, PriorityClass::Low)];
        let tour = optimizer.two_opt(only, &start);

        assert_eq!(tour.len(), 1);
        assert!(tour.total_distance_km() > 1.0);
    }

    #[test]
    fn options_default_to_thirty_kmh() {
        let options = OptimizerOptions::default();
        assert_eq!(options.average_speed_kmh, 30.0);
        assert_eq!(options.default_service_minutes, 10);
        assert!(options.parallel_compare);
    }
}
