//! Side-by-side comparison of every routing algorithm.

use rayon::prelude::*;
use tracing::info;

use crate::haversine::GeoPoint;
use crate::report::efficiency_score;
use crate::solver::RouteOptimizer;
use crate::tour::{Algorithm, Tour};
use crate::visit::VisitPoint;

/// One tour per algorithm, in [`Algorithm::ALL`] order, plus a recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    tours: Vec<Tour>,
    recommended: Algorithm,
}

impl Comparison {
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Algorithm whose tour has the highest published efficiency score.
    pub fn recommended(&self) -> Algorithm {
        self.recommended
    }

    pub fn tour(&self, algorithm: Algorithm) -> Option<&Tour> {
        self.tours.iter().find(|tour| tour.algorithm() == algorithm)
    }

    pub fn recommended_tour(&self) -> Option<&Tour> {
        self.tour(self.recommended)
    }
}

impl RouteOptimizer {
    /// Run all four algorithms on the same input.
    ///
    /// The runs share only immutable data, so with `parallel_compare` they
    /// execute on the rayon pool; results are identical either way.
    pub fn compare(&self, points: &[VisitPoint], start: &GeoPoint) -> Comparison {
        let tours: Vec<Tour> = if self.options().parallel_compare {
            Algorithm::ALL
                .as_slice()
                .par_iter()
                .map(|&algorithm| self.run(algorithm, points, start))
                .collect()
        } else {
            Algorithm::ALL
                .iter()
                .map(|&algorithm| self.run(algorithm, points, start))
                .collect()
        };

        let recommended = recommend(&tours);
        info!(
            recommended = recommended.tag(),
            stops = points.len(),
            "compared routing algorithms"
        );

        Comparison { tours, recommended }
    }
}

/// Highest published efficiency score wins; the earliest tour wins ties.
///
/// Scores are compared as reported, so tours that differ by less than the
/// reported precision tie.
fn recommend(tours: &[Tour]) -> Algorithm {
    let mut best: Option<(Algorithm, f64)> = None;
    for tour in tours {
        let score = efficiency_score(tour);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((tour.algorithm(), score));
        }
    }
    best.map(|(algorithm, _)| algorithm).unwrap_or_default()
}
