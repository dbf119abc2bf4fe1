//! Request adapter between bin/crew records and the optimizer.
//!
//! Resolves requested bin ids against the records supplied by the caller,
//! turns them into visit points, picks the start location, and renders the
//! optimizer's output into report payloads.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlannerError;
use crate::haversine::GeoPoint;
use crate::report::{ComparisonReport, RouteSummary};
use crate::solver::{RouteOptimizer, default_depot};
use crate::traits::{CollectionBin, Crew};
use crate::tour::Algorithm;
use crate::visit::{PriorityClass, VisitPoint};

/// A route planning request as received from the API layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeRequest {
    pub bin_ids: Vec<String>,
    #[serde(default)]
    pub crew_id: Option<String>,
    #[serde(default)]
    pub start_latitude: Option<f64>,
    #[serde(default)]
    pub start_longitude: Option<f64>,
    /// One of `greedy|priority|hybrid|two_opt`; anything else means hybrid.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

fn default_algorithm() -> String {
    Algorithm::Hybrid.name().to_string()
}

impl OptimizeRequest {
    pub fn new(bin_ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            bin_ids: bin_ids.into_iter().map(Into::into).collect(),
            crew_id: None,
            start_latitude: None,
            start_longitude: None,
            algorithm: default_algorithm(),
        }
    }

    pub fn algorithm(mut self, name: &str) -> Self {
        self.algorithm = name.to_string();
        self
    }

    pub fn crew(mut self, crew_id: &str) -> Self {
        self.crew_id = Some(crew_id.to_string());
        self
    }

    pub fn start_at(mut self, lat: f64, lon: f64) -> Self {
        self.start_latitude = Some(lat);
        self.start_longitude = Some(lon);
        self
    }

    pub fn start_location(&self) -> StartLocation {
        match (self.start_latitude, self.start_longitude, &self.crew_id) {
            (Some(lat), Some(lon), _) => {
                StartLocation::Explicit(GeoPoint::labeled(lat, lon, "Start Point"))
            }
            (_, _, Some(crew_id)) => StartLocation::Crew(crew_id.clone()),
            _ => StartLocation::Depot,
        }
    }
}

/// Where a tour begins.
#[derive(Debug, Clone, PartialEq)]
pub enum StartLocation {
    Explicit(GeoPoint),
    /// The crew's last reported position.
    Crew(String),
    Depot,
}

impl StartLocation {
    /// A crew that is unknown or has no position starts from the depot.
    pub fn resolve<C: Crew>(&self, crews: &[C], depot: &GeoPoint) -> GeoPoint {
        match self {
            StartLocation::Explicit(point) => point.clone(),
            StartLocation::Crew(crew_id) => {
                let position = crews
                    .iter()
                    .find(|crew| crew.id() == crew_id)
                    .and_then(|crew| {
                        crew.current_location()
                            .map(|(lat, lon)| GeoPoint::labeled(lat, lon, format!("Crew {}", crew.name())))
                    });

                position.unwrap_or_else(|| {
                    debug!(crew_id = crew_id.as_str(), "crew position unknown, starting at depot");
                    depot.clone()
                })
            }
            StartLocation::Depot => depot.clone(),
        }
    }
}

/// Location of a bin: stored coordinates, else its label read as `"lat,lon"`.
pub fn bin_location<B: CollectionBin>(bin: &B) -> Result<GeoPoint, PlannerError> {
    if let Some((lat, lon)) = bin.coordinates() {
        return Ok(GeoPoint::labeled(lat, lon, bin.location_label()));
    }

    GeoPoint::parse(bin.location_label())
        .map_err(|_| PlannerError::MissingCoordinates(bin.id().to_string()))
}

/// Build visit points for `bin_ids`, in request order.
///
/// Repeated ids are visited once. Fails with [`PlannerError::MissingBins`]
/// listing every id without a record before any point is built.
pub fn visit_points<B: CollectionBin>(
    bin_ids: &[String],
    bins: &[B],
    default_service_minutes: u32,
) -> Result<Vec<VisitPoint>, PlannerError> {
    let by_id: HashMap<&str, &B> = bins.iter().map(|bin| (bin.id(), bin)).collect();

    let mut missing: Vec<String> = bin_ids
        .iter()
        .filter(|id| !by_id.contains_key(id.as_str()))
        .cloned()
        .collect();
    if !missing.is_empty() {
        missing.sort();
        missing.dedup();
        return Err(PlannerError::MissingBins(missing));
    }

    let mut seen = HashSet::new();
    let mut points = Vec::with_capacity(bin_ids.len());
    for id in bin_ids {
        if !seen.insert(id.as_str()) {
            continue;
        }
        let bin = by_id[id.as_str()];
        let location = bin_location(bin)?;
        let priority = PriorityClass::from_fill(bin.fill_level(), bin.status());
        let service = bin.service_minutes().unwrap_or(default_service_minutes);

        points.push(VisitPoint::new(id.clone(), location, bin.fill_level(), priority).with_service_minutes(service));
    }

    Ok(points)
}

/// Planned routes always return to base: an optimizer without a depot is
/// given the default fleet base.
fn with_fleet_base(optimizer: &RouteOptimizer) -> Cow<'_, RouteOptimizer> {
    match optimizer.depot() {
        Some(_) => Cow::Borrowed(optimizer),
        None => Cow::Owned(optimizer.clone().with_depot(default_depot())),
    }
}

fn prepare<'o, B, C>(
    request: &OptimizeRequest,
    bins: &[B],
    crews: &[C],
    optimizer: &'o RouteOptimizer,
) -> Result<(Vec<VisitPoint>, GeoPoint, Cow<'o, RouteOptimizer>), PlannerError>
where
    B: CollectionBin,
    C: Crew,
{
    let points = visit_points(&request.bin_ids, bins, optimizer.options().default_service_minutes)?;
    let optimizer = with_fleet_base(optimizer);
    let depot = optimizer.depot().cloned().unwrap_or_else(default_depot);
    let start = request.start_location().resolve(crews, &depot);
    Ok((points, start, optimizer))
}

/// Plan one route with the algorithm named in the request.
///
/// The route ends at the optimizer's depot, or at
/// [`DEFAULT_DEPOT`](crate::solver::DEFAULT_DEPOT) when none is configured.
pub fn plan_route<B, C>(
    request: &OptimizeRequest,
    bins: &[B],
    crews: &[C],
    optimizer: &RouteOptimizer,
) -> Result<RouteSummary, PlannerError>
where
    B: CollectionBin,
    C: Crew,
{
    let (points, start, optimizer) = prepare(request, bins, crews, optimizer)?;
    let tour = optimizer.optimize(&points, &start, &request.algorithm);
    Ok(RouteSummary::from_tour(&tour))
}

/// Plan the request with every algorithm and recommend one.
pub fn compare_routes<B, C>(
    request: &OptimizeRequest,
    bins: &[B],
    crews: &[C],
    optimizer: &RouteOptimizer,
) -> Result<ComparisonReport, PlannerError>
where
    B: CollectionBin,
    C: Crew,
{
    let (points, start, optimizer) = prepare(request, bins, crews, optimizer)?;
    let comparison = optimizer.compare(&points, &start);
    Ok(ComparisonReport::from_comparison(&comparison))
}
