//! Errors surfaced by the request adapter and strict parsers.
//!
//! The routing heuristics themselves are total and never fail.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// Algorithm selector that is not one of `greedy|priority|hybrid|two_opt`.
    UnknownAlgorithm(String),
    /// Location string that is not of the form `"lat,lon"`.
    InvalidLocation(String),
    /// Requested bin ids with no matching record (sorted, deduplicated).
    MissingBins(Vec<String>),
    /// Bin record with neither coordinates nor a parseable location label.
    MissingCoordinates(String),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::UnknownAlgorithm(name) => write!(f, "unknown routing algorithm: {name}"),
            PlannerError::InvalidLocation(raw) => write!(f, "invalid location string: {raw:?}"),
            PlannerError::MissingBins(ids) => write!(f, "bins not found: {}", ids.join(", ")),
            PlannerError::MissingCoordinates(id) => write!(f, "bin {id} has no usable coordinates"),
        }
    }
}

impl std::error::Error for PlannerError {}
