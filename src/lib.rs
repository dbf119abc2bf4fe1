//! bin-route-planner
//!
//! Collection route optimization for waste-bin fleets: heuristic tour
//! construction, 2-opt improvement, and algorithm comparison over bins
//! supplied by the caller's storage layer.

pub mod error;
pub mod haversine;
pub mod visit;
pub mod tour;
pub mod solver;
pub mod compare;
pub mod traits;
pub mod planning;
pub mod report;
