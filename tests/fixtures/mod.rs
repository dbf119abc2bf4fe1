//! Test fixtures for bin-route-planner.
//!
//! Provides realistic test data including:
//! - Real Nagpur neighbourhood locations used as bin sites
//! - The municipal depot used as the fleet base

pub mod nagpur_locations;

pub use nagpur_locations::*;
