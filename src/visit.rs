//! Collection stops and their urgency ranking.

use serde::{Deserialize, Serialize};

use crate::haversine::GeoPoint;
use crate::traits::BinStatus;

/// Estimated minutes to empty one bin when the record gives no value.
pub const DEFAULT_SERVICE_MINUTES: u32 = 10;

/// Ordinal priority of a stop: low=1, medium=2, high=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityClass {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl PriorityClass {
    /// Derive a priority from fill level and reported status.
    ///
    /// A bin reported `full`, or at 90% or more, is high priority; 70% or
    /// more is medium; everything else is low.
    pub fn from_fill(fill_level: u8, status: BinStatus) -> Self {
        if status == BinStatus::Full || fill_level >= 90 {
            PriorityClass::High
        } else if fill_level >= 70 {
            PriorityClass::Medium
        } else {
            PriorityClass::Low
        }
    }

    pub fn rank(self) -> u8 {
        self as u8
    }
}

/// One bin to collect on a tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitPoint {
    pub id: String,
    pub location: GeoPoint,
    /// Fill level in percent (0-100).
    pub fill_level: u8,
    pub priority: PriorityClass,
    /// Estimated collection time in minutes.
    pub service_minutes: u32,
}

impl VisitPoint {
    pub fn new(
        id: impl Into<String>,
        location: GeoPoint,
        fill_level: u8,
        priority: PriorityClass,
    ) -> Self {
        Self {
            id: id.into(),
            location,
            fill_level,
            priority,
            service_minutes: DEFAULT_SERVICE_MINUTES,
        }
    }

    pub fn with_service_minutes(mut self, minutes: u32) -> Self {
        self.service_minutes = minutes;
        self
    }

    /// Ranking key: `0.7 * fill_level + 10 * priority`. Not normalised.
    pub fn urgency_score(&self) -> f64 {
        urgency_score(self.fill_level, self.priority)
    }
}

pub fn urgency_score(fill_level: u8, priority: PriorityClass) -> f64 {
    0.7 * f64::from(fill_level) + 10.0 * f64::from(priority.rank())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_weights_fill_and_priority() {
        assert!((urgency_score(100, PriorityClass::High) - 100.0).abs() < 1e-9);
        assert!((urgency_score(0, PriorityClass::Low) - 10.0).abs() < 1e-9);
        assert!((urgency_score(50, PriorityClass::Medium) - 55.0).abs() < 1e-9);
    }

    #[test]
    fn priority_from_fill_thresholds() {
        assert_eq!(PriorityClass::from_fill(95, BinStatus::Ok), PriorityClass::High);
        assert_eq!(PriorityClass::from_fill(90, BinStatus::Ok), PriorityClass::High);
        assert_eq!(PriorityClass::from_fill(89, BinStatus::Ok), PriorityClass::Medium);
        assert_eq!(PriorityClass::from_fill(70, BinStatus::Ok), PriorityClass::Medium);
        assert_eq!(PriorityClass::from_fill(69, BinStatus::Ok), PriorityClass::Low);
    }

    #[test]
    fn full_status_overrides_fill_level() {
        assert_eq!(PriorityClass::from_fill(20, BinStatus::Full), PriorityClass::High);
        assert_eq!(PriorityClass::from_fill(20, BinStatus::Maintenance), PriorityClass::Low);
    }

    #[test]
    fn new_visit_uses_default_service_time() {
        let point = VisitPoint::new("b1", GeoPoint::new(21.0, 79.0), 40, PriorityClass::Low);
        assert_eq!(point.service_minutes, DEFAULT_SERVICE_MINUTES);
        assert_eq!(point.with_service_minutes(4).service_minutes, 4);
    }
}
