//! Record traits for the collaborators that own bins and crews.
//!
//! Storage layers implement these for their own row types; the planner
//! only reads through them.

use serde::{Deserialize, Serialize};

/// A physical waste bin that can be scheduled for collection.
pub trait CollectionBin {
    fn id(&self) -> &str;

    /// Stored coordinates (lat, lon), if the record has them.
    fn coordinates(&self) -> Option<(f64, f64)>;

    /// Free-form location text; may itself be a `"lat,lon"` pair.
    fn location_label(&self) -> &str;

    /// Current fill level in percent (0-100).
    fn fill_level(&self) -> u8;

    fn status(&self) -> BinStatus;

    /// Estimated collection time in minutes. `None` uses the optimizer default.
    fn service_minutes(&self) -> Option<u32> {
        None
    }
}

/// A collection crew (truck and staff).
pub trait Crew {
    fn id(&self) -> &str;

    fn name(&self) -> &str;

    /// Last reported position (lat, lon), if known.
    fn current_location(&self) -> Option<(f64, f64)>;
}

/// Operational status reported for a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinStatus {
    #[default]
    Ok,
    Full,
    Offline,
    Maintenance,
}

impl BinStatus {
    /// Lenient parse of a stored status string; unknown values read as `Ok`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "full" => BinStatus::Full,
            "offline" => BinStatus::Offline,
            "maintenance" => BinStatus::Maintenance,
            _ => BinStatus::Ok,
        }
    }
}
