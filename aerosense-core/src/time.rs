//! Calendar Field Derivation
//!
//! The prediction model was trained on calendar features alongside the
//! pollutant concentrations, so every request carries hour / day-of-month /
//! month / weekday derived from the reading's timestamp. [`TimeParts`]
//! centralizes that derivation with the conventions the model expects:
//! month is 1-based and weekday counts from Sunday = 0.

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// Calendar features the prediction model consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeParts {
    /// Hour of day, 0–23.
    pub hour: u32,
    /// Day of month, 1–31.
    pub day: u32,
    /// Month, 1–12.
    pub month: u32,
    /// Day of week, 0 = Sunday .. 6 = Saturday.
    pub weekday: u32,
}

impl TimeParts {
    /// Derive calendar fields from a timestamp.
    pub fn from_timestamp(ts: DateTime<Utc>) -> Self {
        Self {
            hour: ts.hour(),
            day: ts.day(),
            month: ts.month(),
            weekday: ts.weekday().num_days_from_sunday(),
        }
    }
}

impl From<DateTime<Utc>> for TimeParts {
    fn from(ts: DateTime<Utc>) -> Self {
        Self::from_timestamp(ts)
    }
}
