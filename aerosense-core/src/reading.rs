//! Sensor Reading Record
//!
//! ## Overview
//!
//! A [`Reading`] is one timestamped set of pollutant measurements, optionally
//! enriched with the AQI predicted for it by the backend. It is the single
//! record type flowing through the system: the synthetic generator produces
//! them, the predictor enriches them, the recency buffer stores them, and the
//! classifier and source attributor consume them.
//!
//! ## Immutability
//!
//! A `Reading` is never mutated after construction. Enrichment produces a new
//! record via [`Reading::with_prediction`] — the buffer holds a historical
//! sequence, and a historical entry must not change under a consumer holding
//! a snapshot of it.
//!
//! ## Wire format
//!
//! Field names on the wire match the backend API (`PM2_5`, `region_name`,
//! ...), so a `Reading` serializes directly into the payload shape the rest
//! of the product already speaks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sensor observation or simulated sample.
///
/// Pollutant concentrations are in µg/m³ except CO, which is in mg/m³.
/// `None` means "unmeasured", which is distinct from a measured zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Sensor identifier. Not required to reference a real device.
    pub sensor_id: u32,

    /// Point in time the reading applies to.
    pub timestamp: DateTime<Utc>,

    /// Fine particulate matter (≤2.5 µm).
    #[serde(rename = "PM2_5", skip_serializing_if = "Option::is_none")]
    pub pm2_5: Option<f32>,

    /// Coarse particulate matter (≤10 µm).
    #[serde(rename = "PM10", skip_serializing_if = "Option::is_none")]
    pub pm10: Option<f32>,

    /// Nitrogen dioxide.
    #[serde(rename = "NO2", skip_serializing_if = "Option::is_none")]
    pub no2: Option<f32>,

    /// Carbon monoxide, mg/m³.
    #[serde(rename = "CO", skip_serializing_if = "Option::is_none")]
    pub co: Option<f32>,

    /// Sulphur dioxide.
    #[serde(rename = "SO2", skip_serializing_if = "Option::is_none")]
    pub so2: Option<f32>,

    /// Ozone.
    #[serde(rename = "O3", skip_serializing_if = "Option::is_none")]
    pub o3: Option<f32>,

    /// Ammonia.
    #[serde(rename = "NH3", skip_serializing_if = "Option::is_none")]
    pub nh3: Option<f32>,

    /// Ambient temperature in °C, when the sampling site reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Relative humidity in %, when the sampling site reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f32>,

    /// Wind speed in km/h, when the sampling site reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f32>,

    /// Composite air-quality index. Absent until predicted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aqi: Option<f32>,

    /// Category label echoed back by the predictor. This is the backend's
    /// own banding and is not required to agree with [`crate::classify`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Free-text location label.
    #[serde(rename = "region_name", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Reading {
    /// Create a reading with no measurements attached.
    pub fn new(sensor_id: u32, timestamp: DateTime<Utc>) -> Self {
        Self {
            sensor_id,
            timestamp,
            pm2_5: None,
            pm10: None,
            no2: None,
            co: None,
            so2: None,
            o3: None,
            nh3: None,
            temperature: None,
            humidity: None,
            wind_speed: None,
            aqi: None,
            category: None,
            region: None,
        }
    }

    /// Returns a new reading carrying the predictor's result.
    ///
    /// The receiver is left untouched; buffer entries are historical and
    /// must never change in place.
    pub fn with_prediction(&self, aqi: f32, category: impl Into<String>) -> Self {
        Self {
            aqi: Some(aqi),
            category: Some(category.into()),
            ..self.clone()
        }
    }

    /// Whether the predictor has enriched this reading yet.
    pub fn is_enriched(&self) -> bool {
        self.aqi.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Reading {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 14, 30, 0).unwrap();
        Reading {
            pm2_5: Some(42.0),
            pm10: Some(88.0),
            region: Some("Pune".into()),
            ..Reading::new(7, ts)
        }
    }

    #[test]
    fn enrichment_does_not_mutate_original() {
        let raw = sample();
        let enriched = raw.with_prediction(156.3, "Moderate");

        assert!(raw.aqi.is_none());
        assert!(raw.category.is_none());
        assert!(!raw.is_enriched());

        assert_eq!(enriched.aqi, Some(156.3));
        assert_eq!(enriched.category.as_deref(), Some("Moderate"));
        assert!(enriched.is_enriched());

        // Everything else carries over unchanged
        assert_eq!(enriched.sensor_id, raw.sensor_id);
        assert_eq!(enriched.pm2_5, raw.pm2_5);
        assert_eq!(enriched.region, raw.region);
    }

    #[test]
    fn wire_names_match_backend() {
        let json = serde_json::to_value(sample().with_prediction(90.0, "Satisfactory")).unwrap();

        assert_eq!(json["PM2_5"], 42.0);
        assert_eq!(json["PM10"], 88.0);
        assert_eq!(json["region_name"], "Pune");
        assert_eq!(json["category"], "Satisfactory");
        // Unmeasured pollutants are omitted, not null
        assert!(json.get("NO2").is_none());
    }
}
