//! Pollution Source Attribution
//!
//! Heuristic attribution of a reading to the source category most likely
//! responsible for it. Each candidate source has one reference pollutant and
//! a fixed "elevated" threshold; the candidate whose pollutant exceeds its
//! threshold by the largest factor wins, provided it actually meets the
//! threshold. If nothing is elevated, no single source can be blamed and the
//! result is [`PollutionSource::MixedSources`].
//!
//! The candidate order is fixed and the scan keeps the first of any exactly
//! tied maxima, so attribution is deterministic for a given reading.

use serde::{Deserialize, Serialize};

use crate::classify::ColorToken;
use crate::reading::Reading;

/// Dominant pollution source category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PollutionSource {
    /// PM10-dominated: construction, road dust, soil.
    DustConstruction,
    /// PM2.5-dominated: vehicle exhaust, biomass burning.
    VehicleBiomass,
    /// NO2-dominated: dense traffic.
    TrafficEmissions,
    /// SO2-dominated: industrial combustion.
    IndustrialEmissions,
    /// No single pollutant is elevated enough to attribute blame.
    MixedSources,
    /// No reading available at all. Distinct from `MixedSources` so callers
    /// can tell "nothing dominates" from "nothing measured".
    UnknownData,
}

impl PollutionSource {
    /// Human-readable source name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DustConstruction => "Dust & Construction",
            Self::VehicleBiomass => "Vehicle & Biomass",
            Self::TrafficEmissions => "Traffic Emissions",
            Self::IndustrialEmissions => "Industrial Emissions",
            Self::MixedSources => "Mixed Sources",
            Self::UnknownData => "Unknown Data",
        }
    }

    /// Display color for the source icon.
    pub fn color(&self) -> ColorToken {
        match self {
            Self::DustConstruction => ColorToken::Yellow,
            Self::VehicleBiomass => ColorToken::Purple,
            Self::TrafficEmissions => ColorToken::Orange,
            Self::IndustrialEmissions => ColorToken::Red,
            Self::MixedSources | Self::UnknownData => ColorToken::Slate,
        }
    }
}

/// Reference pollutant and elevated-threshold per candidate, in tie-break
/// order. Thresholds are the product's fixed "high" concentrations.
const CANDIDATES: [(PollutionSource, fn(&Reading) -> Option<f32>, f32); 4] = [
    (PollutionSource::DustConstruction, |r| r.pm10, 150.0),
    (PollutionSource::VehicleBiomass, |r| r.pm2_5, 60.0),
    (PollutionSource::TrafficEmissions, |r| r.no2, 50.0),
    (PollutionSource::IndustrialEmissions, |r| r.so2, 30.0),
];

/// Attribute a reading to its dominant pollution source.
///
/// Absent pollutant fields count as concentration 0. `None` (no reading at
/// all) yields [`PollutionSource::UnknownData`]. Pure: the same reading
/// always attributes identically.
///
/// ```
/// use aerosense_core::{attribute_source, PollutionSource, Reading};
/// use chrono::Utc;
///
/// let reading = Reading {
///     pm10: Some(200.0),
///     ..Reading::new(1, Utc::now())
/// };
/// assert_eq!(attribute_source(Some(&reading)), PollutionSource::DustConstruction);
/// assert_eq!(attribute_source(None), PollutionSource::UnknownData);
/// ```
pub fn attribute_source(reading: Option<&Reading>) -> PollutionSource {
    let reading = match reading {
        Some(r) => r,
        None => return PollutionSource::UnknownData,
    };

    let mut best = PollutionSource::MixedSources;
    let mut best_ratio = 0.0f32;

    for (source, field, threshold) in CANDIDATES {
        let ratio = field(reading).unwrap_or(0.0) / threshold;
        // Strictly greater: an exact tie keeps the earlier candidate
        if ratio > best_ratio {
            best_ratio = ratio;
            best = source;
        }
    }

    if best_ratio >= 1.0 {
        best
    } else {
        PollutionSource::MixedSources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn reading_with(pm2_5: f32, pm10: f32, no2: f32, so2: f32) -> Reading {
        Reading {
            pm2_5: Some(pm2_5),
            pm10: Some(pm10),
            no2: Some(no2),
            so2: Some(so2),
            ..Reading::new(1, Utc::now())
        }
    }

    #[test]
    fn dominant_dust() {
        // PM10 ratio 200/150 = 1.33, the unique maximum >= 1
        let r = reading_with(10.0, 200.0, 5.0, 5.0);
        assert_eq!(attribute_source(Some(&r)), PollutionSource::DustConstruction);
    }

    #[test]
    fn each_candidate_can_win() {
        let vehicle = reading_with(120.0, 10.0, 5.0, 5.0);
        assert_eq!(
            attribute_source(Some(&vehicle)),
            PollutionSource::VehicleBiomass
        );

        let traffic = reading_with(10.0, 10.0, 75.0, 5.0);
        assert_eq!(
            attribute_source(Some(&traffic)),
            PollutionSource::TrafficEmissions
        );

        let industry = reading_with(10.0, 10.0, 5.0, 45.0);
        assert_eq!(
            attribute_source(Some(&industry)),
            PollutionSource::IndustrialEmissions
        );
    }

    #[test]
    fn nothing_elevated_is_mixed() {
        let r = reading_with(0.0, 0.0, 0.0, 0.0);
        assert_eq!(attribute_source(Some(&r)), PollutionSource::MixedSources);

        // Elevated but below every threshold
        let r = reading_with(30.0, 100.0, 20.0, 10.0);
        assert_eq!(attribute_source(Some(&r)), PollutionSource::MixedSources);
    }

    #[test]
    fn absent_reading_is_unknown_not_mixed() {
        assert_eq!(attribute_source(None), PollutionSource::UnknownData);
        assert_ne!(PollutionSource::UnknownData, PollutionSource::MixedSources);
    }

    #[test]
    fn absent_fields_count_as_zero() {
        let r = Reading {
            pm10: Some(180.0),
            ..Reading::new(1, Utc::now())
        };
        assert_eq!(attribute_source(Some(&r)), PollutionSource::DustConstruction);

        let empty = Reading::new(1, Utc::now());
        assert_eq!(attribute_source(Some(&empty)), PollutionSource::MixedSources);
    }

    #[test]
    fn exact_tie_resolves_to_first_candidate() {
        // PM10/150 and PM2.5/60 both compute to exactly 1.0
        let r = reading_with(60.0, 150.0, 0.0, 0.0);
        assert_eq!(attribute_source(Some(&r)), PollutionSource::DustConstruction);
    }

    #[test]
    fn idempotent() {
        let r = reading_with(70.0, 120.0, 30.0, 10.0);
        assert_eq!(attribute_source(Some(&r)), attribute_source(Some(&r)));
    }
}
