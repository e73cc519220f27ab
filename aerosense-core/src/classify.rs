//! AQI Severity Classification
//!
//! ## Overview
//!
//! Maps a numeric AQI onto a closed, ordered set of severity tiers, each
//! carrying a health advisory, a coarse display status, and a color token.
//! The mapping is one canonical breakpoint ladder (50/100/200/300/400);
//! every displayed attribute is derived from the single tier, so a card's
//! color and its advisory text can never disagree about the same value.
//!
//! ## Totality
//!
//! `classify` is total: every input, including absent data, has a defined
//! result. Absence is not an error here — a dashboard that has not received
//! its first prediction yet is in a perfectly ordinary state, and gets the
//! [`Classification::Unknown`] sentinel with neutral styling rather than a
//! failure.
//!
//! Non-finite values (NaN, ±inf) also map to `Unknown`: a comparison ladder
//! would silently drop NaN into its terminal arm, which would render a
//! broken sensor as a health emergency. Negative values fall into the lowest
//! tier, absorbed by the `<= 50` arm.

use serde::{Deserialize, Serialize};

/// Severity band for an AQI value.
///
/// Ordered from cleanest to worst; the derived `Ord` follows air quality
/// getting worse, so `tier_a < tier_b` means `tier_a` is the cleaner band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SeverityTier {
    /// AQI 0–50. Safe for everyone.
    Low,
    /// AQI 51–100. Sensitive groups should take care.
    Mild,
    /// AQI 101–200. Noticeable for the general population.
    Moderate,
    /// AQI 201–300. Actively harmful outdoors.
    High,
    /// AQI 301–400. Serious exposure risk.
    VeryHigh,
    /// AQI above 400. Health emergency.
    Emergency,
}

/// Display color token for a tier or sentinel.
///
/// The rendering layer maps these to its own palette; the core only
/// guarantees that the token is a pure function of the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorToken {
    /// Low
    Green,
    /// Mild
    Yellow,
    /// Moderate
    Orange,
    /// High
    Red,
    /// VeryHigh
    Purple,
    /// Emergency
    Rose,
    /// No data
    Slate,
}

impl ColorToken {
    /// Stable lowercase name, e.g. for CSS class construction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Purple => "purple",
            Self::Rose => "rose",
            Self::Slate => "slate",
        }
    }
}

impl SeverityTier {
    /// Upper AQI bound of each non-terminal tier, in ladder order.
    pub const BREAKPOINTS: [f32; 5] = [50.0, 100.0, 200.0, 300.0, 400.0];

    /// Fine-grained band name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Mild => "Mild",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::VeryHigh => "Very High",
            Self::Emergency => "Emergency",
        }
    }

    /// Coarse 5-band display status.
    ///
    /// The top two tiers share "Hazardous"; below 300 the coarse and fine
    /// ladders have identical breakpoints.
    pub fn status(&self) -> &'static str {
        match self {
            Self::Low => "Good",
            Self::Mild => "Moderate",
            Self::Moderate => "Unhealthy",
            Self::High => "Severe",
            Self::VeryHigh | Self::Emergency => "Hazardous",
        }
    }

    /// Health advisory for this band.
    pub fn advisory(&self) -> &'static str {
        match self {
            Self::Low => "Air quality is good. Safe for outdoor activities",
            Self::Mild => "Sensitive individuals should take precautions",
            Self::Moderate => "Limit prolonged outdoor activity",
            Self::High => "Wear mask and avoid outdoor exercise",
            Self::VeryHigh => "Stay indoors, keep windows closed",
            Self::Emergency => "Health emergency. Avoid going outside",
        }
    }

    /// Display color for this band.
    pub fn color(&self) -> ColorToken {
        match self {
            Self::Low => ColorToken::Green,
            Self::Mild => ColorToken::Yellow,
            Self::Moderate => ColorToken::Orange,
            Self::High => ColorToken::Red,
            Self::VeryHigh => ColorToken::Purple,
            Self::Emergency => ColorToken::Rose,
        }
    }
}

/// Result of classifying an AQI value.
///
/// `Unknown` is a sentinel for "no data yet", distinguishable from every
/// real tier. It carries its own neutral styling and pending-data advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// A real severity band.
    Tier(SeverityTier),
    /// No usable AQI value (absent or non-finite).
    Unknown,
}

impl Classification {
    /// Band name, or "Unknown".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tier(tier) => tier.label(),
            Self::Unknown => "Unknown",
        }
    }

    /// Coarse display status, or "Unknown".
    pub fn status(&self) -> &'static str {
        match self {
            Self::Tier(tier) => tier.status(),
            Self::Unknown => "Unknown",
        }
    }

    /// Health advisory. The `Unknown` advisory states that data is pending;
    /// it is informational, not an error message.
    pub fn advisory(&self) -> &'static str {
        match self {
            Self::Tier(tier) => tier.advisory(),
            Self::Unknown => "Waiting for AQI data",
        }
    }

    /// Display color token.
    pub fn color(&self) -> ColorToken {
        match self {
            Self::Tier(tier) => tier.color(),
            Self::Unknown => ColorToken::Slate,
        }
    }

    /// The underlying tier, if this is a real classification.
    pub fn tier(&self) -> Option<SeverityTier> {
        match self {
            Self::Tier(tier) => Some(*tier),
            Self::Unknown => None,
        }
    }
}

/// Classify an AQI value into its severity band.
///
/// Total and pure: `None` and non-finite values yield
/// [`Classification::Unknown`]; every finite value lands in exactly one
/// tier. Negative values are absorbed by the lowest tier.
///
/// ```
/// use aerosense_core::{classify, Classification, SeverityTier};
///
/// assert_eq!(classify(Some(42.0)), Classification::Tier(SeverityTier::Low));
/// assert_eq!(classify(None), Classification::Unknown);
/// ```
pub fn classify(aqi: Option<f32>) -> Classification {
    let value = match aqi {
        Some(v) if v.is_finite() => v,
        _ => return Classification::Unknown,
    };

    let tier = if value <= 50.0 {
        SeverityTier::Low
    } else if value <= 100.0 {
        SeverityTier::Mild
    } else if value <= 200.0 {
        SeverityTier::Moderate
    } else if value <= 300.0 {
        SeverityTier::High
    } else if value <= 400.0 {
        SeverityTier::VeryHigh
    } else {
        SeverityTier::Emergency
    };

    Classification::Tier(tier)
}
