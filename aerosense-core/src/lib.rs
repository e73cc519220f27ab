//! Core computation for Aerosense
//!
//! Pure, stateless building blocks for the air-quality dashboard:
//! classification of an AQI value into a severity tier, attribution of a
//! reading to a dominant pollution source, and the bounded recency buffer
//! that live views consume.
//!
//! Everything here is deterministic and side-effect free. Network I/O lives
//! in `aerosense-predict`; the timer-driven loop lives in
//! `aerosense-telemetry`.
//!
//! ```
//! use aerosense_core::{classify, Classification, SeverityTier};
//!
//! match classify(Some(120.0)) {
//!     Classification::Tier(tier) => {
//!         assert_eq!(tier, SeverityTier::Moderate);
//!         assert_eq!(tier.advisory(), "Limit prolonged outdoor activity");
//!     }
//!     Classification::Unknown => unreachable!(),
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod buffer;
pub mod classify;
pub mod reading;
pub mod source;
pub mod time;

// Public API
pub use buffer::RecencyBuffer;
pub use classify::{classify, Classification, ColorToken, SeverityTier};
pub use reading::Reading;
pub use source::{attribute_source, PollutionSource};
pub use time::TimeParts;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }
}
