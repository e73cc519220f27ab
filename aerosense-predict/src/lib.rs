//! Client for the Aerosense prediction backend
//!
//! ## Overview
//!
//! The dashboard core never computes an AQI itself — a remote model does.
//! This crate is the boundary to that service: the [`Predictor`] trait is
//! the seam the telemetry loop depends on, [`HttpPredictor`] is the real
//! REST/JSON implementation, and the wire types mirror the backend's request
//! and response schemas field for field.
//!
//! Keeping the trait in this crate (rather than the loop crate) lets tests
//! substitute scripted predictors without touching any HTTP machinery.
//!
//! ## Example
//!
//! ```no_run
//! use aerosense_predict::{HttpPredictor, PredictConfig, Predictor, PredictRequest};
//! use aerosense_core::Reading;
//! use chrono::Utc;
//!
//! # async fn example() -> Result<(), aerosense_predict::PredictError> {
//! let predictor = HttpPredictor::new(
//!     PredictConfig::new("http://localhost:8000").timeout_secs(10),
//! )?;
//!
//! let reading = Reading { pm2_5: Some(42.0), ..Reading::new(3, Utc::now()) };
//! let prediction = predictor.predict(&PredictRequest::from_reading(&reading)).await?;
//! println!("AQI {} ({})", prediction.aqi, prediction.category);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod http;
pub mod types;

pub use http::{HttpPredictor, PredictConfig};
pub use types::{Forecast, LatestEntry, PredictRequest, Prediction};

use thiserror::Error;

/// Errors from the prediction boundary.
#[derive(Debug, Error)]
pub enum PredictError {
    /// Network-level failure (DNS, connect, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend returned an error status.
    #[error("Server error {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body, when one was readable.
        message: String,
    },

    /// Request or response body could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Client misconfiguration.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// The prediction seam the telemetry loop drives.
///
/// Implementations must be shareable across ticks; overlapping in-flight
/// calls are expected when a prediction outlives the tick interval.
#[async_trait::async_trait]
pub trait Predictor: Send + Sync {
    /// Predict the AQI for one set of pollutant and calendar features.
    async fn predict(&self, request: &PredictRequest) -> Result<Prediction, PredictError>;
}
