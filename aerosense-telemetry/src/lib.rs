//! Telemetry simulation loop for Aerosense
//!
//! Drives the whole system end-to-end without a real sensor network: a
//! recurring timer synthesizes plausible readings, submits them to the
//! remote predictor, and folds the enriched results into a bounded
//! most-recent-first buffer that live views snapshot.
//!
//! The loop is an explicit two-state machine (`Idle`/`Running`). It never
//! self-stops: prediction failures are logged and the tick is skipped, the
//! timer keeps firing.
//!
//! ```no_run
//! use std::sync::Arc;
//! use aerosense_predict::{HttpPredictor, PredictConfig};
//! use aerosense_telemetry::{LoopConfig, TelemetryLoop};
//!
//! # fn example() -> Result<(), aerosense_predict::PredictError> {
//! let predictor = Arc::new(HttpPredictor::new(PredictConfig::new("http://localhost:8000"))?);
//!
//! let mut sim = TelemetryLoop::new(LoopConfig::default());
//! sim.start(predictor);
//! // ... views call sim.snapshot() on their own schedule ...
//! sim.stop();
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod runner;
pub mod synth;

pub use runner::{LoopConfig, LoopState, TelemetryLoop};
pub use synth::SyntheticSensor;
