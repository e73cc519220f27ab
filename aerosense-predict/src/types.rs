//! Wire types for the prediction API
//!
//! Field names match the backend schemas exactly (`PM2_5`, `predicted_AQI`,
//! `next_hour_AQI`), so these structs serialize to the payloads the service
//! already accepts from the rest of the product.

use aerosense_core::{Reading, TimeParts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST /predict`.
///
/// The model was trained on dense feature vectors, so unmeasured pollutants
/// are submitted as 0.0 rather than omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictRequest {
    /// Originating sensor id.
    pub sensor_id: u32,
    /// Fine particulate matter.
    #[serde(rename = "PM2_5")]
    pub pm2_5: f32,
    /// Coarse particulate matter.
    #[serde(rename = "PM10")]
    pub pm10: f32,
    /// Nitrogen dioxide.
    #[serde(rename = "NO2")]
    pub no2: f32,
    /// Carbon monoxide.
    #[serde(rename = "CO")]
    pub co: f32,
    /// Sulphur dioxide.
    #[serde(rename = "SO2")]
    pub so2: f32,
    /// Ozone.
    #[serde(rename = "O3")]
    pub o3: f32,
    /// Ammonia.
    #[serde(rename = "NH3")]
    pub nh3: f32,
    /// Hour of day, 0–23.
    pub hour: u32,
    /// Day of month.
    pub day: u32,
    /// Month, 1–12.
    pub month: u32,
    /// Day of week, 0 = Sunday.
    pub weekday: u32,
}

impl PredictRequest {
    /// Build a request from a reading, deriving the calendar features from
    /// its timestamp and filling unmeasured pollutants with 0.0.
    pub fn from_reading(reading: &Reading) -> Self {
        let parts = TimeParts::from_timestamp(reading.timestamp);
        Self {
            sensor_id: reading.sensor_id,
            pm2_5: reading.pm2_5.unwrap_or(0.0),
            pm10: reading.pm10.unwrap_or(0.0),
            no2: reading.no2.unwrap_or(0.0),
            co: reading.co.unwrap_or(0.0),
            so2: reading.so2.unwrap_or(0.0),
            o3: reading.o3.unwrap_or(0.0),
            nh3: reading.nh3.unwrap_or(0.0),
            hour: parts.hour,
            day: parts.day,
            month: parts.month,
            weekday: parts.weekday,
        }
    }
}

/// Response body of `POST /predict`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Prediction {
    /// Predicted composite AQI.
    #[serde(rename = "predicted_AQI")]
    pub aqi: f32,
    /// The backend's own category label for the prediction.
    pub category: String,
}

/// One entry of `GET /latest`: the newest reading per active sensor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LatestEntry {
    /// Region the sensor is installed in.
    pub region: String,
    /// Sensor id.
    pub sensor_id: u32,
    /// Latest predicted AQI.
    pub aqi: f32,
    /// Backend category label.
    pub category: String,
    /// When the reading was taken.
    pub timestamp: DateTime<Utc>,
}

/// Response body of `GET /forecast/{sensor_id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Forecast {
    /// Sensor the forecast is for.
    pub sensor_id: u32,
    /// Predicted AQI one hour out.
    #[serde(rename = "next_hour_AQI")]
    pub next_hour_aqi: f32,
    /// Backend category label for the forecast value.
    pub category: String,
}
