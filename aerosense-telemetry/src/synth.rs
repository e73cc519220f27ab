//! Synthetic reading generation
//!
//! Produces plausible sensor payloads for the simulator. Each pollutant is
//! drawn uniformly from a fixed range chosen to sweep the interesting part
//! of its scale (dominant-source thresholds sit inside every range), the
//! region comes from a small fixed set, and ambient conditions are held
//! constant.

use aerosense_core::Reading;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Region labels the simulator cycles through.
pub const REGIONS: [&str; 5] = ["Mumbai", "Pune", "Nagpur", "Nashik", "Chandrapur"];

/// Sampling ranges per pollutant, `[low, high)`. CO is mg/m³, rest µg/m³.
pub mod ranges {
    /// PM2.5
    pub const PM2_5: (f32, f32) = (10.0, 110.0);
    /// PM10
    pub const PM10: (f32, f32) = (20.0, 170.0);
    /// NO2
    pub const NO2: (f32, f32) = (5.0, 85.0);
    /// CO
    pub const CO: (f32, f32) = (0.1, 5.1);
    /// SO2
    pub const SO2: (f32, f32) = (2.0, 52.0);
    /// O3
    pub const O3: (f32, f32) = (10.0, 70.0);
    /// NH3
    pub const NH3: (f32, f32) = (1.0, 41.0);
}

const SENSOR_IDS: std::ops::RangeInclusive<u32> = 1..=20;

const AMBIENT_TEMPERATURE: f32 = 30.0;
const AMBIENT_HUMIDITY: f32 = 60.0;
const AMBIENT_WIND_SPEED: f32 = 10.0;

/// Randomized reading source.
pub struct SyntheticSensor {
    rng: StdRng,
}

impl SyntheticSensor {
    /// Generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for reproducible runs.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Synthesize one reading stamped with the current time.
    pub fn sample(&mut self) -> Reading {
        let rng = &mut self.rng;
        Reading {
            pm2_5: Some(rng.gen_range(ranges::PM2_5.0..ranges::PM2_5.1)),
            pm10: Some(rng.gen_range(ranges::PM10.0..ranges::PM10.1)),
            no2: Some(rng.gen_range(ranges::NO2.0..ranges::NO2.1)),
            co: Some(rng.gen_range(ranges::CO.0..ranges::CO.1)),
            so2: Some(rng.gen_range(ranges::SO2.0..ranges::SO2.1)),
            o3: Some(rng.gen_range(ranges::O3.0..ranges::O3.1)),
            nh3: Some(rng.gen_range(ranges::NH3.0..ranges::NH3.1)),
            temperature: Some(AMBIENT_TEMPERATURE),
            humidity: Some(AMBIENT_HUMIDITY),
            wind_speed: Some(AMBIENT_WIND_SPEED),
            region: Some(REGIONS[rng.gen_range(0..REGIONS.len())].to_string()),
            ..Reading::new(rng.gen_range(SENSOR_IDS), Utc::now())
        }
    }
}

impl Default for SyntheticSensor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_stay_in_documented_ranges() {
        let mut sensor = SyntheticSensor::from_seed(42);

        for _ in 0..200 {
            let r = sensor.sample();
            let in_range = |v: Option<f32>, (lo, hi): (f32, f32)| {
                let v = v.unwrap();
                v >= lo && v < hi
            };

            assert!(in_range(r.pm2_5, ranges::PM2_5));
            assert!(in_range(r.pm10, ranges::PM10));
            assert!(in_range(r.no2, ranges::NO2));
            assert!(in_range(r.co, ranges::CO));
            assert!(in_range(r.so2, ranges::SO2));
            assert!(in_range(r.o3, ranges::O3));
            assert!(in_range(r.nh3, ranges::NH3));
            assert!(SENSOR_IDS.contains(&r.sensor_id));
            assert!(REGIONS.contains(&r.region.as_deref().unwrap()));
        }
    }

    #[test]
    fn readings_start_unenriched() {
        let mut sensor = SyntheticSensor::from_seed(7);
        let r = sensor.sample();
        assert!(r.aqi.is_none());
        assert!(r.category.is_none());
    }

    #[test]
    fn seeded_generator_is_reproducible() {
        let a: Vec<_> = {
            let mut s = SyntheticSensor::from_seed(9);
            (0..10).map(|_| s.sample().pm2_5.unwrap()).collect()
        };
        let b: Vec<_> = {
            let mut s = SyntheticSensor::from_seed(9);
            (0..10).map(|_| s.sample().pm2_5.unwrap()).collect()
        };
        assert_eq!(a, b);
    }
}
