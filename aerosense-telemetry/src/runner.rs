//! The telemetry loop state machine
//!
//! ## States
//!
//! `Idle` (no timer) and `Running` (timer active). `start` moves Idle →
//! Running; `stop` or dropping the loop moves Running → Idle. There are no
//! other states and no self-stop: a failed prediction logs a warning, skips
//! the tick's buffer update, and the timer keeps firing.
//!
//! ## Tick anatomy
//!
//! Every tick: synthesize a reading, submit its features to the predictor,
//! and on success push the enriched reading into the recency buffer. The
//! prediction runs on its own spawned task, so a slow call never delays the
//! next tick — which also means calls from adjacent ticks can be in flight
//! simultaneously and complete out of issue order. The buffer is a recency
//! window for display, not an audit log, so that reordering is accepted.
//!
//! ## Stale responses
//!
//! Stopping the loop cancels the timer but not calls already in flight.
//! Each in-flight apply step carries the run token it was issued under and
//! checks it against the current one before touching the buffer, so a
//! response landing after `stop` (or after a restart) is discarded instead
//! of resurrecting state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use aerosense_core::{buffer, Reading, RecencyBuffer};
use aerosense_predict::{PredictRequest, Predictor};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

use crate::synth::SyntheticSensor;

/// Loop configuration.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Tick period. Default 3000 ms.
    pub interval: Duration,
    /// Buffer capacity. Default 50.
    pub capacity: usize,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(3000),
            capacity: buffer::DEFAULT_CAPACITY,
        }
    }
}

impl LoopConfig {
    /// Set the tick period.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the tick period in milliseconds.
    pub fn interval_ms(mut self, ms: u64) -> Self {
        self.interval = Duration::from_millis(ms);
        self
    }

    /// Set the buffer capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}

/// Loop lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No timer running. The buffer keeps whatever it held.
    Idle,
    /// Timer active, ticks being issued.
    Running,
}

/// Shared between the loop handle, the timer task, and in-flight applies.
struct Shared {
    buffer: Mutex<RecencyBuffer>,
    /// Bumped on every start and stop. An apply step only commits if the
    /// token it captured at issue time is still current.
    run: AtomicU64,
}

/// The timer-driven simulation loop.
///
/// Owns the recency buffer exclusively; consumers read via [`snapshot`].
///
/// [`snapshot`]: TelemetryLoop::snapshot
pub struct TelemetryLoop {
    config: LoopConfig,
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
}

impl TelemetryLoop {
    /// Create an idle loop with an empty buffer.
    pub fn new(config: LoopConfig) -> Self {
        let shared = Arc::new(Shared {
            buffer: Mutex::new(RecencyBuffer::with_capacity(config.capacity)),
            run: AtomicU64::new(0),
        });
        Self {
            config,
            shared,
            task: None,
        }
    }

    /// Start ticking with a freshly seeded synthetic sensor.
    ///
    /// No-op when already running. The first tick fires one interval after
    /// the call, not immediately.
    pub fn start(&mut self, predictor: Arc<dyn Predictor>) {
        self.start_with_sensor(predictor, SyntheticSensor::new());
    }

    /// Start ticking with a caller-supplied generator, e.g. a seeded one.
    pub fn start_with_sensor(&mut self, predictor: Arc<dyn Predictor>, mut sensor: SyntheticSensor) {
        if self.task.is_some() {
            return;
        }

        let token = self.shared.run.fetch_add(1, Ordering::SeqCst) + 1;
        let shared = Arc::clone(&self.shared);
        let period = self.config.interval;
        // The first tick is anchored to the call, not to when the spawned
        // task is first polled.
        let first_tick = Instant::now() + period;

        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(first_tick, period);
            loop {
                ticker.tick().await;

                let reading = sensor.sample();
                let request = PredictRequest::from_reading(&reading);

                // Prediction and apply run detached so a slow backend never
                // delays the next tick.
                let predictor = Arc::clone(&predictor);
                let shared = Arc::clone(&shared);
                tokio::spawn(async move {
                    apply_tick(&shared, token, &*predictor, reading, request).await;
                });
            }
        }));

        log::debug!("telemetry loop started (period {:?})", period);
    }

    /// Stop ticking. In-flight predictions are left to resolve but their
    /// results are discarded. No-op when idle.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            self.shared.run.fetch_add(1, Ordering::SeqCst);
            task.abort();
            log::debug!("telemetry loop stopped");
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        if self.task.is_some() {
            LoopState::Running
        } else {
            LoopState::Idle
        }
    }

    /// Read-only copy of the buffered readings, newest first.
    pub fn snapshot(&self) -> Vec<Reading> {
        self.shared.buffer.lock().unwrap().snapshot()
    }

    /// Number of buffered readings.
    pub fn len(&self) -> usize {
        self.shared.buffer.lock().unwrap().len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.shared.buffer.lock().unwrap().is_empty()
    }

    /// The most recent enriched reading, if any.
    pub fn latest(&self) -> Option<Reading> {
        self.shared.buffer.lock().unwrap().latest().cloned()
    }

    /// Drop all buffered readings. Allowed in either state.
    pub fn clear(&self) {
        self.shared.buffer.lock().unwrap().clear();
    }
}

impl Drop for TelemetryLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One tick's predict-and-commit step.
async fn apply_tick(
    shared: &Shared,
    token: u64,
    predictor: &dyn Predictor,
    reading: Reading,
    request: PredictRequest,
) {
    match predictor.predict(&request).await {
        Ok(prediction) => {
            // Liveness check: the loop may have stopped (or restarted)
            // while this call was in flight.
            if shared.run.load(Ordering::SeqCst) != token {
                log::debug!(
                    "discarding stale prediction for sensor {}",
                    reading.sensor_id
                );
                return;
            }

            let enriched = reading.with_prediction(prediction.aqi, prediction.category);
            shared.buffer.lock().unwrap().push(enriched);
        }
        Err(e) => {
            // Skip this tick's buffer update; the timer keeps running.
            log::warn!("prediction failed for sensor {}: {e}", reading.sensor_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerosense_predict::{PredictError, Prediction};

    /// Predictor fake with scripted behavior.
    struct ScriptedPredictor {
        fail: bool,
        delay: Duration,
        aqi: f32,
    }

    impl ScriptedPredictor {
        fn ok(aqi: f32) -> Self {
            Self {
                fail: false,
                delay: Duration::ZERO,
                aqi,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                delay: Duration::ZERO,
                aqi: 0.0,
            }
        }

        fn slow(aqi: f32, delay: Duration) -> Self {
            Self {
                fail: false,
                delay,
                aqi,
            }
        }
    }

    #[async_trait::async_trait]
    impl Predictor for ScriptedPredictor {
        async fn predict(&self, _request: &PredictRequest) -> Result<Prediction, PredictError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if self.fail {
                return Err(PredictError::Transport("connection refused".into()));
            }
            Ok(Prediction {
                aqi: self.aqi,
                category: "Moderate".into(),
            })
        }
    }

    const PERIOD: Duration = Duration::from_millis(3000);

    /// Advance one tick period and let the spawned tasks run.
    async fn tick(n: u32) {
        for _ in 0..n {
            tokio::time::advance(PERIOD).await;
            for _ in 0..4 {
                tokio::task::yield_now().await;
            }
        }
    }

    fn test_loop(capacity: usize) -> TelemetryLoop {
        TelemetryLoop::new(LoopConfig::default().interval(PERIOD).capacity(capacity))
    }

    #[tokio::test(start_paused = true)]
    async fn successful_ticks_fill_buffer_newest_first() {
        let mut sim = test_loop(50);
        sim.start_with_sensor(
            Arc::new(ScriptedPredictor::ok(123.0)),
            SyntheticSensor::from_seed(1),
        );
        assert_eq!(sim.state(), LoopState::Running);

        tick(5).await;

        let snap = sim.snapshot();
        assert_eq!(snap.len(), 5);
        for reading in &snap {
            assert_eq!(reading.aqi, Some(123.0));
            assert_eq!(reading.category.as_deref(), Some("Moderate"));
        }
        // Newest first: timestamps never increase down the snapshot
        for pair in snap.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn buffer_is_capped_at_capacity() {
        let mut sim = test_loop(5);
        sim.start_with_sensor(
            Arc::new(ScriptedPredictor::ok(80.0)),
            SyntheticSensor::from_seed(2),
        );

        tick(12).await;
        assert_eq!(sim.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_predictor_leaves_buffer_empty() {
        let mut sim = test_loop(50);
        sim.start_with_sensor(
            Arc::new(ScriptedPredictor::failing()),
            SyntheticSensor::from_seed(3),
        );

        tick(6).await;

        // Failures skip the buffer update but never stop the loop
        assert!(sim.is_empty());
        assert_eq!(sim.state(), LoopState::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_halts_growth() {
        let mut sim = test_loop(50);
        sim.start_with_sensor(
            Arc::new(ScriptedPredictor::ok(60.0)),
            SyntheticSensor::from_seed(4),
        );

        tick(3).await;
        assert_eq!(sim.len(), 3);

        sim.stop();
        assert_eq!(sim.state(), LoopState::Idle);

        tick(3).await;
        assert_eq!(sim.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_in_flight_response_is_discarded_after_stop() {
        let mut sim = test_loop(50);
        // Prediction outlives the loop: issued at t=3s, resolves at t=13s
        sim.start_with_sensor(
            Arc::new(ScriptedPredictor::slow(99.0, Duration::from_secs(10))),
            SyntheticSensor::from_seed(5),
        );

        tick(1).await;
        sim.stop();

        // Let the orphaned call resolve
        tick(4).await;
        assert!(sim.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn restart_does_not_apply_previous_runs_results() {
        let mut sim = test_loop(50);
        sim.start_with_sensor(
            Arc::new(ScriptedPredictor::slow(99.0, Duration::from_secs(10))),
            SyntheticSensor::from_seed(6),
        );

        tick(1).await;
        sim.stop();

        // New run with a fast predictor; the old 99.0 result resolves during
        // it and must not land
        sim.start_with_sensor(
            Arc::new(ScriptedPredictor::ok(42.0)),
            SyntheticSensor::from_seed(7),
        );
        tick(4).await;

        let snap = sim.snapshot();
        assert!(!snap.is_empty());
        assert!(snap.iter().all(|r| r.aqi == Some(42.0)));
    }

    #[tokio::test(start_paused = true)]
    async fn start_is_idempotent_while_running() {
        let mut sim = test_loop(50);
        let predictor: Arc<dyn Predictor> = Arc::new(ScriptedPredictor::ok(10.0));

        sim.start(Arc::clone(&predictor));
        sim.start(Arc::clone(&predictor));
        assert_eq!(sim.state(), LoopState::Running);

        tick(2).await;
        // A double start must not double the tick rate
        assert_eq!(sim.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_when_idle_is_a_no_op() {
        let mut sim = test_loop(50);
        sim.stop();
        assert_eq!(sim.state(), LoopState::Idle);
        assert!(sim.is_empty());
    }
}
