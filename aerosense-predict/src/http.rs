//! HTTP implementation of the prediction client
//!
//! ## Overview
//!
//! REST/JSON client over a lightweight `ureq` agent. The backend is a plain
//! FastAPI service; there is nothing clever on the wire, so the client stays
//! simple: a configured agent, JSON bodies, and bounded retries with
//! exponential backoff for transient failures.
//!
//! ## Retry policy
//!
//! Only failures worth retrying are retried:
//! - transport errors (connect refused, reset, timeout)
//! - 5xx and 429 responses
//!
//! Any other 4xx is a terminal client error — retrying a validation failure
//! just repeats it. Backoff doubles per attempt starting at 100 ms.
//!
//! ## Timeouts
//!
//! The agent carries a bounded request timeout (default 10 s) so a stalled
//! backend can never hold a prediction in flight indefinitely; the telemetry
//! loop relies on in-flight calls eventually resolving one way or the other.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{Forecast, LatestEntry, PredictRequest, Prediction};
use crate::{PredictError, Predictor};

/// Configuration for [`HttpPredictor`].
#[derive(Clone)]
pub struct PredictConfig {
    /// Base URL of the prediction service.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Bearer token attached to requests, when the deployment requires one.
    pub bearer_token: Option<String>,
    /// Retry attempts after the first failure.
    pub max_retries: u32,
    /// User agent string.
    pub user_agent: String,
}

impl PredictConfig {
    /// Create a configuration pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
            bearer_token: None,
            max_retries: 2,
            user_agent: format!("Aerosense/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the per-request timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Attach a bearer token to every request.
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Set the retry attempt count.
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }
}

/// Prediction client over `ureq`.
pub struct HttpPredictor {
    config: PredictConfig,
    agent: ureq::Agent,
}

impl HttpPredictor {
    /// Create a client, validating the configured base URL.
    pub fn new(config: PredictConfig) -> Result<Self, PredictError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(PredictError::Config(
                "Base URL must start with http:// or https://".into(),
            ));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self { config, agent })
    }

    /// Latest reading per active sensor, worst AQI first.
    pub async fn latest(&self) -> Result<Vec<LatestEntry>, PredictError> {
        self.execute_with_retry(self.get("/latest"), None).await
    }

    /// Next-hour AQI forecast for one sensor.
    pub async fn forecast(&self, sensor_id: u32) -> Result<Forecast, PredictError> {
        let path = format!("/forecast/{sensor_id}");
        self.execute_with_retry(self.get(&path), None).await
    }

    fn get(&self, path: &str) -> ureq::Request {
        self.decorate(self.agent.get(&format!("{}{}", self.config.base_url, path)))
    }

    fn post(&self, path: &str) -> ureq::Request {
        self.decorate(self.agent.post(&format!("{}{}", self.config.base_url, path)))
    }

    fn decorate(&self, mut request: ureq::Request) -> ureq::Request {
        if let Some(token) = &self.config.bearer_token {
            request = request.set("Authorization", &format!("Bearer {token}"));
        }
        request
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
    }

    fn encode<T: Serialize>(body: &T) -> Result<String, PredictError> {
        serde_json::to_string(body).map_err(|e| PredictError::Serialization(e.to_string()))
    }

    /// Run a request, retrying transport errors and 5xx/429 with doubling
    /// backoff. `body` of `None` issues the request without a payload.
    async fn execute_with_retry<T: DeserializeOwned>(
        &self,
        request: ureq::Request,
        body: Option<String>,
    ) -> Result<T, PredictError> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(100 * (1 << attempt));
                log::debug!("retrying prediction request (attempt {attempt})");
                tokio::time::sleep(delay).await;
            }

            let response = match &body {
                Some(json) => request.clone().send_string(json),
                None => request.clone().call(),
            };

            match response {
                Ok(resp) => {
                    let text = resp
                        .into_string()
                        .map_err(|e| PredictError::Transport(e.to_string()))?;
                    return serde_json::from_str(&text)
                        .map_err(|e| PredictError::Serialization(e.to_string()));
                }
                Err(ureq::Error::Status(code, resp)) => {
                    let message = resp.into_string().unwrap_or_default();
                    if code >= 500 || code == 429 {
                        last_error = Some(PredictError::Server { status: code, message });
                        continue;
                    }
                    return Err(PredictError::Server { status: code, message });
                }
                Err(ureq::Error::Transport(e)) => {
                    last_error = Some(PredictError::Transport(e.to_string()));
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| PredictError::Transport("unknown error".into())))
    }
}

#[async_trait::async_trait]
impl Predictor for HttpPredictor {
    async fn predict(&self, request: &PredictRequest) -> Result<Prediction, PredictError> {
        let body = Self::encode(request)?;
        self.execute_with_retry(self.post("/predict"), Some(body)).await
    }
}
