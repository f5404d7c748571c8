use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::circuit::Circuit;
use crate::validate::CircuitError;

#[derive(Debug, Error)]
pub enum SendError {
    #[error(transparent)]
    Invalid(#[from] CircuitError),
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend rejected the circuit: {0}")]
    Rejected(String),
}

/// What a successful send came back with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SendOutcome {
    /// Number of per-step state snapshots the simulator returned.
    pub steps: usize,
}

/// The send action injected into the app. Each sender carries a stable
/// identity; the grid's derivation is keyed on it, so swapping the action
/// out invalidates the cached view just like replacing the circuit does.
pub trait CircuitSender {
    fn send(&self, circuit: &Circuit) -> Result<SendOutcome, SendError>;
    fn identity(&self) -> u64;
}

#[derive(Serialize)]
struct CircuitPayload<'a> {
    circuit_matrix: &'a [Vec<String>],
}

#[derive(Deserialize)]
struct SimulateResponse {
    state_list: Vec<serde_json::Value>,
}

#[derive(Serialize)]
struct PingMessage<'a> {
    message: &'a str,
}

#[derive(Deserialize)]
struct PingResponse {
    message: String,
}

static NEXT_SENDER_ID: AtomicU64 = AtomicU64::new(1);

/// Ships the board to the simulation backend as JSON.
pub struct HttpSender {
    base: String,
    client: reqwest::blocking::Client,
    id: u64,
}

impl HttpSender {
    pub fn new(base: impl Into<String>) -> Result<Self, SendError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(HttpSender {
            base: base.into().trim_end_matches('/').to_string(),
            client,
            id: NEXT_SENDER_ID.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Round-trips `{"message": "ping"}` and checks for the pong.
    pub fn ping(&self) -> Result<bool, SendError> {
        let resp: PingResponse = self
            .client
            .post(format!("{}/ping", self.base))
            .json(&PingMessage { message: "ping" })
            .send()?
            .error_for_status()?
            .json()?;
        Ok(resp.message == "pong")
    }
}

impl CircuitSender for HttpSender {
    fn send(&self, circuit: &Circuit) -> Result<SendOutcome, SendError> {
        debug!(steps = circuit.steps(), "posting circuit to {}", self.base);
        let resp = self
            .client
            .post(format!("{}/simulate", self.base))
            .json(&CircuitPayload { circuit_matrix: &circuit.lines })
            .send()?;

        if !resp.status().is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(SendError::Rejected(body));
        }

        let body: SimulateResponse = resp.json()?;
        Ok(SendOutcome { steps: body.state_list.len() })
    }

    fn identity(&self) -> u64 {
        self.id
    }
}
