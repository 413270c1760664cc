//! client configuration and chain constants

use serde::{Deserialize, Serialize};

/// local development node
pub const DEFAULT_ENDPOINT: &str = "ws://127.0.0.1:9944";

/// gradium produces a block every six seconds
pub const DEFAULT_SLOT_DURATION_MS: u64 = 6_000;

/// state machine identifier reported alongside grandpa snapshots
pub const DEFAULT_STATE_MACHINE: &str = "SUBSTRATE-grdm";

/// client configuration
///
/// the slot duration and state machine id are chain constants supplied by
/// the operator; they are attached to grandpa snapshots, never queried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// rpc websocket endpoint (`ws://` or `wss://`)
    pub endpoint: String,
    /// block production slot in milliseconds
    pub slot_duration_ms: u64,
    /// consensus state machine identifier
    pub state_machine: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            slot_duration_ms: DEFAULT_SLOT_DURATION_MS,
            state_machine: DEFAULT_STATE_MACHINE.into(),
        }
    }
}

impl ClientConfig {
    /// config for a given endpoint with default chain constants
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: normalize_endpoint(&endpoint.into()),
            ..Default::default()
        }
    }

    pub fn slot_duration_ms(mut self, ms: u64) -> Self {
        self.slot_duration_ms = ms;
        self
    }

    pub fn state_machine(mut self, id: impl Into<String>) -> Self {
        self.state_machine = id.into();
        self
    }
}

/// bare `host:port` endpoints default to plain websocket
pub fn normalize_endpoint(endpoint: &str) -> String {
    if endpoint.starts_with("wss://") || endpoint.starts_with("ws://") {
        endpoint.to_string()
    } else {
        format!("ws://{}", endpoint)
    }
}
