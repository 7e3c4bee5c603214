//! Driver configuration, stored as JSON.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pi::{
    ControllerOptions, GcsDevice, GcsResult, PiInterface, DEFAULT_PORT,
};

/// How the controller is reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Endpoint {
    /// `host:port`, or just `host` for the default GCS port
    Tcp { address: String },
    Serial { path: String, baud_rate: u32 },
}

impl Endpoint {
    /// Open the transport described by this endpoint.
    pub fn open(&self) -> GcsResult<GcsDevice> {
        match self {
            Endpoint::Tcp { address } if address.contains(':') => GcsDevice::connect(address.as_str()),
            Endpoint::Tcp { address } => GcsDevice::connect((address.as_str(), DEFAULT_PORT)),
            Endpoint::Serial { path, baud_rate } => GcsDevice::open_serial(path, *baud_rate),
        }
    }
}

/// Everything needed to bring up one controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverConfig {
    pub endpoint: Endpoint,
    /// Axes to drive; all axes the controller reports when absent
    #[serde(default)]
    pub num_axes: Option<usize>,
    /// Poll period while any axis moves
    #[serde(default = "default_moving_poll_ms")]
    pub moving_poll_ms: u64,
    /// Poll period while idle
    #[serde(default = "default_idle_poll_ms")]
    pub idle_poll_ms: u64,
    /// Reply timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Hexapod pause between a move and the first moving-state read
    #[serde(default = "default_hexapod_settle_ms")]
    pub hexapod_settle_ms: u64,
}

fn default_moving_poll_ms() -> u64 {
    100
}

fn default_idle_poll_ms() -> u64 {
    1000
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_hexapod_settle_ms() -> u64 {
    200
}

impl DriverConfig {
    /// Configuration with default timings.
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            num_axes: None,
            moving_poll_ms: default_moving_poll_ms(),
            idle_poll_ms: default_idle_poll_ms(),
            timeout_ms: default_timeout_ms(),
            hexapod_settle_ms: default_hexapod_settle_ms(),
        }
    }

    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    /// Load from JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    pub fn moving_period(&self) -> Duration {
        Duration::from_millis(self.moving_poll_ms)
    }

    pub fn idle_period(&self) -> Duration {
        Duration::from_millis(self.idle_poll_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn options(&self) -> ControllerOptions {
        ControllerOptions {
            num_axes: self.num_axes,
            settle_delay: Duration::from_millis(self.hexapod_settle_ms),
        }
    }

    /// Open the endpoint with the configured timeout.
    pub fn open_interface(&self) -> GcsResult<PiInterface> {
        let mut device = self.endpoint.open()?;
        device.set_timeout(self.timeout())?;
        Ok(PiInterface::new(device))
    }
}
