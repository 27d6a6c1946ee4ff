//! Configuration types for prompter
//!
//! `Settings` mirrors `config.toml`:
//!
//! ```toml
//! [server]
//! port = 8080
//! bind_address = "0.0.0.0"
//! auto_start = true
//!
//! [display]
//! scroll_step = 200
//! autoscroll_interval_ms = 1000
//!
//! [share]
//! browser = ""
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use prompter_core::{DEFAULT_AUTOSCROLL_INTERVAL_MS, DEFAULT_PORT, DEFAULT_SCROLL_STEP};
use serde::{Deserialize, Serialize};

use crate::server::DEFAULT_MAX_BODY_BYTES;

/// Application settings (`config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub share: ShareSettings,
}

/// Control server settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Interface to listen on; `0.0.0.0` accepts LAN clients
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    /// Start the server as soon as the application launches
    #[serde(default = "default_true")]
    pub auto_start: bool,

    /// Address shown in the pairing overlay instead of the detected one
    #[serde(default)]
    pub advertise_address: Option<Ipv4Addr>,

    /// Serve this HTML file at `/` instead of the built-in page
    #[serde(default)]
    pub page_path: Option<PathBuf>,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// How long `stop` waits for in-flight requests
    #[serde(default = "default_shutdown_timeout_ms")]
    pub shutdown_timeout_ms: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            auto_start: true,
            advertise_address: None,
            page_path: None,
            max_body_bytes: default_max_body_bytes(),
            shutdown_timeout_ms: default_shutdown_timeout_ms(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}

/// Prompter display settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DisplaySettings {
    /// Display units moved by one scroll command or autoscroll step
    #[serde(default = "default_scroll_step")]
    pub scroll_step: u32,

    #[serde(default = "default_autoscroll_interval_ms")]
    pub autoscroll_interval_ms: u64,

    /// Text shown at startup instead of the sample
    #[serde(default)]
    pub initial_text_path: Option<PathBuf>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            scroll_step: default_scroll_step(),
            autoscroll_interval_ms: default_autoscroll_interval_ms(),
            initial_text_path: None,
        }
    }
}

impl DisplaySettings {
    /// Autoscroll period, never shorter than 10ms
    pub fn autoscroll_interval(&self) -> Duration {
        Duration::from_millis(self.autoscroll_interval_ms.max(10))
    }
}

/// Settings for sharing the control URL
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ShareSettings {
    /// Browser command (empty = platform default)
    #[serde(default)]
    pub browser: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_true() -> bool {
    true
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

fn default_shutdown_timeout_ms() -> u64 {
    2000
}

fn default_scroll_step() -> u32 {
    DEFAULT_SCROLL_STEP
}

fn default_autoscroll_interval_ms() -> u64 {
    DEFAULT_AUTOSCROLL_INTERVAL_MS
}
