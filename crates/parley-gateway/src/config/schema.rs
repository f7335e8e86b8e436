use std::net::SocketAddr;

use serde::Deserialize;
use parley_core::error::{ParleyError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub last_seen: LastSeenSection,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            version: 1,
            gateway: GatewaySection::default(),
            last_seen: LastSeenSection::default(),
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(ParleyError::UnsupportedVersion);
        }

        self.gateway.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_ping_interval_ms")]
    pub ping_interval_ms: u64,

    #[serde(default = "default_idle_timeout_ms")]
    pub idle_timeout_ms: u64,

    /// Per-connection outbound queue capacity.
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,

    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,

    /// Inbound events per second allowed on one connection.
    #[serde(default = "default_rate_limit_rps")]
    pub rate_limit_rps: u32,

    #[serde(default = "default_rate_limit_burst")]
    pub rate_limit_burst: u32,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            ping_interval_ms: default_ping_interval_ms(),
            idle_timeout_ms: default_idle_timeout_ms(),
            outbound_queue: default_outbound_queue(),
            max_frame_bytes: default_max_frame_bytes(),
            rate_limit_rps: default_rate_limit_rps(),
            rate_limit_burst: default_rate_limit_burst(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !(5000..=120000).contains(&self.ping_interval_ms) {
            return Err(ParleyError::BadRequest(
                "gateway.ping_interval_ms must be between 5000 and 120000".into(),
            ));
        }
        if !(10000..=600000).contains(&self.idle_timeout_ms) {
            return Err(ParleyError::BadRequest(
                "gateway.idle_timeout_ms must be between 10000 and 600000".into(),
            ));
        }
        if self.idle_timeout_ms <= self.ping_interval_ms {
            return Err(ParleyError::BadRequest(
                "gateway.idle_timeout_ms must be greater than ping_interval_ms".into(),
            ));
        }
        if !(1..=65536).contains(&self.outbound_queue) {
            return Err(ParleyError::BadRequest(
                "gateway.outbound_queue must be between 1 and 65536".into(),
            ));
        }
        if !(64..=1_048_576).contains(&self.max_frame_bytes) {
            return Err(ParleyError::BadRequest(
                "gateway.max_frame_bytes must be between 64 and 1048576".into(),
            ));
        }
        if self.rate_limit_rps == 0 || self.rate_limit_burst == 0 {
            return Err(ParleyError::BadRequest(
                "gateway.rate_limit_rps and rate_limit_burst must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            ParleyError::BadRequest(format!("gateway.listen must be a valid SocketAddr: {e}"))
        })
    }

    /// Replace the port of `listen`, keeping the host.
    pub fn override_port(&mut self, port: &str) -> Result<()> {
        let port: u16 = port
            .trim()
            .parse()
            .map_err(|e| ParleyError::BadRequest(format!("PORT must be a u16: {e}")))?;
        let mut addr = self.listen_addr()?;
        addr.set_port(port);
        self.listen = addr.to_string();
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:5000".into()
}
fn default_ping_interval_ms() -> u64 {
    20000
}
fn default_idle_timeout_ms() -> u64 {
    60000
}
fn default_outbound_queue() -> usize {
    256
}
fn default_max_frame_bytes() -> usize {
    16384
}
fn default_rate_limit_rps() -> u32 {
    50
}
fn default_rate_limit_burst() -> u32 {
    100
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct LastSeenSection {
    #[serde(default)]
    pub clock: LastSeenClock,
}

/// Time zone used for the `HH:MM` last-seen stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LastSeenClock {
    #[default]
    Local,
    Utc,
}
