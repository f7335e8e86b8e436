//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use parley_core::error::{ParleyError, Result};

pub use schema::{GatewayConfig, GatewaySection, LastSeenClock, LastSeenSection};

/// Default config file, looked up in the working directory.
pub const DEFAULT_PATH: &str = "parley.yaml";

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| ParleyError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

/// Like `load_from_file`, but a missing file yields the defaults.
pub fn load_or_default(path: &str) -> Result<GatewayConfig> {
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!(%path, "config file not found, using defaults");
            Ok(GatewayConfig::default())
        }
        Err(e) => Err(ParleyError::Internal(format!("read config failed: {e}"))),
    }
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| ParleyError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Apply the `PORT` environment override, the only setting read from the environment.
pub fn apply_env(cfg: &mut GatewayConfig) -> Result<()> {
    match std::env::var("PORT") {
        Ok(port) => cfg.gateway.override_port(&port),
        Err(_) => Ok(()),
    }
}
