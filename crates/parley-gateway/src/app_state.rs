//! Shared application state for the parley gateway.
//!
//! Wires config, metrics, the realtime core and the dispatcher once at
//! startup; handlers get cheap clones.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::dispatch::Dispatcher;
use crate::obs::GatewayMetrics;
use crate::realtime::RealtimeCore;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<GatewayConfig>,
    realtime: Arc<RealtimeCore>,
    dispatcher: Arc<Dispatcher>,
    metrics: Arc<GatewayMetrics>,
}

impl AppState {
    pub fn new(cfg: GatewayConfig) -> Self {
        let metrics = Arc::new(GatewayMetrics::default());
        let realtime = Arc::new(RealtimeCore::new(cfg.last_seen.clock, Arc::clone(&metrics)));
        let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&realtime), Arc::clone(&metrics)));

        Self {
            cfg: Arc::new(cfg),
            realtime,
            dispatcher,
            metrics,
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.cfg
    }

    pub fn realtime(&self) -> Arc<RealtimeCore> {
        Arc::clone(&self.realtime)
    }

    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.metrics
    }

    pub fn begin_draining(&self) {
        self.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    /// Point-in-time gauges read from the registry for `/metrics`.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        vec![
            ("parley_registry_connections", self.realtime.connection_count() as u64),
            ("parley_users_online", self.realtime.online_names().len() as u64),
        ]
    }
}
