//! Minimal metrics registry for the gateway.
//!
//! Counter and gauge types with dynamic labels backed by `DashMap`. Labels are
//! flattened into sorted key vectors so rendering order is deterministic per key.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn render_line(out: &mut String, name: &str, key: &LabelKey, val: impl std::fmt::Display) {
    if key.is_empty() {
        let _ = writeln!(out, "{} {}", name, val);
        return;
    }
    let label_str = key
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    let _ = writeln!(out, "{}{{{}}} {}", name, label_str, val);
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for one label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            render_line(out, name, r.key(), r.value().load(Ordering::Relaxed));
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    pub fn inc(&self, labels: &[(&str, &str)]) { self.add(labels, 1); }
    pub fn dec(&self, labels: &[(&str, &str)]) { self.add(labels, -1); }

    /// Add an arbitrary signed delta.
    pub fn add(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        gauge.fetch_add(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} gauge", name);
        for r in self.map.iter() {
            render_line(out, name, r.key(), r.value().load(Ordering::Relaxed));
        }
    }
}

#[derive(Default)]
pub struct GatewayMetrics {
    pub ws_upgrades: CounterVec,
    pub connections_active: GaugeVec,
    pub inbound_events: CounterVec,
    pub decode_errors: CounterVec,
    pub policy_drops: CounterVec,
    pub messages_routed: CounterVec,
    pub read_receipts: CounterVec,
    pub broadcasts: CounterVec,
    pub egress_drops: CounterVec,
    draining: AtomicBool,
}

impl GatewayMetrics {
    /// Mark draining state.
    pub fn set_draining(&self) { self.draining.store(true, Ordering::Relaxed); }
    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool { self.draining.load(Ordering::Relaxed) }

    /// Render all registered metrics plus any extra lines provided by callers.
    pub fn render(&self, extra: &[(&str, u64)]) -> String {
        let mut out = String::new();
        self.ws_upgrades.render("parley_ws_upgrades_total", &mut out);
        self.connections_active.render("parley_connections_active", &mut out);
        self.inbound_events.render("parley_inbound_events_total", &mut out);
        self.decode_errors.render("parley_decode_errors_total", &mut out);
        self.policy_drops.render("parley_policy_drops_total", &mut out);
        self.messages_routed.render("parley_messages_routed_total", &mut out);
        self.read_receipts.render("parley_read_receipts_total", &mut out);
        self.broadcasts.render("parley_broadcasts_total", &mut out);
        self.egress_drops.render("parley_egress_drops_total", &mut out);

        let _ = writeln!(out, "# TYPE parley_draining gauge\nparley_draining {}", if self.is_draining() { 1 } else { 0 });
        for (k, v) in extra { let _ = writeln!(out, "{} {}", k, v); }
        out
    }
}
