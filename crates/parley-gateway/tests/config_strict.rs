#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use parley_gateway::config::{self, LastSeenClock};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:5000"
  outbound_queu: 12 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.kind(), "bad_request");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "0.0.0.0:5000");
    assert_eq!(cfg.last_seen.clock, LastSeenClock::Local);
}

#[test]
fn utc_clock_and_overrides() {
    let ok = r#"
version: 1
gateway:
  listen: "127.0.0.1:7000"
  outbound_queue: 8
last_seen:
  clock: utc
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.gateway.outbound_queue, 8);
    assert_eq!(cfg.last_seen.clock, LastSeenClock::Utc);
}

#[test]
fn rejects_wrong_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.kind(), "unsupported_version");
}

#[test]
fn rejects_idle_timeout_below_ping() {
    let bad = r#"
version: 1
gateway:
  ping_interval_ms: 30000
  idle_timeout_ms: 20000
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_bad_listen_addr() {
    let bad = r#"
version: 1
gateway:
  listen: "localhost"
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn port_override_keeps_host() {
    let mut cfg = config::GatewayConfig::default();
    cfg.gateway.override_port("6001").unwrap();
    assert_eq!(cfg.gateway.listen, "0.0.0.0:6001");
    assert!(cfg.gateway.override_port("not-a-port").is_err());
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let cfg = config::load_or_default("definitely/not/here/parley.yaml").unwrap();
    assert_eq!(cfg.gateway.outbound_queue, 256);
}
