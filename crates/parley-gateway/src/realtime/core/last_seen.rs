use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};

use parley_core::error::Result;
use parley_core::protocol::ServerEvent;

use crate::config::LastSeenClock;
use crate::obs::GatewayMetrics;
use crate::realtime::core::connection_registry::ConnectionRegistry;
use crate::realtime::core::realtime::broadcast_all;

/// Stamps departing users and tells everyone still connected.
/// Nothing is stored; clients keep the latest value per user themselves.
pub struct LastSeenTracker {
    clock: LastSeenClock,
    metrics: Arc<GatewayMetrics>,
}

impl LastSeenTracker {
    pub fn new(clock: LastSeenClock, metrics: Arc<GatewayMetrics>) -> Self {
        Self { clock, metrics }
    }

    /// Current wall-clock time as `HH:MM` (24-hour).
    pub fn stamp(&self) -> String {
        match self.clock {
            LastSeenClock::Local => format_stamp(&Local::now()),
            LastSeenClock::Utc => format_stamp(&Utc::now()),
        }
    }

    pub fn event(&self, user: &str) -> ServerEvent {
        ServerEvent::LastSeen {
            user: user.to_string(),
            timestamp: self.stamp(),
        }
    }

    /// Broadcast to every connection left in `registry`.
    pub fn broadcast(&self, registry: &ConnectionRegistry, user: &str) -> Result<usize> {
        broadcast_all(registry, &self.event(user), &self.metrics)
    }
}

pub fn format_stamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn stamp_is_zero_padded_24h() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 59).single();
        assert_eq!(at.map(|t| format_stamp(&t)).as_deref(), Some("07:05"));

        let east = FixedOffset::east_opt(9 * 3600).and_then(|tz| tz.with_ymd_and_hms(2024, 3, 9, 23, 0, 0).single());
        assert_eq!(east.map(|t| format_stamp(&t)).as_deref(), Some("23:00"));
    }
}
