use std::time::{Duration, Instant};

use crate::config::GatewaySection;

/// Decision from policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyDecision {
    Pass,
    /// Ignore this frame, keep the connection.
    Drop,
    /// End the connection.
    Close { reason: &'static str },
}

/// Per-connection policy state. Owned by the session loop, so no locking.
#[derive(Debug)]
pub struct ConnPolicy {
    max_frame_bytes: usize,
    bucket: TokenBucket,
}

impl ConnPolicy {
    pub fn new(max_frame_bytes: usize, rps: u32, burst: u32) -> Self {
        Self {
            max_frame_bytes,
            bucket: TokenBucket::new(rps, burst),
        }
    }

    pub fn from_config(gw: &GatewaySection) -> Self {
        Self::new(gw.max_frame_bytes, gw.rate_limit_rps, gw.rate_limit_burst)
    }

    /// Cheap size check, valid for any frame kind.
    pub fn check_len(&self, bytes_len: usize) -> PolicyDecision {
        if bytes_len > self.max_frame_bytes {
            return PolicyDecision::Close {
                reason: "frame too large",
            };
        }
        PolicyDecision::Pass
    }

    /// Size check plus rate limit, for frames that carry events.
    pub fn check_event(&mut self, bytes_len: usize) -> PolicyDecision {
        match self.check_len(bytes_len) {
            PolicyDecision::Pass => {}
            other => return other,
        }
        if !self.bucket.allow() {
            return PolicyDecision::Drop;
        }
        PolicyDecision::Pass
    }
}

#[derive(Debug)]
struct TokenBucket {
    rps: u32,
    capacity: u32,
    tokens: u32,
    last: Instant,
}

impl TokenBucket {
    fn new(rps: u32, burst: u32) -> Self {
        let rps = rps.max(1);
        let capacity = burst.max(1);
        Self {
            rps,
            capacity,
            tokens: capacity,
            last: Instant::now(),
        }
    }

    fn allow(&mut self) -> bool {
        self.refill();

        if self.tokens == 0 {
            return false;
        }
        self.tokens -= 1;
        true
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last);
        if elapsed < Duration::from_millis(50) {
            return;
        }

        let add = (elapsed.as_millis() as u64 * self.rps as u64 / 1000) as u32;
        if add > 0 {
            self.tokens = self.tokens.saturating_add(add).min(self.capacity);
            self.last = now;
        }
    }
}
