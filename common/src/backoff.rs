//! Reconnect policy for the monitoring push channel.
//!
//! Delays grow exponentially from `initial_delay_ms` up to `max_delay_ms`.
//! After `max_attempts` consecutive failures the circuit opens and no further
//! attempt is scheduled until the operator asks for one.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconnectPolicy {
    pub initial_delay_ms: u32,
    pub max_delay_ms: u32,
    pub multiplier: f64,
    pub max_attempts: u32,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            initial_delay_ms: 1000,
            max_delay_ms: 30000,
            multiplier: 2.0,
            max_attempts: 8,
        }
    }
}

impl ReconnectPolicy {
    /// Delay before the given attempt (1-based).
    pub fn delay_for(&self, attempt: u32) -> u32 {
        if attempt == 0 {
            return 0;
        }
        let factor = self.multiplier.max(1.0).powi(attempt.saturating_sub(1) as i32);
        let delay = f64::from(self.initial_delay_ms) * factor;
        if delay >= f64::from(self.max_delay_ms) {
            self.max_delay_ms
        } else {
            delay as u32
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Connecting,
    Open,
    /// Waiting `delay_ms` before reconnect attempt number `attempt`.
    Waiting { attempt: u32, delay_ms: u32 },
    /// Retries exhausted; only a manual reset reconnects.
    Exhausted,
    /// Torn down by its owner.
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reconnector {
    policy: ReconnectPolicy,
    failures: u32,
    state: ChannelState,
}

impl Reconnector {
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self {
            policy,
            failures: 0,
            state: ChannelState::Connecting,
        }
    }

    pub fn state(&self) -> ChannelState {
        self.state
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn is_exhausted(&self) -> bool {
        self.state == ChannelState::Exhausted
    }

    /// A frame arrived, so the channel is healthy again.
    pub fn on_frame(&mut self) {
        if self.state != ChannelState::Closed {
            self.failures = 0;
            self.state = ChannelState::Open;
        }
    }

    /// Records an error or close event. Returns the delay before the next
    /// attempt, or `None` when no attempt must be made.
    pub fn on_failure(&mut self) -> Option<u32> {
        match self.state {
            ChannelState::Closed | ChannelState::Exhausted => return None,
            _ => {}
        }
        self.failures += 1;
        if self.failures > self.policy.max_attempts {
            self.state = ChannelState::Exhausted;
            return None;
        }
        let delay_ms = self.policy.delay_for(self.failures);
        self.state = ChannelState::Waiting {
            attempt: self.failures,
            delay_ms,
        };
        Some(delay_ms)
    }

    /// Marks the start of a connection attempt after a wait.
    pub fn on_attempt(&mut self) {
        if matches!(self.state, ChannelState::Waiting { .. }) {
            self.state = ChannelState::Connecting;
        }
    }

    /// Operator-initiated reconnect: closes the open circuit.
    pub fn reset(&mut self) {
        self.failures = 0;
        self.state = ChannelState::Connecting;
    }

    pub fn close(&mut self) {
        self.state = ChannelState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ReconnectPolicy {
        ReconnectPolicy {
            initial_delay_ms: 500,
            max_delay_ms: 3000,
            multiplier: 2.0,
            max_attempts: 4,
        }
    }

    #[test]
    fn delays_grow_and_are_capped() {
        let p = policy();
        assert_eq!(p.delay_for(1), 500);
        assert_eq!(p.delay_for(2), 1000);
        assert_eq!(p.delay_for(3), 2000);
        assert_eq!(p.delay_for(4), 3000);
        assert_eq!(p.delay_for(30), 3000);
    }

    #[test]
    fn stops_after_max_attempts() {
        let mut r = Reconnector::new(policy());
        let delays: Vec<Option<u32>> = (0..6).map(|_| r.on_failure()).collect();
        assert_eq!(
            delays,
            vec![Some(500), Some(1000), Some(2000), Some(3000), None, None]
        );
        assert!(r.is_exhausted());
    }

    #[test]
    fn frame_resets_failure_count() {
        let mut r = Reconnector::new(policy());
        r.on_failure();
        r.on_failure();
        r.on_attempt();
        assert_eq!(r.state(), ChannelState::Connecting);
        assert_eq!(r.failures(), 2);
        r.on_frame();
        assert_eq!(r.failures(), 0);
        assert_eq!(r.on_failure(), Some(500));
    }

    #[test]
    fn closed_channel_never_reconnects() {
        let mut r = Reconnector::new(policy());
        r.close();
        assert_eq!(r.on_failure(), None);
        r.on_frame();
        assert_eq!(r.state(), ChannelState::Closed);
    }

    #[test]
    fn manual_reset_reopens_circuit() {
        let mut r = Reconnector::new(ReconnectPolicy {
            max_attempts: 1,
            ..policy()
        });
        r.on_failure();
        assert_eq!(r.on_failure(), None);
        r.reset();
        assert_eq!(r.state(), ChannelState::Connecting);
        assert_eq!(r.on_failure(), Some(500));
    }
}
