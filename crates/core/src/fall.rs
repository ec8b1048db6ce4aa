//! Fall scheduler - gravity timing and speed-up over session time
//!
//! Two independent clocks read the same caller-supplied millisecond timestamps:
//! one decides when gravity moves the piece, the other shortens the gravity
//! interval every `step_ms` until it reaches `min_ms`.

use crate::config::FallConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallScheduler {
    config: FallConfig,
    interval_ms: u64,
    last_fall_ms: u64,
    last_speedup_ms: u64,
}

impl FallScheduler {
    /// Both clocks start at `now_ms`.
    pub fn new(config: FallConfig, now_ms: u64) -> Self {
        Self {
            config,
            interval_ms: config.initial_ms,
            last_fall_ms: now_ms,
            last_speedup_ms: now_ms,
        }
    }

    /// Current gravity period.
    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// True once a full interval has passed since the last step; restarts the
    /// gravity clock at `now_ms` when it fires.
    ///
    /// Timestamps earlier than the last step count as no elapsed time.
    pub fn should_step(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_fall_ms) >= self.interval_ms {
            self.last_fall_ms = now_ms;
            return true;
        }
        false
    }

    /// Shorten the interval by `reduction_ms` (floored at `min_ms`) once every
    /// `step_ms`. Returns true when the interval actually changed.
    pub fn maybe_speed_up(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_speedup_ms) < self.config.step_ms {
            return false;
        }
        self.last_speedup_ms = now_ms;
        let next = self
            .interval_ms
            .saturating_sub(self.config.reduction_ms)
            .max(self.config.min_ms);
        let changed = next != self.interval_ms;
        self.interval_ms = next;
        changed
    }
}
