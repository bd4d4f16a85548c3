use anchor_lang::prelude::*;

/// Round start and the fixed interval after which a draw may begin.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq, InitSpace)]
pub struct RoundClock {
    /// UNIX timestamp at which the current round opened.
    pub start_timestamp: i64,

    /// Seconds that must pass before the round may be drawn.
    pub interval: i64,
}

impl RoundClock {
    pub fn new(interval: i64, now: i64) -> Self {
        Self {
            start_timestamp: now,
            interval,
        }
    }

    pub fn elapsed_since_start(&self, now: i64) -> i64 {
        now.saturating_sub(self.start_timestamp)
    }

    pub fn interval_reached(&self, now: i64) -> bool {
        self.elapsed_since_start(now) >= self.interval
    }

    pub(crate) fn restart(&mut self, now: i64) {
        self.start_timestamp = now;
    }
}
