// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Delay between drain cycles.
//!
//! Replication runs asynchronously on the server, so polling again right
//! away mostly observes stale state. When other workers hold locks the delay
//! can be spread out with random jitter so competing drainers do not retry
//! in lockstep.

use std::time::Duration;

use rand::Rng;
use replq_core::BatchResult;

/// How to wait when the last cycle reported locks held by others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentionBackoff {
    /// Use the base delay.
    Fixed,
    /// Base delay plus a random extra delay in `0..=max_jitter`.
    Jittered { max_jitter: Duration },
}

/// Delay policy applied between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    pub base: Duration,
    pub contention: ContentionBackoff,
}

impl CooldownPolicy {
    /// Same delay whether or not others hold locks.
    pub fn fixed(base: Duration) -> Self {
        CooldownPolicy {
            base,
            contention: ContentionBackoff::Fixed,
        }
    }

    /// No delay at all.
    pub fn none() -> Self {
        Self::fixed(Duration::ZERO)
    }

    /// Delay to apply after a cycle that produced `last`.
    pub fn delay_after(&self, last: &BatchResult) -> Duration {
        if !last.is_contended() {
            return self.base;
        }
        match self.contention {
            ContentionBackoff::Fixed => self.base,
            ContentionBackoff::Jittered { max_jitter } => self.base.saturating_add(jitter(max_jitter)),
        }
    }
}

fn jitter(max: Duration) -> Duration {
    let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::rng().random_range(0..=max_ms))
}

#[cfg(test)]
#[path = "cooldown_tests.rs"]
mod tests;
