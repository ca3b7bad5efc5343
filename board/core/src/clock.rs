//! Animation Clock
//!
//! One tick scheduler per engine. Every cycling cell subscribes; the clock
//! runs only while it has subscribers and is stopped the moment the last
//! one settles.
//!
//! The clock has no wall-clock access of its own. The host reports elapsed
//! time through [`AnimationClock::advance`], which returns how many ticks
//! are due, and asks [`AnimationClock::time_until_next_tick`] how long it
//! may sleep. A host therefore only arms a timer while the clock runs.
//!
//! # Tick rate
//!
//! interval = full wheel rotation / wheel size
//!
//! With the default 5s rotation and 71 slots this is ~70.4ms, so even a
//! cell that needs every slot but one finishes within one rotation.

use std::collections::BTreeSet;
use std::time::Duration;

use tracing::{debug, trace};

use crate::alphabet::ALPHABET_SIZE;
use crate::error::EngineError;

/// Default time for one full wheel rotation
pub const FULL_CYCLE: Duration = Duration::from_millis(5000);

/// Shared tick scheduler for a grid of cells
#[derive(Debug, Clone)]
pub struct AnimationClock {
    /// Time between ticks
    interval: Duration,
    /// Cells (row-major index) currently cycling
    subscribers: BTreeSet<usize>,
    /// Whether the clock has been started
    running: bool,
    /// Time accumulated toward the next tick
    pending: Duration,
    /// Ticks delivered since creation
    ticks: u64,
}

impl AnimationClock {
    /// Create a stopped clock ticking at `interval`
    pub fn new(interval: Duration) -> Result<Self, EngineError> {
        if interval.is_zero() {
            return Err(EngineError::InvalidCycle);
        }
        Ok(Self {
            interval,
            subscribers: BTreeSet::new(),
            running: false,
            pending: Duration::ZERO,
            ticks: 0,
        })
    }

    /// Stopped clock for the standard wheel and rotation time
    pub fn standard() -> Self {
        Self {
            interval: FULL_CYCLE / ALPHABET_SIZE as u32,
            subscribers: BTreeSet::new(),
            running: false,
            pending: Duration::ZERO,
            ticks: 0,
        }
    }

    /// Create a clock whose interval spreads `full_cycle` over `wheel_size` slots
    pub fn for_wheel(full_cycle: Duration, wheel_size: usize) -> Result<Self, EngineError> {
        let slots = u32::try_from(wheel_size.max(1)).unwrap_or(u32::MAX);
        Self::new(full_cycle / slots)
    }

    /// Start ticking. No-op if already running.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.pending = Duration::ZERO;
            debug!(
                interval_us = self.interval.as_micros() as u64,
                subscribers = self.subscribers.len(),
                "Animation clock started"
            );
        }
    }

    /// Stop ticking and drop any partially accumulated time
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.pending = Duration::ZERO;
            debug!(ticks = self.ticks, "Animation clock stopped");
        }
    }

    /// Stop and forget every subscriber
    pub fn reset(&mut self) {
        self.stop();
        self.subscribers.clear();
    }

    /// Add a subscriber; returns true if it was new
    pub fn subscribe(&mut self, id: usize) -> bool {
        self.subscribers.insert(id)
    }

    /// Remove a subscriber; returns true if it was subscribed
    pub fn unsubscribe(&mut self, id: usize) -> bool {
        self.subscribers.remove(&id)
    }

    /// Whether a subscriber is registered
    pub fn is_subscribed(&self, id: usize) -> bool {
        self.subscribers.contains(&id)
    }

    /// Subscribers in ascending order
    pub fn subscribers(&self) -> impl Iterator<Item = usize> + '_ {
        self.subscribers.iter().copied()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn has_subscribers(&self) -> bool {
        !self.subscribers.is_empty()
    }

    /// Whether the clock is started and has work
    pub fn is_running(&self) -> bool {
        self.running && self.has_subscribers()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks delivered since creation
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Account for elapsed time and return how many ticks are due.
    ///
    /// Returns 0 while stopped; elapsed time is not banked while stopped.
    /// Accumulation saturates, so an absurd `elapsed` yields `u32::MAX`
    /// ticks rather than overflowing.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.is_running() {
            return 0;
        }

        self.pending = self.pending.saturating_add(elapsed);
        let interval = self.interval.as_nanos();
        let pending = self.pending.as_nanos();
        let due = u32::try_from(pending / interval).unwrap_or(u32::MAX);
        // Remainder is below the interval, so it fits
        self.pending = Duration::from_nanos(u64::try_from(pending % interval).unwrap_or(u64::MAX));
        if due > 0 {
            trace!(due, "Clock ticks due");
        }
        due
    }

    /// Record that one tick was delivered
    pub(crate) fn record_tick(&mut self) {
        self.ticks += 1;
    }

    /// Time until the next tick is due, or `None` when stopped
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.is_running()
            .then(|| self.interval.saturating_sub(self.pending))
    }
}
