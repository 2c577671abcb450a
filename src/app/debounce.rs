//! Generation-counted timers.
//!
//! Each [`Debouncer::arm`] call invalidates every earlier one. The runtime
//! sleeps and then reports the generation it was armed with; only the latest
//! generation is acted on, so a burst of inputs collapses into a single
//! firing even if an aborted timer slips through.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: u64,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay, generation: 0 }
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Starts a new wait, superseding any pending one. Returns its generation.
    pub fn arm(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Invalidates any pending wait without starting a new one.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }

    /// True if `generation` is the latest armed wait.
    #[must_use]
    pub const fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_generation_fires() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let first = debouncer.arm();
        let second = debouncer.arm();
        assert!(!debouncer.is_current(first));
        assert!(debouncer.is_current(second));
    }

    #[test]
    fn cancel_invalidates_pending() {
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        let pending = debouncer.arm();
        debouncer.cancel();
        assert!(!debouncer.is_current(pending));
    }
}
