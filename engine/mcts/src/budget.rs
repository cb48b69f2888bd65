//! Search budgets.
//!
//! The engine polls its budget at every cycle boundary, so a cycle that is
//! already running always completes. Budgets are injected rather than read
//! from an ambient clock, which lets tests swap the deadline for a fixed
//! cycle count.

use std::time::{Duration, Instant};

/// Decides when the search loop stops.
pub trait Budget {
    /// True once no further cycle should start. `cycles` counts the cycles
    /// completed so far.
    fn exhausted(&self, cycles: u64) -> bool;
}

/// Wall-clock deadline measured from a monotonic start instant.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    limit: Duration,
}

impl Deadline {
    /// Deadline that starts counting now.
    pub fn new(limit: Duration) -> Self {
        Self::starting_at(Instant::now(), limit)
    }

    pub fn starting_at(start: Instant, limit: Duration) -> Self {
        Self { start, limit }
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl Budget for Deadline {
    #[inline]
    fn exhausted(&self, _cycles: u64) -> bool {
        self.elapsed() > self.limit
    }
}

/// Fixed number of cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleLimit(u64);

impl CycleLimit {
    pub fn new(cycles: u64) -> Self {
        Self(cycles)
    }

    pub fn unlimited() -> Self {
        Self(u64::MAX)
    }

    pub fn cycles(&self) -> u64 {
        self.0
    }
}

impl Budget for CycleLimit {
    #[inline]
    fn exhausted(&self, cycles: u64) -> bool {
        cycles >= self.0
    }
}

/// Exhausted as soon as either budget is.
#[derive(Debug, Clone, Copy)]
pub struct FirstOf<A, B>(pub A, pub B);

impl<A: Budget, B: Budget> Budget for FirstOf<A, B> {
    #[inline]
    fn exhausted(&self, cycles: u64) -> bool {
        self.0.exhausted(cycles) || self.1.exhausted(cycles)
    }
}

impl<B: Budget + ?Sized> Budget for &B {
    #[inline]
    fn exhausted(&self, cycles: u64) -> bool {
        (**self).exhausted(cycles)
    }
}

impl<B: Budget + ?Sized> Budget for Box<B> {
    #[inline]
    fn exhausted(&self, cycles: u64) -> bool {
        (**self).exhausted(cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_limit() {
        let budget = CycleLimit::new(3);
        assert!(!budget.exhausted(0));
        assert!(!budget.exhausted(2));
        assert!(budget.exhausted(3));
        assert!(!CycleLimit::unlimited().exhausted(1_000_000));
    }

    #[test]
    fn test_expired_deadline() {
        let start = Instant::now()
            .checked_sub(Duration::from_millis(500))
            .expect("monotonic clock should be past 500ms");
        let deadline = Deadline::starting_at(start, Duration::from_millis(100));
        assert!(deadline.exhausted(0));
        assert!(deadline.elapsed() >= Duration::from_millis(500));
    }

    #[test]
    fn test_fresh_deadline() {
        let deadline = Deadline::new(Duration::from_secs(60));
        assert!(!deadline.exhausted(0));
        assert_eq!(deadline.limit(), Duration::from_secs(60));
    }

    #[test]
    fn test_first_of() {
        let budget = FirstOf(Deadline::new(Duration::from_secs(60)), CycleLimit::new(10));
        assert!(!budget.exhausted(9));
        assert!(budget.exhausted(10));

        let boxed: Box<dyn Budget> = Box::new(CycleLimit::new(1));
        assert!(boxed.exhausted(1));
    }
}
