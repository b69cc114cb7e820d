use std::time::{Duration, Instant};

/// Monotonic elapsed-time capability polled by the search.
pub trait Clock {
    fn reset(&mut self);
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn reset(&mut self) {
        self.start = Instant::now();
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

/// A time limit measured against a [`Clock`].
pub(crate) struct Budget<'a, C: Clock> {
    clock: &'a C,
    limit: Duration,
}

impl<'a, C: Clock> Budget<'a, C> {
    pub(crate) fn new(clock: &'a C, limit: Duration) -> Self {
        Self { clock, limit }
    }

    /// A tighter budget ending at `elapsed + span`, capped by this one.
    pub(crate) fn narrowed(&self, span: Duration) -> Self {
        let end = self.clock.elapsed().saturating_add(span);
        Self {
            clock: self.clock,
            limit: end.min(self.limit),
        }
    }

    #[inline]
    pub(crate) fn exhausted(&self) -> bool {
        self.clock.elapsed() >= self.limit
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    #[cfg(test)]
    pub(crate) fn limit(&self) -> Duration {
        self.limit
    }
}
