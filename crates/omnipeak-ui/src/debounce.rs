#![forbid(unsafe_code)]

//! Deterministic debouncer.
//!
//! Time is supplied by the host, the same way the web backend drives its
//! clock explicitly. Each [`Debouncer::call`] pushes the deadline out to
//! `now + wait`; [`Debouncer::poll`] fires once the quiet period elapses.

use core::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    wait: Duration,
    deadline: Option<Duration>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(wait: Duration) -> Self {
        Self {
            wait,
            deadline: None,
        }
    }

    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }

    /// Record an invocation at monotonic time `now`, discarding any pending one.
    pub fn call(&mut self, now: Duration) {
        self.deadline = Some(now.saturating_add(self.wait));
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once per quiet period, when `now` has reached
    /// the deadline.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the pending deadline; `None` when idle.
    #[must_use]
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_sub(now))
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_once_after_quiet_period() {
        let mut d = Debouncer::new(ms(100));
        d.call(ms(0));
        assert!(!d.poll(ms(99)));
        assert!(d.poll(ms(100)));
        assert!(!d.poll(ms(500)));
    }

    #[test]
    fn repeated_calls_postpone_firing() {
        let mut d = Debouncer::new(ms(100));
        d.call(ms(0));
        d.call(ms(80));
        d.call(ms(160));
        assert!(!d.poll(ms(200)));
        assert!(d.poll(ms(260)));
    }

    #[test]
    fn idle_debouncer_never_fires() {
        let mut d = Debouncer::new(ms(10));
        assert!(!d.is_armed());
        assert!(!d.poll(ms(1_000)));
    }

    #[test]
    fn cancel_drops_pending_call() {
        let mut d = Debouncer::new(ms(10));
        d.call(ms(0));
        d.cancel();
        assert!(!d.poll(ms(50)));
    }

    #[test]
    fn remaining_tracks_the_latest_deadline() {
        let mut d = Debouncer::new(ms(100));
        assert_eq!(d.remaining(ms(0)), None);
        d.call(ms(0));
        assert_eq!(d.remaining(ms(30)), Some(ms(70)));
        d.call(ms(50));
        assert_eq!(d.remaining(ms(60)), Some(ms(90)));
        assert_eq!(d.remaining(ms(400)), Some(ms(0)));
        assert!(d.poll(ms(400)));
        assert_eq!(d.remaining(ms(400)), None);
    }
}
