//! Debounce schedule for scene snapshots.
//!
//! A single-slot deadline: each observed scene change re-arms it, so at most
//! one export is ever pending and only a settled scene is captured. The host
//! loop polls it with the current time.

use std::time::{Duration, Instant};

/// Default quiet period before a snapshot is taken.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Tracks scene revisions and decides when a snapshot is due.
#[derive(Debug, Clone)]
pub struct SnapshotSchedule {
    /// Quiet period after the last change.
    delay: Duration,
    /// When the pending export fires, if one is armed.
    deadline: Option<Instant>,
    /// Last revision seen by `observe`.
    last_revision: Option<u64>,
}

impl Default for SnapshotSchedule {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }
}

impl SnapshotSchedule {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            last_revision: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Re-arm the timer, discarding any pending deadline.
    pub fn notify_change(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Re-arm if `revision` differs from the last one seen.
    ///
    /// The first observation always arms, so a fresh designer exports its
    /// initial scene. Returns whether the timer was re-armed.
    pub fn observe(&mut self, revision: u64, now: Instant) -> bool {
        if self.last_revision == Some(revision) {
            return false;
        }
        self.last_revision = Some(revision);
        self.notify_change(now);
        true
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the pending export fires.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Fire if the deadline has passed. Returns true exactly once per arming.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop the pending export without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_schedule_creation() {
        let schedule = SnapshotSchedule::default();
        assert!(!schedule.is_pending());
        assert_eq!(schedule.delay(), ms(DEFAULT_DEBOUNCE_MS));
    }

    #[test]
    fn test_fires_after_quiet_period() {
        let t0 = Instant::now();
        let mut schedule = SnapshotSchedule::default();
        schedule.notify_change(t0);

        assert!(!schedule.poll(t0 + ms(499)));
        assert!(schedule.poll(t0 + ms(500)));
        // Fires once per arming
        assert!(!schedule.poll(t0 + ms(10_000)));
    }

    #[test]
    fn test_rapid_changes_fire_once() {
        let t0 = Instant::now();
        let mut schedule = SnapshotSchedule::default();
        let mut fired = 0;

        for step in 0..5u64 {
            let now = t0 + ms(step * 200);
            schedule.observe(step, now);
            if schedule.poll(now) {
                fired += 1;
            }
        }
        // Last change at 800ms
        assert!(!schedule.poll(t0 + ms(1_299)));
        if schedule.poll(t0 + ms(1_300)) {
            fired += 1;
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_observe_same_revision_does_not_rearm() {
        let t0 = Instant::now();
        let mut schedule = SnapshotSchedule::default();

        assert!(schedule.observe(3, t0));
        assert!(!schedule.observe(3, t0 + ms(400)));
        assert!(schedule.poll(t0 + ms(500)));
        assert!(!schedule.observe(3, t0 + ms(600)));
        assert!(!schedule.is_pending());
    }

    #[test]
    fn test_time_until_due() {
        let t0 = Instant::now();
        let mut schedule = SnapshotSchedule::new(ms(300));
        assert!(schedule.time_until_due(t0).is_none());
        schedule.notify_change(t0);
        assert_eq!(schedule.time_until_due(t0 + ms(100)), Some(ms(200)));
        assert_eq!(schedule.time_until_due(t0 + ms(900)), Some(Duration::ZERO));
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut schedule = SnapshotSchedule::default();
        schedule.notify_change(t0);
        schedule.cancel();
        assert!(!schedule.poll(t0 + ms(1_000)));
    }
}
