#![forbid(unsafe_code)]

//! Timed auto-advance.
//!
//! [`Autoplay`] keeps at most one pending deadline. The host drives it from its
//! event loop: call [`poll`](Autoplay::poll) on every tick, and request one
//! `advance()` for each `true` it returns.
//!
//! The schedule is suspended by [`Hold`] flags. Each source (an active drag,
//! the pointer hovering the viewport, an explicit host pause) sets its own
//! flag, so releasing one never resumes ticking while another still applies.
//!
//! # Invariants
//!
//! 1. A deadline exists iff the timer is running and no hold is set.
//! 2. Setting any hold discards the pending deadline; releasing the last hold
//!    schedules a fresh one a full interval away. Nothing can fire twice for
//!    the same interval.
//! 3. `poll` fires at most once per call. Intervals missed while the host was
//!    not polling are coalesced into that single fire.
//! 4. A zero interval never schedules anything.

use std::time::Duration;

use bitflags::bitflags;
use web_time::Instant;

bitflags! {
    /// Reasons the autoplay schedule is suspended.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Hold: u8 {
        /// A drag is in progress.
        const DRAG  = 0b0001;
        /// The pointer is over the viewport.
        const HOVER = 0b0010;
        /// The host paused explicitly.
        const HOST  = 0b0100;
    }
}

/// Repeating auto-advance timer.
#[derive(Debug, Clone)]
pub struct Autoplay {
    interval: Option<Duration>,
    running: bool,
    holds: Hold,
    deadline: Option<Instant>,
}

impl Autoplay {
    /// Create a stopped timer with an optional configured interval.
    #[must_use]
    pub fn new(interval: Option<Duration>) -> Self {
        Self {
            interval: interval.filter(|d| !d.is_zero()),
            running: false,
            holds: Hold::empty(),
            deadline: None,
        }
    }

    /// Start ticking every `interval`, replacing any previous schedule.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        self.interval = Some(interval).filter(|d| !d.is_zero());
        self.running = self.interval.is_some();
        self.deadline = None;
        self.reschedule(now);
    }

    /// Start with the configured interval, if any. Returns whether it started.
    pub fn start_configured(&mut self, now: Instant) -> bool {
        match self.interval {
            Some(interval) => {
                self.start(interval, now);
                true
            }
            None => false,
        }
    }

    /// Stop for good. Holds are kept, but nothing fires until `start` again.
    pub fn stop(&mut self) {
        self.running = false;
        self.deadline = None;
    }

    /// Suspend ticking on behalf of the host.
    pub fn pause(&mut self, now: Instant) {
        self.hold(Hold::HOST, now);
    }

    /// Undo [`pause`](Self::pause).
    pub fn resume(&mut self, now: Instant) {
        self.release(Hold::HOST, now);
    }

    /// Add a hold. Cancels the pending deadline.
    pub fn hold(&mut self, hold: Hold, now: Instant) {
        self.holds.insert(hold);
        self.reschedule(now);
    }

    /// Remove a hold. Releasing a flag that is not set changes nothing.
    pub fn release(&mut self, hold: Hold, now: Instant) {
        if !self.holds.intersects(hold) {
            return;
        }
        self.holds.remove(hold);
        self.reschedule(now);
    }

    /// Check the deadline. Returns `true` when an advance is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        let (Some(deadline), Some(interval)) = (self.deadline, self.interval) else {
            return false;
        };
        if now < deadline {
            return false;
        }
        let next = deadline + interval;
        self.deadline = Some(if next > now { next } else { now + interval });
        true
    }

    /// Time until the next fire, if one is scheduled.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// The pending deadline, if scheduled.
    #[inline]
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Configured interval.
    #[inline]
    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }

    /// Whether `start` has been called and `stop` has not.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a deadline is pending (running and not held).
    #[inline]
    #[must_use]
    pub fn is_scheduled(&self) -> bool {
        self.deadline.is_some()
    }

    /// Current holds.
    #[inline]
    #[must_use]
    pub fn holds(&self) -> Hold {
        self.holds
    }

    fn reschedule(&mut self, now: Instant) {
        if !self.running || !self.holds.is_empty() {
            self.deadline = None;
            return;
        }
        if self.deadline.is_none() {
            self.deadline = self.interval.map(|interval| now + interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEC_1: Duration = Duration::from_secs(1);
    const MS_500: Duration = Duration::from_millis(500);

    fn started(now: Instant) -> Autoplay {
        let mut ap = Autoplay::new(None);
        ap.start(SEC_1, now);
        ap
    }

    #[test]
    fn fires_once_per_interval() {
        let t = Instant::now();
        let mut ap = started(t);
        assert!(!ap.poll(t + MS_500));
        let fired = (1..=3).filter(|i| ap.poll(t + SEC_1 * *i)).count();
        assert_eq!(fired, 3);
    }

    #[test]
    fn same_instant_does_not_fire_twice() {
        let t = Instant::now();
        let mut ap = started(t);
        assert!(ap.poll(t + SEC_1));
        assert!(!ap.poll(t + SEC_1));
    }

    #[test]
    fn pause_before_tick_prevents_fire() {
        let t = Instant::now();
        let mut ap = started(t);
        ap.pause(t + MS_500);
        assert!(!ap.is_scheduled());
        assert!(!ap.poll(t + SEC_1));
        assert!(!ap.poll(t + SEC_1 * 5));
    }

    #[test]
    fn resume_schedules_full_interval() {
        let t = Instant::now();
        let mut ap = started(t);
        ap.pause(t + MS_500);
        ap.resume(t + SEC_1 * 2);
        assert_eq!(ap.deadline(), Some(t + SEC_1 * 3));
        assert!(!ap.poll(t + SEC_1 * 2 + MS_500));
        assert!(ap.poll(t + SEC_1 * 3));
        assert!(!ap.poll(t + SEC_1 * 3));
    }

    #[test]
    fn double_resume_does_not_reset_deadline() {
        let t = Instant::now();
        let mut ap = started(t);
        ap.pause(t);
        ap.resume(t);
        ap.resume(t + MS_500);
        assert_eq!(ap.deadline(), Some(t + SEC_1));
    }

    #[test]
    fn holds_are_independent() {
        let t = Instant::now();
        let mut ap = started(t);
        ap.hold(Hold::DRAG, t);
        ap.hold(Hold::HOVER, t);
        ap.release(Hold::DRAG, t + MS_500);
        assert!(!ap.is_scheduled(), "hover still holds");
        ap.release(Hold::HOVER, t + SEC_1);
        assert_eq!(ap.deadline(), Some(t + SEC_1 * 2));
    }

    #[test]
    fn missed_intervals_coalesce() {
        let t = Instant::now();
        let mut ap = started(t);
        assert!(ap.poll(t + SEC_1 * 10));
        assert!(!ap.poll(t + SEC_1 * 10 + MS_500));
        assert_eq!(ap.deadline(), Some(t + SEC_1 * 11));
    }

    #[test]
    fn stop_cancels_schedule() {
        let t = Instant::now();
        let mut ap = started(t);
        ap.stop();
        assert!(!ap.is_running());
        assert!(!ap.poll(t + SEC_1 * 2));
        ap.resume(t + SEC_1 * 3);
        assert!(!ap.is_scheduled());
    }

    #[test]
    fn zero_interval_never_schedules() {
        let t = Instant::now();
        let mut ap = Autoplay::new(Some(Duration::ZERO));
        assert!(!ap.start_configured(t));
        ap.start(Duration::ZERO, t);
        assert!(!ap.is_running());
        assert!(!ap.poll(t + SEC_1));
    }

    #[test]
    fn start_configured_uses_interval() {
        let t = Instant::now();
        let mut ap = Autoplay::new(Some(MS_500));
        assert!(ap.start_configured(t));
        assert_eq!(ap.time_until_next(t), Some(MS_500));
    }

    #[test]
    fn holds_before_start_apply() {
        let t = Instant::now();
        let mut ap = Autoplay::new(Some(SEC_1));
        ap.hold(Hold::HOVER, t);
        ap.start_configured(t);
        assert!(ap.is_running());
        assert!(!ap.is_scheduled());
        ap.release(Hold::HOVER, t + MS_500);
        assert!(ap.is_scheduled());
    }
}
