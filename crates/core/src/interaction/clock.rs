use std::time::Duration;

use camline_protocol::TimeOfDay;
use chrono::{NaiveTime, Timelike};

/// Source of the live wall-clock time shown while the timeline is idle.
pub trait Clock {
    fn now(&self) -> TimeOfDay;
}

/// Local wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeOfDay {
        let time = chrono::Local::now().time();
        TimeOfDay::from_seconds(time.num_seconds_from_midnight())
    }
}

/// A clock stuck at one time. Used by hosts that push time in from outside
/// (a browser) and by tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedClock(pub TimeOfDay);

impl Clock for FixedClock {
    fn now(&self) -> TimeOfDay {
        self.0
    }
}

/// Format a time for the clock readout and cursor badge: 12-hour,
/// zero-padded, lowercase meridiem (`01:34:37 am`).
pub fn format_clock(time: TimeOfDay) -> String {
    NaiveTime::from_num_seconds_from_midnight_opt(time.seconds_of_day(), 0)
        .map(|t| t.format("%I:%M:%S %P").to_string())
        .unwrap_or_default()
}

/// Schedule for the periodic live-clock refresh.
///
/// Times are host monotonic time, measured from any fixed origin (process
/// start, `performance.now()`). The host calls [`poll`](Self::poll) from its
/// event loop; the ticker says when a refresh is due. While suspended it
/// never fires. Resuming schedules the next refresh one full interval later,
/// so a time set by scrubbing stays readable for that long.
#[derive(Debug, Clone)]
pub struct ClockTicker {
    interval: Duration,
    next_due: Option<Duration>,
}

impl ClockTicker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Begin ticking; the first refresh is due immediately.
    pub fn start(&mut self, now: Duration) {
        self.next_due = Some(now);
    }

    pub fn suspend(&mut self) {
        if self.next_due.take().is_some() {
            log::trace!("clock ticker suspended");
        }
    }

    pub fn resume(&mut self, now: Duration) {
        self.next_due = Some(now + self.interval);
        log::trace!("clock ticker resumed");
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// When the next refresh is due, if running. Hosts use this to bound
    /// their input wait.
    pub fn next_due(&self) -> Option<Duration> {
        self.next_due
    }

    /// Whether a refresh is due at `now`. Missed ticks collapse into one.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let mut next = due + self.interval;
        if next <= now {
            next = now + self.interval;
        }
        self.next_due = Some(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn formats_twelve_hour_lowercase() {
        let t = |h, m, s| TimeOfDay::from_hms(h, m, s).unwrap();
        assert_eq!(format_clock(t(1, 34, 37)), "01:34:37 am");
        assert_eq!(format_clock(t(12, 0, 0)), "12:00:00 pm");
        assert_eq!(format_clock(t(0, 5, 0)), "12:05:00 am");
        assert_eq!(format_clock(t(23, 59, 59)), "11:59:59 pm");
    }

    #[test]
    fn fixed_clock_returns_its_time() {
        let t = TimeOfDay::from_hms(8, 30, 0).unwrap();
        assert_eq!(FixedClock(t).now(), t);
    }

    #[test]
    fn ticks_once_per_interval() {
        let t0 = Duration::from_secs(100);
        let mut ticker = ClockTicker::new(SECOND);
        assert!(!ticker.poll(t0));

        ticker.start(t0);
        assert!(ticker.poll(t0));
        assert!(!ticker.poll(t0 + Duration::from_millis(500)));
        assert!(ticker.poll(t0 + SECOND));
        assert!(!ticker.poll(t0 + Duration::from_millis(1999)));
        assert!(ticker.poll(t0 + 2 * SECOND));
    }

    #[test]
    fn suspend_stops_and_resume_restarts_after_one_interval() {
        let t0 = Duration::from_secs(100);
        let mut ticker = ClockTicker::new(SECOND);
        ticker.start(t0);
        assert!(ticker.poll(t0));

        ticker.suspend();
        assert!(!ticker.is_running());
        assert!(!ticker.poll(t0 + 5 * SECOND));

        ticker.resume(t0 + 5 * SECOND);
        assert!(!ticker.poll(t0 + Duration::from_millis(5500)));
        assert!(ticker.poll(t0 + 6 * SECOND));
    }

    #[test]
    fn missed_ticks_collapse() {
        let t0 = Duration::from_secs(100);
        let mut ticker = ClockTicker::new(SECOND);
        ticker.start(t0);
        assert!(ticker.poll(t0 + 10 * SECOND));
        assert!(!ticker.poll(t0 + Duration::from_millis(10_500)));
        assert_eq!(ticker.next_due(), Some(t0 + 11 * SECOND));
    }
}
