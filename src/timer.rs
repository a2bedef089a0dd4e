use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TimerError {
    #[error("timer period must be a positive number of seconds, got {0}")]
    InvalidPeriod(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// A timer that completed one or more whole periods during an `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub id: TimerId,
    pub count: u32,
}

struct Entry {
    id: TimerId,
    period: f32,
    elapsed: f32,
}

/// Repeating timers owned by one mounted page, driven by frame deltas.
pub struct Timers {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self { entries: Vec::new(), next_id: 0 }
    }

    pub fn start(&mut self, period: f32) -> Result<TimerId, TimerError> {
        if !period.is_finite() || period <= 0.0 {
            return Err(TimerError::InvalidPeriod(period));
        }
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, period, elapsed: 0.0 });
        Ok(id)
    }

    /// Returns `false` if the timer was already cancelled or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn active(&self) -> usize {
        self.entries.len()
    }

    pub fn advance(&mut self, dt: f32) -> Vec<Fired> {
        let mut fired = Vec::new();
        if !dt.is_finite() || dt <= 0.0 {
            return fired;
        }
        for entry in self.entries.iter_mut() {
            entry.elapsed += dt;
            if entry.elapsed < entry.period {
                continue;
            }
            // A long frame may cover several periods; keep the remainder.
            let remainder = entry.elapsed % entry.period;
            let count = ((entry.elapsed - remainder) / entry.period).round() as u32;
            entry.elapsed = remainder;
            if count > 0 {
                fired.push(Fired { id: entry.id, count });
            }
        }
        fired
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_period() {
        let mut timers = Timers::new();
        assert_eq!(timers.start(0.0), Err(TimerError::InvalidPeriod(0.0)));
        assert!(timers.start(-1.0).is_err());
        assert!(timers.start(f32::NAN).is_err());
        assert_eq!(timers.active(), 0);
    }

    #[test]
    fn fires_once_per_whole_period_across_uneven_frames() {
        let mut timers = Timers::new();
        let id = timers.start(1.0).expect("timer");

        assert!(timers.advance(0.5).is_empty());
        assert_eq!(timers.advance(0.75), vec![Fired { id, count: 1 }]);
        assert!(timers.advance(0.5).is_empty());
        assert_eq!(timers.advance(0.25), vec![Fired { id, count: 1 }]);
    }

    #[test]
    fn long_frame_reports_every_missed_period() {
        let mut timers = Timers::new();
        let id = timers.start(0.5).expect("timer");
        assert_eq!(timers.advance(1.75), vec![Fired { id, count: 3 }]);
        assert_eq!(timers.advance(0.25), vec![Fired { id, count: 1 }]);
    }

    #[test]
    fn timers_are_independent() {
        let mut timers = Timers::new();
        let fast = timers.start(1.0).expect("fast");
        let slow = timers.start(4.0).expect("slow");

        let mut fast_total = 0;
        let mut slow_total = 0;
        for _ in 0..8 {
            for fired in timers.advance(0.5) {
                if fired.id == fast {
                    fast_total += fired.count;
                } else if fired.id == slow {
                    slow_total += fired.count;
                }
            }
        }
        assert_eq!(fast_total, 4);
        assert_eq!(slow_total, 1);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut timers = Timers::new();
        let id = timers.start(1.0).expect("timer");
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert_eq!(timers.active(), 0);
        assert!(timers.advance(5.0).is_empty());
    }

    #[test]
    fn huge_frame_fires_in_one_step() {
        let mut timers = Timers::new();
        let id = timers.start(3.0).expect("timer");
        let fired = timers.advance(1.0e8);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, id);
        assert!(fired[0].count > 33_000_000);

        // Only the remainder of 1e8 / 3 carries over.
        assert_eq!(timers.advance(2.5), vec![Fired { id, count: 1 }]);
    }
}
