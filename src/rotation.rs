use thiserror::Error;
use tracing::debug;
use crate::timer::{TimerError, TimerId, Timers};

#[derive(Debug, Error, PartialEq)]
pub enum RotationError {
    #[error("rotation needs at least one item")]
    Empty,
    #[error("rotation period must be a positive number of seconds, got {0}")]
    InvalidPeriod(f32),
    #[error(transparent)]
    Timer(#[from] TimerError),
}

/// A fixed, non-empty list of items shown one at a time.
#[derive(Debug, Clone)]
pub struct RotationSet<T> {
    items: Vec<T>,
    period: f32,
    advances: u64,
}

impl<T> RotationSet<T> {
    pub fn new(items: Vec<T>, period: f32) -> Result<Self, RotationError> {
        if items.is_empty() {
            return Err(RotationError::Empty);
        }
        if !period.is_finite() || period <= 0.0 {
            return Err(RotationError::InvalidPeriod(period));
        }
        Ok(Self { items, period, advances: 0 })
    }

    /// Moves forward by `steps` items, wrapping around the end.
    pub fn advance(&mut self, steps: u64) {
        self.advances = self.advances.wrapping_add(steps);
    }

    pub fn index(&self) -> usize {
        (self.advances % self.items.len() as u64) as usize
    }

    pub fn current(&self) -> &T {
        &self.items[self.index()]
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn period(&self) -> f32 {
        self.period
    }
}

#[cfg(test)]
impl<T> RotationSet<T> {
    /// Skips period validation so timer start failures can be exercised.
    pub(crate) fn unchecked(items: Vec<T>, period: f32) -> Self {
        Self { items, period, advances: 0 }
    }
}

/// A rotation bound to a repeating timer for as long as it is mounted.
pub struct Rotator<T> {
    name: &'static str,
    set: RotationSet<T>,
    timer: Option<TimerId>,
    since_advance: f32,
    previous: usize,
}

impl<T> Rotator<T> {
    pub fn new(name: &'static str, set: RotationSet<T>) -> Self {
        Self { name, set, timer: None, since_advance: f32::INFINITY, previous: 0 }
    }

    pub fn mount(&mut self, timers: &mut Timers) -> Result<(), RotationError> {
        if self.timer.is_none() {
            self.timer = Some(timers.start(self.set.period())?);
            debug!(rotator = self.name, period = self.set.period(), "rotation timer started");
        }
        Ok(())
    }

    /// Releases the timer. Returns `false` when there was nothing to release.
    pub fn unmount(&mut self, timers: &mut Timers) -> bool {
        match self.timer.take() {
            Some(id) => {
                let released = timers.cancel(id);
                debug!(rotator = self.name, released, "rotation timer cancelled");
                released
            }
            None => false,
        }
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Applies `count` timer periods at once.
    pub fn on_fired(&mut self, count: u32) {
        if count == 0 {
            return;
        }
        let before = self.set.index();
        self.set.advance(u64::from(count));
        if self.set.index() != before {
            self.previous = before;
            self.since_advance = 0.0;
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.since_advance += dt;
    }

    pub fn set(&self) -> &RotationSet<T> {
        &self.set
    }

    pub fn current(&self) -> &T {
        self.set.current()
    }

    /// Index shown before the last visible change, for cross-fading.
    pub fn previous_index(&self) -> usize {
        self.previous
    }

    pub fn since_advance(&self) -> f32 {
        self.since_advance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_is_ticks_modulo_length() {
        let mut set = RotationSet::new(vec!["A", "B", "C"], 3.0).expect("set");
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push((set.index(), *set.current()));
            set.advance(1);
        }
        assert_eq!(seen, vec![(0, "A"), (1, "B"), (2, "C"), (0, "A"), (1, "B")]);
    }

    #[test]
    fn single_item_never_moves() {
        let mut set = RotationSet::new(vec!["only"], 4.0).expect("set");
        for _ in 0..10 {
            set.advance(1);
            assert_eq!(set.index(), 0);
            assert_eq!(*set.current(), "only");
        }
        set.advance(u64::from(u32::MAX));
        assert_eq!(*set.current(), "only");
    }

    #[test]
    fn large_advance_lands_on_the_same_item_as_single_steps() {
        let mut stepped = RotationSet::new(vec!["A", "B", "C"], 3.0).expect("set");
        let mut jumped = stepped.clone();
        for _ in 0..1000 {
            stepped.advance(1);
        }
        jumped.advance(1000);
        assert_eq!(stepped.current(), jumped.current());
        assert_eq!(*jumped.current(), "B");
    }

    #[test]
    fn rejects_empty_sequence_and_bad_period() {
        assert_eq!(RotationSet::<&str>::new(vec![], 3.0).unwrap_err(), RotationError::Empty);
        assert_eq!(
            RotationSet::new(vec![1], 0.0).unwrap_err(),
            RotationError::InvalidPeriod(0.0)
        );
    }

    #[test]
    fn rotator_follows_its_timer() {
        let mut timers = Timers::new();
        let set = RotationSet::new(vec!["A", "B", "C"], 3.0).expect("set");
        let mut rotator = Rotator::new("roles", set);
        rotator.mount(&mut timers).expect("mount");
        let id = rotator.timer().expect("timer");

        for fired in timers.advance(7.0) {
            assert_eq!(fired.id, id);
            rotator.on_fired(fired.count);
        }
        assert_eq!(*rotator.current(), "C");
        assert_eq!(rotator.previous_index(), 0);
        assert_eq!(rotator.since_advance(), 0.0);
    }

    #[test]
    fn mounting_twice_keeps_one_timer() {
        let mut timers = Timers::new();
        let mut rotator = Rotator::new("photos", RotationSet::new(vec![0, 1], 4.0).expect("set"));
        rotator.mount(&mut timers).expect("mount");
        rotator.mount(&mut timers).expect("mount again");
        assert_eq!(timers.active(), 1);
    }

    #[test]
    fn unmount_twice_releases_once() {
        let mut timers = Timers::new();
        let mut rotator = Rotator::new("roles", RotationSet::new(vec!["A", "B"], 3.0).expect("set"));
        rotator.mount(&mut timers).expect("mount");
        assert!(rotator.unmount(&mut timers));
        assert!(!rotator.unmount(&mut timers));
        assert_eq!(rotator.timer(), None);
        assert_eq!(timers.active(), 0);
    }
}
