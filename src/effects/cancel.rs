//! Virtual timers and the per-card cancel bag.

use super::tween::Millis;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Clone, Debug)]
struct Timer<T> {
    id: TimerId,
    due: Millis,
    payload: T,
}

/// `setTimeout` on the caller's clock. Due timers fire from `drain_due` in
/// due order; ties keep scheduling order.
#[derive(Clone, Debug)]
pub struct TimerQueue<T> {
    timers: Vec<Timer<T>>,
    next_id: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 1,
        }
    }

    pub fn schedule(&mut self, due: Millis, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer { id, due, payload });
        id
    }

    /// Returns `false` when the timer already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        self.timers.len() != before
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn drain_due(&mut self, now: Millis) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|timer| timer.due <= now);
        self.timers = pending;

        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)));
        due.into_iter().map(|timer| timer.payload).collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tweens that outlive a single handler call and must be stopped on exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenSlot {
    Magnetism,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposable {
    Timer(TimerId),
    Tween(TweenSlot),
}

/// Everything a card started that has to be undone when the pointer leaves
/// or the card unmounts.
#[derive(Clone, Debug, Default)]
pub struct CancelBag {
    items: Vec<Disposable>,
}

impl CancelBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracking the same disposable twice is a no-op.
    pub fn track(&mut self, item: Disposable) {
        if !self.items.contains(&item) {
            self.items.push(item);
        }
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Disposable> {
        self.items.drain(..)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
