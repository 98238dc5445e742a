//! Time-sampled tweens.
//!
//! Nothing here owns a clock. Callers pass a millisecond timestamp (the
//! browser's `performance.now()` in the page, a plain counter in tests) and
//! every value is a pure function of that timestamp.

use super::ease::Ease;

/// Milliseconds on the caller's clock.
pub type Millis = f64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Once,
    /// Plays forward, then backward, forever.
    YoyoForever,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f64,
    pub to: f64,
    pub start: Millis,
    pub duration: Millis,
    pub ease: Ease,
    pub repeat: Repeat,
}

impl Tween {
    pub fn new(from: f64, to: f64, start: Millis, duration: Millis, ease: Ease) -> Self {
        Self {
            from,
            to,
            start,
            duration,
            ease,
            repeat: Repeat::Once,
        }
    }

    pub fn yoyo(mut self) -> Self {
        self.repeat = Repeat::YoyoForever;
        self
    }

    pub fn end(&self) -> Millis {
        self.start + self.duration
    }

    fn progress(&self, now: Millis) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }

        let elapsed = (now - self.start).max(0.0) / self.duration;
        match self.repeat {
            Repeat::Once => elapsed.min(1.0),
            Repeat::YoyoForever => {
                let cycle = elapsed % 2.0;
                if cycle <= 1.0 {
                    cycle
                } else {
                    2.0 - cycle
                }
            }
        }
    }

    pub fn value_at(&self, now: Millis) -> f64 {
        if self.is_finished(now) {
            return self.to;
        }

        let eased = self.ease.apply(self.progress(now));
        self.from + (self.to - self.from) * eased
    }

    pub fn is_finished(&self, now: Millis) -> bool {
        self.repeat == Repeat::Once && now >= self.end()
    }
}

/// A single animatable property.
///
/// The newest `animate_to` always wins: it starts from whatever the property
/// shows at that instant, so superseding tweens never jump.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimatedValue {
    rest: f64,
    tween: Option<Tween>,
}

impl AnimatedValue {
    pub const fn new(value: f64) -> Self {
        Self {
            rest: value,
            tween: None,
        }
    }

    pub fn sample(&self, now: Millis) -> f64 {
        self.tween
            .map(|tween| tween.value_at(now))
            .unwrap_or(self.rest)
    }

    pub fn animate_to(&mut self, now: Millis, target: f64, duration: Millis, ease: Ease) {
        let from = self.sample(now);
        self.rest = target;
        self.tween = Some(Tween::new(from, target, now, duration, ease));
    }

    /// Oscillates between the current value and `target` starting at `start`.
    pub fn pulse(&mut self, start: Millis, target: f64, duration: Millis, ease: Ease) {
        let from = self.sample(start);
        self.rest = from;
        self.tween = Some(Tween::new(from, target, start, duration, ease).yoyo());
    }

    /// Stops in place.
    pub fn kill(&mut self, now: Millis) {
        self.rest = self.sample(now);
        self.tween = None;
    }

    pub fn set(&mut self, value: f64) {
        self.rest = value;
        self.tween = None;
    }

    /// Drops a finished one-shot tween so later samples skip it.
    pub fn settle(&mut self, now: Millis) {
        if let Some(tween) = self.tween {
            if tween.is_finished(now) {
                self.rest = tween.to;
                self.tween = None;
            }
        }
    }

    pub fn is_animating(&self, now: Millis) -> bool {
        self.tween.is_some_and(|tween| !tween.is_finished(now))
    }

    /// Where the property ends up once its current one-shot tween finishes.
    #[cfg(test)]
    pub fn target(&self) -> f64 {
        match self.tween {
            Some(tween) if tween.repeat == Repeat::Once => tween.to,
            _ => self.rest,
        }
    }
}

impl Default for AnimatedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}
