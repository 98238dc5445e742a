//! Everything one bento card animates, behind one owner.

use rand::rngs::SmallRng;

use super::cancel::{CancelBag, Disposable, TweenSlot};
use super::color::GlowColor;
use super::geometry::{Point, Size};
use super::motion::{CardMotion, CardTransform, Ripple};
use super::particles::{Particle, ParticleEmitter};
use super::tween::Millis;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardConfig {
    pub particle_count: usize,
    pub glow_color: GlowColor,
    pub enable_tilt: bool,
    pub enable_magnetism: bool,
    pub click_effect: bool,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            particle_count: 12,
            glow_color: GlowColor::default(),
            enable_tilt: false,
            enable_magnetism: false,
            click_effect: true,
        }
    }
}

/// Per-card effect state. Handlers feed pointer events in card-local
/// coordinates; `tick` advances time; `teardown` is the unmount path.
#[derive(Clone, Debug)]
pub struct CardEffects {
    config: CardConfig,
    emitter: ParticleEmitter,
    motion: CardMotion,
    ripples: Vec<Ripple>,
    cancel_bag: CancelBag,
    next_ripple: u64,
}

impl CardEffects {
    pub fn new(config: CardConfig, rng: SmallRng) -> Self {
        Self {
            emitter: ParticleEmitter::new(config.particle_count, rng),
            config,
            motion: CardMotion::new(),
            ripples: Vec::new(),
            cancel_bag: CancelBag::new(),
            next_ripple: 1,
        }
    }

    #[cfg(test)]
    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    pub fn pointer_enter(&mut self, now: Millis, size: Size) {
        for timer in self.emitter.hover_enter(now, size) {
            self.cancel_bag.track(Disposable::Timer(timer));
        }

        if self.config.enable_tilt {
            self.motion.tilt_in(now);
        }
    }

    pub fn pointer_move(&mut self, now: Millis, local: Point, size: Size) {
        if self.config.enable_tilt {
            self.motion.tilt_toward(now, local, size);
        }

        if self.config.enable_magnetism {
            self.motion.attract_toward(now, local, size);
            self.cancel_bag
                .track(Disposable::Tween(TweenSlot::Magnetism));
        }
    }

    pub fn pointer_leave(&mut self, now: Millis) {
        self.drain_cancel_bag(now);
        self.emitter.hover_exit(now);

        if self.config.enable_tilt || self.config.enable_magnetism {
            self.motion.settle(now);
        }
    }

    pub fn click(&mut self, now: Millis, local: Point, size: Size) {
        if !self.config.click_effect {
            return;
        }

        let id = self.next_ripple;
        self.next_ripple += 1;
        self.ripples.push(Ripple::new(id, now, local, size));
    }

    fn drain_cancel_bag(&mut self, now: Millis) {
        for item in self.cancel_bag.drain() {
            match item {
                Disposable::Timer(timer) => {
                    self.emitter.cancel_spawn(timer);
                }
                Disposable::Tween(TweenSlot::Magnetism) => self.motion.kill_magnetism(now),
            }
        }
    }

    pub fn tick(&mut self, now: Millis) {
        self.emitter.tick(now);
        self.ripples.retain(|ripple| !ripple.is_finished(now));
    }

    /// Unmount. Nothing this card started survives it.
    pub fn teardown(&mut self) {
        self.cancel_bag.drain().for_each(drop);
        self.emitter.teardown();
        self.ripples.clear();
        self.motion.reset();
    }

    pub fn particles(&self) -> &[Particle] {
        self.emitter.particles()
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn transform(&self, now: Millis) -> CardTransform {
        self.motion.transform(now)
    }

    #[cfg(test)]
    pub fn pending_timers(&self) -> usize {
        self.emitter.pending_spawns()
    }

    #[cfg(test)]
    pub fn tracked_disposables(&self) -> usize {
        self.cancel_bag.len()
    }

    pub fn is_animating(&self, now: Millis) -> bool {
        self.emitter.is_animating() || !self.ripples.is_empty() || self.motion.is_animating(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::motion::RIPPLE_MS;
    use crate::effects::particles::{ENTER_MS, EXIT_MS, STAGGER_MS};
    use rand::SeedableRng;

    const SIZE: Size = Size::new(400.0, 240.0);

    fn card(config: CardConfig) -> CardEffects {
        CardEffects::new(config, SmallRng::seed_from_u64(42))
    }

    struct VirtualClock {
        now: Millis,
    }

    impl VirtualClock {
        fn advance(&mut self, card: &mut CardEffects, by: Millis) -> usize {
            let target = self.now + by;
            let mut peak = card.particles().len();
            while self.now < target {
                self.now = (self.now + 5.0).min(target);
                card.tick(self.now);
                peak = peak.max(card.particles().len());
            }
            peak
        }
    }

    #[test]
    fn hover_fills_card_then_exit_empties_it() {
        let n = CardConfig::default().particle_count;
        let mut card = card(CardConfig::default());
        let mut clock = VirtualClock { now: 0.0 };

        card.pointer_enter(clock.now, SIZE);
        card.tick(clock.now);
        clock.advance(&mut card, (n as f64 - 1.0) * STAGGER_MS + ENTER_MS + 1.0);
        assert_eq!(card.particles().len(), n);

        card.pointer_leave(clock.now);
        assert_eq!(card.tracked_disposables(), 0);
        clock.advance(&mut card, EXIT_MS);
        assert!(card.particles().is_empty());
        assert_eq!(card.pending_timers(), 0);
        assert!(!card.is_animating(clock.now));
    }

    #[test]
    fn leaving_before_the_stagger_cancels_pending_spawns() {
        let mut card = card(CardConfig::default());
        card.pointer_enter(0.0, SIZE);
        card.tick(0.0);
        card.tick(150.0);
        assert_eq!(card.particles().len(), 2);

        card.pointer_leave(160.0);
        assert_eq!(card.pending_timers(), 0);

        card.tick(5_000.0);
        assert!(card.particles().is_empty());
    }

    #[test]
    fn rapid_hover_cycles_never_exceed_the_particle_count() {
        let config = CardConfig {
            particle_count: 6,
            ..CardConfig::default()
        };
        let mut card = card(config);
        let mut clock = VirtualClock { now: 0.0 };
        let mut peak = 0;

        for _ in 0..25 {
            card.pointer_enter(clock.now, SIZE);
            peak = peak.max(clock.advance(&mut card, 40.0));
            card.pointer_leave(clock.now);
            peak = peak.max(clock.advance(&mut card, 30.0));
            assert_eq!(card.pending_timers(), 0);
        }

        card.pointer_enter(clock.now, SIZE);
        peak = peak.max(clock.advance(&mut card, 5.0 * STAGGER_MS + ENTER_MS + 10.0));

        assert!(peak <= 6, "peak {peak}");
        assert_eq!(card.particles().len(), 6);
        assert_eq!(card.pending_timers(), 0);
    }

    #[test]
    fn magnetism_is_tracked_once_and_killed_on_exit() {
        let config = CardConfig {
            enable_magnetism: true,
            ..CardConfig::default()
        };
        let mut card = card(config);
        card.pointer_enter(0.0, SIZE);
        let spawn_timers = card.tracked_disposables();

        card.pointer_move(10.0, Point::new(400.0, 240.0), SIZE);
        card.pointer_move(20.0, Point::new(390.0, 230.0), SIZE);
        assert_eq!(card.tracked_disposables(), spawn_timers + 1);

        card.pointer_leave(100.0);
        assert_eq!(card.tracked_disposables(), 0);
        let settled = card.transform(100.0 + 300.0);
        assert!(settled.is_identity());
    }

    #[test]
    fn tilt_only_when_enabled() {
        let mut plain = card(CardConfig::default());
        plain.pointer_enter(0.0, SIZE);
        plain.pointer_move(10.0, Point::new(0.0, 0.0), SIZE);
        assert!(plain.transform(500.0).is_identity());

        let mut tilted = card(CardConfig {
            enable_tilt: true,
            ..CardConfig::default()
        });
        tilted.pointer_enter(0.0, SIZE);
        tilted.pointer_move(10.0, Point::new(0.0, 0.0), SIZE);
        let transform = tilted.transform(500.0);
        assert_eq!(transform.rotate_x, 10.0);
        assert_eq!(transform.rotate_y, -10.0);
    }

    #[test]
    fn click_ripples_remove_themselves() {
        let mut card = card(CardConfig::default());
        card.click(0.0, Point::new(10.0, 10.0), SIZE);
        card.click(100.0, Point::new(200.0, 120.0), SIZE);
        assert_eq!(card.ripples().len(), 2);

        card.tick(RIPPLE_MS);
        assert_eq!(card.ripples().len(), 1);
        card.tick(100.0 + RIPPLE_MS);
        assert!(card.ripples().is_empty());
    }

    #[test]
    fn click_effect_can_be_disabled() {
        let mut card = card(CardConfig {
            click_effect: false,
            ..CardConfig::default()
        });
        card.click(0.0, Point::new(10.0, 10.0), SIZE);
        assert!(card.ripples().is_empty());
    }

    #[test]
    fn teardown_leaves_nothing_behind() {
        let mut card = card(CardConfig {
            enable_magnetism: true,
            ..CardConfig::default()
        });
        card.pointer_enter(0.0, SIZE);
        card.pointer_move(5.0, Point::new(0.0, 0.0), SIZE);
        card.click(10.0, Point::new(0.0, 0.0), SIZE);
        card.tick(300.0);

        card.teardown();
        assert!(card.particles().is_empty());
        assert!(card.ripples().is_empty());
        assert_eq!(card.pending_timers(), 0);
        assert_eq!(card.tracked_disposables(), 0);
        assert!(!card.is_animating(300.0));
    }
}
