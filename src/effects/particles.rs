//! Hover particles for a single card.

use rand::rngs::SmallRng;
use rand::Rng;

use super::cancel::{TimerId, TimerQueue};
use super::color::GlowColor;
use super::ease::Ease;
use super::geometry::{Point, Size};
use super::tween::{AnimatedValue, Millis, Tween};

pub const STAGGER_MS: Millis = 100.0;
pub const ENTER_MS: Millis = 300.0;
pub const EXIT_MS: Millis = 300.0;
pub const DRIFT_SPAN_PX: f64 = 100.0;
pub const DRIFT_MIN_MS: Millis = 2_000.0;
pub const DRIFT_SPREAD_MS: Millis = 2_000.0;
pub const PULSE_OPACITY: f64 = 0.3;
pub const PULSE_MS: Millis = 1_500.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(u64);

impl ParticleId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticlePhase {
    Entering,
    Alive,
    Leaving,
}

#[derive(Clone, Debug)]
pub struct Particle {
    id: ParticleId,
    origin: Point,
    phase: ParticlePhase,
    born_at: Millis,
    drift_x: Tween,
    drift_y: Tween,
    rotation: Tween,
    scale: AnimatedValue,
    opacity: AnimatedValue,
}

/// What a particle looks like at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleFrame {
    pub left: f64,
    pub top: f64,
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotation: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl ParticleFrame {
    pub fn style(&self, color: GlowColor) -> String {
        format!(
            "left: {:.1}px; top: {:.1}px; transform: translate({:.2}px, {:.2}px) rotate({:.1}deg) scale({:.3}); opacity: {:.3}; background: {}; box-shadow: 0 0 6px {};",
            self.left,
            self.top,
            self.translate_x,
            self.translate_y,
            self.rotation,
            self.scale,
            self.opacity,
            color.rgba(1.0),
            color.rgba(0.6),
        )
    }
}

impl Particle {
    fn spawn(id: ParticleId, origin: Point, now: Millis, rng: &mut SmallRng) -> Self {
        let drift_ms = DRIFT_MIN_MS + rng.gen::<f64>() * DRIFT_SPREAD_MS;
        let offset_x = (rng.gen::<f64>() - 0.5) * DRIFT_SPAN_PX;
        let offset_y = (rng.gen::<f64>() - 0.5) * DRIFT_SPAN_PX;
        let turn = rng.gen::<f64>() * 360.0;

        let mut scale = AnimatedValue::new(0.0);
        scale.animate_to(now, 1.0, ENTER_MS, Ease::back_out());
        let mut opacity = AnimatedValue::new(0.0);
        opacity.animate_to(now, 1.0, ENTER_MS, Ease::back_out());

        Self {
            id,
            origin,
            phase: ParticlePhase::Entering,
            born_at: now,
            drift_x: Tween::new(0.0, offset_x, now, drift_ms, Ease::Linear).yoyo(),
            drift_y: Tween::new(0.0, offset_y, now, drift_ms, Ease::Linear).yoyo(),
            rotation: Tween::new(0.0, turn, now, drift_ms, Ease::Linear).yoyo(),
            scale,
            opacity,
        }
    }

    pub fn id(&self) -> ParticleId {
        self.id
    }

    #[cfg(test)]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[cfg(test)]
    pub fn phase(&self) -> ParticlePhase {
        self.phase
    }

    pub fn sample(&self, now: Millis) -> ParticleFrame {
        ParticleFrame {
            left: self.origin.x,
            top: self.origin.y,
            translate_x: self.drift_x.value_at(now),
            translate_y: self.drift_y.value_at(now),
            rotation: self.rotation.value_at(now),
            scale: self.scale.sample(now),
            opacity: self.opacity.sample(now),
        }
    }

    fn advance(&mut self, now: Millis) {
        if self.phase == ParticlePhase::Entering && now >= self.born_at + ENTER_MS {
            let entered_at = self.born_at + ENTER_MS;
            self.phase = ParticlePhase::Alive;
            self.scale.settle(now);
            self.opacity.set(1.0);
            self.opacity
                .pulse(entered_at, PULSE_OPACITY, PULSE_MS, Ease::Power2InOut);
        }
    }

    fn begin_exit(&mut self, now: Millis) {
        self.phase = ParticlePhase::Leaving;
        self.scale.animate_to(now, 0.0, EXIT_MS, Ease::back_in());
        self.opacity.animate_to(now, 0.0, EXIT_MS, Ease::back_in());
    }

    fn exit_finished(&self, now: Millis) -> bool {
        self.phase == ParticlePhase::Leaving
            && !self.scale.is_animating(now)
            && !self.opacity.is_animating(now)
    }
}

/// Owns every particle a card spawns. Particles never outlive the emitter
/// and there are never more than `particle_count` of them.
#[derive(Clone, Debug)]
pub struct ParticleEmitter {
    particle_count: usize,
    templates: Vec<Point>,
    template_size: Option<Size>,
    hovered: bool,
    spawns: TimerQueue<usize>,
    particles: Vec<Particle>,
    next_id: u64,
    rng: SmallRng,
}

impl ParticleEmitter {
    pub fn new(particle_count: usize, rng: SmallRng) -> Self {
        Self {
            particle_count,
            templates: Vec::new(),
            template_size: None,
            hovered: false,
            spawns: TimerQueue::new(),
            particles: Vec::new(),
            next_id: 1,
            rng,
        }
    }

    #[cfg(test)]
    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    #[cfg(test)]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    fn ensure_templates(&mut self, size: Size) {
        if self.template_size == Some(size) && self.templates.len() == self.particle_count {
            return;
        }

        let rng = &mut self.rng;
        self.templates = (0..self.particle_count)
            .map(|_| Point::new(rng.gen::<f64>() * size.width, rng.gen::<f64>() * size.height))
            .collect();
        self.template_size = Some(size);
    }

    /// Schedules the staggered entrance and returns the timers so the card
    /// can cancel them. Repeated enters without an exit schedule nothing.
    pub fn hover_enter(&mut self, now: Millis, size: Size) -> Vec<TimerId> {
        if self.hovered {
            return Vec::new();
        }
        self.hovered = true;

        let leaving = self.particles.len();
        self.particles
            .retain(|particle| particle.phase != ParticlePhase::Leaving);
        let finished_early = leaving - self.particles.len();
        if finished_early > 0 {
            log::debug!("finished {finished_early} leaving particles early on re-enter");
        }

        self.ensure_templates(size);
        (0..self.templates.len())
            .map(|index| {
                self.spawns
                    .schedule(now + index as f64 * STAGGER_MS, index)
            })
            .collect()
    }

    pub fn cancel_spawn(&mut self, id: TimerId) -> bool {
        self.spawns.cancel(id)
    }

    /// Starts the exit animation on every particle still on screen.
    pub fn hover_exit(&mut self, now: Millis) {
        self.hovered = false;
        for particle in &mut self.particles {
            if particle.phase != ParticlePhase::Leaving {
                particle.begin_exit(now);
            }
        }
    }

    pub fn tick(&mut self, now: Millis) {
        for index in self.spawns.drain_due(now) {
            if !self.hovered || self.particles.len() >= self.particle_count {
                continue;
            }
            let Some(origin) = self.templates.get(index).copied() else {
                continue;
            };

            let id = ParticleId(self.next_id);
            self.next_id += 1;
            self.particles
                .push(Particle::spawn(id, origin, now, &mut self.rng));
        }

        for particle in &mut self.particles {
            particle.advance(now);
        }
        self.particles
            .retain(|particle| !particle.exit_finished(now));
    }

    /// Unmount: everything goes at once.
    pub fn teardown(&mut self) {
        self.hovered = false;
        self.spawns.clear();
        self.particles.clear();
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub fn pending_spawns(&self) -> usize {
        self.spawns.len()
    }

    pub fn is_animating(&self) -> bool {
        !self.particles.is_empty() || !self.spawns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const CARD: Size = Size::new(320.0, 200.0);

    fn emitter(count: usize) -> ParticleEmitter {
        ParticleEmitter::new(count, SmallRng::seed_from_u64(7))
    }

    fn run_until(emitter: &mut ParticleEmitter, from: Millis, to: Millis) {
        let mut now = from;
        while now <= to {
            emitter.tick(now);
            now += 10.0;
        }
    }

    #[test]
    fn staggered_entrance_reaches_full_count() {
        let mut emitter = emitter(12);
        let timers = emitter.hover_enter(0.0, CARD);
        assert_eq!(timers.len(), 12);

        emitter.tick(0.0);
        assert_eq!(emitter.particles().len(), 1);
        emitter.tick(450.0);
        assert_eq!(emitter.particles().len(), 5);

        run_until(&mut emitter, 460.0, 11.0 * STAGGER_MS + ENTER_MS + 10.0);
        assert_eq!(emitter.particles().len(), 12);
        assert_eq!(emitter.pending_spawns(), 0);
        assert!(emitter
            .particles()
            .iter()
            .all(|particle| particle.phase() == ParticlePhase::Alive));
    }

    #[test]
    fn templates_fall_inside_the_card() {
        let mut emitter = emitter(24);
        emitter.hover_enter(0.0, CARD);
        emitter.tick(10_000.0);

        for particle in emitter.particles() {
            let origin = particle.origin();
            assert!((0.0..CARD.width).contains(&origin.x));
            assert!((0.0..CARD.height).contains(&origin.y));
        }
    }

    #[test]
    fn exit_animates_out_then_removes_everything() {
        let mut emitter = emitter(6);
        emitter.hover_enter(0.0, CARD);
        run_until(&mut emitter, 0.0, 1_000.0);
        assert_eq!(emitter.particles().len(), 6);

        emitter.hover_exit(1_000.0);
        emitter.tick(1_100.0);
        assert_eq!(emitter.particles().len(), 6);
        assert!(emitter
            .particles()
            .iter()
            .all(|particle| particle.phase() == ParticlePhase::Leaving));

        emitter.tick(1_000.0 + EXIT_MS);
        assert!(emitter.particles().is_empty());
        assert!(!emitter.is_animating());
    }

    #[test]
    fn spawns_due_after_exit_are_dropped() {
        let mut emitter = emitter(4);
        emitter.hover_enter(0.0, CARD);
        emitter.tick(0.0);
        emitter.hover_exit(50.0);

        emitter.tick(500.0);
        assert!(emitter.particles().is_empty());
        assert_eq!(emitter.pending_spawns(), 0);
    }

    #[test]
    fn re_enter_finishes_leaving_particles_first() {
        let mut emitter = emitter(3);
        emitter.hover_enter(0.0, CARD);
        run_until(&mut emitter, 0.0, 600.0);
        emitter.hover_exit(600.0);
        emitter.tick(650.0);
        assert_eq!(emitter.particles().len(), 3);

        emitter.hover_enter(700.0, CARD);
        assert!(emitter.particles().is_empty());
        emitter.tick(700.0);
        assert_eq!(emitter.particles().len(), 1);
    }

    #[test]
    fn repeated_enter_without_exit_schedules_nothing() {
        let mut emitter = emitter(5);
        assert_eq!(emitter.hover_enter(0.0, CARD).len(), 5);
        assert!(emitter.hover_enter(10.0, CARD).is_empty());
        assert_eq!(emitter.pending_spawns(), 5);
    }

    #[test]
    fn alive_particles_pulse_between_full_and_dim() {
        let mut emitter = emitter(1);
        emitter.hover_enter(0.0, CARD);
        emitter.tick(0.0);
        emitter.tick(ENTER_MS);

        let particle = &emitter.particles()[0];
        assert_eq!(particle.phase(), ParticlePhase::Alive);
        assert!((particle.sample(ENTER_MS).opacity - 1.0).abs() < 1e-9);
        assert!((particle.sample(ENTER_MS + PULSE_MS).opacity - PULSE_OPACITY).abs() < 1e-9);
        assert!((particle.sample(ENTER_MS + 2.0 * PULSE_MS).opacity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn drift_stays_within_fifty_pixels() {
        let mut emitter = emitter(12);
        emitter.hover_enter(0.0, CARD);
        run_until(&mut emitter, 0.0, 2_000.0);

        for particle in emitter.particles() {
            for step in 0..80 {
                let frame = particle.sample(f64::from(step) * 100.0);
                assert!(frame.translate_x.abs() <= DRIFT_SPAN_PX / 2.0);
                assert!(frame.translate_y.abs() <= DRIFT_SPAN_PX / 2.0);
            }
        }
    }

    #[test]
    fn teardown_clears_particles_and_timers() {
        let mut emitter = emitter(8);
        emitter.hover_enter(0.0, CARD);
        emitter.tick(250.0);
        emitter.teardown();

        assert!(emitter.particles().is_empty());
        assert_eq!(emitter.pending_spawns(), 0);
        assert!(!emitter.is_hovered());
    }

    #[test]
    fn zero_sized_card_still_spawns_at_origin() {
        let mut emitter = emitter(2);
        emitter.hover_enter(0.0, Size::new(0.0, 0.0));
        emitter.tick(100.0);

        assert!(emitter
            .particles()
            .iter()
            .all(|particle| particle.origin() == Point::new(0.0, 0.0)));
    }
}
