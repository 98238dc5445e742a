//! Tilt, magnetism and click ripples for a card.

use super::color::GlowColor;
use super::ease::Ease;
use super::geometry::{Point, Size};
use super::tween::{AnimatedValue, Millis};

pub const MAX_TILT_DEG: f64 = 10.0;
pub const ENTER_TILT_DEG: f64 = 5.0;
pub const MAGNET_STRENGTH: f64 = 0.05;
pub const TILT_MS: Millis = 100.0;
pub const MAGNET_MS: Millis = 300.0;
pub const SETTLE_MS: Millis = 300.0;
pub const PERSPECTIVE_PX: f64 = 1_000.0;
pub const RIPPLE_MS: Millis = 800.0;

/// `(rotate_x, rotate_y)` in degrees for a pointer at `local` inside a card.
pub fn tilt_angles(local: Point, size: Size) -> (f64, f64) {
    let center = size.center();
    if center.x <= 0.0 || center.y <= 0.0 {
        return (0.0, 0.0);
    }

    let rotate_x = (local.y - center.y) / center.y * -MAX_TILT_DEG;
    let rotate_y = (local.x - center.x) / center.x * MAX_TILT_DEG;
    (rotate_x, rotate_y)
}

pub fn magnet_offset(local: Point, size: Size) -> (f64, f64) {
    let center = size.center();
    (
        (local.x - center.x) * MAGNET_STRENGTH,
        (local.y - center.y) * MAGNET_STRENGTH,
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardTransform {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl CardTransform {
    #[cfg(test)]
    pub fn is_identity(&self) -> bool {
        self.rotate_x == 0.0
            && self.rotate_y == 0.0
            && self.translate_x == 0.0
            && self.translate_y == 0.0
    }

    pub fn css(&self) -> String {
        format!(
            "perspective({PERSPECTIVE_PX:.0}px) translate({:.2}px, {:.2}px) rotateX({:.2}deg) rotateY({:.2}deg)",
            self.translate_x, self.translate_y, self.rotate_x, self.rotate_y
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct CardMotion {
    rotate_x: AnimatedValue,
    rotate_y: AnimatedValue,
    translate_x: AnimatedValue,
    translate_y: AnimatedValue,
}

impl CardMotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tilt_in(&mut self, now: Millis) {
        self.rotate_x
            .animate_to(now, ENTER_TILT_DEG, SETTLE_MS, Ease::Power2Out);
        self.rotate_y
            .animate_to(now, ENTER_TILT_DEG, SETTLE_MS, Ease::Power2Out);
    }

    pub fn tilt_toward(&mut self, now: Millis, local: Point, size: Size) {
        let (rotate_x, rotate_y) = tilt_angles(local, size);
        self.rotate_x
            .animate_to(now, rotate_x, TILT_MS, Ease::Power2Out);
        self.rotate_y
            .animate_to(now, rotate_y, TILT_MS, Ease::Power2Out);
    }

    pub fn attract_toward(&mut self, now: Millis, local: Point, size: Size) {
        let (x, y) = magnet_offset(local, size);
        self.translate_x
            .animate_to(now, x, MAGNET_MS, Ease::Power2Out);
        self.translate_y
            .animate_to(now, y, MAGNET_MS, Ease::Power2Out);
    }

    pub fn kill_magnetism(&mut self, now: Millis) {
        self.translate_x.kill(now);
        self.translate_y.kill(now);
    }

    /// Back to rest, whatever was in flight.
    pub fn settle(&mut self, now: Millis) {
        for value in [
            &mut self.rotate_x,
            &mut self.rotate_y,
            &mut self.translate_x,
            &mut self.translate_y,
        ] {
            value.animate_to(now, 0.0, SETTLE_MS, Ease::Power2Out);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn transform(&self, now: Millis) -> CardTransform {
        CardTransform {
            rotate_x: self.rotate_x.sample(now),
            rotate_y: self.rotate_y.sample(now),
            translate_x: self.translate_x.sample(now),
            translate_y: self.translate_y.sample(now),
        }
    }

    pub fn is_animating(&self, now: Millis) -> bool {
        self.rotate_x.is_animating(now)
            || self.rotate_y.is_animating(now)
            || self.translate_x.is_animating(now)
            || self.translate_y.is_animating(now)
    }
}

/// Farthest card corner from `local`.
pub fn max_corner_distance(local: Point, size: Size) -> f64 {
    [
        Point::new(0.0, 0.0),
        Point::new(size.width, 0.0),
        Point::new(0.0, size.height),
        Point::new(size.width, size.height),
    ]
    .into_iter()
    .map(|corner| local.distance_to(corner))
    .fold(0.0, f64::max)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RippleId(u64);

impl RippleId {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct Ripple {
    id: RippleId,
    center: Point,
    diameter: f64,
    started_at: Millis,
    scale: AnimatedValue,
    opacity: AnimatedValue,
}

impl Ripple {
    pub fn new(id: u64, now: Millis, local: Point, size: Size) -> Self {
        let mut scale = AnimatedValue::new(0.0);
        scale.animate_to(now, 1.0, RIPPLE_MS, Ease::Power2Out);
        let mut opacity = AnimatedValue::new(1.0);
        opacity.animate_to(now, 0.0, RIPPLE_MS, Ease::Power2Out);

        Self {
            id: RippleId(id),
            center: local,
            diameter: 2.0 * max_corner_distance(local, size),
            started_at: now,
            scale,
            opacity,
        }
    }

    pub fn id(&self) -> RippleId {
        self.id
    }

    #[cfg(test)]
    pub fn center(&self) -> Point {
        self.center
    }

    #[cfg(test)]
    pub fn diameter(&self) -> f64 {
        self.diameter
    }

    pub fn is_finished(&self, now: Millis) -> bool {
        now >= self.started_at + RIPPLE_MS
    }

    pub fn style(&self, now: Millis, color: GlowColor) -> String {
        let radius = self.diameter / 2.0;
        format!(
            "width: {d:.1}px; height: {d:.1}px; left: {:.1}px; top: {:.1}px; transform: scale({:.3}); opacity: {:.3}; background: radial-gradient(circle, {} 0%, {} 30%, transparent 70%);",
            self.center.x - radius,
            self.center.y - radius,
            self.scale.sample(now),
            self.opacity.sample(now),
            color.rgba(0.4),
            color.rgba(0.2),
            d = self.diameter,
        )
    }
}
