//! Pointer-following glow for the bento section.
//!
//! `compute_frame` is the whole policy; `SpotlightEngine` only adds easing
//! on top of it so the page can sample smoothed values every frame.

use super::ease::Ease;
use super::geometry::{Point, Rect};
use super::tween::{AnimatedValue, Millis};

pub const GLOBAL_GLOW_MAX_OPACITY: f64 = 0.8;
pub const GLOW_MOVE_MS: Millis = 100.0;
pub const GLOW_FADE_IN_MS: Millis = 200.0;
pub const GLOW_FADE_OUT_MS: Millis = 500.0;
pub const GLOW_EXIT_MS: Millis = 300.0;
pub const CARD_GLOW_MS: Millis = 150.0;

/// Distance breakpoints derived from the configured spotlight radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Falloff {
    pub proximity: f64,
    pub fade_distance: f64,
}

impl Falloff {
    pub fn from_radius(radius: f64) -> Self {
        Self {
            proximity: radius * 0.5,
            fade_distance: radius * 0.75,
        }
    }

    /// 1 up to `proximity` (inclusive), linear down to 0 at `fade_distance`.
    pub fn intensity(&self, distance: f64) -> f64 {
        if distance <= self.proximity {
            1.0
        } else if distance <= self.fade_distance {
            (self.fade_distance - distance) / (self.fade_distance - self.proximity)
        } else {
            0.0
        }
    }
}

/// Distance from the pointer to the card's bounding circle, floored at 0.
pub fn effective_distance(pointer: Point, card: &Rect) -> f64 {
    let distance = pointer.distance_to(card.center()) - card.width.max(card.height) / 2.0;
    distance.max(0.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardGlow {
    /// Percent of the card's own width.
    pub glow_x: f64,
    /// Percent of the card's own height.
    pub glow_y: f64,
    pub intensity: f64,
    pub radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpotlightFrame {
    pub inside: bool,
    pub pointer: Point,
    pub glow_opacity: f64,
    pub cards: Vec<CardGlow>,
}

pub fn compute_frame(
    pointer: Point,
    region: Option<&Rect>,
    cards: &[Rect],
    radius: f64,
) -> SpotlightFrame {
    let inside = region.is_some_and(|rect| rect.contains(pointer));
    let falloff = Falloff::from_radius(radius);
    let mut min_distance = f64::INFINITY;

    let cards = cards
        .iter()
        .map(|card| {
            let percent = card.relative_percent(pointer);
            let intensity = if inside {
                let distance = effective_distance(pointer, card);
                min_distance = min_distance.min(distance);
                falloff.intensity(distance)
            } else {
                0.0
            };

            CardGlow {
                glow_x: percent.x,
                glow_y: percent.y,
                intensity,
                radius,
            }
        })
        .collect();

    let glow_opacity = if inside && min_distance.is_finite() {
        falloff.intensity(min_distance) * GLOBAL_GLOW_MAX_OPACITY
    } else {
        0.0
    };

    SpotlightFrame {
        inside,
        pointer,
        glow_opacity,
        cards,
    }
}

#[derive(Clone, Debug)]
struct CardGlowState {
    glow_x: f64,
    glow_y: f64,
    radius: f64,
    intensity: AnimatedValue,
}

impl CardGlowState {
    fn new(radius: f64) -> Self {
        Self {
            glow_x: 50.0,
            glow_y: 50.0,
            radius,
            intensity: AnimatedValue::new(0.0),
        }
    }
}

/// Smoothed spotlight state for one bento section.
#[derive(Clone, Debug)]
pub struct SpotlightEngine {
    radius: f64,
    glow_x: AnimatedValue,
    glow_y: AnimatedValue,
    glow_opacity: AnimatedValue,
    cards: Vec<CardGlowState>,
}

impl SpotlightEngine {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            glow_x: AnimatedValue::new(0.0),
            glow_y: AnimatedValue::new(0.0),
            glow_opacity: AnimatedValue::new(0.0),
            cards: Vec::new(),
        }
    }

    /// Feeds one pointer sample. `region` is `None` while the section isn't
    /// mounted, which reads as "outside".
    pub fn pointer_move(
        &mut self,
        now: Millis,
        pointer: Point,
        region: Option<&Rect>,
        cards: &[Rect],
    ) -> SpotlightFrame {
        let frame = compute_frame(pointer, region, cards, self.radius);
        let radius = self.radius;
        self.cards.resize_with(cards.len(), || CardGlowState::new(radius));

        if !frame.inside {
            self.fade_out(now);
            return frame;
        }

        for (state, glow) in self.cards.iter_mut().zip(&frame.cards) {
            state.glow_x = glow.glow_x;
            state.glow_y = glow.glow_y;
            state.radius = glow.radius;
            state
                .intensity
                .animate_to(now, glow.intensity, CARD_GLOW_MS, Ease::Power2Out);
        }

        self.glow_x
            .animate_to(now, pointer.x, GLOW_MOVE_MS, Ease::Power2Out);
        self.glow_y
            .animate_to(now, pointer.y, GLOW_MOVE_MS, Ease::Power2Out);

        let fade = if frame.glow_opacity > 0.0 {
            GLOW_FADE_IN_MS
        } else {
            GLOW_FADE_OUT_MS
        };
        self.glow_opacity
            .animate_to(now, frame.glow_opacity, fade, Ease::Power2Out);

        frame
    }

    /// Pointer left the document.
    pub fn pointer_leave(&mut self, now: Millis) {
        self.fade_out(now);
    }

    fn fade_out(&mut self, now: Millis) {
        for state in &mut self.cards {
            state.intensity.set(0.0);
        }
        self.glow_opacity
            .animate_to(now, 0.0, GLOW_EXIT_MS, Ease::Power2Out);
    }

    #[cfg(test)]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    #[cfg(test)]
    pub fn card_intensity(&self, index: usize, now: Millis) -> f64 {
        self.cards
            .get(index)
            .map(|state| state.intensity.sample(now))
            .unwrap_or(0.0)
    }

    pub fn glow_opacity(&self, now: Millis) -> f64 {
        self.glow_opacity.sample(now)
    }

    pub fn glow_position(&self, now: Millis) -> Point {
        Point::new(self.glow_x.sample(now), self.glow_y.sample(now))
    }

    /// CSS custom properties for one card, in `setProperty` order.
    pub fn card_properties(&self, index: usize, now: Millis) -> Option<[(&'static str, String); 4]> {
        let state = self.cards.get(index)?;
        Some([
            ("--glow-x", format!("{:.2}%", state.glow_x)),
            ("--glow-y", format!("{:.2}%", state.glow_y)),
            (
                "--glow-intensity",
                format!("{:.3}", state.intensity.sample(now)),
            ),
            ("--glow-radius", format!("{:.0}px", state.radius)),
        ])
    }

    pub fn glow_style(&self, now: Millis) -> String {
        let position = self.glow_position(now);
        format!(
            "left: {:.2}px; top: {:.2}px; opacity: {:.3};",
            position.x,
            position.y,
            self.glow_opacity(now)
        )
    }

    pub fn is_animating(&self, now: Millis) -> bool {
        self.glow_x.is_animating(now)
            || self.glow_y.is_animating(now)
            || self.glow_opacity.is_animating(now)
            || self
                .cards
                .iter()
                .any(|state| state.intensity.is_animating(now))
    }
}
