//! Bento grid settings.
//!
//! Defaults live here; the page may override them with `data-*` attributes
//! on the mount element (`data-particle-count="8"`). Out-of-range or
//! unparsable values fall back to the default.

use crate::effects::card::CardConfig;
use crate::effects::color::GlowColor;

pub const DEFAULT_PARTICLE_COUNT: usize = 12;
pub const DEFAULT_SPOTLIGHT_RADIUS: f64 = 300.0;
pub const MOBILE_BREAKPOINT: f64 = 768.0;

const PARTICLE_COUNT_BOUNDS: (usize, usize) = (0, 48);
const SPOTLIGHT_RADIUS_BOUNDS: (f64, f64) = (50.0, 1_200.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BentoConfig {
    pub text_auto_hide: bool,
    pub enable_stars: bool,
    pub enable_spotlight: bool,
    pub enable_border_glow: bool,
    pub disable_animations: bool,
    pub spotlight_radius: f64,
    pub particle_count: usize,
    pub enable_tilt: bool,
    pub glow_color: GlowColor,
    pub click_effect: bool,
    pub enable_magnetism: bool,
}

impl Default for BentoConfig {
    fn default() -> Self {
        Self {
            text_auto_hide: true,
            enable_stars: true,
            enable_spotlight: true,
            enable_border_glow: true,
            disable_animations: false,
            spotlight_radius: DEFAULT_SPOTLIGHT_RADIUS,
            particle_count: DEFAULT_PARTICLE_COUNT,
            enable_tilt: false,
            glow_color: GlowColor::default(),
            click_effect: true,
            enable_magnetism: false,
        }
    }
}

impl BentoConfig {
    /// Reads overrides through `lookup`, which maps an attribute name to its
    /// raw value.
    pub fn from_attributes(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            text_auto_hide: parse_bool(&lookup, "data-text-auto-hide", defaults.text_auto_hide),
            enable_stars: parse_bool(&lookup, "data-enable-stars", defaults.enable_stars),
            enable_spotlight: parse_bool(&lookup, "data-enable-spotlight", defaults.enable_spotlight),
            enable_border_glow: parse_bool(
                &lookup,
                "data-enable-border-glow",
                defaults.enable_border_glow,
            ),
            disable_animations: parse_bool(
                &lookup,
                "data-disable-animations",
                defaults.disable_animations,
            ),
            spotlight_radius: parse_f64_with_bounds(
                &lookup,
                "data-spotlight-radius",
                defaults.spotlight_radius,
                SPOTLIGHT_RADIUS_BOUNDS,
            ),
            particle_count: parse_usize_with_bounds(
                &lookup,
                "data-particle-count",
                defaults.particle_count,
                PARTICLE_COUNT_BOUNDS,
            ),
            enable_tilt: parse_bool(&lookup, "data-enable-tilt", defaults.enable_tilt),
            glow_color: non_empty(&lookup, "data-glow-color")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.glow_color),
            click_effect: parse_bool(&lookup, "data-click-effect", defaults.click_effect),
            enable_magnetism: parse_bool(
                &lookup,
                "data-enable-magnetism",
                defaults.enable_magnetism,
            ),
        }
    }

    /// Effects are off when asked to be, and on narrow viewports.
    pub fn animations_enabled(&self, viewport_width: f64) -> bool {
        !self.disable_animations && !is_mobile_viewport(viewport_width)
    }

    /// Per-card effect switches. Without stars a card still tilts and
    /// ripples but never spawns particles.
    pub fn card_config(&self) -> CardConfig {
        CardConfig {
            particle_count: if self.enable_stars {
                self.particle_count
            } else {
                0
            },
            glow_color: self.glow_color,
            enable_tilt: self.enable_tilt,
            enable_magnetism: self.enable_magnetism,
            click_effect: self.click_effect,
        }
    }
}

pub fn is_mobile_viewport(width: f64) -> bool {
    width <= MOBILE_BREAKPOINT
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_bool(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: bool) -> bool {
    match non_empty(lookup, name)
        .map(|value| value.to_ascii_lowercase())
        .as_deref()
    {
        Some("true" | "1" | "on") => true,
        Some("false" | "0" | "off") => false,
        _ => default,
    }
}

fn parse_usize_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: usize,
    bounds: (usize, usize),
) -> usize {
    non_empty(lookup, name)
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_f64_with_bounds(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: f64,
    bounds: (f64, f64),
) -> f64 {
    non_empty(lookup, name)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name: &str| values.get(name).cloned()
    }

    #[test]
    fn no_attributes_yields_defaults() {
        assert_eq!(BentoConfig::from_attributes(|_| None), BentoConfig::default());
    }

    #[test]
    fn overrides_within_bounds_apply() {
        let config = BentoConfig::from_attributes(lookup_from(&[
            ("data-particle-count", " 8 "),
            ("data-spotlight-radius", "420"),
            ("data-enable-tilt", "TRUE"),
            ("data-click-effect", "off"),
            ("data-glow-color", "132, 0, 255"),
        ]));

        assert_eq!(config.particle_count, 8);
        assert_eq!(config.spotlight_radius, 420.0);
        assert!(config.enable_tilt);
        assert!(!config.click_effect);
        assert_eq!(config.glow_color, GlowColor::new(132, 0, 255));
    }

    #[test]
    fn out_of_bounds_or_garbage_falls_back() {
        let config = BentoConfig::from_attributes(lookup_from(&[
            ("data-particle-count", "500"),
            ("data-spotlight-radius", "-3"),
            ("data-enable-magnetism", "maybe"),
            ("data-glow-color", "purple"),
        ]));

        assert_eq!(config.particle_count, DEFAULT_PARTICLE_COUNT);
        assert_eq!(config.spotlight_radius, DEFAULT_SPOTLIGHT_RADIUS);
        assert!(!config.enable_magnetism);
        assert_eq!(config.glow_color, GlowColor::default());
    }

    #[test]
    fn mobile_widths_disable_animations() {
        let config = BentoConfig::default();
        assert!(!config.animations_enabled(768.0));
        assert!(config.animations_enabled(769.0));

        let disabled = BentoConfig {
            disable_animations: true,
            ..BentoConfig::default()
        };
        assert!(!disabled.animations_enabled(1_920.0));
    }

    #[test]
    fn card_config_carries_effect_switches() {
        let config = BentoConfig {
            particle_count: 3,
            enable_magnetism: true,
            ..BentoConfig::default()
        };
        let card = config.card_config();

        assert_eq!(card.particle_count, 3);
        assert!(card.enable_magnetism);
        assert!(!card.enable_tilt);
        assert!(card.click_effect);
    }

    #[test]
    fn disabling_stars_zeroes_particles() {
        let config = BentoConfig {
            enable_stars: false,
            enable_tilt: true,
            ..BentoConfig::default()
        };
        let card = config.card_config();

        assert_eq!(card.particle_count, 0);
        assert!(card.enable_tilt);
    }
}
