//! Page-level model shared by the navbar, hero and background decor.

use rand::Rng;

pub const OWNER_NAME: (&str, &str) = ("Jesper", "Sjöström");
pub const CONTACT_EMAIL: &str = "contact@jespersjostrom.se";
pub const GITHUB_URL: &str = "https://github.com/jespersjostrom";
pub const LINKEDIN_URL: &str = "https://linkedin.com/in/jespersjostrom";

pub const SCROLLED_THRESHOLD_PX: f64 = 50.0;
pub const ACTIVE_SECTION_VIEWPORT_FRACTION: f64 = 0.2;
pub const STAR_COUNT: usize = 30;
pub const STAR_FADE_DELAY_S: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub id: &'static str,
}

impl NavItem {
    pub fn href(&self) -> String {
        format!("#{}", self.id)
    }
}

pub const NAV_ITEMS: [NavItem; 6] = [
    NavItem { name: "Home", id: "home" },
    NavItem { name: "About", id: "about" },
    NavItem { name: "Experience", id: "experience" },
    NavItem { name: "Work", id: "work" },
    NavItem { name: "Skills", id: "skills" },
    NavItem { name: "Contact", id: "contact" },
];

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD_PX
}

/// Picks the section the reader is in from each section's viewport-relative
/// top edge. `None` tops (not mounted) are skipped; with nothing past the
/// marker the first section wins.
pub fn active_section<'a>(
    tops: impl IntoIterator<Item = (&'a str, Option<f64>)>,
    viewport_height: f64,
) -> Option<&'a str> {
    let marker = viewport_height * ACTIVE_SECTION_VIEWPORT_FRACTION;
    let mut first = None;
    let mut active = None;

    for (id, top) in tops {
        let Some(top) = top else {
            continue;
        };
        first.get_or_insert(id);
        if top <= marker {
            active = Some(id);
        }
    }

    active.or(first)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub brightness: f64,
    pub flicker_s: f64,
    pub glow: f64,
    pub drift_s: f64,
    pub drift: [(f64, f64); 2],
}

impl Star {
    pub fn fade_in_delay_s(&self) -> f64 {
        self.id as f64 * STAR_FADE_DELAY_S
    }

    /// Custom properties consumed by the star keyframes in the stylesheet.
    pub fn style(&self) -> String {
        format!(
            "left: {:.3}%; top: {:.3}%; --star-size: {:.2}px; --star-glow: {:.2}px; --star-brightness: {:.3}; --star-flicker: {:.2}s; --star-drift: {:.2}s; --star-drift-x1: {:.2}px; --star-drift-y1: {:.2}px; --star-drift-x2: {:.2}px; --star-drift-y2: {:.2}px; animation-delay: {:.1}s;",
            self.x,
            self.y,
            self.size,
            self.glow,
            self.brightness,
            self.flicker_s,
            self.drift_s,
            self.drift[0].0,
            self.drift[0].1,
            self.drift[1].0,
            self.drift[1].1,
            self.fade_in_delay_s(),
        )
    }
}

pub fn generate_stars(count: usize, rng: &mut impl Rng) -> Vec<Star> {
    (0..count)
        .map(|id| Star {
            id,
            x: rng.gen_range(0.0..100.0),
            y: rng.gen_range(0.0..100.0),
            size: rng.gen_range(0.3..1.1),
            brightness: rng.gen_range(0.3..1.0),
            flicker_s: rng.gen_range(3.0..7.0),
            glow: rng.gen_range(1.0..3.0),
            drift_s: rng.gen_range(60.0..100.0),
            drift: [
                (rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)),
                (rng.gen_range(-7.5..7.5), rng.gen_range(-7.5..7.5)),
            ],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn scrolled_only_past_threshold() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(50.0));
        assert!(is_scrolled(50.5));
    }

    #[test]
    fn active_section_is_last_one_past_the_marker() {
        let tops = [
            ("home", Some(-900.0)),
            ("about", Some(-200.0)),
            ("experience", Some(150.0)),
            ("work", Some(700.0)),
        ];
        assert_eq!(active_section(tops, 1_000.0), Some("experience"));
        assert_eq!(active_section(tops, 500.0), Some("about"));
    }

    #[test]
    fn active_section_falls_back_to_first_mounted() {
        let tops = [("home", None), ("about", Some(400.0)), ("work", Some(900.0))];
        assert_eq!(active_section(tops, 1_000.0), Some("about"));
        assert_eq!(active_section([("home", None)], 1_000.0), None);
    }

    #[test]
    fn nav_links_point_at_section_ids() {
        assert_eq!(NAV_ITEMS[3].href(), "#work");
        assert_eq!(NAV_ITEMS.len(), 6);
    }

    #[test]
    fn stars_stay_within_their_ranges() {
        let mut rng = SmallRng::seed_from_u64(7);
        let stars = generate_stars(STAR_COUNT, &mut rng);

        assert_eq!(stars.len(), 30);
        for (index, star) in stars.iter().enumerate() {
            assert_eq!(star.id, index);
            assert!((0.0..100.0).contains(&star.x));
            assert!((0.0..100.0).contains(&star.y));
            assert!((0.3..1.1).contains(&star.size));
            assert!((0.3..1.0).contains(&star.brightness));
            assert!((3.0..7.0).contains(&star.flicker_s));
            assert!((1.0..3.0).contains(&star.glow));
            assert!((60.0..100.0).contains(&star.drift_s));
        }
        assert!((stars[5].fade_in_delay_s() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn contact_details_are_linkable() {
        assert!(!OWNER_NAME.0.is_empty() && !OWNER_NAME.1.is_empty());
        assert!(CONTACT_EMAIL.split_once('@').is_some_and(|(user, host)| {
            !user.is_empty() && host.contains('.')
        }));
        for url in [GITHUB_URL, LINKEDIN_URL] {
            assert!(url.starts_with("https://"), "{url}");
        }
    }
}
