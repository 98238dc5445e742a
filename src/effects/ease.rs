/// Overshoot used by the site's entrance/exit curves.
pub const BACK_OVERSHOOT: f64 = 1.7;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    Power2Out,
    Power2InOut,
    BackOut(f64),
    BackIn(f64),
}

impl Ease {
    pub fn back_out() -> Self {
        Self::BackOut(BACK_OVERSHOOT)
    }

    pub fn back_in() -> Self {
        Self::BackIn(BACK_OVERSHOOT)
    }

    /// Maps linear progress in `[0, 1]` onto the curve. Back curves leave the
    /// range briefly; every curve still starts at 0 and ends at 1.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Self::BackOut(s) => {
                let u = t - 1.0;
                1.0 + (s + 1.0) * u * u * u + s * u * u
            }
            Self::BackIn(s) => (s + 1.0) * t * t * t - s * t * t,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 5] = [
        Ease::Linear,
        Ease::Power2Out,
        Ease::Power2InOut,
        Ease::BackOut(BACK_OVERSHOOT),
        Ease::BackIn(BACK_OVERSHOOT),
    ];

    #[test]
    fn every_curve_is_anchored_at_both_ends() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-12, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-12, "{ease:?} at 1");
        }
    }

    #[test]
    fn back_out_overshoots_before_settling() {
        let peak = (1..100)
            .map(|step| Ease::back_out().apply(f64::from(step) / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn back_in_dips_below_zero_early() {
        assert!(Ease::back_in().apply(0.2) < 0.0);
    }

    #[test]
    fn progress_outside_unit_range_is_clamped() {
        assert_eq!(Ease::Power2Out.apply(-3.0), 0.0);
        assert_eq!(Ease::Power2Out.apply(7.0), 1.0);
    }
}
