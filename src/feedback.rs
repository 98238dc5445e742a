//! "Copied!" label and toast timeline shared by every copy-to-clipboard
//! surface.

use thiserror::Error;

use crate::effects::tween::Millis;

pub const TOAST_ENTER_DELAY_MS: Millis = 10.0;
pub const LABEL_MS: Millis = 2_000.0;
pub const TOAST_VISIBLE_MS: Millis = 3_000.0;
pub const TOAST_EXIT_MS: Millis = 300.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Hidden,
    /// Mounted below the fold, about to slide in.
    Mounted,
    Shown,
    Leaving,
}

impl ToastPhase {
    pub fn class(self) -> Option<&'static str> {
        match self {
            Self::Hidden => None,
            Self::Mounted => Some("toast"),
            Self::Shown => Some("toast is-shown"),
            Self::Leaving => Some("toast is-leaving"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClipboardError {
    #[error("clipboard API is not available")]
    Unavailable,
    #[error("clipboard write was rejected: {0}")]
    Rejected(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CopyFeedback {
    copied_at: Option<Millis>,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// A successful write restarts the timeline.
    pub fn copied(&mut self, now: Millis) {
        self.copied_at = Some(now);
    }

    pub fn label_copied(&self, now: Millis) -> bool {
        self.elapsed(now)
            .is_some_and(|elapsed| elapsed < LABEL_MS)
    }

    pub fn toast_phase(&self, now: Millis) -> ToastPhase {
        match self.elapsed(now) {
            None => ToastPhase::Hidden,
            Some(elapsed) if elapsed < TOAST_ENTER_DELAY_MS => ToastPhase::Mounted,
            Some(elapsed) if elapsed < TOAST_VISIBLE_MS => ToastPhase::Shown,
            Some(elapsed) if elapsed < TOAST_VISIBLE_MS + TOAST_EXIT_MS => ToastPhase::Leaving,
            Some(_) => ToastPhase::Hidden,
        }
    }

    /// Next timestamp at which the label or toast changes, if any.
    pub fn next_change(&self, now: Millis) -> Option<Millis> {
        let copied_at = self.copied_at?;
        [
            TOAST_ENTER_DELAY_MS,
            LABEL_MS,
            TOAST_VISIBLE_MS,
            TOAST_VISIBLE_MS + TOAST_EXIT_MS,
        ]
        .into_iter()
        .map(|offset| copied_at + offset)
        .find(|at| *at > now)
    }

    fn elapsed(&self, now: Millis) -> Option<Millis> {
        self.copied_at
            .map(|at| now - at)
            .filter(|elapsed| *elapsed >= 0.0)
    }
}
