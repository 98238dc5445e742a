use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An `r, g, b` triple, kept in the comma form CSS `rgba()` wants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlowColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl GlowColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn rgba(self, alpha: f64) -> String {
        format!("rgba({self}, {alpha})")
    }
}

impl Default for GlowColor {
    fn default() -> Self {
        Self::new(218, 197, 167)
    }
}

impl fmt::Display for GlowColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, {}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("expected `r, g, b` with channels 0-255, got {0:?}")]
pub struct ParseGlowColorError(pub String);

impl FromStr for GlowColor {
    type Err = ParseGlowColorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let channels = value
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseGlowColorError(value.to_string()))?;

        match channels.as_slice() {
            [r, g, b] => Ok(Self::new(*r, *g, *b)),
            _ => Err(ParseGlowColorError(value.to_string())),
        }
    }
}
