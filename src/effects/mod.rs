//! Pointer-driven card effects on a caller-supplied clock.
//!
//! Nothing in here touches the DOM, so the whole engine runs (and is tested)
//! on the host. The frontend feeds it events and copies samples onto
//! elements.

pub mod cancel;
pub mod card;
pub mod color;
pub mod ease;
pub mod geometry;
pub mod motion;
pub mod particles;
pub mod pointer;
pub mod spotlight;
pub mod tween;

