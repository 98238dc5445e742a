//! Browser plumbing: clocks, geometry reads, style writes and a
//! self-stopping animation frame loop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_render::{request_animation_frame, AnimationFrame};
use web_sys::{window, Element, HtmlElement};

use crate::effects::geometry::{Rect, Size};

const FALLBACK_VIEWPORT: Size = Size::new(1280.0, 720.0);

pub fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now())
        .unwrap_or(0.0)
}

pub fn viewport_size() -> Size {
    let Some(win) = window() else {
        return FALLBACK_VIEWPORT;
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.width);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(FALLBACK_VIEWPORT.height);

    Size::new(width, height)
}

pub fn prefers_reduced_motion() -> bool {
    window()
        .and_then(|w| {
            w.match_media("(prefers-reduced-motion: reduce)")
                .ok()
                .flatten()
        })
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

pub fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}

pub fn set_style_property(element: &HtmlElement, name: &str, value: &str) {
    if let Err(error) = element.style().set_property(name, value) {
        log::debug!("style write {name} failed: {error:?}");
    }
}

pub fn scroll_to_id(id: &str) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
    else {
        return;
    };

    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

/// Milliseconds until `at`, as a `setTimeout` delay.
pub fn delay_until(now: f64, at: f64) -> u32 {
    (at - now).max(0.0).ceil().min(f64::from(u32::MAX)) as u32
}

struct FrameLoop {
    frame: RefCell<Option<AnimationFrame>>,
    on_frame: RefCell<Box<dyn FnMut(f64) -> bool>>,
}

fn schedule(frames: &Rc<FrameLoop>) {
    if frames.frame.borrow().is_some() {
        return;
    }

    let weak: Weak<FrameLoop> = Rc::downgrade(frames);
    let handle = request_animation_frame(move |_timestamp| {
        let Some(frames) = weak.upgrade() else {
            return;
        };
        frames.frame.borrow_mut().take();

        let keep_running = (frames.on_frame.borrow_mut())(now_ms());
        if keep_running {
            schedule(&frames);
        }
    });
    *frames.frame.borrow_mut() = Some(handle);
}

/// Calls `on_frame(now)` every frame while it returns `true`, then idles
/// until [`AnimationFrameLoop::ensure_running`] wakes it again. Dropping the
/// loop cancels the pending frame.
pub struct AnimationFrameLoop {
    frames: Rc<FrameLoop>,
}

impl AnimationFrameLoop {
    pub fn new(on_frame: impl FnMut(f64) -> bool + 'static) -> Self {
        Self {
            frames: Rc::new(FrameLoop {
                frame: RefCell::new(None),
                on_frame: RefCell::new(Box::new(on_frame)),
            }),
        }
    }

    pub fn ensure_running(&self) {
        schedule(&self.frames);
    }
}
