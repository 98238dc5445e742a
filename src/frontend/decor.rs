use gloo_events::EventListener;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::JsCast;
use web_sys::{window, HtmlElement, MouseEvent};
use yew::prelude::*;

use super::dom::set_style_property;
use crate::effects::pointer::PointerTracker;
use crate::site::{generate_stars, STAR_COUNT};

/// A single dot that follows the pointer anywhere in the window.
#[function_component(CursorTrail)]
pub fn cursor_trail() -> Html {
    let dot = use_node_ref();

    {
        let dot = dot.clone();
        use_effect_with((), move |_| {
            let mut tracker = PointerTracker::new();
            let listener = window().map(|win| {
                EventListener::new(&win, "pointermove", move |event| {
                    let Some(event) = event.dyn_ref::<MouseEvent>() else {
                        return;
                    };
                    tracker.record(f64::from(event.client_x()), f64::from(event.client_y()));

                    let (Some(position), Some(dot)) =
                        (tracker.cursor_dot_position(), dot.cast::<HtmlElement>())
                    else {
                        return;
                    };
                    set_style_property(&dot, "left", &format!("{:.1}px", position.x));
                    set_style_property(&dot, "top", &format!("{:.1}px", position.y));
                    set_style_property(&dot, "opacity", "1");
                })
            });
            move || drop(listener)
        });
    }

    html! {
        <div ref={dot} class="cursor-dot" aria-hidden="true"></div>
    }
}

#[function_component(FloatingStars)]
pub fn floating_stars() -> Html {
    let stars = use_memo((), |_| {
        generate_stars(STAR_COUNT, &mut SmallRng::from_entropy())
    });

    html! {
        <div class="floating-stars" aria-hidden="true">
            { for stars.iter().map(|star| html! {
                <span key={star.id} class="star" style={star.style()}></span>
            }) }
        </div>
    }
}
