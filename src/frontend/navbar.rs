use gloo_events::EventListener;
use web_sys::window;
use yew::prelude::*;

use super::dom::{element_rect, scroll_to_id, viewport_size};
use crate::site::{active_section, is_scrolled, NavItem, NAV_ITEMS};

fn scroll_y() -> f64 {
    window()
        .and_then(|w| w.scroll_y().ok())
        .unwrap_or(0.0)
}

fn section_top(id: &str) -> Option<f64> {
    let element = window()?.document()?.get_element_by_id(id)?;
    Some(element_rect(&element).top)
}

fn current_section() -> Option<&'static str> {
    active_section(
        NAV_ITEMS.iter().map(|item| (item.id, section_top(item.id))),
        viewport_size().height,
    )
}

#[function_component(Navbar)]
pub fn navbar() -> Html {
    let scrolled = use_state(|| is_scrolled(scroll_y()));
    let menu_open = use_state(|| false);
    let active = use_state(|| NAV_ITEMS[0].id);

    {
        let scrolled = scrolled.clone();
        let active = active.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|win| {
                EventListener::new(&win, "scroll", move |_| {
                    scrolled.set(is_scrolled(scroll_y()));
                    if let Some(section) = current_section() {
                        active.set(section);
                    }
                })
            });
            move || drop(listener)
        });
    }

    let navigate = {
        let active = active.clone();
        let menu_open = menu_open.clone();
        move |item: NavItem| {
            let active = active.clone();
            let menu_open = menu_open.clone();
            Callback::from(move |event: MouseEvent| {
                event.prevent_default();
                scroll_to_id(item.id);
                active.set(item.id);
                menu_open.set(false);
            })
        }
    };

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| menu_open.set(!*menu_open))
    };

    let toggle_icon = if *menu_open { "✕" } else { "☰" };

    let links = |class: &'static str| -> Html {
        NAV_ITEMS
            .iter()
            .map(|item| {
                let is_active = *active == item.id;
                html! {
                    <a
                        key={item.id}
                        href={item.href()}
                        class={classes!(class, is_active.then_some("is-active"))}
                        aria-current={is_active.then_some("page")}
                        onclick={navigate(*item)}
                    >
                        {item.name}
                    </a>
                }
            })
            .collect()
    };

    html! {
        <nav class={classes!("navbar", "glass-nav", (*scrolled).then_some("is-scrolled"))}>
            <div class="navbar__links">{links("navbar__link")}</div>
            <div class="navbar__mobile">
                <span class="navbar__brand">{"Portfolio"}</span>
                <button
                    type="button"
                    class={classes!("navbar__toggle", (*menu_open).then_some("is-open"))}
                    aria-expanded={(*menu_open).to_string()}
                    aria-label="Toggle navigation"
                    onclick={toggle_menu}
                >
                    {toggle_icon}
                </button>
            </div>
            if *menu_open {
                <div class="navbar__menu">{links("navbar__menu-link")}</div>
            }
        </nav>
    }
}
