use yew::prelude::*;

use super::contact::{CopyButton, ToastVariant};
use super::decor::FloatingStars;
use super::dom::scroll_to_id;
use crate::site::{CONTACT_EMAIL, GITHUB_URL, LINKEDIN_URL, OWNER_NAME};

const TAGLINE: &str =
    "Passionate full-stack developer with 5+ years of experience creating modern web applications.";

#[function_component(Hero)]
pub fn hero() -> Html {
    let (first, last) = OWNER_NAME;
    let onconnect = Callback::from(|_: MouseEvent| scroll_to_id("work"));

    html! {
        <section id="home" class="hero">
            <FloatingStars />
            <div class="hero__inner">
                <div class="hero__greeting">{"Hi I'm"}</div>
                <h1 class="hero__name">
                    <span class="hero__name-line text-accent" data-shadow={first}>{first}</span>
                    <span class="hero__name-line" data-shadow={last}>{last}</span>
                </h1>
                <p class="hero__tagline">{TAGLINE}</p>
                <button type="button" class="hero__cta" onclick={onconnect}>
                    {"Let's Connect"}
                </button>
                <div class="hero__links">
                    <a href={GITHUB_URL} target="_blank" rel="noopener noreferrer" class="social-link">
                        <span aria-hidden="true">{"⌥"}</span>
                        <span>{"GitHub"}</span>
                    </a>
                    <a href={LINKEDIN_URL} target="_blank" rel="noopener noreferrer" class="social-link">
                        <span aria-hidden="true">{"in"}</span>
                        <span>{"LinkedIn"}</span>
                    </a>
                    <CopyButton
                        text={CONTACT_EMAIL}
                        variant={ToastVariant::Notification}
                        class="social-link"
                    />
                </div>
                <div class="hero__scroll-hint" aria-hidden="true">
                    <div class="hero__scroll-dot"></div>
                </div>
            </div>
        </section>
    }
}
