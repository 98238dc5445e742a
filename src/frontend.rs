mod bento;
mod contact;
mod cv;
mod decor;
mod dom;
mod globe;
mod hero;
mod navbar;

use web_sys::{window, Element};
use yew::prelude::*;

use crate::config::BentoConfig;
use bento::MagicBento;
use cv::CvPage;
use decor::CursorTrail;
use hero::Hero;
use navbar::Navbar;

const MOUNT_ID: &str = "app";
const CV_PATH: &str = "/cv";

fn mount_element() -> Option<Element> {
    window()?.document()?.get_element_by_id(MOUNT_ID)
}

fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

fn is_cv_path(path: &str) -> bool {
    path.trim_end_matches('/') == CV_PATH
}

/// Grid settings from the mount element's `data-*` attributes, with motion
/// switched off for readers who ask for less of it.
fn resolve_bento_config() -> BentoConfig {
    let mut config = match mount_element() {
        Some(element) => BentoConfig::from_attributes(|name| element.get_attribute(name)),
        None => BentoConfig::default(),
    };
    if dom::prefers_reduced_motion() {
        config.disable_animations = true;
    }
    config
}

#[function_component(Home)]
fn home() -> Html {
    let config = use_memo((), |_| resolve_bento_config());

    html! {
        <>
            <CursorTrail />
            <Navbar />
            <main>
                <Hero />

                <section id="about" class="section-block" aria-labelledby="about-heading">
                    <h2 id="about-heading" class="section-title">{"About"}</h2>
                    <p class="section-lead">
                        {"Frontend developer from Stockholm building fast, tactile interfaces for the web."}
                    </p>
                    <MagicBento config={*config} />
                </section>

                <section id="experience" class="section-block" aria-labelledby="experience-heading">
                    <h2 id="experience-heading" class="section-title">{"Experience"}</h2>
                    <ul class="timeline">
                        <li>
                            <span class="timeline__period">{"2023 - Present"}</span>
                            <span class="timeline__role">{"Senior Frontend Developer"}</span>
                        </li>
                        <li>
                            <span class="timeline__period">{"2021 - 2023"}</span>
                            <span class="timeline__role">{"Frontend Developer"}</span>
                        </li>
                    </ul>
                    <a class="cv-link" href={CV_PATH}>{"View full CV"}</a>
                </section>

                <section id="work" class="section-block" aria-labelledby="work-heading">
                    <h2 id="work-heading" class="section-title">{"Work"}</h2>
                    <p class="section-lead">
                        {"E-commerce platforms, analytics dashboards and SaaS products shipped end to end."}
                    </p>
                </section>

                <section id="skills" class="section-block" aria-labelledby="skills-heading">
                    <h2 id="skills-heading" class="section-title">{"Skills"}</h2>
                    <p class="section-lead">{"React, TypeScript, Next.js, Node.js, Figma and a lot of CSS."}</p>
                </section>

                <section id="contact" class="section-block" aria-labelledby="contact-heading">
                    <h2 id="contact-heading" class="section-title">{"Contact"}</h2>
                    <p class="section-lead">{"Open to remote roles and freelance projects."}</p>
                </section>
            </main>
        </>
    }
}

#[function_component(App)]
fn app() -> Html {
    let path = use_memo((), |_| current_path());

    if is_cv_path(&path) {
        html! { <CvPage /> }
    } else {
        html! { <Home /> }
    }
}

pub fn run() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();

    yew::Renderer::<App>::with_root(mount_element().expect("missing #app mount point")).render();
}
