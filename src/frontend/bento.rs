use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, Event, HtmlElement, MouseEvent, PointerEvent};
use yew::prelude::*;

use super::contact::{CopyButton, ToastVariant};
use super::dom::{element_rect, now_ms, set_style_property, viewport_size, AnimationFrameLoop};
use super::globe::GlobeWidget;
use crate::config::BentoConfig;
use crate::effects::card::{CardConfig, CardEffects};
use crate::effects::color::GlowColor;
use crate::effects::geometry::{Point, Rect};
use crate::effects::spotlight::SpotlightEngine;
use crate::globe::{GlobeAppearance, Region};

const PROJECT_EMAIL: &str = "hello@jespersjostrom.se";
const REMOTE_GLOBE_SIZE: f64 = 350.0;

#[derive(Clone, Copy, PartialEq, Eq)]
enum CardKind {
    Collaboration,
    TechStack,
    Contact,
    RemoteWork,
    Building,
}

const CARDS: [CardKind; 5] = [
    CardKind::Collaboration,
    CardKind::TechStack,
    CardKind::Contact,
    CardKind::RemoteWork,
    CardKind::Building,
];

const TECH_COLUMNS: [&[&str]; 2] = [
    &["JavaScript", "React", "Github", "Bootstrap", "Cypress", "Backbone", "Less", "Sass"],
    &["HTML", "CSS", "Node", "Git", "Heroku", "Postman", "Figma"],
];

const TIMEZONES: [(&str, &str, Option<Region>); 3] = [
    ("Stockholm", "GMT+1", Some(Region::Sweden)),
    ("London", "GMT+0", Some(Region::UnitedKingdom)),
    ("New York", "GMT-5", None),
];

const PROJECTS: [(&str, &str, &str); 3] = [
    ("🛒", "E-commerce Solutions", "Full-stack shopping platforms"),
    ("📊", "Data Dashboards", "Interactive analytics tools"),
    ("🚀", "SaaS Applications", "Scalable business solutions"),
];

impl CardKind {
    fn label(self) -> &'static str {
        match self {
            Self::Collaboration => "Teamwork",
            Self::TechStack => "Technologies",
            Self::Contact => "Contact",
            Self::RemoteWork => "Remote Work",
            Self::Building => "Projects",
        }
    }
}

fn card_rect(node_ref: &NodeRef) -> Option<Rect> {
    node_ref.cast::<Element>().map(|element| element_rect(&element))
}

fn mounted_cards(cards: &[NodeRef]) -> impl Iterator<Item = HtmlElement> + '_ {
    cards.iter().filter_map(NodeRef::cast::<HtmlElement>)
}

fn wake(frames: &RefCell<Option<AnimationFrameLoop>>) {
    if let Some(frames) = frames.borrow().as_ref() {
        frames.ensure_running();
    }
}

#[derive(Properties, PartialEq)]
pub struct ParticleCardProps {
    pub node_ref: NodeRef,
    pub config: CardConfig,
    pub animations: bool,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ParticleCard)]
pub fn particle_card(props: &ParticleCardProps) -> Html {
    let effects = use_mut_ref(|| CardEffects::new(props.config, SmallRng::from_entropy()));
    let frames = use_mut_ref(|| None::<AnimationFrameLoop>);
    let refresh = use_force_update();

    {
        let effects = effects.clone();
        let frames = frames.clone();
        let node_ref = props.node_ref.clone();
        use_effect_with((props.config, props.animations), move |(config, animations)| {
            *effects.borrow_mut() = CardEffects::new(*config, SmallRng::from_entropy());

            if *animations {
                let moves = config.enable_tilt || config.enable_magnetism;
                let frame_effects = effects.clone();
                let frame_node = node_ref.clone();
                *frames.borrow_mut() = Some(AnimationFrameLoop::new(move |now| {
                    let animating = {
                        let mut effects = frame_effects.borrow_mut();
                        effects.tick(now);
                        if moves {
                            if let Some(card) = frame_node.cast::<HtmlElement>() {
                                set_style_property(&card, "transform", &effects.transform(now).css());
                            }
                        }
                        effects.is_animating(now)
                    };
                    refresh.force_update();
                    animating
                }));
            }

            move || {
                frames.borrow_mut().take();
                effects.borrow_mut().teardown();
                if let Some(card) = node_ref.cast::<HtmlElement>() {
                    let _ = card.style().remove_property("transform");
                }
            }
        });
    }

    let onpointerenter = {
        let (effects, frames, node_ref) = (effects.clone(), frames.clone(), props.node_ref.clone());
        let animations = props.animations;
        Callback::from(move |_: PointerEvent| {
            let (true, Some(rect)) = (animations, card_rect(&node_ref)) else {
                return;
            };
            effects.borrow_mut().pointer_enter(now_ms(), rect.size());
            wake(&frames);
        })
    };

    let onpointermove = {
        let (effects, frames, node_ref) = (effects.clone(), frames.clone(), props.node_ref.clone());
        let animations = props.animations;
        Callback::from(move |event: PointerEvent| {
            let (true, Some(rect)) = (animations, card_rect(&node_ref)) else {
                return;
            };
            let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            effects
                .borrow_mut()
                .pointer_move(now_ms(), rect.to_local(pointer), rect.size());
            wake(&frames);
        })
    };

    let onpointerleave = {
        let (effects, frames) = (effects.clone(), frames.clone());
        let animations = props.animations;
        Callback::from(move |_: PointerEvent| {
            if !animations {
                return;
            }
            effects.borrow_mut().pointer_leave(now_ms());
            wake(&frames);
        })
    };

    let onclick = {
        let (effects, frames, node_ref) = (effects.clone(), frames.clone(), props.node_ref.clone());
        let animations = props.animations;
        Callback::from(move |event: MouseEvent| {
            let (true, Some(rect)) = (animations, card_rect(&node_ref)) else {
                return;
            };
            let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            effects
                .borrow_mut()
                .click(now_ms(), rect.to_local(pointer), rect.size());
            wake(&frames);
        })
    };

    let now = now_ms();
    let color = props.config.glow_color;
    let (particles, ripples) = {
        let effects = effects.borrow();
        let particles: Html = effects
            .particles()
            .iter()
            .map(|particle| {
                html! {
                    <div key={particle.id().get()} class="particle" style={particle.sample(now).style(color)}></div>
                }
            })
            .collect();
        let ripples: Html = effects
            .ripples()
            .iter()
            .map(|ripple| {
                html! {
                    <div key={ripple.id().get()} class="ripple" style={ripple.style(now, color)}></div>
                }
            })
            .collect();
        (particles, ripples)
    };

    html! {
        <div
            ref={props.node_ref.clone()}
            class={props.class.clone()}
            style={card_style(color)}
            {onpointerenter}
            {onpointermove}
            {onpointerleave}
            {onclick}
        >
            {particles}
            {ripples}
            {props.children.clone()}
        </div>
    }
}

fn card_style(color: GlowColor) -> String {
    format!(
        "--glow-x: 50%; --glow-y: 50%; --glow-intensity: 0; --glow-radius: 200px; --glow-color: {color};"
    )
}

struct SpotlightHandles {
    _listeners: [EventListener; 2],
    _frames: Rc<AnimationFrameLoop>,
}

fn paint_spotlight(
    engine: &SpotlightEngine,
    now: f64,
    spotlight: &NodeRef,
    cards: &[NodeRef],
    color: GlowColor,
) {
    if let Some(glow) = spotlight.cast::<Element>() {
        let style = format!("{} --glow-color: {color};", engine.glow_style(now));
        let _ = glow.set_attribute("style", &style);
    }

    for (index, card) in mounted_cards(cards).enumerate() {
        let Some(properties) = engine.card_properties(index, now) else {
            continue;
        };
        for (name, value) in &properties {
            set_style_property(&card, name, value);
        }
    }
}

fn install_spotlight(
    section: NodeRef,
    spotlight: NodeRef,
    cards: Rc<Vec<NodeRef>>,
    radius: f64,
    color: GlowColor,
) -> Option<SpotlightHandles> {
    let document = window()?.document()?;
    let engine = Rc::new(RefCell::new(SpotlightEngine::new(radius)));

    let frames = {
        let engine = engine.clone();
        let cards = cards.clone();
        Rc::new(AnimationFrameLoop::new(move |now| {
            let engine = engine.borrow();
            paint_spotlight(&engine, now, &spotlight, &cards, color);
            engine.is_animating(now)
        }))
    };

    let on_move = {
        let engine = engine.clone();
        let frames = frames.clone();
        move |event: &Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let pointer = Point::new(f64::from(event.client_x()), f64::from(event.client_y()));
            let region = section.cast::<Element>().map(|element| element_rect(&element));
            let rects: Vec<Rect> = mounted_cards(&cards)
                .map(|card| element_rect(&card))
                .collect();

            engine
                .borrow_mut()
                .pointer_move(now_ms(), pointer, region.as_ref(), &rects);
            frames.ensure_running();
        }
    };

    let on_leave = {
        let frames = frames.clone();
        move |_: &Event| {
            engine.borrow_mut().pointer_leave(now_ms());
            frames.ensure_running();
        }
    };

    let listeners = [
        EventListener::new(&document, "pointermove", on_move),
        EventListener::new(&document, "mouseleave", on_leave),
    ];

    Some(SpotlightHandles {
        _listeners: listeners,
        _frames: frames,
    })
}

#[derive(Properties, PartialEq)]
pub struct MagicBentoProps {
    pub config: BentoConfig,
}

#[function_component(MagicBento)]
pub fn magic_bento(props: &MagicBentoProps) -> Html {
    let config = props.config;
    let section_ref = use_node_ref();
    let spotlight_ref = use_node_ref();
    let card_refs = use_memo((), |_| {
        CARDS.iter().map(|_| NodeRef::default()).collect::<Vec<_>>()
    });
    let viewport_width = use_state(|| viewport_size().width);
    let selected_region = use_state(|| None::<Region>);

    {
        let viewport_width = viewport_width.clone();
        use_effect_with((), move |_| {
            let listener = window().map(|win| {
                EventListener::new(&win, "resize", move |_| {
                    viewport_width.set(viewport_size().width);
                })
            });
            move || drop(listener)
        });
    }

    let animations = config.animations_enabled(*viewport_width);
    let spotlight_on = animations && config.enable_spotlight;

    {
        let section_ref = section_ref.clone();
        let spotlight_ref = spotlight_ref.clone();
        let card_refs = card_refs.clone();
        use_effect_with(
            (spotlight_on, config.spotlight_radius, config.glow_color),
            move |(spotlight_on, radius, color)| {
                let handles = if *spotlight_on {
                    install_spotlight(
                        section_ref,
                        spotlight_ref,
                        card_refs.clone(),
                        *radius,
                        *color,
                    )
                } else {
                    None
                };

                move || {
                    drop(handles);
                    for card in mounted_cards(&card_refs) {
                        set_style_property(&card, "--glow-intensity", "0");
                    }
                }
            },
        );
    }

    let on_region = {
        let selected_region = selected_region.clone();
        Callback::from(move |region: Region| selected_region.set(Some(region)))
    };

    let card_config = config.card_config();
    let card_class = classes!(
        "card",
        config.enable_border_glow.then_some("card--border-glow")
    );

    html! {
        <section class="bento-section" ref={section_ref}>
            if spotlight_on {
                <div ref={spotlight_ref} class="global-spotlight" aria-hidden="true"></div>
            }
            <div class="card-responsive">
                { for CARDS.iter().zip(card_refs.iter()).map(|(kind, node_ref)| html! {
                    <ParticleCard
                        key={kind.label()}
                        node_ref={node_ref.clone()}
                        config={card_config}
                        {animations}
                        class={card_class.clone()}
                    >
                        <div class="card__header">
                            <span class="card__label">{kind.label()}</span>
                        </div>
                        {card_body(*kind, &config, *selected_region, &on_region)}
                    </ParticleCard>
                }) }
            </div>
        </section>
    }
}

fn card_heading(lead: &str, accent: &str, tail: &str) -> Html {
    html! {
        <h2 class="card__title">
            {lead}<span class="text-accent">{accent}</span>{tail}
        </h2>
    }
}

fn card_body(
    kind: CardKind,
    config: &BentoConfig,
    selected: Option<Region>,
    on_region: &Callback<Region>,
) -> Html {
    let description = classes!(
        "card__description",
        config.text_auto_hide.then_some("text-clamp-2")
    );

    match kind {
        CardKind::Collaboration => html! {
            <div class="card__content">
                {card_heading("Clear communication and ", "seamless", " collaboration")}
                <p class={description}>{"Working closely with teams and clients for optimal results"}</p>
                <div class="card__chips">
                    <span class="chip-dot">{"Daily standups"}</span>
                    <span class="chip-dot">{"Transparent feedback"}</span>
                </div>
            </div>
        },
        CardKind::TechStack => html! {
            <div class="card__content">
                {card_heading("Passionate about ", "cutting-edge", " technologies")}
                <p class={description}>{"Building modern web experiences with industry-leading tools"}</p>
                <div class="tech-grid">
                    { for TECH_COLUMNS.iter().map(|column| html! {
                        <div class="tech-column">
                            { for column.iter().map(|name| html! { <span class="tech-pill">{*name}</span> }) }
                        </div>
                    }) }
                </div>
            </div>
        },
        CardKind::Contact => html! {
            <div class="card__content">
                {card_heading("Let's work together on your ", "next project", "")}
                <p class={description}>{"Ready to bring your ideas to life"}</p>
                <div class="card__contact">
                    <span class="card__contact-lead">{"✉ Get in touch"}</span>
                    <CopyButton text={PROJECT_EMAIL} variant={ToastVariant::InlineLabel} class="card__copy" />
                </div>
            </div>
        },
        CardKind::RemoteWork => html! {
            <div class="card__content card__content--globe">
                {card_heading("Remote-first mindset, ", "timezone", " flexible")}
                <p class={description}>{"Adapting to your schedule, wherever you are"}</p>
                <GlobeWidget
                    width={REMOTE_GLOBE_SIZE}
                    height={REMOTE_GLOBE_SIZE}
                    appearance={GlobeAppearance::blue_marble()}
                    {selected}
                    on_select={on_region.clone()}
                    class="card__globe"
                />
                <ul class="timezones">
                    { for TIMEZONES.iter().map(|(city, offset, region)| {
                        let onclick = region.map(|region| {
                            let on_region = on_region.clone();
                            Callback::from(move |_: MouseEvent| on_region.emit(region))
                        });
                        let active = region.is_some() && *region == selected;
                        html! {
                            <li class={classes!("timezone", active.then_some("is-active"))} {onclick}>
                                <span>{*city}</span>
                                <span class="timezone-offset">{*offset}</span>
                            </li>
                        }
                    }) }
                </ul>
            </div>
        },
        CardKind::Building => html! {
            <div class="card__content">
                {card_heading("Building innovative ", "web experiences", "")}
                <p class={description}>{"From e-commerce platforms to data visualization tools"}</p>
                <ul class="project-list">
                    { for PROJECTS.iter().map(|(icon, title, detail)| html! {
                        <li class="project">
                            <span class="project-icon" aria-hidden="true">{*icon}</span>
                            <div>
                                <div class="project-title">{*title}</div>
                                <div class="project-detail">{*detail}</div>
                            </div>
                        </li>
                    }) }
                </ul>
            </div>
        },
    }
}
