use gloo_timers::callback::Timeout;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::window;
use yew::prelude::*;

use super::dom::{delay_until, now_ms};
use crate::feedback::{ClipboardError, CopyFeedback, ToastPhase};

/// Where the toast is drawn. Same timeline, different chrome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    /// Corner notification with title and detail line.
    Notification,
    /// Compact pill next to the button that was pressed.
    InlineLabel,
}

pub async fn write_clipboard(text: &str) -> Result<(), ClipboardError> {
    let navigator: JsValue = window().ok_or(ClipboardError::Unavailable)?.navigator().into();
    let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))
        .map_err(|_| ClipboardError::Unavailable)?;
    if clipboard.is_undefined() || clipboard.is_null() {
        return Err(ClipboardError::Unavailable);
    }

    let write_text = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
        .ok_or(ClipboardError::Unavailable)?;
    let promise = write_text
        .call1(&clipboard, &JsValue::from_str(text))
        .map_err(describe)?
        .dyn_into::<Promise>()
        .map_err(describe)?;

    JsFuture::from(promise).await.map(|_| ()).map_err(describe)
}

fn describe(error: JsValue) -> ClipboardError {
    ClipboardError::Rejected(error.as_string().unwrap_or_else(|| format!("{error:?}")))
}

#[derive(Properties, PartialEq)]
pub struct CopyButtonProps {
    pub text: AttrValue,
    pub variant: ToastVariant,
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(CopyButton)]
pub fn copy_button(props: &CopyButtonProps) -> Html {
    let feedback = use_mut_ref(CopyFeedback::new);
    let refreshes = use_mut_ref(Vec::<Timeout>::new);
    let refresh = use_force_update();
    let now = now_ms();
    let copied = feedback.borrow().label_copied(now);
    let phase = feedback.borrow().toast_phase(now);

    let onclick = {
        let text = props.text.clone();
        let feedback = feedback.clone();
        let refreshes = refreshes.clone();
        let refresh = refresh.clone();
        Callback::from(move |_: MouseEvent| {
            if feedback.borrow().label_copied(now_ms()) {
                return;
            }

            let text = text.clone();
            let feedback = feedback.clone();
            let refreshes = refreshes.clone();
            let refresh = refresh.clone();
            spawn_local(async move {
                if let Err(error) = write_clipboard(&text).await {
                    log::error!("Failed to copy: {error}");
                    return;
                }

                let copied_at = now_ms();
                feedback.borrow_mut().copied(copied_at);

                let changes: Vec<f64> = {
                    let feedback = feedback.borrow();
                    std::iter::successors(feedback.next_change(copied_at), |at| {
                        feedback.next_change(*at)
                    })
                    .collect()
                };
                *refreshes.borrow_mut() = changes
                    .into_iter()
                    .map(|at| {
                        let refresh = refresh.clone();
                        Timeout::new(delay_until(copied_at, at), move || refresh.force_update())
                    })
                    .collect();
                refresh.force_update();
            });
        })
    };

    let (icon, label) = if copied {
        ("✓", AttrValue::from("Copied!"))
    } else {
        ("⧉", props.text.clone())
    };

    html! {
        <>
            <button
                type="button"
                class={classes!("copy-button", props.class.clone(), copied.then_some("is-copied"))}
                title={format!("Click to copy: {}", props.text)}
                disabled={copied}
                {onclick}
            >
                <span class="copy-icon" aria-hidden="true">{icon}</span>
                <span class="copy-label">{label}</span>
            </button>
            <Toast {phase} variant={props.variant} />
        </>
    }
}

#[derive(Properties, PartialEq)]
struct ToastProps {
    phase: ToastPhase,
    variant: ToastVariant,
}

#[function_component(Toast)]
fn toast(props: &ToastProps) -> Html {
    let Some(class) = props.phase.class() else {
        return Html::default();
    };

    match props.variant {
        ToastVariant::Notification => html! {
            <div class={classes!(class, "toast--notification")} role="status">
                <span class="toast-check" aria-hidden="true">{"✓"}</span>
                <div>
                    <div class="toast-title">{"Copied to clipboard!"}</div>
                    <div class="toast-detail">{"Email address copied successfully"}</div>
                </div>
            </div>
        },
        ToastVariant::InlineLabel => html! {
            <span class={classes!(class, "toast--inline")} role="status">{"Copied to clipboard"}</span>
        },
    }
}
