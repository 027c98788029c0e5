use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::quote::notify::{Notice, NoticeLevel};

const TOAST_MILLIS: u32 = 5_000;
const MAX_TOASTS: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct ToastEntry {
    pub id: u32,
    pub notice: Notice,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Toasts {
    next_id: u32,
    pub entries: Vec<ToastEntry>,
}

pub enum ToastAction {
    Push(Notice),
    Dismiss(u32),
}

impl Reducible for Toasts {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: ToastAction) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(notice) => {
                next.entries.push(ToastEntry { id: next.next_id, notice });
                next.next_id = next.next_id.wrapping_add(1);
                if next.entries.len() > MAX_TOASTS {
                    let overflow = next.entries.len() - MAX_TOASTS;
                    next.entries.drain(..overflow);
                }
            }
            ToastAction::Dismiss(id) => next.entries.retain(|entry| entry.id != id),
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
struct ToastProps {
    entry: ToastEntry,
    on_dismiss: Callback<u32>,
}

#[function_component(Toast)]
fn toast(props: &ToastProps) -> Html {
    let id = props.entry.id;

    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |id| {
                let id = *id;
                let timeout = Timeout::new(TOAST_MILLIS, move || on_dismiss.emit(id));
                // Dropping the timeout on unmount cancels it.
                move || drop(timeout)
            },
            id,
        );
    }

    let close = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    let level_class = match props.entry.notice.level {
        NoticeLevel::Info => "toast-info",
        NoticeLevel::Error => "toast-error",
    };

    html! {
        <div class={classes!("toast", level_class)} role="status">
            <span>{&props.entry.notice.text}</span>
            <button class="toast-close" onclick={close}>{"✕"}</button>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastStackProps {
    pub entries: Vec<ToastEntry>,
    pub on_dismiss: Callback<u32>,
}

/// Stack of transient notices in the corner of the page.
#[function_component(ToastStack)]
pub fn toast_stack(props: &ToastStackProps) -> Html {
    html! {
        <div class="toast-stack">
            <style>
                {r#"
                    .toast-stack {
                        position: fixed;
                        top: 1rem;
                        right: 1rem;
                        display: flex;
                        flex-direction: column;
                        gap: 0.5rem;
                        z-index: 100;
                        max-width: 360px;
                    }
                    .toast {
                        display: flex;
                        align-items: flex-start;
                        justify-content: space-between;
                        gap: 1rem;
                        padding: 0.9rem 1rem;
                        border-radius: 8px;
                        color: #fff;
                        box-shadow: 0 8px 24px rgba(0, 0, 0, 0.2);
                        animation: toastIn 0.3s ease-out;
                    }
                    .toast-info { background: #15803d; }
                    .toast-error { background: #b91c1c; }
                    .toast-close {
                        background: none;
                        border: none;
                        color: inherit;
                        cursor: pointer;
                    }
                    @keyframes toastIn {
                        from { transform: translateY(-20px); opacity: 0; }
                        to { transform: translateY(0); opacity: 1; }
                    }
                "#}
            </style>
            { for props.entries.iter().map(|entry| html! {
                <Toast key={entry.id} entry={entry.clone()} on_dismiss={props.on_dismiss.clone()} />
            }) }
        </div>
    }
}
