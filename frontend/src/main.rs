use yew::prelude::*;
use yew_router::prelude::*;
use log::{info, Level};
use web_sys::{window, MouseEvent};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

mod config;
mod components {
    pub mod notification;
    pub mod whatsapp;
}
mod pages {
    pub mod landing;
    pub mod quote;
}
mod quote {
    pub mod countdown;
    pub mod dispatch;
    pub mod error;
    pub mod model;
    pub mod notify;
    pub mod phone;
    pub mod submission;
    pub mod validation;
    pub mod wizard;
}

use components::notification::{ToastAction, ToastStack, Toasts};
use pages::{landing::Landing, quote::QuotePage};
use quote::notify::Notice;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/orcamento")]
    Quote,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Home page");
            html! { <Landing /> }
        },
        Route::Quote => {
            info!("Rendering Quote page");
            html! { <QuotePage /> }
        },
        Route::NotFound => {
            info!("Unknown route, showing home");
            html! { <Redirect<Route> to={Route::Home} /> }
        },
    }
}

/// Locks page scrolling while the mobile menu covers the screen.
fn set_scroll_locked(locked: bool) {
    let body = window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        let overflow = if locked { "hidden" } else { "" };
        let _ = body.style().set_property("overflow", overflow);
    }
}

const NAV_SECTIONS: &[(&str, &str)] = &[
    ("/#hero", "Início"),
    ("/#services", "Serviços"),
    ("/#about", "Sobre"),
    ("/#contact", "Contato"),
];

#[function_component(Nav)]
pub fn nav() -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);

    {
        let is_scrolled = is_scrolled.clone();
        use_effect_with_deps(move |_| {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            let scroll_callback = Closure::wrap(Box::new(move || {
                let scroll_top = document.document_element().map(|e| e.scroll_top()).unwrap_or(0);
                is_scrolled.set(scroll_top > 80);
            }) as Box<dyn FnMut()>);

            window.add_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref())
                .unwrap();

            move || {
                window.remove_event_listener_with_callback("scroll", scroll_callback.as_ref().unchecked_ref())
                    .unwrap();
            }
        }, ());
    }

    {
        use_effect_with_deps(move |open| {
            set_scroll_locked(*open);
            || set_scroll_locked(false)
        }, *menu_open);
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            menu_open.set(!*menu_open);
        })
    };

    let close_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |_: MouseEvent| {
            menu_open.set(false);
        })
    };

    let menu_class = if *menu_open {
        "nav-right mobile-menu-open"
    } else {
        "nav-right"
    };

    html! {
        <nav class={classes!("top-nav", (*is_scrolled).then(|| "scrolled"))}>
            <style>
                {r#"
                    .top-nav {
                        position: fixed;
                        top: 0;
                        left: 0;
                        width: 100%;
                        z-index: 40;
                        color: #fff;
                        background: linear-gradient(to right, #1d4ed8, #1e3a8a);
                        transition: box-shadow 0.3s ease;
                    }
                    .top-nav.scrolled { box-shadow: 0 4px 16px rgba(0, 0, 0, 0.3); }
                    .nav-content {
                        display: flex;
                        justify-content: space-between;
                        align-items: center;
                        padding: 1rem 2rem;
                    }
                    .nav-logo { color: #fff; font-size: 1.8rem; font-weight: bold; text-decoration: none; }
                    .nav-right { display: flex; gap: 2rem; align-items: center; }
                    .nav-link { color: #fff; text-decoration: none; }
                    .nav-link:hover { color: #facc15; }
                    .nav-quote-button { background: #facc15; color: #1e3a8a; padding: 0.5rem 1rem; border-radius: 999px; text-decoration: none; font-weight: bold; }
                    .burger-menu { display: none; background: none; border: none; flex-direction: column; gap: 4px; }
                    .burger-menu span { width: 24px; height: 3px; background: #fff; display: block; }
                    @media (max-width: 768px) {
                        .burger-menu { display: flex; }
                        .nav-right { display: none; }
                        .nav-right.mobile-menu-open {
                            display: flex;
                            flex-direction: column;
                            position: fixed;
                            top: 64px;
                            left: 0;
                            width: 100%;
                            height: calc(100vh - 64px);
                            padding-top: 2rem;
                            background: #1e3a8a;
                        }
                    }
                "#}
            </style>
            <div class="nav-content">
                <Link<Route> to={Route::Home} classes="nav-logo">
                    {config::BUSINESS_NAME}
                </Link<Route>>

                <button class="burger-menu" onclick={toggle_menu}>
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <div class={menu_class}>
                    { for NAV_SECTIONS.iter().map(|(href, label)| html! {
                        <a href={*href} class="nav-link" onclick={close_menu.clone()}>{*label}</a>
                    }) }
                    <div onclick={close_menu.clone()}>
                        <Link<Route> to={Route::Quote} classes="nav-quote-button">
                            {"Orçamento"}
                        </Link<Route>>
                    </div>
                </div>
            </div>
        </nav>
    }
}

#[function_component]
fn App() -> Html {
    let toasts = use_reducer(Toasts::default);

    let notify = {
        let toasts = toasts.clone();
        Callback::from(move |notice: Notice| toasts.dispatch(ToastAction::Push(notice)))
    };
    let dismiss = {
        let toasts = toasts.clone();
        Callback::from(move |id: u32| toasts.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <ContextProvider<Callback<Notice>> context={notify}>
            <BrowserRouter>
                <Nav />
                <Switch<Route> render={switch} />
            </BrowserRouter>
            <ToastStack entries={toasts.entries.clone()} on_dismiss={dismiss} />
        </ContextProvider<Callback<Notice>>>
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
