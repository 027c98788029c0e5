use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::config;

/// Floating click-to-chat button. The "Fale Conosco" hint fades out after a
/// few seconds.
#[function_component(WhatsAppButton)]
pub fn whatsapp_button() -> Html {
    let show_tooltip = use_state(|| true);

    {
        let show_tooltip = show_tooltip.clone();
        use_timeout(move || show_tooltip.set(false), 3_000);
    }

    html! {
        <div class="whatsapp-float">
            <style>
                {r#"
                    .whatsapp-float {
                        position: fixed;
                        bottom: 1.5rem;
                        right: 1.5rem;
                        display: flex;
                        align-items: center;
                        gap: 0.75rem;
                        z-index: 50;
                    }
                    .whatsapp-tooltip {
                        background: #fff;
                        color: #1f2937;
                        padding: 0.5rem 0.9rem;
                        border-radius: 8px;
                        box-shadow: 0 4px 12px rgba(0, 0, 0, 0.15);
                        transition: opacity 0.5s ease-in-out;
                    }
                    .whatsapp-tooltip.hidden { opacity: 0; }
                    .whatsapp-link {
                        display: flex;
                        align-items: center;
                        justify-content: center;
                        width: 60px;
                        height: 60px;
                        border-radius: 50%;
                        background: #25d366;
                        box-shadow: 0 6px 16px rgba(0, 0, 0, 0.25);
                    }
                    .whatsapp-link img { width: 34px; height: 34px; }
                "#}
            </style>
            <span class={classes!("whatsapp-tooltip", (!*show_tooltip).then(|| "hidden"))}>
                {"Fale Conosco"}
            </span>
            <a class="whatsapp-link" href={config::whatsapp_link()} target="_blank" rel="noreferrer">
                <img src="https://upload.wikimedia.org/wikipedia/commons/6/6b/WhatsApp.svg" alt="WhatsApp" />
            </a>
        </div>
    }
}
