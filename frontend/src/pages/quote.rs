use std::collections::BTreeSet;
use std::rc::Rc;

use log::{error, info};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::whatsapp::WhatsAppButton;
use crate::config;
use crate::quote::countdown::{start_countdown, ActiveCountdown, GlooHandle, GlooTimers};
use crate::quote::dispatch::EmailJsDispatcher;
use crate::quote::error::SubmitError;
use crate::quote::model::{AddressField, FieldUpdate, ServiceType, Urgency};
use crate::quote::notify::{Notice, Notifier};
use crate::quote::phone::PHONE_PLACEHOLDER;
use crate::quote::submission::{SubmissionCoordinator, SubmitOutcome};
use crate::quote::validation::FieldId;
use crate::quote::wizard::{Step, Wizard, WizardState};
use crate::Route;

pub enum Msg {
    Update(FieldUpdate),
    Next,
    Back,
    Submit,
    SubmitFinished(Result<(), SubmitError>),
    Tick(u32),
}

#[derive(Properties, PartialEq)]
pub struct QuoteWizardProps {
    pub notify: Callback<Notice>,
}

pub struct QuoteWizard {
    wizard: Wizard,
    coordinator: SubmissionCoordinator<EmailJsDispatcher>,
    countdown: Option<ActiveCountdown<GlooHandle>>,
    seconds_left: u32,
    invalid: BTreeSet<FieldId>,
}

impl Component for QuoteWizard {
    type Message = Msg;
    type Properties = QuoteWizardProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            wizard: Wizard::new(),
            coordinator: SubmissionCoordinator::new(EmailJsDispatcher::new(
                config::get_emailjs_config(),
            )),
            countdown: None,
            seconds_left: config::REDIRECT_SECONDS,
            invalid: BTreeSet::new(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let notifier: &dyn Notifier = &ctx.props().notify;
        match msg {
            Msg::Update(update) => {
                if self.wizard.update(update) {
                    self.invalid.clear();
                    true
                } else {
                    false
                }
            }
            Msg::Next => {
                match self.wizard.next() {
                    Ok(_) => self.invalid.clear(),
                    Err(err) => {
                        notifier.notify(Notice::error(format!(
                            "{} ({})",
                            err,
                            err.field_labels().join(", ")
                        )));
                        self.invalid = err.fields;
                    }
                }
                scroll_to_top();
                true
            }
            Msg::Back => {
                self.invalid.clear();
                self.wizard.back();
                scroll_to_top();
                true
            }
            Msg::Submit => match self.coordinator.start(&mut self.wizard, notifier) {
                Some(delivery) => {
                    ctx.link()
                        .send_future(async move { Msg::SubmitFinished(delivery.await) });
                    true
                }
                None => false,
            },
            Msg::SubmitFinished(outcome) => {
                if self.coordinator.finish(&mut self.wizard, outcome, notifier)
                    == SubmitOutcome::Delivered
                {
                    self.start_countdown(ctx);
                }
                true
            }
            Msg::Tick(seconds) => {
                self.seconds_left = seconds;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let body = match self.wizard.state() {
            WizardState::Step(Step::Personal) => self.personal_step(ctx),
            WizardState::Step(Step::Address) => self.address_step(ctx),
            WizardState::Step(Step::ServiceInfo) => self.service_step(ctx),
            WizardState::Step(Step::Review) | WizardState::Submitting => self.review_step(),
            WizardState::Submitted => return self.confirmation(),
        };

        html! {
            <div class="wizard-card">
                { self.progress() }
                <form onsubmit={ctx.link().callback(|e: SubmitEvent| {
                    e.prevent_default();
                    Msg::Submit
                })}>
                    { body }
                    { self.buttons(ctx) }
                </form>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let Some(countdown) = self.countdown.take() {
            countdown.cancel();
        }
    }
}

impl QuoteWizard {
    fn start_countdown(&mut self, ctx: &Context<Self>) {
        let Some(navigator) = ctx.link().navigator() else {
            error!("Quote wizard mounted outside a router, cannot redirect");
            return;
        };
        let tick = ctx.link().callback(Msg::Tick);
        self.seconds_left = config::REDIRECT_SECONDS;
        self.countdown = Some(start_countdown(
            &GlooTimers,
            config::REDIRECT_SECONDS,
            move |seconds| tick.emit(seconds),
            Rc::new(navigator),
        ));
        info!("Redirecting home in {} seconds", config::REDIRECT_SECONDS);
    }

    fn field_class(&self, field: Option<FieldId>) -> Classes {
        let invalid = field.map_or(false, |field| self.invalid.contains(&field));
        classes!("field", invalid.then(|| "field-error"))
    }

    /// A labelled `<input>`. `field` is set for required fields so they can be
    /// highlighted after a rejected step.
    #[allow(clippy::too_many_arguments)]
    fn text_field<F>(
        &self,
        ctx: &Context<Self>,
        label: &'static str,
        field: Option<FieldId>,
        input_type: &'static str,
        value: &str,
        placeholder: &'static str,
        make: F,
    ) -> Html
    where
        F: Fn(String) -> FieldUpdate + 'static,
    {
        let oninput = ctx.link().callback(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            Msg::Update(make(input.value()))
        });
        html! {
            <div class={self.field_class(field)}>
                <label>{label}</label>
                <input type={input_type} value={value.to_string()} {placeholder} {oninput} />
            </div>
        }
    }

    fn progress(&self) -> Html {
        let current = match self.wizard.state() {
            WizardState::Step(step) => step.number(),
            _ => Step::Review.number(),
        };
        html! {
            <ol class="wizard-progress">
                { for Step::ALL.iter().map(|step| {
                    let class = classes!(
                        "wizard-progress-step",
                        (step.number() == current).then(|| "current"),
                        (step.number() < current).then(|| "done"),
                    );
                    html! { <li {class}>{format!("{}. {}", step.number(), step.title())}</li> }
                }) }
            </ol>
        }
    }

    fn personal_step(&self, ctx: &Context<Self>) -> Html {
        let request = self.wizard.request();
        html! {
            <div>
                <h2>{Step::Personal.title()}</h2>
                { self.text_field(ctx, FieldId::Name.label(), Some(FieldId::Name), "text", &request.name, "", FieldUpdate::Name) }
                { self.text_field(ctx, FieldId::Phone.label(), Some(FieldId::Phone), "tel", &request.phone, PHONE_PLACEHOLDER, FieldUpdate::Phone) }
                { self.text_field(ctx, FieldId::Email.label(), Some(FieldId::Email), "email", &request.email, "voce@exemplo.com", FieldUpdate::Email) }
            </div>
        }
    }

    fn address_step(&self, ctx: &Context<Self>) -> Html {
        let address = &self.wizard.request().address;
        html! {
            <div>
                <h2>{Step::Address.title()}</h2>
                { for AddressField::ALL.into_iter().map(|field| {
                    self.text_field(
                        ctx,
                        field.label(),
                        Some(FieldId::Address(field)),
                        "text",
                        address.get(field),
                        "",
                        move |value| FieldUpdate::Address(field, value),
                    )
                }) }
            </div>
        }
    }

    fn service_step(&self, ctx: &Context<Self>) -> Html {
        let request = self.wizard.request();

        let on_service = ctx.link().callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::Update(FieldUpdate::ServiceType(ServiceType::from_label(&select.value())))
        });
        let on_urgency = ctx.link().callback(|e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            Msg::Update(FieldUpdate::Urgency(Urgency::from_label(&select.value())))
        });
        let textarea = |make: fn(String) -> FieldUpdate| {
            ctx.link().callback(move |e: InputEvent| {
                let area: HtmlTextAreaElement = e.target_unchecked_into();
                Msg::Update(make(area.value()))
            })
        };

        let selected_service = request.service_type;
        let selected_urgency = request.urgency;

        html! {
            <div>
                <h2>{Step::ServiceInfo.title()}</h2>
                <div class={self.field_class(Some(FieldId::ServiceType))}>
                    <label>{"Selecione o Serviço"}</label>
                    <select onchange={on_service}>
                        <option value="" selected={selected_service.is_none()}>{"Selecione"}</option>
                        { for ServiceType::ALL.iter().map(|service| html! {
                            <option value={service.label()} selected={selected_service == Some(*service)}>
                                {service.label()}
                            </option>
                        }) }
                    </select>
                </div>
                if request.wants_description() {
                    <div class={self.field_class(Some(FieldId::ServiceDescription))}>
                        <label>{FieldId::ServiceDescription.label()}</label>
                        <textarea
                            rows="3"
                            value={request.service_description.clone()}
                            oninput={textarea(FieldUpdate::ServiceDescription)}
                        />
                    </div>
                }
                <div class={self.field_class(Some(FieldId::Urgency))}>
                    <label>{"Selecione a Urgência"}</label>
                    <select onchange={on_urgency}>
                        <option value="" selected={selected_urgency.is_none()}>{"Selecione"}</option>
                        { for Urgency::ALL.iter().map(|urgency| html! {
                            <option value={urgency.label()} selected={selected_urgency == Some(*urgency)}>
                                {urgency.label()}
                            </option>
                        }) }
                    </select>
                </div>
                <div class={self.field_class(None)}>
                    <label>{"Detalhes do serviço (opcional)"}</label>
                    <textarea
                        rows="3"
                        value={request.service_details.clone()}
                        oninput={textarea(FieldUpdate::ServiceDetails)}
                    />
                </div>
                { self.text_field(ctx, "Melhor horário para contato (opcional)", None, "text", &request.contact_time, "Ex.: manhã, após as 18h", FieldUpdate::ContactTime) }
                { self.text_field(ctx, "Como nos conheceu? (opcional)", None, "text", &request.referral_source, "Ex.: indicação, Instagram", FieldUpdate::ReferralSource) }
            </div>
        }
    }

    fn review_step(&self) -> Html {
        let request = self.wizard.request();
        let row = |label: &str, value: &str| {
            html! {
                <div class="review-row">
                    <dt>{label.to_string()}</dt>
                    <dd>{if value.trim().is_empty() { "—".to_string() } else { value.to_string() }}</dd>
                </div>
            }
        };

        html! {
            <div>
                <h2>{Step::Review.title()}</h2>
                <dl class="review-list">
                    { row(FieldId::Name.label(), &request.name) }
                    { row(FieldId::Phone.label(), &request.phone) }
                    { row(FieldId::Email.label(), &request.email) }
                    { for AddressField::ALL.into_iter().map(|field| row(field.label(), request.address.get(field))) }
                    { row(FieldId::ServiceType.label(), request.service_type.map(ServiceType::label).unwrap_or_default()) }
                    if request.wants_description() {
                        { row(FieldId::ServiceDescription.label(), &request.service_description) }
                    }
                    { row(FieldId::Urgency.label(), request.urgency.map(Urgency::label).unwrap_or_default()) }
                    { row("Detalhes", &request.service_details) }
                    { row("Horário para contato", &request.contact_time) }
                    { row("Como nos conheceu", &request.referral_source) }
                </dl>
            </div>
        }
    }

    fn buttons(&self, ctx: &Context<Self>) -> Html {
        let state = self.wizard.state();
        let submitting = self.wizard.is_submitting();
        let can_go_back = state.step().and_then(Step::previous).is_some();
        let on_review = matches!(state, WizardState::Step(Step::Review)) || submitting;

        html! {
            <div class="wizard-buttons">
                if can_go_back {
                    <button type="button" class="button-back" onclick={ctx.link().callback(|_| Msg::Back)}>
                        {"Voltar"}
                    </button>
                }
                if on_review {
                    <button type="submit" class="button-submit" disabled={submitting}>
                        if submitting {
                            <span class="loading-spinner"></span>{" Enviando..."}
                        } else {
                            {"Enviar"}
                        }
                    </button>
                } else {
                    <button type="button" class="button-next" onclick={ctx.link().callback(|_| Msg::Next)}>
                        {"Próximo"}
                    </button>
                }
            </div>
        }
    }

    fn confirmation(&self) -> Html {
        html! {
            <div class="wizard-card confirmation">
                <h2>{"Solicitação enviada!"}</h2>
                <p>{"Obrigado pelo contato. Nossa equipe retornará em breve."}</p>
                <p class="countdown">
                    {format!("Você será redirecionado para a página inicial em {} segundos.", self.seconds_left)}
                </p>
                <Link<Route> to={Route::Home} classes="button-next">
                    {"Voltar agora"}
                </Link<Route>>
            </div>
        }
    }
}

fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

#[function_component(QuotePage)]
pub fn quote_page() -> Html {
    let notify = use_context::<Callback<Notice>>().unwrap_or_else(|| {
        Callback::from(|notice: Notice| info!("Notice without a toast stack: {}", notice.text))
    });

    html! {
        <div class="quote-page">
            <style>
                {r#"
                    .quote-page {
                        min-height: 100vh;
                        display: flex;
                        flex-direction: column;
                        align-items: center;
                        padding: 6rem 1rem 3rem;
                        background: linear-gradient(to right, #1d4ed8, #1e3a8a);
                    }
                    .quote-page > h1 { color: #fff; margin-bottom: 1.5rem; text-align: center; }
                    .wizard-card {
                        background: #fff;
                        color: #111827;
                        width: 100%;
                        max-width: 42rem;
                        padding: 1.5rem;
                        border-radius: 12px;
                        box-shadow: 0 10px 30px rgba(0, 0, 0, 0.25);
                    }
                    .wizard-progress {
                        display: flex;
                        justify-content: space-between;
                        list-style: none;
                        padding: 0;
                        margin-bottom: 1.5rem;
                        font-size: 0.85rem;
                        color: #9ca3af;
                    }
                    .wizard-progress-step.current { color: #1d4ed8; font-weight: bold; }
                    .wizard-progress-step.done { color: #15803d; }
                    .field { margin-bottom: 1rem; display: flex; flex-direction: column; }
                    .field label { font-weight: 500; margin-bottom: 0.25rem; }
                    .field input, .field select, .field textarea {
                        padding: 0.6rem;
                        border: 1px solid #d1d5db;
                        border-radius: 6px;
                    }
                    .field-error input, .field-error select, .field-error textarea { border-color: #dc2626; }
                    .review-row { display: flex; justify-content: space-between; padding: 0.4rem 0; border-bottom: 1px solid #f3f4f6; }
                    .review-row dt { font-weight: 500; }
                    .wizard-buttons { display: flex; justify-content: space-between; margin-top: 1.5rem; }
                    .button-back { background: #d1d5db; color: #374151; padding: 0.5rem 1rem; border-radius: 6px; border: none; }
                    .button-next { background: #2563eb; color: #fff; padding: 0.5rem 1rem; border-radius: 6px; border: none; margin-left: auto; text-decoration: none; }
                    .button-submit { background: #16a34a; color: #fff; padding: 0.5rem 1rem; border-radius: 6px; border: none; margin-left: auto; }
                    .button-submit:disabled { opacity: 0.6; cursor: wait; }
                    .loading-spinner {
                        display: inline-block;
                        width: 14px;
                        height: 14px;
                        border: 2px solid rgba(255,255,255,.3);
                        border-radius: 50%;
                        border-top-color: #fff;
                        animation: spin 1s ease-in-out infinite;
                    }
                    @keyframes spin { to { transform: rotate(360deg); } }
                    .confirmation { text-align: center; }
                    .confirmation .countdown { margin: 1.5rem 0; font-weight: bold; }
                "#}
            </style>
            <h1>{"Solicite seu Orçamento"}</h1>
            <QuoteWizard {notify} />
            <WhatsAppButton />
        </div>
    }
}
