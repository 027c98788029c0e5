use std::collections::BTreeMap;

use futures::future::{FutureExt, LocalBoxFuture};
use gloo_net::http::Request;
use log::{info, warn};
use serde::Serialize;

use crate::config::EmailJsConfig;
use crate::quote::error::SubmitError;
use crate::quote::model::{AddressField, QuoteRequest};

const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Flat `name -> value` view of a quote, in the shape the email template
/// expects.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DispatchMessage(BTreeMap<&'static str, String>);

impl DispatchMessage {
    pub fn from_request(request: &QuoteRequest) -> Self {
        let mut params = BTreeMap::new();
        params.insert("nome", request.name.clone());
        params.insert("telefone", request.phone.clone());
        params.insert("email", request.email.clone());
        for field in AddressField::ALL {
            params.insert(field.key(), request.address.get(field).to_string());
        }
        params.insert(
            "tipoServico",
            request.service_type.map(|s| s.label().to_string()).unwrap_or_default(),
        );
        if request.wants_description() && !request.service_description.trim().is_empty() {
            params.insert("descricao", request.service_description.clone());
        }
        params.insert(
            "urgencia",
            request.urgency.map(|u| u.label().to_string()).unwrap_or_default(),
        );
        params.insert("detalhesServico", request.service_details.clone());
        params.insert("horarioContato", request.contact_time.clone());
        params.insert("comoConheceu", request.referral_source.clone());
        DispatchMessage(params)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn insert(&mut self, key: &'static str, value: String) {
        self.0.insert(key, value);
    }
}

/// Delivers a finished quote to the business.
pub trait EmailDispatcher {
    fn send(&self, message: DispatchMessage) -> LocalBoxFuture<'static, Result<(), SubmitError>>;
}

#[derive(Serialize)]
struct EmailJsSendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    template_params: DispatchMessage,
}

/// Sends quotes through the EmailJS REST endpoint.
#[derive(Clone, Debug)]
pub struct EmailJsDispatcher {
    config: EmailJsConfig,
}

impl EmailJsDispatcher {
    pub fn new(config: EmailJsConfig) -> Self {
        Self { config }
    }
}

impl EmailDispatcher for EmailJsDispatcher {
    fn send(&self, mut message: DispatchMessage) -> LocalBoxFuture<'static, Result<(), SubmitError>> {
        let config = self.config.clone();
        async move {
            if !config.is_complete() {
                warn!("EmailJS identifiers are missing, refusing to send");
                return Err(SubmitError::Unconfigured);
            }

            message.insert(
                "dataEnvio",
                chrono::Local::now().format("%d/%m/%Y %H:%M").to_string(),
            );
            let body = EmailJsSendRequest {
                service_id: config.service_id,
                template_id: config.template_id,
                user_id: config.public_key,
                template_params: message,
            };

            let response = Request::post(EMAILJS_SEND_URL).json(&body)?.send().await?;
            if response.ok() {
                info!("Quote delivered to EmailJS");
                Ok(())
            } else {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                gloo_console::error!(format!("EmailJS rejected the quote: {} {}", status, body));
                Err(SubmitError::Rejected { status, body })
            }
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::model::{FieldUpdate, ServiceType, Urgency};

    fn ana() -> QuoteRequest {
        let request = QuoteRequest::new()
            .with(FieldUpdate::Name("Ana Silva".into()))
            .with(FieldUpdate::Phone("(24) 99999-0000".into()))
            .with(FieldUpdate::Email("ana@example.com".into()))
            .with(FieldUpdate::ServiceType(Some(ServiceType::Maintenance)))
            .with(FieldUpdate::Urgency(Some(Urgency::Urgent)));
        AddressField::ALL.into_iter().fold(request, |acc, field| {
            acc.with(FieldUpdate::Address(field, format!("{} 1", field.label())))
        })
    }

    #[test]
    fn every_field_is_sent_by_name() {
        let message = DispatchMessage::from_request(&ana());

        assert_eq!(message.get("nome"), Some("Ana Silva"));
        assert_eq!(message.get("telefone"), Some("(24) 99999-0000"));
        assert_eq!(message.get("email"), Some("ana@example.com"));
        assert_eq!(message.get("rua"), Some("Rua 1"));
        assert_eq!(message.get("cep"), Some("CEP 1"));
        assert_eq!(message.get("tipoServico"), Some("Manutenção elétrica"));
        assert_eq!(message.get("urgencia"), Some("Urgente"));
        assert_eq!(message.get("detalhesServico"), Some(""));
        assert!(!message.contains("descricao"));
        assert_eq!(message.len(), 13);
    }

    #[test]
    fn description_only_travels_with_other() {
        let stale = ana()
            .with(FieldUpdate::ServiceType(Some(ServiceType::Other)))
            .with(FieldUpdate::ServiceDescription("Interfone".into()))
            .with(FieldUpdate::ServiceType(Some(ServiceType::Rewiring)));
        assert!(!DispatchMessage::from_request(&stale).contains("descricao"));

        let other = stale.with(FieldUpdate::ServiceType(Some(ServiceType::Other)));
        assert_eq!(
            DispatchMessage::from_request(&other).get("descricao"),
            Some("Interfone")
        );

        let blank = other.with(FieldUpdate::ServiceDescription("  ".into()));
        assert!(!DispatchMessage::from_request(&blank).contains("descricao"));
    }

    #[test]
    fn serializes_as_a_flat_object() {
        let value = serde_json::to_value(DispatchMessage::from_request(&ana())).unwrap();
        assert_eq!(value["nome"], "Ana Silva");
        assert_eq!(value["bairro"], "Bairro 1");
    }

    #[test]
    fn unconfigured_dispatcher_refuses() {
        let dispatcher = EmailJsDispatcher::new(EmailJsConfig {
            service_id: String::new(),
            template_id: "template".into(),
            public_key: "key".into(),
        });
        let outcome = futures::executor::block_on(dispatcher.send(DispatchMessage::default()));
        assert_eq!(outcome, Err(SubmitError::Unconfigured));
    }
}
