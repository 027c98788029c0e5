use std::collections::BTreeSet;

use thiserror::Error;

use crate::quote::validation::FieldId;
use crate::quote::wizard::Step;

/// A step refused to advance because some of its fields are missing or
/// malformed. Always fixable by the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Preencha os campos obrigatórios da etapa {}: {}", .step.number(), .step.title())]
pub struct ValidationError {
    pub step: Step,
    pub fields: BTreeSet<FieldId>,
}

impl ValidationError {
    pub fn field_labels(&self) -> Vec<&'static str> {
        self.fields.iter().map(|field| field.label()).collect()
    }
}

/// Delivery of a finished quote failed. The record is kept so the user can
/// retry from the review step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("falha de rede ao enviar a solicitação: {0}")]
    Request(String),
    #[error("o serviço de e-mail recusou a solicitação (status {status}): {body}")]
    Rejected { status: u16, body: String },
    #[error("o envio de e-mails não está configurado")]
    Unconfigured,
}

impl From<gloo_net::Error> for SubmitError {
    fn from(err: gloo_net::Error) -> Self {
        SubmitError::Request(err.to_string())
    }
}
