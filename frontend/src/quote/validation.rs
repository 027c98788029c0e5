use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::quote::error::ValidationError;
use crate::quote::model::{AddressField, QuoteRequest};
use crate::quote::wizard::Step;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Name,
    Phone,
    Email,
    Address(AddressField),
    ServiceType,
    ServiceDescription,
    Urgency,
}

impl FieldId {
    pub fn label(self) -> &'static str {
        match self {
            FieldId::Name => "Nome Completo",
            FieldId::Phone => "Telefone",
            FieldId::Email => "E-mail",
            FieldId::Address(field) => field.label(),
            FieldId::ServiceType => "Tipo de Serviço",
            FieldId::ServiceDescription => "Detalhamento",
            FieldId::Urgency => "Urgência",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(BTreeSet<FieldId>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn into_result(self, step: Step) -> Result<(), ValidationError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(fields) => Err(ValidationError { step, fields }),
        }
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email.trim())
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Checks the fields a step is responsible for. The review step owns no
/// fields and is always valid.
pub fn validate(step: Step, request: &QuoteRequest) -> ValidationResult {
    let mut missing = BTreeSet::new();

    match step {
        Step::Personal => {
            if blank(&request.name) {
                missing.insert(FieldId::Name);
            }
            if blank(&request.phone) {
                missing.insert(FieldId::Phone);
            }
            if !is_valid_email(&request.email) {
                missing.insert(FieldId::Email);
            }
        }
        Step::Address => {
            for field in AddressField::ALL {
                if blank(request.address.get(field)) {
                    missing.insert(FieldId::Address(field));
                }
            }
        }
        Step::ServiceInfo => {
            if request.service_type.is_none() {
                missing.insert(FieldId::ServiceType);
            }
            if request.wants_description() && blank(&request.service_description) {
                missing.insert(FieldId::ServiceDescription);
            }
            if request.urgency.is_none() {
                missing.insert(FieldId::Urgency);
            }
        }
        Step::Review => {}
    }

    if missing.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(missing)
    }
}
