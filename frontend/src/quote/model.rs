use crate::quote::phone::format_phone;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub neighborhood: String,
    pub city: String,
    pub postal_code: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AddressField {
    Street,
    Number,
    Neighborhood,
    City,
    PostalCode,
}

impl AddressField {
    pub const ALL: [AddressField; 5] = [
        AddressField::Street,
        AddressField::Number,
        AddressField::Neighborhood,
        AddressField::City,
        AddressField::PostalCode,
    ];

    /// Name of the field in the outgoing email.
    pub fn key(self) -> &'static str {
        match self {
            AddressField::Street => "rua",
            AddressField::Number => "numero",
            AddressField::Neighborhood => "bairro",
            AddressField::City => "cidade",
            AddressField::PostalCode => "cep",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AddressField::Street => "Rua",
            AddressField::Number => "Número",
            AddressField::Neighborhood => "Bairro",
            AddressField::City => "Cidade",
            AddressField::PostalCode => "CEP",
        }
    }
}

impl Address {
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Street => &self.street,
            AddressField::Number => &self.number,
            AddressField::Neighborhood => &self.neighborhood,
            AddressField::City => &self.city,
            AddressField::PostalCode => &self.postal_code,
        }
    }

    fn slot(&mut self, field: AddressField) -> &mut String {
        match field {
            AddressField::Street => &mut self.street,
            AddressField::Number => &mut self.number,
            AddressField::Neighborhood => &mut self.neighborhood,
            AddressField::City => &mut self.city,
            AddressField::PostalCode => &mut self.postal_code,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServiceType {
    ResidentialInstallation,
    BuildingInstallation,
    Maintenance,
    Rewiring,
    ShowerAndFaucetInstallation,
    OutletAndSwitchInstallation,
    DistributionBoardAssembly,
    Other,
}

impl ServiceType {
    pub const ALL: [ServiceType; 8] = [
        ServiceType::ResidentialInstallation,
        ServiceType::BuildingInstallation,
        ServiceType::Maintenance,
        ServiceType::Rewiring,
        ServiceType::ShowerAndFaucetInstallation,
        ServiceType::OutletAndSwitchInstallation,
        ServiceType::DistributionBoardAssembly,
        ServiceType::Other,
    ];

    /// Display label, also the value sent in the email.
    pub fn label(self) -> &'static str {
        match self {
            ServiceType::ResidentialInstallation => "Instalação elétrica residencial",
            ServiceType::BuildingInstallation => "Instalação elétrica predial",
            ServiceType::Maintenance => "Manutenção elétrica",
            ServiceType::Rewiring => "Troca de fiação",
            ServiceType::ShowerAndFaucetInstallation => {
                "Instalação de chuveiros e torneiras elétricas"
            }
            ServiceType::OutletAndSwitchInstallation => "Instalação de tomadas e interruptores",
            ServiceType::DistributionBoardAssembly => "Montagem de quadros de distribuição",
            ServiceType::Other => "Outros",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|service| service.label() == label)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Urgency {
    Emergency,
    Urgent,
    Planned,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Emergency, Urgency::Urgent, Urgency::Planned];

    pub fn label(self) -> &'static str {
        match self {
            Urgency::Emergency => "Emergência",
            Urgency::Urgent => "Urgente",
            Urgency::Planned => "Planejado",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|urgency| urgency.label() == label)
    }
}

/// Everything the customer typed into the quote form.
///
/// Treated as a value: [`QuoteRequest::with`] hands back a new record and
/// leaves the old one alone, so whatever the review step shows is exactly
/// what was entered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuoteRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: Address,
    pub service_type: Option<ServiceType>,
    pub service_description: String,
    pub urgency: Option<Urgency>,
    pub service_details: String,
    pub contact_time: String,
    pub referral_source: String,
}

/// One leaf of a [`QuoteRequest`] together with its new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldUpdate {
    Name(String),
    Phone(String),
    Email(String),
    Address(AddressField, String),
    ServiceType(Option<ServiceType>),
    ServiceDescription(String),
    Urgency(Option<Urgency>),
    ServiceDetails(String),
    ContactTime(String),
    ReferralSource(String),
}

impl QuoteRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of `self` with exactly one leaf replaced.
    ///
    /// Picking a service other than "Outros" leaves `service_description`
    /// in place; it is simply not sent.
    pub fn with(&self, update: FieldUpdate) -> QuoteRequest {
        let mut next = self.clone();
        match update {
            FieldUpdate::Name(value) => next.name = value,
            FieldUpdate::Phone(value) => next.phone = format_phone(&value),
            FieldUpdate::Email(value) => next.email = value,
            FieldUpdate::Address(field, value) => *next.address.slot(field) = value,
            FieldUpdate::ServiceType(value) => next.service_type = value,
            FieldUpdate::ServiceDescription(value) => next.service_description = value,
            FieldUpdate::Urgency(value) => next.urgency = value,
            FieldUpdate::ServiceDetails(value) => next.service_details = value,
            FieldUpdate::ContactTime(value) => next.contact_time = value,
            FieldUpdate::ReferralSource(value) => next.referral_source = value,
        }
        next
    }

    pub fn wants_description(&self) -> bool {
        self.service_type == Some(ServiceType::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_replaces_one_leaf_and_keeps_the_original() {
        let before = QuoteRequest::new().with(FieldUpdate::Name("Ana Silva".into()));
        let after = before.with(FieldUpdate::Address(AddressField::City, "Volta Redonda".into()));

        assert_eq!(before.address.city, "");
        assert_eq!(after.address.city, "Volta Redonda");
        assert_eq!(after.name, "Ana Silva");
        assert_eq!(
            Address { city: String::new(), ..after.address.clone() },
            before.address
        );
    }

    #[test]
    fn repeated_identical_writes_are_idempotent() {
        let base = QuoteRequest::new().with(FieldUpdate::Email("ana@example.com".into()));
        let updates = [
            FieldUpdate::Name("Ana".into()),
            FieldUpdate::Phone("24999990000".into()),
            FieldUpdate::Address(AddressField::Street, "Rua A".into()),
            FieldUpdate::ServiceType(Some(ServiceType::Rewiring)),
            FieldUpdate::Urgency(Some(Urgency::Planned)),
        ];

        for update in updates {
            let once = base.with(update.clone());
            let twice = once.with(update);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn phone_is_stored_masked() {
        let request = QuoteRequest::new().with(FieldUpdate::Phone("24999990000".into()));
        assert_eq!(request.phone, "(24) 99999-0000");
    }

    #[test]
    fn leaving_other_keeps_the_description() {
        let request = QuoteRequest::new()
            .with(FieldUpdate::ServiceType(Some(ServiceType::Other)))
            .with(FieldUpdate::ServiceDescription("Trocar disjuntor".into()))
            .with(FieldUpdate::ServiceType(Some(ServiceType::Maintenance)));

        assert_eq!(request.service_description, "Trocar disjuntor");
        assert!(!request.wants_description());
    }

    #[test]
    fn labels_round_trip() {
        for service in ServiceType::ALL {
            assert_eq!(ServiceType::from_label(service.label()), Some(service));
        }
        for urgency in Urgency::ALL {
            assert_eq!(Urgency::from_label(urgency.label()), Some(urgency));
        }
    }
}
