pub const BUSINESS_NAME: &str = "D.Elétrica";

/// WhatsApp number in international format, digits only.
pub const WHATSAPP_NUMBER: &str = "5524999644077";

pub const WHATSAPP_GREETING: &str = "Olá! Gostaria de solicitar um orçamento.";

/// Seconds the confirmation screen waits before going back home.
pub const REDIRECT_SECONDS: u32 = 10;

/// Identifiers for the EmailJS account that receives quote requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl EmailJsConfig {
    pub fn is_complete(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

#[cfg(debug_assertions)]
pub fn get_emailjs_config() -> EmailJsConfig {
    EmailJsConfig {
        service_id: option_env!("EMAILJS_SERVICE_ID").unwrap_or("service_dev").to_string(),
        template_id: option_env!("EMAILJS_TEMPLATE_ID").unwrap_or("template_dev").to_string(),
        public_key: option_env!("EMAILJS_PUBLIC_KEY").unwrap_or("public_key_dev").to_string(),
    }
}

#[cfg(not(debug_assertions))]
pub fn get_emailjs_config() -> EmailJsConfig {
    EmailJsConfig {
        service_id: option_env!("EMAILJS_SERVICE_ID").unwrap_or_default().to_string(),
        template_id: option_env!("EMAILJS_TEMPLATE_ID").unwrap_or_default().to_string(),
        public_key: option_env!("EMAILJS_PUBLIC_KEY").unwrap_or_default().to_string(),
    }
}

pub fn whatsapp_link() -> String {
    format!(
        "https://wa.me/{}?text={}",
        WHATSAPP_NUMBER,
        urlencoding::encode(WHATSAPP_GREETING)
    )
}
