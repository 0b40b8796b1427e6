pub mod gateway;
pub mod webhook;

/// Payment-gateway settings read from the environment, following the
/// pattern of [`crate::auth::config`].
#[derive(Clone, Debug)]
pub struct PaymentsConfig {
    pub secret_key: String,
    pub webhook_secret: String,
    pub client_url: String,
    pub api_base: String,
}

impl PaymentsConfig {
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self {
            secret_key: std::env::var("PAYMENT_SECRET_KEY")?,
            webhook_secret: std::env::var("PAYMENT_WEBHOOK_SECRET")?,
            client_url: std::env::var("CLIENT_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            api_base: std::env::var("PAYMENT_API_BASE")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
        })
    }
}
