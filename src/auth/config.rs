/// Token-verification settings. Token issuance lives in a separate auth
/// service; this backend only verifies.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// When set, a bearer token equal to this value plus an `?as=`
    /// query parameter impersonates a principal. Test builds only.
    pub dev_bypass_token: Option<String>,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self {
            jwt_secret: std::env::var("JWT_SECRET")?,
            dev_bypass_token: std::env::var("DEV_BYPASS_TOKEN").ok(),
        })
    }
}
