use crate::config::Settings;
use crate::contracts::endpoint;
use crate::contracts::login::Credentials;
use crate::errors::AuthFailure;
use shared_kernel::http_client::HttpClient;
use std::collections::HashMap;
use url::Url;

const REGISTER_PATH: &str = "/api/auth/register";
const REGISTRATION_FAILED: &str = "Registration failed";
pub const REGISTRATION_SUCCEEDED: &str = "Account created successfully! Please login.";

pub struct RegisterInteractor {
    client: HttpClient,
    api_base: Url,
}

impl RegisterInteractor {
    pub fn new(api_base: Url) -> Self {
        Self {
            client: HttpClient::new(),
            api_base,
        }
    }

    pub fn from_settings() -> anyhow::Result<Self> {
        Ok(Self::new(Settings::parse()?.api.base_url))
    }

    /// Creates the account. The user still has to log in afterwards.
    #[tracing::instrument(err, skip_all, fields(username = credentials.username.as_ref()), level = "info")]
    pub async fn register(&self, credentials: &Credentials) -> Result<&'static str, AuthFailure> {
        let url = endpoint(&self.api_base, REGISTER_PATH).map_err(|source| {
            AuthFailure::InternalError {
                fallback: REGISTRATION_FAILED,
                source,
            }
        })?;

        self.client
            .post_json::<serde_json::Value>(url, HashMap::new(), credentials.to_json())
            .await
            .map_err(|err| AuthFailure::from_http(err, REGISTRATION_FAILED))?;

        Ok(REGISTRATION_SUCCEEDED)
    }
}
