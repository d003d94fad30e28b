use crate::config::Settings;
use crate::contracts::endpoint;
use crate::errors::AuthFailure;
use crate::session::{BearerToken, Session, UserProfile};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use serde_json::json;
use shared_kernel::http_client::HttpClient;
use shared_kernel::non_empty_string;
use std::collections::HashMap;
use url::Url;

const LOGIN_PATH: &str = "/api/auth/login";
const LOGIN_FAILED: &str = "Login failed";

non_empty_string!(Username);

pub struct Credentials {
    pub username: Username,
    password: Secret<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: Secret<String>) -> Result<Self, AuthFailure> {
        let username = Username::try_from(username.into())
            .map_err(|_| AuthFailure::InvalidInput("Username is required".to_string()))?;
        if password.expose_secret().is_empty() {
            return Err(AuthFailure::InvalidInput("Password is required".to_string()));
        }
        Ok(Self { username, password })
    }

    pub(crate) fn to_json(&self) -> serde_json::Value {
        json!({
            "username": self.username.as_ref(),
            "password": self.password.expose_secret(),
        })
    }
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: BearerToken,
    user: UserProfile,
}

/// Exchanges credentials for a bearer token.
pub struct LoginInteractor {
    client: HttpClient,
    api_base: Url,
}

impl LoginInteractor {
    pub fn new(api_base: Url) -> Self {
        Self {
            client: HttpClient::new(),
            api_base,
        }
    }

    pub fn from_settings() -> anyhow::Result<Self> {
        Ok(Self::new(Settings::parse()?.api.base_url))
    }

    #[tracing::instrument(err, skip_all, fields(username = credentials.username.as_ref()), level = "info")]
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthFailure> {
        let url = endpoint(&self.api_base, LOGIN_PATH).map_err(|source| AuthFailure::InternalError {
            fallback: LOGIN_FAILED,
            source,
        })?;

        let response = self
            .client
            .post_json::<LoginResponse>(url, HashMap::new(), credentials.to_json())
            .await
            .map_err(|err| AuthFailure::from_http(err, LOGIN_FAILED))?;

        Ok(Session {
            token: response.access_token,
            user: response.user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Credentials, LoginInteractor};
    use crate::errors::AuthFailure;
    use httpmock::prelude::*;
    use rstest::rstest;
    use secrecy::Secret;
    use serde_json::json;
    use url::Url;

    fn interactor(server: &MockServer) -> LoginInteractor {
        LoginInteractor::new(Url::parse(&server.base_url()).unwrap())
    }

    fn credentials() -> Credentials {
        Credentials::new("amira@example.com", Secret::new("hunter2".to_string())).unwrap()
    }

    #[tokio::test]
    async fn test_that_login_returns_the_bearer_token_and_user() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/auth/login")
                    .json_body(json!({ "username": "amira@example.com", "password": "hunter2" }));
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({ "access_token": "tok-123", "user": { "id": 7, "username": "amira" } }));
            })
            .await;

        let session = interactor(&server).login(&credentials()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(session.token.expose_secret(), "tok-123");
        assert_eq!(session.user.username, "amira");
    }

    #[tokio::test]
    async fn test_that_server_message_is_shown_on_rejection() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/auth/login");
                then.status(401)
                    .header("content-type", "application/json")
                    .json_body(json!({ "message": "Invalid username or password" }));
            })
            .await;

        let err = interactor(&server).login(&credentials()).await.unwrap_err();

        assert!(matches!(err, AuthFailure::Rejected(_)));
        assert_eq!(err.to_string(), "Invalid username or password");
    }

    #[tokio::test]
    async fn test_that_rejection_without_message_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/auth/login");
                then.status(500).body("Internal Server Error");
            })
            .await;

        let err = interactor(&server).login(&credentials()).await.unwrap_err();

        assert_eq!(err.to_string(), "Login failed");
    }

    #[rstest]
    #[case("", "hunter2", "Username is required")]
    #[case("   ", "hunter2", "Username is required")]
    #[case("amira", "", "Password is required")]
    fn test_that_blank_credentials_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] message: &str,
    ) {
        let result = Credentials::new(username, Secret::new(password.to_string()));

        let Err(err) = result else {
            panic!("expected blank credentials to be rejected");
        };
        assert!(matches!(err, AuthFailure::InvalidInput(_)));
        assert_eq!(err.to_string(), message);
    }
}
