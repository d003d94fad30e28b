use crate::config::Settings;
use crate::contracts::endpoint;
use crate::errors::SubmissionFailure;
use crate::session::Session;
use serde::Serialize;
use shared_kernel::http_client::HttpClient;
use shared_kernel::non_empty_string;
use url::Url;

const SUGGEST_PATH: &str = "/api/events/suggest";
const SUGGESTION_FAILED: &str = "Failed to submit suggestion";
pub const SUGGESTION_ACCEPTED: &str = "Your suggestion has been submitted for review.";

non_empty_string!(EventName);
non_empty_string!(EventCity);
non_empty_string!(EventLink);

/// Form values as typed by the user. Name, city and link are required.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct EventSuggestion {
    pub name: String,
    pub place: String,
    pub date: String,
    pub price: String,
    pub url: String,
    pub city: String,
}

impl EventSuggestion {
    /// A blank form with the city pre-filled, eg: from the selected governorate.
    pub fn for_city(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), SubmissionFailure> {
        EventName::try_from(self.name.as_str())
            .map_err(|_| SubmissionFailure::InvalidInput("Event name is required".to_string()))?;
        EventCity::try_from(self.city.as_str())
            .map_err(|_| SubmissionFailure::InvalidInput("City is required".to_string()))?;
        EventLink::try_from(self.url.as_str())
            .map_err(|_| SubmissionFailure::InvalidInput("Link is required".to_string()))?;
        Ok(())
    }
}

pub struct SuggestEventInteractor {
    client: HttpClient,
    api_base: Url,
}

impl SuggestEventInteractor {
    pub fn new(api_base: Url) -> Self {
        Self {
            client: HttpClient::new(),
            api_base,
        }
    }

    pub fn from_settings() -> anyhow::Result<Self> {
        Ok(Self::new(Settings::parse()?.api.base_url))
    }

    /// Sends the suggestion for review on behalf of the signed in user.
    /// Nothing is sent when a required field is blank.
    #[tracing::instrument(err, skip(self, session), fields(username = %session.user.username), level = "info")]
    pub async fn suggest(
        &self,
        session: &Session,
        suggestion: &EventSuggestion,
    ) -> Result<&'static str, SubmissionFailure> {
        suggestion.validate()?;

        let url = endpoint(&self.api_base, SUGGEST_PATH).map_err(|source| {
            SubmissionFailure::InternalError {
                fallback: SUGGESTION_FAILED,
                source,
            }
        })?;
        let body = serde_json::to_value(suggestion).map_err(|err| {
            SubmissionFailure::InternalError {
                fallback: SUGGESTION_FAILED,
                source: err.into(),
            }
        })?;

        self.client
            .post_json::<serde_json::Value>(
                url,
                HttpClient::bearer_header(session.token.expose_secret()),
                body,
            )
            .await
            .map_err(|err| SubmissionFailure::from_http(err, SUGGESTION_FAILED))?;

        Ok(SUGGESTION_ACCEPTED)
    }
}
