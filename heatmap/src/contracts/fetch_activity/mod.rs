use crate::config::Settings;
use crate::data_transfer::{ActivityLookup, ActivityRecord};
use anyhow::{anyhow, Context};
use serde::Deserialize;
use shared_kernel::http_client::HttpClient;
use thiserror::Error;
use url::Url;

const HEATMAP_PATH: &str = "/api/heatmap/";

#[derive(Error, Debug)]
pub enum FetchActivityError {
    #[error("Activity data unavailable")]
    DataUnavailable(#[source] anyhow::Error),
}

#[derive(Deserialize, Debug)]
struct HeatmapApiResponse {
    success: bool,
    #[serde(default)]
    data: Vec<ActivityRecord>,
}

/// Issues a single request for the current per-governorate activity.
/// There is no retry: a failed fetch stays failed until the next load.
#[derive(Clone)]
pub struct ActivityFetcher {
    client: HttpClient,
    api_base: Url,
}

impl ActivityFetcher {
    pub fn new(api_base: Url) -> Self {
        Self {
            client: HttpClient::new(),
            api_base,
        }
    }

    pub fn from_settings() -> anyhow::Result<Self> {
        let settings = Settings::parse()?;
        Ok(Self::new(settings.api.base_url))
    }

    fn generate_url(&self) -> anyhow::Result<Url> {
        let host = self.api_base.as_str().trim_end_matches('/');
        Url::parse(&format!("{host}{HEATMAP_PATH}")).context("Failed to parse heatmap url")
    }

    #[tracing::instrument(err, skip(self), level = "info")]
    pub async fn fetch(&self) -> Result<ActivityLookup, FetchActivityError> {
        let url = self
            .generate_url()
            .map_err(FetchActivityError::DataUnavailable)?;

        let response = self
            .client
            .get_json::<HeatmapApiResponse>(url)
            .await
            .map_err(|err| FetchActivityError::DataUnavailable(err.into()))?;

        if !response.success {
            return Err(FetchActivityError::DataUnavailable(anyhow!(
                "Heatmap api reported an unsuccessful response"
            )));
        }

        Ok(ActivityLookup::from_records(response.data))
    }
}
