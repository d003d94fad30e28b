use serde::Deserialize;
use shared_kernel::configuration::config;
use url::Url;

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Self> {
        config::<Settings>()
    }
}
