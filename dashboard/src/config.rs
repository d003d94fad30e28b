use heatmap::config::ApiSettings;
use serde::Deserialize;
use shared_kernel::configuration::config;
use shared_kernel::tracing::TelemetrySettings;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Self> {
        config::<Settings>()
    }
}
