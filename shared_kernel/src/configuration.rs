use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    config_from_directory(base_path.join("configuration"))
}

/// Reads `base.yaml` (or `test.yaml` in tests) from `configuration_directory`,
/// then lets `APP_`-prefixed environment variables override it,
/// eg: `APP_API__BASE_URL` sets `api.base_url`.
pub fn config_from_directory<Settings: DeserializeOwned>(
    configuration_directory: impl AsRef<Path>,
) -> anyhow::Result<Settings> {
    let file = if cfg!(test) { "test.yaml" } else { "base.yaml" };
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.as_ref().join(file)).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Failed to build configuration")?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}

#[cfg(test)]
mod tests {
    use super::config_from_directory;
    use serde::Deserialize;
    use std::path::PathBuf;

    #[derive(Deserialize, Debug)]
    struct ApiSettings {
        base_url: String,
    }

    #[derive(Deserialize, Debug)]
    struct Settings {
        api: ApiSettings,
    }

    fn configuration_directory() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("configuration")
    }

    #[test]
    fn test_that_settings_are_read_from_the_test_file() {
        let settings = config_from_directory::<Settings>(configuration_directory()).unwrap();
        assert_eq!(settings.api.base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_that_a_missing_directory_fails_on_missing_fields() {
        let result = config_from_directory::<Settings>(configuration_directory().join("missing"));
        assert!(result.is_err());
    }
}
