use anyhow::Context;
use opentelemetry::global;
use opentelemetry::sdk::propagation::BaggagePropagator;
use opentelemetry::sdk::propagation::TextMapCompositePropagator;
use opentelemetry::sdk::propagation::TraceContextPropagator;
use opentelemetry::sdk::trace::{self, Tracer};
use opentelemetry::sdk::Resource;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use serde::Deserialize;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

/// The `telemetry` section of the settings,
/// eg: `APP_TELEMETRY__OTLP_EXPORTER=false` runs without a collector.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TelemetrySettings {
    /// Spans go to the collector named by the `OTEL_EXPORTER_OTLP_*` variables.
    #[serde(default = "default_otlp_exporter")]
    pub otlp_exporter: bool,
    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_otlp_exporter() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            otlp_exporter: default_otlp_exporter(),
            log_level: default_log_level(),
        }
    }
}

/// Logs are written as JSON to stderr, stdout is left to whatever the
/// binary renders.
/// Must be called from within a tokio current-thread runtime.
pub fn config_telemetry(
    service_name: &'static str,
    settings: &TelemetrySettings,
) -> anyhow::Result<()> {
    // Needed to forward ordinary log statements to our tracing subscriber.
    tracing_log::LogTracer::init().context("Failed to initialize log tracer")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .with_context(|| format!("Invalid log level {:?}", settings.log_level))?;
    let otel_layer = otlp_tracer(service_name, settings)?
        .map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    let subscriber = Registry::default()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_thread_names(true)
                .with_writer(std::io::stderr),
        )
        .with(otel_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install `tracing` subscriber")?;

    global::set_text_map_propagator(TextMapCompositePropagator::new(vec![
        Box::new(BaggagePropagator::new()),
        Box::new(TraceContextPropagator::new()),
    ]));
    Ok(())
}

fn otlp_tracer(
    service_name: &'static str,
    settings: &TelemetrySettings,
) -> anyhow::Result<Option<Tracer>> {
    if !settings.otlp_exporter {
        return Ok(None);
    }
    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(opentelemetry_otlp::new_exporter().tonic().with_env())
        .with_trace_config(trace::config().with_resource(Resource::new(vec![
            KeyValue::new("service.name", service_name),
        ])))
        .install_batch(opentelemetry::runtime::TokioCurrentThread)
        .context("Failed to initialize otlp tracer")?;
    Ok(Some(tracer))
}

pub fn shutdown_global_tracer_provider() {
    global::shutdown_tracer_provider();
}

#[cfg(test)]
mod tests {
    use super::{otlp_tracer, TelemetrySettings};
    use serde_json::json;

    #[test]
    fn test_that_missing_telemetry_keys_fall_back_to_defaults() {
        let settings: TelemetrySettings = serde_json::from_value(json!({})).unwrap();

        assert_eq!(settings, TelemetrySettings::default());
        assert!(settings.otlp_exporter);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_that_disabled_exporter_builds_no_tracer() {
        let settings = TelemetrySettings {
            otlp_exporter: false,
            ..Default::default()
        };

        assert!(otlp_tracer("dashboard", &settings).unwrap().is_none());
    }
}
