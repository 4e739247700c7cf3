use anyhow::Result;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::runtime::Tokio;
use opentelemetry_sdk::trace::TracerProvider;
use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::metrics;

const SERVICE_NAME: &str = "listings-api";

pub struct Observability {
    pub registry: Registry,
    tracer_provider: Option<TracerProvider>,
}

impl Observability {
    /// Install the tracing subscriber and build the metrics registry.
    ///
    /// Spans are exported over OTLP only when `OTEL_EXPORTER_OTLP_ENDPOINT`
    /// is set. Must be called from inside the tokio runtime.
    pub fn init() -> Result<Self> {
        let registry = metrics::new_registry("listings")?;

        let tracer_provider = match std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
            Ok(endpoint) if !endpoint.trim().is_empty() => {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_tonic()
                    .with_endpoint(endpoint)
                    .build()?;

                Some(
                    TracerProvider::builder()
                        .with_batch_exporter(exporter, Tokio)
                        .with_resource(opentelemetry_sdk::Resource::new(vec![KeyValue::new(
                            "service.name",
                            SERVICE_NAME,
                        )]))
                        .build(),
                )
            }
            _ => None,
        };

        let otel_layer = tracer_provider
            .as_ref()
            .map(|provider| tracing_opentelemetry::layer().with_tracer(provider.tracer(SERVICE_NAME)));

        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "listings_api=debug,tower_http=debug".into());

        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .with(otel_layer)
            .init();

        if tracer_provider.is_some() {
            tracing::info!("Observability stack initialized (Prometheus + OTLP span export)");
        } else {
            tracing::info!("Observability stack initialized (Prometheus, span export disabled)");
        }
        Ok(Self {
            registry,
            tracer_provider,
        })
    }

    /// Flush any pending spans
    pub fn shutdown(self) {
        if let Some(provider) = self.tracer_provider {
            if let Err(err) = provider.shutdown() {
                tracing::warn!(error = %err, "failed to flush span exporter");
            }
        }
    }
}
