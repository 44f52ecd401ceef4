use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{
    tonic_types::{metadata::MetadataMap, transport::ClientTlsConfig},
    WithExportConfig, WithTonicConfig,
};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const SERVICE_NAME: &str = "leadline";

/// Keep the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Runtime for the OTLP gRPC exporters. Tonic spawns onto the ambient Tokio
/// runtime, which is not guaranteed inside the `dioxus::serve` closure.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Exporter connection settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
struct ExportTarget {
    endpoint: String,
    ingestion_key: Option<String>,
}

impl ExportTarget {
    fn from_env() -> Option<Self> {
        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok()?;
        let ingestion_key = std::env::var("SIGNOZ_INGESTION_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        Some(Self {
            endpoint,
            ingestion_key,
        })
    }

    fn tls(&self) -> Option<ClientTlsConfig> {
        self.endpoint
            .starts_with("https://")
            .then(|| ClientTlsConfig::new().with_native_roots())
    }

    fn metadata(&self) -> Option<MetadataMap> {
        let key = self.ingestion_key.as_deref()?;
        let mut metadata = MetadataMap::new();
        match key.parse() {
            Ok(value) => {
                metadata.insert("signoz-ingestion-key", value);
                Some(metadata)
            }
            Err(_) => {
                eprintln!("SIGNOZ_INGESTION_KEY is not a valid header value, ignoring it");
                None
            }
        }
    }
}

/// Configure OTLP trace and log export and register them globally.
///
/// Dioxus owns the tracing subscriber; this only sets up exporters so the
/// spans from `OtelTraceLayer` and `log` records reach the collector.
///
/// Reads config from environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address; unset disables export
///   - `OTEL_SERVICE_NAME`: service name tag (default `leadline`)
///   - `SIGNOZ_INGESTION_KEY`: cloud access token (optional for local)
///   - `DEPLOY_ENV`: deployment environment tag (default `development`)
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    let Some(target) = ExportTarget::from_env() else {
        eprintln!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return;
    };

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| SERVICE_NAME.to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    let Some(rt) = otel_runtime() else {
        return;
    };
    let _guard = rt.enter();

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let mut span_builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&target.endpoint);
    if let Some(tls) = target.tls() {
        span_builder = span_builder.with_tls_config(tls);
    }
    if let Some(metadata) = target.metadata() {
        span_builder = span_builder.with_metadata(metadata);
    }
    let span_exporter = match span_builder.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            eprintln!("Failed to create OTLP span exporter: {e}");
            return;
        }
    };

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(provider);

    let mut log_builder = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&target.endpoint);
    if let Some(tls) = target.tls() {
        log_builder = log_builder.with_tls_config(tls);
    }
    if let Some(metadata) = target.metadata() {
        log_builder = log_builder.with_metadata(metadata);
    }
    let log_exporter = match log_builder.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            eprintln!("Failed to create OTLP log exporter, exporting traces only: {e}");
            return;
        }
    };

    let logger_provider = LOGGER_PROVIDER.get_or_init(|| {
        opentelemetry_sdk::logs::SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    // The `log` bridge is independent of the Dioxus tracing subscriber.
    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => log::set_max_level(log::LevelFilter::Info),
        Err(_) => eprintln!("Log bridge skipped, a logger is already set"),
    }

    let mode = if target.ingestion_key.is_some() {
        "cloud"
    } else {
        "local"
    };
    eprintln!(
        "Telemetry initialized v{APP_VERSION}, exporting to {} ({mode})",
        target.endpoint
    );
}

fn otel_runtime() -> Option<&'static tokio::runtime::Runtime> {
    if let Some(rt) = OTEL_RUNTIME.get() {
        return Some(rt);
    }
    match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(1)
        .build()
    {
        Ok(rt) => Some(OTEL_RUNTIME.get_or_init(|| rt)),
        Err(e) => {
            eprintln!("Failed to start telemetry runtime: {e}");
            None
        }
    }
}

/// Span name for a request: method plus the path with any trailing
/// numeric segment stripped, so ids do not explode span cardinality.
fn span_name(method: &str, path: &str) -> String {
    let route = path.trim_end_matches(|c: char| c.is_ascii_digit());
    format!("{method} {route}")
}

/// Classify the caller from User-Agent, or an explicit X-Client-Platform
/// header sent by native builds.
fn detect_platform(ua: &str, explicit: Option<&str>) -> &'static str {
    if let Some(p) = explicit {
        return match p {
            "ios" => "ios",
            "android" => "android",
            "desktop" => "desktop",
            "mobile" => "mobile",
            "web" => "web",
            _ => "unknown",
        };
    }

    if ua.is_empty() || ua == "unknown" {
        "native"
    } else if ua.contains("iPhone") || ua.contains("iPad") {
        "ios"
    } else if ua.contains("Android") {
        "android"
    } else if ua.contains("Mozilla") {
        "web"
    } else {
        "native"
    }
}

fn header<'a>(req: &'a Request<Body>, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Tower layer that opens an OpenTelemetry server span per HTTP request.
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer(SERVICE_NAME);
        let method = req.method().to_string();
        let path = req.uri().path().to_string();
        let user_agent = header(&req, "user-agent").unwrap_or("unknown").to_string();
        let platform = detect_platform(&user_agent, header(&req, "x-client-platform"));
        let request_id = header(&req, "x-request-id").unwrap_or("").to_string();

        let span = tracer
            .span_builder(span_name(&method, &path))
            .with_kind(SpanKind::Server)
            .with_attributes(vec![
                KeyValue::new("http.method", method),
                KeyValue::new("http.target", path),
                KeyValue::new("http.user_agent", user_agent),
                KeyValue::new("client.platform", platform),
                KeyValue::new("http.request_id", request_id),
            ])
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));
            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}
