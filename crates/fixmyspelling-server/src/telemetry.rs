use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set. Otherwise debug builds log at `debug` and release
/// builds at `info`.
pub fn setup_tracing() {
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };
    let env_filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "{default_level},{}={default_level},fixmyspelling={default_level},tower_http={default_level},hyper=info,reqwest=info",
            env!("CARGO_PKG_NAME").replace('-', "_"),
        )
        .into()
    });
    tracing_subscriber::registry()
        .with(env_filter_layer)
        .with(fmt::layer().pretty())
        .init();
}

/// Returns a `TraceLayer` for HTTP requests and responses.
pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}
