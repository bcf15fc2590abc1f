pub mod api_error;
pub mod config;
pub mod middleware;
pub mod model;
pub mod routes;
pub mod state;
pub mod telemetry;

use axum::extract::Request;
use axum::{Router, ServiceExt};
use clap::Parser;
use config::*;
use dotenvy::dotenv;
use miette::{IntoDiagnostic, miette};
use model::{GeminiModel, TextModel};
use state::*;
use std::env;
use tower::Layer;
use tower_http::normalize_path::NormalizePath;

use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "fixmyspelling.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let config = initialize()?;
    if config.model.api_key.is_empty() {
        error!(target: "fixmyspelling::server", "model.api_key is empty; every request will fail");
    }
    let model = GeminiModel::new(&config.model)?;
    info!(target: "fixmyspelling::server", model = %config.model.model, "Starting server on {}", config.core.listen_addr);
    let listener = TcpListener::bind(&config.core.listen_addr)
        .await
        .into_diagnostic()?;
    let app = app(AppState::new(config, model));
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .await
        .into_diagnostic()?;
    Ok(())
}

/// The router with all middleware applied.
///
/// Trailing slashes are trimmed before routing, so that layer wraps the
/// router instead of being added with `Router::layer`.
pub fn app<M: TextModel>(state: AppState<M>) -> NormalizePath<Router> {
    let timeout = state.cfg().core.request_timeout();

    // The first layer is the innermost.
    let router = Router::new()
        .merge(routes::router::<M>())
        .layer(middleware::cors_layer())
        .layer(middleware::timeout_layer(timeout))
        .layer(middleware::propagate_request_id_layer())
        .layer(telemetry::trace_layer())
        .layer(middleware::request_id_layer())
        .with_state(state);

    middleware::normalize_path_layer().layer(router)
}

pub fn initialize() -> miette::Result<Config> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .color(true)
                .context_lines(5)
                .tab_width(2)
                .break_words(true)
                .build(),
        )
    }))
    .map_err(|e| miette!("Failed to set miette hook: {}", e))?;
    miette::set_panic_hook();
    dotenv().ok();
    telemetry::setup_tracing();
    let cli = Cli::parse();
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            error!(target: "fixmyspelling::server", "{}", e);
            let fallback = env::var("FIXMYSPELLING_CONFIG").map_err(|_| {
                miette!(
                    "Either set FIXMYSPELLING_CONFIG to the path to your config file, pass --config FILE, or create fixmyspelling.toml in the working directory."
                )
            })?;
            Config::load(&fallback)?
        }
    };
    Ok(config)
}
