//! # restswitchd: REST switch daemon
//!
//! Composition root that wires the switch to its adapters and runs it.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise logging
//! - Construct the reqwest HTTP client and the minijinja renderer (adapters)
//! - Set up the switch, probing the resource once
//! - Spawn the poller that refreshes the state every scan interval
//! - Build the axum router and serve the control API
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no switch logic belongs here.

mod config;

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use restswitch_adapter_http_axum::state::AppState;
use restswitch_adapter_http_reqwest::ReqwestHttpClient;
use restswitch_adapter_template_minijinja::MiniJinjaRenderer;
use restswitch_app::poller::spawn_poller;
use restswitch_app::switch::RestSwitch;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("cannot load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Adapters
    let http = ReqwestHttpClient::new()?;
    let templates = MiniJinjaRenderer::new();

    // Switch
    let resource = &config.switch.resource;
    let switch = RestSwitch::setup(config.switch.clone(), http, templates)
        .await
        .with_context(|| format!("cannot set up switch for {resource}"))?;
    let switch = Arc::new(switch);

    let poller = spawn_poller(Arc::clone(&switch), config.scan_interval());

    // HTTP
    let app = restswitch_adapter_http_axum::router::build(AppState::new(switch));
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("cannot bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "restswitchd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.abort();
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "cannot listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutting down");
}
