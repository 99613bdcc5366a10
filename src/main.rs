use crate::api::HttpDirectoryApi;
use crate::app::App;
use crate::config::AppConfig;
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app;
mod config;
mod domain;
mod errors;
mod filters;
mod forms;
mod map;
mod query;
mod responses;
mod router;
mod templates;
mod view;

#[cfg(test)]
mod tests;

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("directory_web=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 1️⃣ Configuration
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration failed: {e}");
            std::process::exit(1);
        }
    };

    // 2️⃣ Directory API client
    let api = match HttpDirectoryApi::new(&config.api) {
        Ok(api) => api,
        Err(e) => {
            error!("API client setup failed: {e}");
            std::process::exit(1);
        }
    };

    let addr: SocketAddr = match config.server.bind.parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!(bind = %config.server.bind, "Invalid bind address: {e}");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    info!(api = %config.api.base_url, "Starting server at http://{addr}");
    let server = Server::bind(&addr).max_workers(config.server.max_workers);
    let app = App::new(config, Arc::new(api));

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => {
            warn!(error = %err, "request failed");
            templates::html_error_response(err)
        }
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
