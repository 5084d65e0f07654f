use std::env;
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticket_server::catalogue::Catalogue;
use ticket_server::config::ServerConfig;
use ticket_server::engine::ReservationEngine;
use ticket_server::server;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = match ServerConfig::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("ticket-server: {err}");
            eprintln!("usage: ticket-server -f <events file> [-p <port>] [-t <timeout>]");
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ticket_server=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let catalogue = match Catalogue::load(&config.events_file) {
        Ok(catalogue) => catalogue,
        Err(err) => {
            eprintln!(
                "ticket-server: cannot load {}: {err}",
                config.events_file.display()
            );
            return ExitCode::FAILURE;
        }
    };
    info!(events = catalogue.len(), "catalogue loaded");

    let engine = ReservationEngine::new(catalogue, config.timeout);
    if let Err(err) = server::run(engine, config.port).await {
        eprintln!("ticket-server: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
