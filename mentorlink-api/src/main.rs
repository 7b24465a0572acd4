//! MentorLink API - mentorship platform backend
//!
//! Serves the pairing, feedback, upvote-ledger and degree-recommendation
//! operations over HTTP. Identity and token issuance are handled by an
//! upstream service; see `auth.rs` for the boundary.

use anyhow::Result;
use clap::Parser;
use mentorlink_api::{build_router, AppState};
use mentorlink_common::config;
use mentorlink_common::db::init_database;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mentorlink-api", about = "MentorLink backend service")]
struct Cli {
    /// Data folder holding mentorlink.db (overrides env and config file)
    #[arg(long)]
    data_dir: Option<String>,

    /// Bind host (overrides config file)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config file)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting MentorLink API v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let data_dir = config::resolve_data_dir(cli.data_dir.as_deref());
    let db_path = config::database_path(&data_dir);
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path).await?;

    let mut server = config::load_server_config();
    if let Some(host) = cli.host {
        server.host = host;
    }
    if let Some(port) = cli.port {
        server.port = port;
    }

    let state = AppState::new(pool);
    let app = build_router(state);

    let bind_addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("mentorlink-api listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
