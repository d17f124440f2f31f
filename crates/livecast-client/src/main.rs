//! livecast capture binary.
//!
//! Loads `livecast.yaml`, builds the configured callback chain, and runs one
//! broadcast session against the room's live endpoint.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use livecast_client::callbacks::{factory, BroadcastCallback};
use livecast_client::config;
use livecast_client::session::BroadcastSession;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("livecast.yaml").expect("config load failed");
    let room = Arc::new(cfg.room.clone());

    let mut chain = factory::create(&cfg.capture.handler, &cfg, Arc::clone(&room))
        .expect("capture.handler must name an available chain");
    tracing::info!(
        room = room.room_id,
        handler = chain.alias(),
        "starting broadcast session"
    );

    let session = BroadcastSession::new(&cfg.session, room);
    match session.connect_and_run(&mut chain).await {
        Ok(outcome) => tracing::info!(?outcome, "session finished"),
        Err(e) => {
            tracing::error!(error = %e, "session failed");
            std::process::exit(1);
        }
    }
}
