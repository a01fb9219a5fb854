//! `maklink run` — the long-lived bridge.

use std::sync::Arc;

use tracing::info;

use maklink_core::{Host, PlatformProtocol};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::host::TracingHost;

pub async fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let (client, poll_interval) = super::build_client(global)?;

    let host: Arc<dyn Host> = Arc::new(TracingHost);
    let protocol = PlatformProtocol::new(client, host, poll_interval);

    protocol.start();
    info!("bridge running, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;

    info!("shutting down");
    protocol.stop().await;
    Ok(())
}
