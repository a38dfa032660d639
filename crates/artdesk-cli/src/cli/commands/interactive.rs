//! Default mode: the full-screen client.

use std::sync::Arc;

use anyhow::Result;
use artdesk_core::{Config, SessionStore};

#[cfg(feature = "tui")]
pub async fn run(config: &Config, session: Arc<dyn SessionStore>) -> Result<()> {
    artdesk_tui::run_interactive(config, session).await
}

#[cfg(not(feature = "tui"))]
pub async fn run(_config: &Config, _session: Arc<dyn SessionStore>) -> Result<()> {
    anyhow::bail!(
        "This build has no interactive client.\n\
         Use `artdesk articles list` and friends instead."
    )
}
