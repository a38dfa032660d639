//! Full-screen terminal client for artdesk.

pub mod effects;
pub mod events;
pub mod render;
pub mod runtime;
pub mod screens;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};
use std::sync::Arc;

use anyhow::Result;
use artdesk_core::{ApiClient, Config, SessionStore};
pub use runtime::TuiRuntime;

use crate::state::TuiState;

/// Runs the interactive client until the user quits.
///
/// Must be called from within a tokio runtime; actions run on spawned tasks.
///
/// # Errors
/// Returns an error if stderr is not a terminal, the base URL is invalid,
/// or the terminal fails.
pub async fn run_interactive(config: &Config, session: Arc<dyn SessionStore>) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The interactive client requires a terminal.\n\
             Use `artdesk articles list` and friends for non-interactive use."
        );
    }

    let client = ApiClient::from_config(config, Arc::clone(&session))?;
    tracing::info!(base_url = client.base_url(), "starting interactive client");

    let mut runtime = TuiRuntime::new(TuiState::new(session), client)?;
    runtime.run()?;
    drop(runtime);

    writeln!(stderr(), "Bye.")?;
    Ok(())
}
