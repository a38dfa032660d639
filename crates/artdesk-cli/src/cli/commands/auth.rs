//! Login and logout handlers.

use std::io::{self, BufRead, IsTerminal, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use artdesk_core::{Config, Credentials, Desk, SessionStore};

pub async fn login(
    config: &Config,
    session: Arc<dyn SessionStore>,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => read_password()?,
    };

    let mut desk = Desk::from_config(config, session)?;
    desk.login(Credentials::new(username, password)).await?;

    println!("{}", desk.state().message);
    Ok(())
}

pub fn logout(config: &Config, session: Arc<dyn SessionStore>) -> Result<()> {
    let mut desk = Desk::from_config(config, session)?;
    desk.logout()?;
    println!("{}", desk.state().message);
    Ok(())
}

/// Reads one line from stdin, prompting on stderr when interactive.
fn read_password() -> Result<String> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        io::stderr().flush()?;
    }

    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;

    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("No password given. Pass --password or pipe it on stdin.");
    }
    Ok(password)
}
