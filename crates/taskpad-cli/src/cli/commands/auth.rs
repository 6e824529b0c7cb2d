//! Account and session command handlers.

use std::io::BufRead;

use anyhow::{Context, Result};
use taskpad_core::api::ApiClient;
use taskpad_core::session::SessionManager;

pub async fn register(
    client: &ApiClient,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = resolve_password(password)?;
    let user = client
        .register(username, &password)
        .await
        .context("register account")?;
    println!("Created account '{}' (id {})", user.username, user.id);
    println!("Run `taskpad login {}` to start a session.", user.username);
    Ok(())
}

pub async fn login(
    session: &mut SessionManager,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = resolve_password(password)?;
    let user = session.login(username, &password).await.context("login")?;
    println!("Logged in as '{}' (id {})", user.username, user.id);
    Ok(())
}

pub fn logout(session: &mut SessionManager) -> Result<()> {
    let had_session = session.logout().context("logout")?;
    if had_session {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub async fn whoami(session: &mut SessionManager) -> Result<()> {
    session.bootstrap().await.context("restore session")?;
    match session.current_user() {
        Some(user) => {
            println!("{} (id {})", user.username, user.id);
            Ok(())
        }
        None => anyhow::bail!("Not logged in."),
    }
}

/// Password from the flag, or the first line of stdin.
fn resolve_password(flag: Option<String>) -> Result<String> {
    if let Some(password) = flag {
        return Ok(password);
    }

    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read password from stdin")?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    anyhow::ensure!(!password.is_empty(), "Password must not be empty");
    Ok(password)
}
