//! `login`, `logout` and `whoami`.

use clap::ValueEnum;
use log::info;
use reelboard_lib::auth::Actor;

use super::App;
use crate::error::CliError;

/// Whose session `logout` ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogoutTarget {
    Admin,
    Creator,
    All,
}

pub async fn login(app: &App, actor: Actor, email: &str, password: &str) -> Result<(), CliError> {
    let token = app.auth.session(actor).login(email, password).await?;
    match token.expires_at {
        Some(at) => println!("Signed in as {} <{}>, session valid until {}", actor, email, at.format("%Y-%m-%d %H:%M UTC")),
        None => println!("Signed in as {} <{}>", actor, email),
    }
    Ok(())
}

pub async fn logout(app: &App, target: LogoutTarget) -> Result<(), CliError> {
    match target {
        LogoutTarget::Admin => app.auth.admin().logout().await?,
        LogoutTarget::Creator => app.auth.creator().logout().await?,
        LogoutTarget::All => app.auth.logout_all().await?,
    }
    println!("Signed out");
    Ok(())
}

pub async fn whoami(app: &App, actor: Actor) -> Result<(), CliError> {
    let session = app.auth.session(actor);
    if session.restore().await?.is_none() {
        println!("Not signed in as {}", actor);
        return Ok(());
    }

    let profile = session.profile().await?;
    println!("{} {} <{}>", actor, profile.name, profile.email);
    println!("id: {}", profile.id);
    if let Some(at) = session.current().await.and_then(|t| t.expires_at) {
        info!("{} token expires at {}", actor, at);
        println!("session valid until {}", at.format("%Y-%m-%d %H:%M UTC"));
    }
    Ok(())
}
