//! Sign-in identity commands.
//!
//! Identity is a narrow config-backed collaborator: `login` records who
//! is at the counter, mutations check for it. There is no credential
//! exchange here.

use crate::config::{Config, UserConfig};
use crate::error::{Result, ShopdeskError};
use crate::forms::validate::is_email_shaped;

/// `shopdesk login <EMAIL> [--manager]`
pub fn cmd_login(email: &str, manager: bool) -> Result<()> {
    if !is_email_shaped(email) {
        return Err(ShopdeskError::InvalidInput(format!(
            "'{}' is not an email address",
            email
        )));
    }

    let mut config = Config::load()?;
    config.user = Some(UserConfig {
        email: email.to_string(),
        manager,
    });
    config.save()?;

    if manager {
        println!("Signed in as {} (manager)", email);
    } else {
        println!("Signed in as {}", email);
    }
    Ok(())
}

/// `shopdesk logout`
pub fn cmd_logout() -> Result<()> {
    let mut config = Config::load()?;
    config.user = None;
    config.save()?;
    println!("Signed out");
    Ok(())
}

/// `shopdesk whoami`
pub fn cmd_whoami() -> Result<()> {
    let config = Config::load()?;
    match config.user {
        Some(user) if user.manager => println!("{} (manager)", user.email),
        Some(user) => println!("{}", user.email),
        None => println!("Not signed in"),
    }
    Ok(())
}
