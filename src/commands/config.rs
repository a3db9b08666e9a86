//! Configuration commands.

use owo_colors::OwoColorize;
use serde_json::json;

use crate::config::Config;
use crate::error::{Result, ShopdeskError};

const VALID_KEYS: &[&str] = &["shop_name", "poll_interval"];

fn invalid_key(key: &str) -> ShopdeskError {
    ShopdeskError::Config(format!(
        "unknown config key '{}'. Valid keys: {}",
        key,
        VALID_KEYS.join(", ")
    ))
}

/// `shopdesk config show`
pub fn cmd_config_show(output_json: bool) -> Result<()> {
    let config = Config::load()?;

    if output_json {
        let output = json!({
            "shop_name": config.shop_name,
            "poll_interval": config.poll_interval,
            "user": config.user.as_ref().map(|u| json!({
                "email": u.email,
                "manager": u.manager,
            })),
            "config_file": Config::config_path().to_string_lossy(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "Configuration:".cyan().bold());
    println!("  shop_name: {}", config.shop_name);
    println!("  poll_interval: {}", config.poll_interval);
    match config.user {
        Some(ref user) if user.manager => println!("  user: {} (manager)", user.email),
        Some(ref user) => println!("  user: {}", user.email),
        None => println!("  user: {}", "not signed in".dimmed()),
    }
    Ok(())
}

/// `shopdesk config get <KEY>`
pub fn cmd_config_get(key: &str) -> Result<()> {
    let config = Config::load()?;
    match key {
        "shop_name" => println!("{}", config.shop_name),
        "poll_interval" => println!("{}", config.poll_interval),
        _ => return Err(invalid_key(key)),
    }
    Ok(())
}

/// `shopdesk config set <KEY> <VALUE>`
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    match key {
        "shop_name" => config.shop_name = value.to_string(),
        "poll_interval" => {
            config.poll_interval = value.parse().map_err(|_| {
                ShopdeskError::Config(format!("poll_interval must be a number, got '{}'", value))
            })?;
        }
        _ => return Err(invalid_key(key)),
    }
    config.save()?;
    println!("Set {} = {}", key, value);
    Ok(())
}
