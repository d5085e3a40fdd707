//! Configuration commands for managing turnos settings.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print a single value
//! - `config set`: Set a configuration value

use owo_colors::OwoColorize;

use crate::config::Config;
use crate::error::{Result, TurnosError};

/// Validate a config key, suggesting dot notation for underscore slips
fn validate_config_key(key: &str) -> Result<&str> {
    if key.contains('.') {
        return Ok(key);
    }
    if let Some(pos) = key.find('_') {
        let dot_version = format!("{}.{}", &key[..pos], &key[pos + 1..]);
        return Err(TurnosError::Config(format!(
            "invalid config key '{key}'. Use dot notation: '{dot_version}'"
        )));
    }
    Err(TurnosError::Config(format!(
        "invalid config key '{key}'. Use dot notation, e.g. 'store.url'"
    )))
}

/// Mask a sensitive value by showing only the first 2 and last 2 characters
fn mask_sensitive_value(value: &str) -> String {
    let char_count = value.chars().count();
    if char_count > 4 {
        let first: String = value.chars().take(2).collect();
        let last: String = value.chars().skip(char_count - 2).collect();
        format!("{first}...{last}")
    } else {
        "****".to_string()
    }
}

/// Show current configuration
pub fn cmd_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".cyan().bold());
    println!();

    println!("{}:", "store".cyan());
    println!(
        "  url: {}",
        config.store.url.as_deref().unwrap_or("(not set)")
    );
    match config.store.api_key.as_deref() {
        Some(key) => println!("  api_key: {}", mask_sensitive_value(key)),
        None => println!("  api_key: (not set)"),
    }
    println!("  table: {}", config.store.table);
    println!("  timeout: {}s", config.store.timeout);
    println!();

    println!("{}:", "display".cyan());
    println!("  business_name: {}", config.display.business_name);
    println!("  refresh_secs: {}", config.display.refresh_secs);
    println!("  hide_delay_secs: {}", config.display.hide_delay_secs);
    println!("  snapshot_limit: {}", config.display.snapshot_limit);
    println!();

    println!("{}:", "speech".cyan());
    println!("  enabled: {}", config.speech.enabled);
    println!("  command: {}", config.speech.command);
    println!("  voice: {}", config.speech.voice);
    println!("  rate: {}", config.speech.rate);
    println!();

    println!(
        "{}: {}",
        "config_file".cyan(),
        Config::config_path().display()
    );

    Ok(())
}

/// Print a single configuration value
pub fn cmd_config_get(key: &str) -> Result<()> {
    let key = validate_config_key(key)?;
    let config = Config::load()?;
    let value = config.get(key)?;
    if key == "store.api_key" && !value.is_empty() {
        println!("{}", mask_sensitive_value(&value));
    } else {
        println!("{value}");
    }
    Ok(())
}

/// Set a configuration value and persist it
pub fn cmd_config_set(key: &str, value: &str) -> Result<()> {
    let key = validate_config_key(key)?;
    let mut config = Config::load().unwrap_or_default();
    config.set(key, value)?;
    config.save()?;
    println!("{} {key} = {value}", "set".green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_config_key_accepts_dotted() {
        assert_eq!(validate_config_key("store.url").unwrap(), "store.url");
        assert_eq!(
            validate_config_key("display.refresh_secs").unwrap(),
            "display.refresh_secs"
        );
    }

    #[test]
    fn test_validate_config_key_suggests_dot_notation() {
        let err = validate_config_key("store_url").unwrap_err();
        assert!(err.to_string().contains("store.url"));
    }

    #[test]
    fn test_validate_config_key_rejects_bare_word() {
        assert!(validate_config_key("url").is_err());
    }

    #[test]
    fn test_mask_sensitive_value() {
        assert_eq!(mask_sensitive_value("sk_live_abc123"), "sk...23");
        assert_eq!(mask_sensitive_value("abcd"), "****");
        assert_eq!(mask_sensitive_value(""), "****");
    }
}
