//! Checker configuration loading

use std::path::Path;

use anyhow::{Context, Result};
use watertight_config::CheckerConfig;

/// Load the checker configuration.
///
/// Starts from the JSON file when given (missing keys keep their defaults),
/// then applies environment overrides.
pub fn load(path: Option<&Path>) -> Result<CheckerConfig> {
    let base = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            parse(&text).with_context(|| format!("parsing config {}", path.display()))?
        }
        None => CheckerConfig::default(),
    };
    Ok(base.with_env_overrides(|key| std::env::var(key).ok()))
}

fn parse(text: &str) -> Result<CheckerConfig> {
    let config: CheckerConfig = serde_json::from_str(text)?;
    if !config.orientation_tolerance.is_finite() || config.orientation_tolerance < 0.0 {
        anyhow::bail!(
            "orientation_tolerance must be a non-negative number, got {}",
            config.orientation_tolerance
        );
    }
    Ok(config)
}
