//! Env helpers shared by the config loaders.

use std::env;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Loads `path` into the process env, or `.env` from the working directory when `path` is None.
/// A missing default `.env` is not an error.
pub fn load_env_file(path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load env file {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }
    Ok(())
}

/// Non-empty value of `name`, trimmed.
pub(crate) fn var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Comma-separated list; blank entries are dropped.
pub(crate) fn list(name: &str) -> Vec<String> {
    var(name)
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Parsed value of `name`, `default` when unset. A value that does not parse is an error.
pub(crate) fn parsed<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("{} has invalid value {:?}: {}", name, raw, e)),
        None => Ok(default),
    }
}

/// `true` only for a case-insensitive "true"; `default` when unset.
pub(crate) fn flag(name: &str, default: bool) -> bool {
    var(name)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
