//! Application configuration loading from `shield-vote.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::config::CONFIG_FILE;
use crate::domain::{AppConfig, AppError};

/// Load configuration from `path` (or `shield-vote.toml` in the working
/// directory) and apply `SHIELD_VOTE_*` environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, AppError> {
    load_config_with(path, |name| std::env::var(name).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
///
/// An explicitly given path must exist. The default file is optional and
/// built-in defaults apply when it is absent. Relative paths inside the file
/// are resolved against the file's directory.
pub fn load_config_with<F>(path: Option<&Path>, lookup: F) -> Result<AppConfig, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    let (config_path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(CONFIG_FILE), false),
    };

    let mut config = if config_path.is_file() {
        let content = fs::read_to_string(&config_path)?;
        let mut config = AppConfig::parse(&content).map_err(|err| match err {
            AppError::TomlParseError(e) => AppError::ParseError {
                what: config_path.display().to_string(),
                details: e.to_string(),
            },
            other => other,
        })?;
        if let Some(base) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            resolve_relative_paths(&mut config, base);
        }
        config
    } else if explicit {
        return Err(AppError::config_error(format!(
            "Config file not found: {}",
            config_path.display()
        )));
    } else {
        AppConfig::default()
    };

    config.apply_env_overrides(lookup)?;
    config.validate()?;
    Ok(config)
}

fn resolve_relative_paths(config: &mut AppConfig, base: &Path) {
    if config.ledger.journal_path.is_relative() {
        config.ledger.journal_path = base.join(&config.ledger.journal_path);
    }
    if let Some(seed) = config.proposals.seed_path.as_mut().filter(|p| p.is_relative()) {
        *seed = base.join(&*seed);
    }
}
