use std::fs;

use crate::domain::seed::{default_proposals, parse_seed};
use crate::domain::{AppError, Proposal, ProposalsConfig};

/// Load proposals from the configured seed file, or the embedded seed.
pub fn load_proposals(config: &ProposalsConfig) -> Result<Vec<Proposal>, AppError> {
    let Some(path) = config.seed_path.as_deref() else {
        return default_proposals();
    };

    let content = fs::read_to_string(path).map_err(|e| {
        AppError::config_error(format!("Failed to read seed file {}: {}", path.display(), e))
    })?;
    parse_seed(&content).map_err(|err| match err {
        AppError::TomlParseError(e) => {
            AppError::ParseError { what: path.display().to_string(), details: e.to_string() }
        }
        other => other,
    })
}
