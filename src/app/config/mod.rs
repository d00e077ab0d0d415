//! Filesystem and environment backed configuration loaders.
//!
//! Pure schema parsing lives in `domain::config` and `domain::seed`; this
//! module owns locating files and reading the process environment.

mod load_config;
mod load_seed;

pub use load_config::{load_config, load_config_with};
pub use load_seed::load_proposals;
