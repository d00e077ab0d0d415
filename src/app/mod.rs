pub mod api;
pub mod cli;
pub mod config;
mod context;
pub mod ledger;
pub mod workflow;

pub use context::AppContext;
