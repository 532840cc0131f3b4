//! CLI command implementations.

mod build;
mod config;
mod inspect;
mod verify;

pub use build::run_build;
pub use config::run_config;
pub use inspect::run_inspect;
pub use verify::run_verify;
