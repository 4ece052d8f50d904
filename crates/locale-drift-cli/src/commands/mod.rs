//! CLI command implementations.

mod clean;
mod common;
mod export;
mod generate;
mod init;

pub use clean::{CleanArgs, run_clean};
pub use common::ConfigArgs;
pub use export::{ExportArgs, run_export};
pub use generate::{GenerateArgs, run_generate};
pub use init::{InitArgs, run_init};
