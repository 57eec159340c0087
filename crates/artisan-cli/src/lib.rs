// Shortcut Artisan CLI Library

pub mod commands;
pub mod error;
pub mod output;
pub mod router;

pub use error::{CliError, CliResult};
pub use router::{Cli, CommandRouter, Commands};
