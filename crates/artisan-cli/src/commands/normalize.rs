// Normalize raw key identifiers into a combination

use artisan_shortcuts::normalize_keys;
use tracing::debug;

use super::Command;
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;

/// Print the combination a sequence of held keys normalizes to
pub struct NormalizeCommand {
    keys: Vec<String>,
}

impl NormalizeCommand {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }
}

impl Command for NormalizeCommand {
    fn render(&self, style: &OutputStyle) -> CliResult<String> {
        debug!(keys = ?self.keys, "Normalizing keys");
        let combination = normalize_keys(self.keys.iter().map(String::as_str))
            .ok_or_else(|| CliError::invalid_argument("no usable key was given"))?;
        Ok(style.code(&combination.to_string()))
    }
}
