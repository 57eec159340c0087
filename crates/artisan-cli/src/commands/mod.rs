// Command handlers for the artisan CLI

pub mod check;
pub mod normalize;
pub mod schema;

pub use check::CheckCommand;
pub use normalize::NormalizeCommand;
pub use schema::SchemaCommand;

use crate::error::CliResult;
use crate::output::OutputStyle;

/// Trait for command handlers
pub trait Command {
    /// Produce the command's output
    fn render(&self, style: &OutputStyle) -> CliResult<String>;

    /// Execute the command
    fn execute(&self) -> CliResult<()> {
        let output = self.render(&OutputStyle::default())?;
        println!("{}", output);
        Ok(())
    }
}
