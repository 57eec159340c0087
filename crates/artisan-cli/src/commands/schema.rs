// Print the required parameters of every action type

use artisan_shortcuts::ActionSchema;

use super::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;

pub struct SchemaCommand;

impl SchemaCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SchemaCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl Command for SchemaCommand {
    fn render(&self, style: &OutputStyle) -> CliResult<String> {
        let mut lines = vec![style.header(&format!("{:<18} {}", "ACTION", "REQUIRED"))];
        for schema in ActionSchema::all() {
            let required: Vec<&str> = schema.required.iter().map(|field| field.as_str()).collect();
            lines.push(format!(
                "{:<18} {}",
                schema.action_type.as_str(),
                required.join(", ")
            ));
        }
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_row_per_action_type() {
        let output = SchemaCommand::new().render(&OutputStyle::plain()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 10);
        assert!(lines[0].starts_with("ACTION"));
        assert!(lines.contains(&"MinimizeWindow     window_width, window_height"));
        assert!(lines.contains(&"RunShellScript     script"));
    }
}
