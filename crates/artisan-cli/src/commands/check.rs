// Run a shortcut through the submission gate

use artisan_shortcuts::{ActionType, KeyCapture, KeyCombination, ParameterField, ShortcutDraft};
use tracing::debug;

use super::Command;
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;

/// Build a draft from command line values and print its payload
///
/// Every validation failure is reported at once. Malformed arguments (an
/// unparsable combination, an unknown action type or parameter) are
/// reported before the draft is checked.
pub struct CheckCommand {
    keys: Option<String>,
    name: Option<String>,
    description: Option<String>,
    action: String,
    params: Vec<String>,
}

impl CheckCommand {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            keys: None,
            name: None,
            description: None,
            action: action.into(),
            params: Vec::new(),
        }
    }

    pub fn with_keys(mut self, keys: Option<String>) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_name(mut self, name: Option<String>) -> Self {
        self.name = name;
        self
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn with_params(mut self, params: Vec<String>) -> Self {
        self.params = params;
        self
    }

    fn build_draft(&self) -> CliResult<ShortcutDraft> {
        let mut draft = ShortcutDraft::new();

        if let Some(keys) = self.keys.as_deref().filter(|keys| !keys.trim().is_empty()) {
            let combination: KeyCombination = keys
                .parse()
                .map_err(|err| CliError::invalid_argument(format!("{}", err)))?;
            draft.capture = KeyCapture::from_combination(&combination);
        }
        draft.name = self.name.clone().unwrap_or_default();
        draft.description = self.description.clone().unwrap_or_default();

        let action_type: ActionType = self.action.parse().map_err(CliError::invalid_argument)?;
        draft.set_action_type(action_type);

        for param in &self.params {
            let (key, value) = param.split_once('=').ok_or_else(|| {
                CliError::invalid_argument(format!("expected KEY=VALUE, got '{}'", param))
            })?;
            let field: ParameterField = key.parse().map_err(CliError::invalid_argument)?;
            draft
                .parameters_mut()
                .set_raw(field, value)
                .map_err(|err| CliError::invalid_argument(err.to_string()))?;
        }

        Ok(draft)
    }
}

impl Command for CheckCommand {
    fn render(&self, style: &OutputStyle) -> CliResult<String> {
        let draft = self.build_draft()?;
        if let Some(prompt) = draft.check_action().user_message() {
            debug!(action = %draft.action_type(), "{}", prompt);
        }

        let payload = draft.to_payload()?;
        let json = serde_json::to_string_pretty(&payload)?;
        Ok(format!(
            "{}\n{}",
            style.success(&format!(
                "{} is ready to save",
                style.code(&payload.key_combination.to_string())
            )),
            json
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artisan_shortcuts::ValidationError;

    fn open_docs() -> CheckCommand {
        CheckCommand::new("OpenFolder")
            .with_keys(Some("CTRL+D".to_string()))
            .with_name(Some("Open Docs".to_string()))
            .with_params(vec!["path=/home/docs".to_string()])
    }

    #[test]
    fn test_valid_draft_prints_payload() {
        let output = open_docs().render(&OutputStyle::plain()).unwrap();
        assert!(output.starts_with("✓ CTRL+D is ready to save"));
        assert!(output.contains("\"shortcut\": \"CTRL+D\""));
        assert!(output.contains("\"path\": \"/home/docs\""));
    }

    #[test]
    fn test_every_failure_is_reported() {
        let err = CheckCommand::new("run_shell_script")
            .with_params(vec!["script=".to_string()])
            .render(&OutputStyle::plain())
            .unwrap_err();

        match err {
            CliError::Rejected(rejected) => assert_eq!(
                rejected.errors,
                vec![
                    ValidationError::EmptyCombination,
                    ValidationError::EmptyName,
                    ValidationError::MissingParameters {
                        action_type: ActionType::RunShellScript,
                        missing: vec![ParameterField::Script],
                    },
                ]
            ),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_camel_case_parameters_are_accepted() {
        let output = CheckCommand::new("MinimizeWindow")
            .with_keys(Some("CMD+M".to_string()))
            .with_name(Some("Shrink".to_string()))
            .with_params(vec!["windowWidth=800".to_string(), "window_height=600".to_string()])
            .render(&OutputStyle::plain())
            .unwrap();
        assert!(output.contains("\"window_width\": 800"));
    }

    #[test]
    fn test_malformed_arguments() {
        let bad_action = CheckCommand::new("Teleport").render(&OutputStyle::plain());
        assert!(matches!(bad_action, Err(CliError::InvalidArgument { .. })));

        let bad_param = open_docs()
            .with_params(vec!["path".to_string()])
            .render(&OutputStyle::plain());
        assert!(matches!(bad_param, Err(CliError::InvalidArgument { .. })));

        let bad_number = CheckCommand::new("MaximizeWindow")
            .with_params(vec!["window_width=wide".to_string()])
            .render(&OutputStyle::plain());
        assert!(matches!(bad_number, Err(CliError::InvalidArgument { .. })));

        let bad_keys = open_docs()
            .with_keys(Some("CTRL++D".to_string()))
            .render(&OutputStyle::plain());
        assert!(matches!(bad_keys, Err(CliError::InvalidArgument { .. })));
    }
}
