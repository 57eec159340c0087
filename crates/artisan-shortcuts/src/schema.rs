//! Required-parameter schema for each action type

use crate::error::ValidationError;
use crate::models::{ActionParameters, ActionType, ParameterField, ShortcutAction, WindowGeometry};

const PATH: &[ParameterField] = &[ParameterField::Path];
const APP_NAME: &[ParameterField] = &[ParameterField::AppName];
const WINDOW_SIZE: &[ParameterField] = &[ParameterField::WindowWidth, ParameterField::WindowHeight];
const SCRIPT: &[ParameterField] = &[ParameterField::Script];

/// The fields an action type cannot run without
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSchema {
    pub action_type: ActionType,
    pub required: &'static [ParameterField],
}

impl ActionSchema {
    /// Look up the schema for an action type
    pub fn for_action(action_type: ActionType) -> Self {
        let required = match action_type {
            ActionType::OpenFolder | ActionType::OpenFile => PATH,
            ActionType::OpenApplication
            | ActionType::QuitApplication
            | ActionType::HideApplication
            | ActionType::FocusApplication => APP_NAME,
            ActionType::MinimizeWindow | ActionType::MaximizeWindow => WINDOW_SIZE,
            ActionType::RunShellScript => SCRIPT,
        };
        ActionSchema {
            action_type,
            required,
        }
    }

    /// Schemas for every action type, in declaration order
    pub fn all() -> impl Iterator<Item = ActionSchema> {
        ActionType::ALL.into_iter().map(ActionSchema::for_action)
    }

    pub fn requires(&self, field: ParameterField) -> bool {
        self.required.contains(&field)
    }

    /// Check a parameter bag against this schema
    ///
    /// Fields outside the schema are neither required nor inspected.
    pub fn check(&self, params: &ActionParameters) -> SchemaCheck {
        let missing = self
            .required
            .iter()
            .copied()
            .filter(|field| !params.is_filled(*field))
            .collect();

        SchemaCheck {
            action_type: self.action_type,
            missing,
        }
    }
}

/// Outcome of checking parameters against an action schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCheck {
    pub action_type: ActionType,
    pub missing: Vec<ParameterField>,
}

impl SchemaCheck {
    /// Check if every required field is filled
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.passed() {
            Ok(())
        } else {
            Err(ValidationError::MissingParameters {
                action_type: self.action_type,
                missing: self.missing,
            })
        }
    }

    /// Prompt listing every required field of the schema, or `None` on success
    pub fn user_message(&self) -> Option<String> {
        if self.passed() {
            return None;
        }
        let required: Vec<&str> = ActionSchema::for_action(self.action_type)
            .required
            .iter()
            .map(ParameterField::as_str)
            .collect();
        Some(format!(
            "Please fill in required parameters: {}",
            required.join(", ")
        ))
    }
}

/// Check `params` against the schema of `action_type`
pub fn validate_action(action_type: ActionType, params: &ActionParameters) -> SchemaCheck {
    ActionSchema::for_action(action_type).check(params)
}

/// Turn a loose parameter bag into a typed action
///
/// Fails with the missing fields when the schema is not satisfied.
pub fn resolve_action(
    action_type: ActionType,
    params: &ActionParameters,
) -> Result<ShortcutAction, ValidationError> {
    validate_action(action_type, params).into_result()?;
    Ok(build_action(action_type, params))
}

/// Rebuild a typed action from stored parameters
///
/// Only presence is checked, so a stored blank value decodes as it was
/// saved. New submissions still go through [`resolve_action`].
pub fn restore_action(
    action_type: ActionType,
    params: &ActionParameters,
) -> Result<ShortcutAction, ValidationError> {
    let missing: Vec<ParameterField> = ActionSchema::for_action(action_type)
        .required
        .iter()
        .copied()
        .filter(|field| !params.is_present(*field))
        .collect();
    SchemaCheck {
        action_type,
        missing,
    }
    .into_result()?;
    Ok(build_action(action_type, params))
}

// Callers have checked that every required value is present.
fn build_action(action_type: ActionType, params: &ActionParameters) -> ShortcutAction {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let window = || WindowGeometry {
        width: params.window_width.unwrap_or_default(),
        height: params.window_height.unwrap_or_default(),
        x: params.window_x,
        y: params.window_y,
    };

    match action_type {
        ActionType::OpenFolder => ShortcutAction::OpenFolder {
            path: text(&params.path),
        },
        ActionType::OpenFile => ShortcutAction::OpenFile {
            path: text(&params.path),
        },
        ActionType::OpenApplication => ShortcutAction::OpenApplication {
            app_name: text(&params.app_name),
        },
        ActionType::QuitApplication => ShortcutAction::QuitApplication {
            app_name: text(&params.app_name),
        },
        ActionType::HideApplication => ShortcutAction::HideApplication {
            app_name: text(&params.app_name),
        },
        ActionType::FocusApplication => ShortcutAction::FocusApplication {
            app_name: text(&params.app_name),
        },
        ActionType::MinimizeWindow => ShortcutAction::MinimizeWindow(window()),
        ActionType::MaximizeWindow => ShortcutAction::MaximizeWindow(window()),
        ActionType::RunShellScript => ShortcutAction::RunShellScript {
            script: text(&params.script),
        },
    }
}
