//! Shortcut draft: the editable form state that gates submission

use tracing::debug;

use crate::capture::KeyCapture;
use crate::error::{SubmissionRejected, ValidationError};
use crate::models::{
    ActionParameters, ActionType, ShortcutAction, ShortcutDefinition, ShortcutPayload,
};
use crate::schema::{self, SchemaCheck};

/// A shortcut being composed, before the remote store assigns it an id
#[derive(Debug, Clone)]
pub struct ShortcutDraft {
    pub name: String,
    pub description: String,
    pub capture: KeyCapture,
    action_type: ActionType,
    parameters: ActionParameters,
    /// Actions after the first, submitted unchanged
    trailing_actions: Vec<ShortcutAction>,
}

impl ShortcutDraft {
    pub fn new() -> Self {
        ShortcutDraft {
            name: String::new(),
            description: String::new(),
            capture: KeyCapture::new(),
            action_type: ActionType::OpenFolder,
            parameters: ActionParameters::new(),
            trailing_actions: Vec::new(),
        }
    }

    /// Start an edit from a persisted definition
    ///
    /// Only the first action is editable. Any further actions ride along
    /// and are appended to the payload as they were stored.
    pub fn from_definition(definition: &ShortcutDefinition) -> Self {
        let mut draft = ShortcutDraft::new();
        draft.name = definition.name.clone();
        draft.description = definition.description.clone().unwrap_or_default();
        draft.capture = KeyCapture::from_combination(&definition.key_combination);
        if let Some(action) = definition.actions.first() {
            draft.action_type = action.action_type();
            draft.parameters = action.parameters();
        }
        draft.trailing_actions = definition.actions.iter().skip(1).cloned().collect();
        draft
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// Switch the action type; parameters typed for the old one are kept
    pub fn set_action_type(&mut self, action_type: ActionType) -> SchemaCheck {
        self.action_type = action_type;
        self.check_action()
    }

    pub fn parameters(&self) -> &ActionParameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ActionParameters {
        &mut self.parameters
    }

    /// Actions carried over from the definition after the edited one
    pub fn trailing_actions(&self) -> &[ShortcutAction] {
        &self.trailing_actions
    }

    pub fn clear_parameters(&mut self) {
        self.parameters = ActionParameters::new();
    }

    /// Reset every field to its initial value
    pub fn reset(&mut self) {
        *self = ShortcutDraft::new();
    }

    /// Check the current parameters against the current action type
    pub fn check_action(&self) -> SchemaCheck {
        schema::validate_action(self.action_type, &self.parameters)
    }

    /// Every reason the draft cannot be submitted yet
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.capture.is_empty() {
            errors.push(ValidationError::EmptyCombination);
        }
        if self.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName);
        }
        if let Err(err) = self.check_action().into_result() {
            errors.push(err);
        }
        for action in &self.trailing_actions {
            if let Err(err) =
                schema::validate_action(action.action_type(), &action.parameters()).into_result()
            {
                errors.push(err);
            }
        }
        errors
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_empty()
    }

    /// Build the request payload, or report why it cannot be built
    pub fn to_payload(&self) -> Result<ShortcutPayload, SubmissionRejected> {
        let errors = self.validate();
        if !errors.is_empty() {
            debug!(count = errors.len(), "Draft rejected");
            return Err(SubmissionRejected { errors });
        }

        let reject = |err| SubmissionRejected { errors: vec![err] };
        let key_combination = self.capture.require_combination().map_err(reject)?;
        let action = schema::resolve_action(self.action_type, &self.parameters).map_err(reject)?;

        let mut actions = Vec::with_capacity(1 + self.trailing_actions.len());
        actions.push(action);
        actions.extend(self.trailing_actions.iter().cloned());

        let description = self.description.trim();
        Ok(ShortcutPayload {
            key_combination,
            name: self.name.trim().to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            actions,
        })
    }
}

impl Default for ShortcutDraft {
    fn default() -> Self {
        Self::new()
    }
}
