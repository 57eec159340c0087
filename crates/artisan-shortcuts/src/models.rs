//! Core data models for shortcut definitions

use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::{KeyParseError, ValidationError};
use crate::schema;

/// Represents a keyboard modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Modifier {
    Ctrl,
    Alt,
    Shift,
    Cmd,
}

impl Modifier {
    /// Match a raw key identifier against the known modifier names
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "control" | "ctrl" => Some(Modifier::Ctrl),
            "alt" | "option" => Some(Modifier::Alt),
            "shift" => Some(Modifier::Shift),
            "meta" | "command" | "cmd" | "super" | "os" => Some(Modifier::Cmd),
            _ => None,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Ctrl => write!(f, "CTRL"),
            Modifier::Alt => write!(f, "ALT"),
            Modifier::Shift => write!(f, "SHIFT"),
            Modifier::Cmd => write!(f, "CMD"),
        }
    }
}

/// A single normalized key inside a combination
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyToken {
    Modifier(Modifier),
    Key(String),
}

impl KeyToken {
    /// Normalize a raw key identifier (as reported by a key event)
    ///
    /// Returns `None` for identifiers that carry no key at all.
    pub fn normalize(raw: &str) -> Option<Self> {
        match raw {
            "" => None,
            " " => Some(KeyToken::Key("SPACE".to_string())),
            "+" => Some(KeyToken::Key("PLUS".to_string())),
            _ => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return None;
                }
                Some(match Modifier::from_key_name(trimmed) {
                    Some(modifier) => KeyToken::Modifier(modifier),
                    None => KeyToken::Key(trimmed.to_uppercase()),
                })
            }
        }
    }

    /// Check if this token is a modifier key
    pub fn is_modifier(&self) -> bool {
        matches!(self, KeyToken::Modifier(_))
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Modifier(modifier) => write!(f, "{}", modifier),
            KeyToken::Key(name) => f.write_str(name),
        }
    }
}

/// A captured key combination
///
/// Tokens keep the order they were first pressed in for display, but two
/// combinations are equal when they hold the same set of tokens.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyCombination {
    tokens: Vec<KeyToken>,
}

impl KeyCombination {
    /// Build a combination from tokens, dropping repeats
    ///
    /// Returns `None` when no token is left.
    pub fn from_tokens(tokens: impl IntoIterator<Item = KeyToken>) -> Option<Self> {
        let mut unique: Vec<KeyToken> = Vec::new();
        for token in tokens {
            if !unique.contains(&token) {
                unique.push(token);
            }
        }
        if unique.is_empty() {
            None
        } else {
            Some(KeyCombination { tokens: unique })
        }
    }

    /// Tokens in first-pressed order
    pub fn tokens(&self) -> &[KeyToken] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &KeyToken) -> bool {
        self.tokens.contains(token)
    }

    /// Modifiers held in this combination
    pub fn modifiers(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.tokens.iter().filter_map(|token| match token {
            KeyToken::Modifier(modifier) => Some(*modifier),
            KeyToken::Key(_) => None,
        })
    }

    /// Tokens in a stable order, independent of press order
    pub fn canonical_tokens(&self) -> Vec<&KeyToken> {
        let mut sorted: Vec<&KeyToken> = self.tokens.iter().collect();
        sorted.sort();
        sorted
    }
}

impl PartialEq for KeyCombination {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.len() == other.tokens.len()
            && self.tokens.iter().all(|token| other.tokens.contains(token))
    }
}

impl Hash for KeyCombination {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent so it agrees with `PartialEq`
        let mut combined: u64 = 0;
        for token in &self.tokens {
            let mut hasher = DefaultHasher::new();
            token.hash(&mut hasher);
            combined ^= hasher.finish();
        }
        state.write_usize(self.tokens.len());
        state.write_u64(combined);
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, token) in self.tokens.iter().enumerate() {
            if idx > 0 {
                f.write_str("+")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl FromStr for KeyCombination {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(KeyParseError::Empty);
        }

        // A literal plus key leaves two empty segments behind, as in `CTRL++`.
        let parts: Vec<&str> = s.split('+').collect();
        let mut tokens = Vec::new();
        let blank = |j: usize| parts.get(j).is_some_and(|part| part.is_empty());
        let mut i = 0;
        while i < parts.len() {
            let token = if blank(i) {
                if !blank(i + 1) || blank(i + 2) {
                    return Err(KeyParseError::EmptySegment(s.to_string()));
                }
                i += 2;
                KeyToken::Key("PLUS".to_string())
            } else {
                i += 1;
                KeyToken::normalize(parts[i - 1])
                    .ok_or_else(|| KeyParseError::EmptySegment(s.to_string()))?
            };
            if tokens.contains(&token) {
                return Err(KeyParseError::DuplicateKey {
                    token: token.to_string(),
                    combination: s.to_string(),
                });
            }
            tokens.push(token);
        }

        Ok(KeyCombination { tokens })
    }
}

impl TryFrom<String> for KeyCombination {
    type Error = KeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<KeyCombination> for String {
    fn from(combination: KeyCombination) -> Self {
        combination.to_string()
    }
}

/// Kind of automation a shortcut triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    // File & folder
    OpenFolder,
    OpenFile,

    // Application control
    OpenApplication,
    QuitApplication,
    HideApplication,
    FocusApplication,

    // Window management
    MinimizeWindow,
    MaximizeWindow,

    RunShellScript,
}

impl ActionType {
    pub const ALL: [ActionType; 9] = [
        ActionType::OpenFolder,
        ActionType::OpenFile,
        ActionType::OpenApplication,
        ActionType::QuitApplication,
        ActionType::HideApplication,
        ActionType::FocusApplication,
        ActionType::MinimizeWindow,
        ActionType::MaximizeWindow,
        ActionType::RunShellScript,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::OpenFolder => "OpenFolder",
            ActionType::OpenFile => "OpenFile",
            ActionType::OpenApplication => "OpenApplication",
            ActionType::QuitApplication => "QuitApplication",
            ActionType::HideApplication => "HideApplication",
            ActionType::FocusApplication => "FocusApplication",
            ActionType::MinimizeWindow => "MinimizeWindow",
            ActionType::MaximizeWindow => "MaximizeWindow",
            ActionType::RunShellScript => "RunShellScript",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], "").to_lowercase();
        ActionType::ALL
            .into_iter()
            .find(|action_type| action_type.as_str().to_lowercase() == wanted)
            .ok_or_else(|| format!("Unknown action type: {}", s))
    }
}

/// Names of the fields an action parameter bag can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterField {
    Path,
    SourcePath,
    TargetPath,
    AppName,
    Key,
    Modifiers,
    WindowWidth,
    WindowHeight,
    WindowX,
    WindowY,
    Script,
}

/// Value shape of a parameter field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Text,
    Number,
    List,
}

impl ParameterField {
    pub const ALL: [ParameterField; 11] = [
        ParameterField::Path,
        ParameterField::SourcePath,
        ParameterField::TargetPath,
        ParameterField::AppName,
        ParameterField::Key,
        ParameterField::Modifiers,
        ParameterField::WindowWidth,
        ParameterField::WindowHeight,
        ParameterField::WindowX,
        ParameterField::WindowY,
        ParameterField::Script,
    ];

    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterField::Path => "path",
            ParameterField::SourcePath => "source_path",
            ParameterField::TargetPath => "target_path",
            ParameterField::AppName => "app_name",
            ParameterField::Key => "key",
            ParameterField::Modifiers => "modifiers",
            ParameterField::WindowWidth => "window_width",
            ParameterField::WindowHeight => "window_height",
            ParameterField::WindowX => "window_x",
            ParameterField::WindowY => "window_y",
            ParameterField::Script => "script",
        }
    }

    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterField::WindowWidth
            | ParameterField::WindowHeight
            | ParameterField::WindowX
            | ParameterField::WindowY => ParameterKind::Number,
            ParameterField::Modifiers => ParameterKind::List,
            _ => ParameterKind::Text,
        }
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterField {
    type Err = String;

    /// Accepts both `app_name` and `appName`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "").to_lowercase();
        ParameterField::ALL
            .into_iter()
            .find(|field| field.as_str().replace('_', "") == wanted)
            .ok_or_else(|| format!("Unknown parameter: {}", s))
    }
}

/// Loose parameter bag, as filled in by a form and sent over the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modifiers: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_width: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_height: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_x: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_y: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

impl ActionParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a field holds a usable value
    ///
    /// Text must be non-blank, numbers only need to be present and lists
    /// need at least one entry.
    pub fn is_filled(&self, field: ParameterField) -> bool {
        fn text(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.trim().is_empty())
        }

        match field {
            ParameterField::Path => text(&self.path),
            ParameterField::SourcePath => text(&self.source_path),
            ParameterField::TargetPath => text(&self.target_path),
            ParameterField::AppName => text(&self.app_name),
            ParameterField::Key => text(&self.key),
            ParameterField::Modifiers => self.modifiers.as_ref().is_some_and(|m| !m.is_empty()),
            ParameterField::WindowWidth => self.window_width.is_some(),
            ParameterField::WindowHeight => self.window_height.is_some(),
            ParameterField::WindowX => self.window_x.is_some(),
            ParameterField::WindowY => self.window_y.is_some(),
            ParameterField::Script => text(&self.script),
        }
    }

    /// Check if a field holds any value at all, blank text included
    pub fn is_present(&self, field: ParameterField) -> bool {
        match field {
            ParameterField::Path => self.path.is_some(),
            ParameterField::SourcePath => self.source_path.is_some(),
            ParameterField::TargetPath => self.target_path.is_some(),
            ParameterField::AppName => self.app_name.is_some(),
            ParameterField::Key => self.key.is_some(),
            ParameterField::Modifiers => self.modifiers.is_some(),
            ParameterField::WindowWidth => self.window_width.is_some(),
            ParameterField::WindowHeight => self.window_height.is_some(),
            ParameterField::WindowX => self.window_x.is_some(),
            ParameterField::WindowY => self.window_y.is_some(),
            ParameterField::Script => self.script.is_some(),
        }
    }

    /// Assign a field from its textual form
    ///
    /// Numbers must parse as `i32`; lists are comma separated.
    pub fn set_raw(&mut self, field: ParameterField, raw: &str) -> Result<(), ValidationError> {
        match field.kind() {
            ParameterKind::Text => {
                let value = Some(raw.to_string());
                match field {
                    ParameterField::Path => self.path = value,
                    ParameterField::SourcePath => self.source_path = value,
                    ParameterField::TargetPath => self.target_path = value,
                    ParameterField::AppName => self.app_name = value,
                    ParameterField::Key => self.key = value,
                    _ => self.script = value,
                }
            }
            ParameterKind::Number => {
                let number: i32 =
                    raw.trim()
                        .parse()
                        .map_err(|_| ValidationError::InvalidParameterValue {
                            field,
                            value: raw.to_string(),
                        })?;
                match field {
                    ParameterField::WindowWidth => self.window_width = Some(number),
                    ParameterField::WindowHeight => self.window_height = Some(number),
                    ParameterField::WindowX => self.window_x = Some(number),
                    _ => self.window_y = Some(number),
                }
            }
            ParameterKind::List => {
                let items = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect();
                self.modifiers = Some(items);
            }
        }
        Ok(())
    }

    /// Remove a field's value
    pub fn unset(&mut self, field: ParameterField) {
        match field {
            ParameterField::Path => self.path = None,
            ParameterField::SourcePath => self.source_path = None,
            ParameterField::TargetPath => self.target_path = None,
            ParameterField::AppName => self.app_name = None,
            ParameterField::Key => self.key = None,
            ParameterField::Modifiers => self.modifiers = None,
            ParameterField::WindowWidth => self.window_width = None,
            ParameterField::WindowHeight => self.window_height = None,
            ParameterField::WindowX => self.window_x = None,
            ParameterField::WindowY => self.window_y = None,
            ParameterField::Script => self.script = None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_window_size(mut self, width: i32, height: i32) -> Self {
        self.window_width = Some(width);
        self.window_height = Some(height);
        self
    }

    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }
}

/// Wire shape of an action: its type tag plus the loose parameter bag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAction {
    pub action_type: ActionType,
    #[serde(default)]
    pub parameters: ActionParameters,
}

/// Window size and optional position for window actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowGeometry {
    pub width: i32,
    pub height: i32,
    pub x: Option<i32>,
    pub y: Option<i32>,
}

/// One automation effect bound to a shortcut
///
/// Every variant carries exactly the fields its action type uses, so a value
/// of this type always satisfies the action schema. It travels over the wire
/// as a [`RawAction`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAction", into = "RawAction")]
pub enum ShortcutAction {
    OpenFolder { path: String },
    OpenFile { path: String },
    OpenApplication { app_name: String },
    QuitApplication { app_name: String },
    HideApplication { app_name: String },
    FocusApplication { app_name: String },
    MinimizeWindow(WindowGeometry),
    MaximizeWindow(WindowGeometry),
    RunShellScript { script: String },
}

impl ShortcutAction {
    pub fn action_type(&self) -> ActionType {
        match self {
            ShortcutAction::OpenFolder { .. } => ActionType::OpenFolder,
            ShortcutAction::OpenFile { .. } => ActionType::OpenFile,
            ShortcutAction::OpenApplication { .. } => ActionType::OpenApplication,
            ShortcutAction::QuitApplication { .. } => ActionType::QuitApplication,
            ShortcutAction::HideApplication { .. } => ActionType::HideApplication,
            ShortcutAction::FocusApplication { .. } => ActionType::FocusApplication,
            ShortcutAction::MinimizeWindow(_) => ActionType::MinimizeWindow,
            ShortcutAction::MaximizeWindow(_) => ActionType::MaximizeWindow,
            ShortcutAction::RunShellScript { .. } => ActionType::RunShellScript,
        }
    }

    /// Flatten back into the loose parameter bag
    pub fn parameters(&self) -> ActionParameters {
        let params = ActionParameters::new();
        match self {
            ShortcutAction::OpenFolder { path } | ShortcutAction::OpenFile { path } => {
                params.with_path(path.clone())
            }
            ShortcutAction::OpenApplication { app_name }
            | ShortcutAction::QuitApplication { app_name }
            | ShortcutAction::HideApplication { app_name }
            | ShortcutAction::FocusApplication { app_name } => params.with_app_name(app_name.clone()),
            ShortcutAction::MinimizeWindow(window) | ShortcutAction::MaximizeWindow(window) => {
                let mut params = params.with_window_size(window.width, window.height);
                params.window_x = window.x;
                params.window_y = window.y;
                params
            }
            ShortcutAction::RunShellScript { script } => params.with_script(script.clone()),
        }
    }
}

impl TryFrom<RawAction> for ShortcutAction {
    type Error = ValidationError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        schema::restore_action(raw.action_type, &raw.parameters)
    }
}

impl From<ShortcutAction> for RawAction {
    fn from(action: ShortcutAction) -> Self {
        RawAction {
            action_type: action.action_type(),
            parameters: action.parameters(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

/// Body of a create or update request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutPayload {
    #[serde(rename = "shortcut")]
    pub key_combination: KeyCombination,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub actions: Vec<ShortcutAction>,
}

impl ShortcutPayload {
    pub fn new(
        key_combination: KeyCombination,
        name: impl Into<String>,
        actions: Vec<ShortcutAction>,
    ) -> Self {
        ShortcutPayload {
            key_combination,
            name: name.into(),
            description: None,
            actions,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check the payload-level invariants (name and at least one action)
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.actions.is_empty() {
            return Err(ValidationError::NoActions);
        }
        for action in &self.actions {
            schema::validate_action(action.action_type(), &action.parameters()).into_result()?;
        }
        Ok(())
    }
}

/// A shortcut persisted by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutDefinition {
    pub id: String,
    pub key_combination: KeyCombination,
    #[serde(rename = "command_name")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub actions: Vec<ShortcutAction>,
}

impl ShortcutDefinition {
    /// Attach a store-assigned id to a payload
    pub fn from_payload(id: impl Into<String>, payload: ShortcutPayload) -> Self {
        ShortcutDefinition {
            id: id.into(),
            key_combination: payload.key_combination,
            name: payload.name,
            description: payload.description,
            enabled: true,
            actions: payload.actions,
        }
    }

    /// Strip the identity back off, e.g. to resubmit an edited copy
    pub fn to_payload(&self) -> ShortcutPayload {
        ShortcutPayload {
            key_combination: self.key_combination.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            actions: self.actions.clone(),
        }
    }
}
