//! Live key capture that turns key events into a [`KeyCombination`]

use tracing::trace;

use crate::error::ValidationError;
use crate::models::{KeyCombination, KeyToken};

/// Where a capture session currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// Nothing captured since creation or the last clear
    #[default]
    Idle,
    /// Keys are being pressed
    Capturing,
    /// The session ended; the next key press starts a new one
    Finalized,
}

/// Accumulates the keys pressed during one capture session
///
/// A session runs from the first key press until every held key is released
/// or focus is lost. Tokens are kept in first-pressed order without repeats.
#[derive(Debug, Clone, Default)]
pub struct KeyCapture {
    tokens: Vec<KeyToken>,
    held: Vec<KeyToken>,
    state: CaptureState,
    focused: bool,
}

impl KeyCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a finalized capture from an existing combination (edit view)
    pub fn from_combination(combination: &KeyCombination) -> Self {
        KeyCapture {
            tokens: combination.tokens().to_vec(),
            held: Vec::new(),
            state: CaptureState::Finalized,
            focused: false,
        }
    }

    /// Capture area gained focus
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Capture area lost focus; ends any running session
    pub fn blur(&mut self) {
        self.focused = false;
        self.finalize();
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Record a key press
    ///
    /// Returns `true` when the key added a new token to the combination.
    pub fn key_down(&mut self, raw_key: &str) -> bool {
        let Some(token) = KeyToken::normalize(raw_key) else {
            return false;
        };

        if self.state == CaptureState::Finalized {
            // A press after release starts an independent capture
            self.tokens.clear();
            self.held.clear();
        }
        self.state = CaptureState::Capturing;

        if !self.held.contains(&token) {
            self.held.push(token.clone());
        }
        if self.tokens.contains(&token) {
            return false;
        }

        trace!(token = %token, "Captured key");
        self.tokens.push(token);
        true
    }

    /// Record a key release; releasing the last held key ends the session
    pub fn key_up(&mut self, raw_key: &str) {
        if let Some(token) = KeyToken::normalize(raw_key) {
            self.held.retain(|held| held != &token);
        }
        if self.held.is_empty() {
            self.finalize();
        }
    }

    /// Drop everything captured so far
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.held.clear();
        self.state = CaptureState::Idle;
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn tokens(&self) -> &[KeyToken] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The captured combination, or `None` if no key was pressed
    pub fn combination(&self) -> Option<KeyCombination> {
        KeyCombination::from_tokens(self.tokens.iter().cloned())
    }

    /// Like [`KeyCapture::combination`] but reports an empty capture as a validation error
    pub fn require_combination(&self) -> Result<KeyCombination, ValidationError> {
        self.combination().ok_or(ValidationError::EmptyCombination)
    }

    /// `+`-joined tokens in press order; empty when nothing is captured
    pub fn display(&self) -> String {
        self.combination()
            .map(|combination| combination.to_string())
            .unwrap_or_default()
    }

    fn finalize(&mut self) {
        self.held.clear();
        if self.state == CaptureState::Capturing {
            self.state = CaptureState::Finalized;
        }
    }
}

/// Normalize a complete key sequence in one go
pub fn normalize_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Option<KeyCombination> {
    let mut capture = KeyCapture::new();
    for key in keys {
        capture.key_down(key);
    }
    capture.combination()
}
