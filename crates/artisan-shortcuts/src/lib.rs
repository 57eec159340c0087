//! Shortcut definitions from key capture to remote persistence
//!
//! This crate provides the shortcut definition pipeline with:
//! - Key capture that normalizes raw key events into a key combination
//! - An action schema that gates submission on required parameters
//! - Typed shortcut actions with a loose wire representation
//! - A lifecycle store with per-operation status flags over a remote gateway
//! - A command-protocol gateway and an in-memory backend
//! - Layered configuration and tracing setup

pub mod capture;
pub mod config;
pub mod draft;
pub mod error;
pub mod gateway;
pub mod invoke;
pub mod logging;
pub mod memory;
pub mod models;
pub mod schema;
pub mod store;

// Re-export public types
pub use capture::{normalize_keys, CaptureState, KeyCapture};
pub use config::{ArtisanConfig, ConfigLoader, LogLevel, LoggingConfig, Sequencing, StoreConfig};
pub use draft::ShortcutDraft;
pub use error::{
    ConfigError, ConfigResult, KeyParseError, RemoteError, SubmissionRejected, ValidationError,
};
pub use gateway::{RemoteResult, ShortcutGateway};
pub use invoke::{CommandTransport, InvokeGateway};
pub use memory::InMemoryShortcutGateway;
pub use models::{
    ActionParameters, ActionType, KeyCombination, KeyToken, Modifier, ParameterField,
    ParameterKind, RawAction, ShortcutAction, ShortcutDefinition, ShortcutPayload, WindowGeometry,
};
pub use schema::{resolve_action, restore_action, validate_action, ActionSchema, SchemaCheck};
pub use store::{OperationKind, OperationStatus, ShortcutStore, ShortcutsState};
