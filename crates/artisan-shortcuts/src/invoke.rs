//! Gateway over a named-command transport with JSON arguments

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::RemoteError;
use crate::gateway::{RemoteResult, ShortcutGateway};
use crate::models::{ShortcutDefinition, ShortcutPayload};

/// Command names understood by the shortcut backend
pub mod commands {
    pub const GET_SHORTCUTS: &str = "get_shortcuts";
    pub const GET_SHORTCUT_BY_ID: &str = "get_shortcut_by_id";
    pub const SAVE_SHORTCUT: &str = "save_shortcut";
    pub const UPDATE_SHORTCUT: &str = "update_shortcut";
    pub const DELETE_SHORTCUT: &str = "delete_shortcut";
}

/// Anything that can run a named command with JSON arguments
///
/// Errors are plain messages, as a command bridge reports them.
#[async_trait]
pub trait CommandTransport: Send + Sync {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, String>;
}

/// [`ShortcutGateway`] that encodes every call as a backend command
pub struct InvokeGateway<T> {
    transport: T,
}

impl<T: CommandTransport> InvokeGateway<T> {
    pub fn new(transport: T) -> Self {
        InvokeGateway { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<R: DeserializeOwned>(&self, command: &str, args: Value) -> RemoteResult<R> {
        debug!(command, "Invoking shortcut command");
        let value = self.transport.invoke(command, args).await.map_err(|message| {
            warn!(command, error = %message, "Shortcut command failed");
            RemoteError::Transport(message)
        })?;

        serde_json::from_value(value).map_err(|err| {
            warn!(command, error = %err, "Unexpected response shape");
            RemoteError::from(err)
        })
    }
}

#[async_trait]
impl<T: CommandTransport> ShortcutGateway for InvokeGateway<T> {
    /// Records that no longer decode are skipped so one bad entry cannot
    /// hide the rest of the collection.
    async fn get_all(&self) -> RemoteResult<Vec<ShortcutDefinition>> {
        let records: Vec<Value> = self.call(commands::GET_SHORTCUTS, json!({})).await?;
        let total = records.len();
        let shortcuts: Vec<ShortcutDefinition> = records
            .into_iter()
            .filter_map(|record| {
                let id = record.get("id").and_then(Value::as_str).map(str::to_string);
                serde_json::from_value(record)
                    .map_err(|err| warn!(id = ?id, error = %err, "Skipping unreadable shortcut"))
                    .ok()
            })
            .collect();
        if shortcuts.len() < total {
            warn!(skipped = total - shortcuts.len(), "Some stored shortcuts could not be read");
        }
        Ok(shortcuts)
    }

    async fn get_by_id(&self, id: &str) -> RemoteResult<ShortcutDefinition> {
        self.call(commands::GET_SHORTCUT_BY_ID, json!({ "id": id }))
            .await
    }

    async fn create(&self, payload: &ShortcutPayload) -> RemoteResult<ShortcutDefinition> {
        let payload = serde_json::to_value(payload)?;
        self.call(commands::SAVE_SHORTCUT, json!({ "payload": payload }))
            .await
    }

    async fn update(&self, id: &str, payload: &ShortcutPayload) -> RemoteResult<ShortcutDefinition> {
        let payload = serde_json::to_value(payload)?;
        self.call(
            commands::UPDATE_SHORTCUT,
            json!({ "id": id, "payload": payload }),
        )
        .await
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        self.call::<Value>(commands::DELETE_SHORTCUT, json!({ "id": id }))
            .await
            .map(|_| ())
    }
}
