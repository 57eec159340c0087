//! In-process shortcut service, used as a stand-in for the real backend

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::RemoteError;
use crate::gateway::{RemoteResult, ShortcutGateway};
use crate::invoke::{commands, CommandTransport};
use crate::models::{ShortcutDefinition, ShortcutPayload};

type IdGenerator = Box<dyn Fn() -> String + Send + Sync>;

/// Shortcut service that keeps definitions in memory
///
/// Assigns UUID v4 identifiers unless another generator is supplied.
pub struct InMemoryShortcutGateway {
    shortcuts: RwLock<Vec<ShortcutDefinition>>,
    next_id: IdGenerator,
}

impl InMemoryShortcutGateway {
    pub fn new() -> Self {
        Self::with_shortcuts(Vec::new())
    }

    /// Start with existing definitions
    pub fn with_shortcuts(shortcuts: Vec<ShortcutDefinition>) -> Self {
        InMemoryShortcutGateway {
            shortcuts: RwLock::new(shortcuts),
            next_id: Box::new(|| Uuid::new_v4().to_string()),
        }
    }

    /// Replace the id generator (deterministic ids in tests)
    pub fn with_id_generator(
        mut self,
        generator: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        self.next_id = Box::new(generator);
        self
    }

    pub async fn len(&self) -> usize {
        self.shortcuts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.shortcuts.read().await.is_empty()
    }

    fn not_found(id: &str) -> RemoteError {
        RemoteError::Rejected(format!("Shortcut with id {} not found", id))
    }
}

impl Default for InMemoryShortcutGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShortcutGateway for InMemoryShortcutGateway {
    async fn get_all(&self) -> RemoteResult<Vec<ShortcutDefinition>> {
        let shortcuts = self.shortcuts.read().await;
        debug!("Loaded {} shortcuts", shortcuts.len());
        Ok(shortcuts.clone())
    }

    async fn get_by_id(&self, id: &str) -> RemoteResult<ShortcutDefinition> {
        self.shortcuts
            .read()
            .await
            .iter()
            .find(|shortcut| shortcut.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, payload: &ShortcutPayload) -> RemoteResult<ShortcutDefinition> {
        payload
            .validate()
            .map_err(|err| RemoteError::Rejected(err.to_string()))?;

        let definition = ShortcutDefinition::from_payload((self.next_id)(), payload.clone());
        info!(id = %definition.id, name = %definition.name, "Saved shortcut");
        self.shortcuts.write().await.push(definition.clone());
        Ok(definition)
    }

    async fn update(&self, id: &str, payload: &ShortcutPayload) -> RemoteResult<ShortcutDefinition> {
        payload
            .validate()
            .map_err(|err| RemoteError::Rejected(err.to_string()))?;

        let mut shortcuts = self.shortcuts.write().await;
        let existing = shortcuts
            .iter_mut()
            .find(|shortcut| shortcut.id == id)
            .ok_or_else(|| Self::not_found(id))?;

        let enabled = existing.enabled;
        *existing = ShortcutDefinition::from_payload(id, payload.clone());
        existing.enabled = enabled;
        info!(id, "Updated shortcut");
        Ok(existing.clone())
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        let mut shortcuts = self.shortcuts.write().await;
        let index = shortcuts
            .iter()
            .position(|shortcut| shortcut.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        shortcuts.remove(index);
        info!(id, "Deleted shortcut");
        Ok(())
    }
}

#[derive(Deserialize)]
struct IdArgs {
    id: String,
}

#[derive(Deserialize)]
struct SaveArgs {
    payload: ShortcutPayload,
}

#[derive(Deserialize)]
struct UpdateArgs {
    id: String,
    payload: ShortcutPayload,
}

fn decode<T: for<'de> Deserialize<'de>>(args: Value) -> Result<T, String> {
    serde_json::from_value(args).map_err(|err| format!("Invalid arguments: {}", err))
}

fn encode<T: serde::Serialize>(result: RemoteResult<T>) -> Result<Value, String> {
    let value = result.map_err(|err| err.to_string())?;
    serde_json::to_value(value).map_err(|err| err.to_string())
}

/// Answers the backend command protocol, so [`crate::InvokeGateway`] can run against it
#[async_trait]
impl CommandTransport for InMemoryShortcutGateway {
    async fn invoke(&self, command: &str, args: Value) -> Result<Value, String> {
        match command {
            commands::GET_SHORTCUTS => encode(self.get_all().await),
            commands::GET_SHORTCUT_BY_ID => {
                let args: IdArgs = decode(args)?;
                encode(self.get_by_id(&args.id).await)
            }
            commands::SAVE_SHORTCUT => {
                let args: SaveArgs = decode(args)?;
                encode(self.create(&args.payload).await)
            }
            commands::UPDATE_SHORTCUT => {
                let args: UpdateArgs = decode(args)?;
                encode(self.update(&args.id, &args.payload).await)
            }
            commands::DELETE_SHORTCUT => {
                let args: IdArgs = decode(args)?;
                encode(self.delete(&args.id).await)
            }
            other => Err(format!("Unknown command: {}", other)),
        }
    }
}
