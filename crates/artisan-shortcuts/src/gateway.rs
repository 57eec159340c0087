//! Boundary to the remote shortcut service

use async_trait::async_trait;

use crate::error::RemoteError;
use crate::models::{ShortcutDefinition, ShortcutPayload};

/// Result type for gateway calls
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote shortcut service as seen by the lifecycle store
///
/// Identity assignment belongs to the implementation: `create` returns the
/// stored definition with its new id. Unknown ids must come back as errors.
#[async_trait]
pub trait ShortcutGateway: Send + Sync {
    /// Fetch every stored shortcut
    async fn get_all(&self) -> RemoteResult<Vec<ShortcutDefinition>>;

    /// Fetch one shortcut by id
    async fn get_by_id(&self, id: &str) -> RemoteResult<ShortcutDefinition>;

    /// Store a new shortcut
    async fn create(&self, payload: &ShortcutPayload) -> RemoteResult<ShortcutDefinition>;

    /// Replace a stored shortcut
    async fn update(&self, id: &str, payload: &ShortcutPayload) -> RemoteResult<ShortcutDefinition>;

    /// Remove a stored shortcut
    async fn delete(&self, id: &str) -> RemoteResult<()>;
}
