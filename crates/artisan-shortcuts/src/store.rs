//! Client-side lifecycle store for shortcut definitions
//!
//! The store owns the in-memory collection and tracks one status flag per
//! operation kind. Remote failures never escape an operation: they land in
//! the shared error slot and the matching status flag.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::{Sequencing, StoreConfig};
use crate::error::RemoteError;
use crate::gateway::ShortcutGateway;
use crate::models::{ShortcutDefinition, ShortcutPayload};

/// Progress of one operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

/// Operation kinds that carry their own status flag
///
/// Create and update share [`OperationKind::Save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    List,
    Detail,
    Save,
    Delete,
}

impl OperationKind {
    fn index(self) -> usize {
        match self {
            OperationKind::List => 0,
            OperationKind::Detail => 1,
            OperationKind::Save => 2,
            OperationKind::Delete => 3,
        }
    }

    /// Error recorded when the gateway fails without a message
    fn fallback_message(self) -> &'static str {
        match self {
            OperationKind::List => "Failed to fetch shortcuts",
            OperationKind::Detail => "Failed to fetch shortcut",
            OperationKind::Save => "Failed to save shortcut",
            OperationKind::Delete => "Failed to delete shortcut",
        }
    }
}

/// Observable store state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShortcutsState {
    pub items: Vec<ShortcutDefinition>,
    pub current_shortcut: Option<ShortcutDefinition>,
    pub list_status: OperationStatus,
    pub detail_status: OperationStatus,
    pub save_status: OperationStatus,
    pub delete_status: OperationStatus,
    pub error: Option<String>,
}

impl ShortcutsState {
    pub fn status(&self, kind: OperationKind) -> OperationStatus {
        match kind {
            OperationKind::List => self.list_status,
            OperationKind::Detail => self.detail_status,
            OperationKind::Save => self.save_status,
            OperationKind::Delete => self.delete_status,
        }
    }

    fn status_mut(&mut self, kind: OperationKind) -> &mut OperationStatus {
        match kind {
            OperationKind::List => &mut self.list_status,
            OperationKind::Detail => &mut self.detail_status,
            OperationKind::Save => &mut self.save_status,
            OperationKind::Delete => &mut self.delete_status,
        }
    }

    pub fn is_loading(&self, kind: OperationKind) -> bool {
        self.status(kind) == OperationStatus::Pending
    }

    pub fn find(&self, id: &str) -> Option<&ShortcutDefinition> {
        self.items.iter().find(|item| item.id == id)
    }
}

/// Monotonic request counters, one per operation kind
#[derive(Debug, Default)]
struct RequestTokens {
    issued: [AtomicU64; 4],
}

impl RequestTokens {
    fn issue(&self, kind: OperationKind) -> u64 {
        self.issued[kind.index()].fetch_add(1, Ordering::SeqCst) + 1
    }

    fn latest(&self, kind: OperationKind) -> u64 {
        self.issued[kind.index()].load(Ordering::SeqCst)
    }
}

/// How a settled result relates to the server state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Settlement {
    /// A read, or a replace whose newer counterpart supersedes it
    Snapshot,
    /// A change the server already committed (create, delete)
    Commit,
}

/// Lifecycle store for shortcut definitions
///
/// Operations take `&self` and may overlap; each settles independently.
pub struct ShortcutStore {
    gateway: Arc<dyn ShortcutGateway>,
    config: StoreConfig,
    state: watch::Sender<ShortcutsState>,
    tokens: RequestTokens,
}

impl ShortcutStore {
    pub fn new(gateway: Arc<dyn ShortcutGateway>) -> Self {
        Self::with_config(gateway, StoreConfig::default())
    }

    pub fn with_config(gateway: Arc<dyn ShortcutGateway>, config: StoreConfig) -> Self {
        let (state, _) = watch::channel(ShortcutsState::default());
        ShortcutStore {
            gateway,
            config,
            state,
            tokens: RequestTokens::default(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Receive a fresh snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<ShortcutsState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> ShortcutsState {
        self.state.borrow().clone()
    }

    pub fn items(&self) -> Vec<ShortcutDefinition> {
        self.state.borrow().items.clone()
    }

    pub fn current_shortcut(&self) -> Option<ShortcutDefinition> {
        self.state.borrow().current_shortcut.clone()
    }

    pub fn status(&self, kind: OperationKind) -> OperationStatus {
        self.state.borrow().status(kind)
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Reset the shared error slot
    pub fn clear_error(&self) {
        self.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Fetch every shortcut and replace the collection
    pub async fn list(&self) -> OperationStatus {
        let kind = OperationKind::List;
        let token = self.begin(kind);
        debug!("Fetching shortcuts");

        let result = self.gateway.get_all().await;
        self.settle(kind, token, Settlement::Snapshot, result, |state, items| {
            info!("Fetched {} shortcuts", items.len());
            state.items = items;
        })
    }

    /// Fetch one shortcut into `current_shortcut`
    ///
    /// A failure keeps whatever `current_shortcut` held before.
    pub async fn get_by_id(&self, id: &str) -> OperationStatus {
        let kind = OperationKind::Detail;
        let token = self.begin(kind);
        debug!(id, "Fetching shortcut");

        let result = self.gateway.get_by_id(id).await;
        self.settle(kind, token, Settlement::Snapshot, result, |state, shortcut| {
            state.current_shortcut = Some(shortcut);
        })
    }

    /// Store a new shortcut and append the result to the collection
    pub async fn create(&self, payload: &ShortcutPayload) -> OperationStatus {
        let kind = OperationKind::Save;
        let token = self.begin(kind);
        debug!(name = %payload.name, "Creating shortcut");

        let result = self.gateway.create(payload).await;
        self.settle(kind, token, Settlement::Commit, result, |state, created| {
            info!(id = %created.id, "Created shortcut");
            match state.items.iter_mut().find(|item| item.id == created.id) {
                Some(existing) => *existing = created,
                None => state.items.push(created),
            }
        })
    }

    /// Replace a stored shortcut
    ///
    /// When `id` is not in the collection the collection is left alone; with
    /// `strict_updates` that case is reported as a failure instead.
    pub async fn update(&self, id: &str, payload: &ShortcutPayload) -> OperationStatus {
        let kind = OperationKind::Save;
        let token = self.begin(kind);
        debug!(id, "Updating shortcut");

        let mut result = self.gateway.update(id, payload).await;
        if result.is_ok() && self.config.strict_updates && self.state.borrow().find(id).is_none() {
            result = Err(RemoteError::Rejected(format!(
                "Shortcut with id {} not found",
                id
            )));
        }

        self.settle(kind, token, Settlement::Snapshot, result, |state, updated| {
            match state.items.iter_mut().find(|item| item.id == id) {
                Some(existing) => *existing = updated.clone(),
                None => debug!(id, "Updated shortcut is not in the collection"),
            }
            state.current_shortcut = Some(updated);
        })
    }

    /// Remove a stored shortcut
    ///
    /// A matching `current_shortcut` is cleared as soon as the delete is
    /// issued, whatever the outcome.
    pub async fn delete(&self, id: &str) -> OperationStatus {
        let kind = OperationKind::Delete;
        let token = self.tokens.issue(kind);
        self.state.send_modify(|state| {
            *state.status_mut(kind) = OperationStatus::Pending;
            state.error = None;
            if state
                .current_shortcut
                .as_ref()
                .is_some_and(|current| current.id == id)
            {
                state.current_shortcut = None;
            }
        });
        debug!(id, "Deleting shortcut");

        let result = self.gateway.delete(id).await;
        self.settle(kind, token, Settlement::Commit, result, |state, ()| {
            info!(id, "Deleted shortcut");
            state.items.retain(|item| item.id != id);
        })
    }

    fn begin(&self, kind: OperationKind) -> u64 {
        let token = self.tokens.issue(kind);
        self.state.send_modify(|state| {
            *state.status_mut(kind) = OperationStatus::Pending;
            state.error = None;
        });
        token
    }

    /// Apply a settled result
    ///
    /// Under latest-issued sequencing a superseded request never touches the
    /// status flag or the error slot. A superseded [`Settlement::Commit`] still
    /// applies its change to the collection; a superseded snapshot is dropped.
    fn settle<T>(
        &self,
        kind: OperationKind,
        token: u64,
        settlement: Settlement,
        result: Result<T, RemoteError>,
        apply: impl FnOnce(&mut ShortcutsState, T),
    ) -> OperationStatus {
        if self.config.sequencing == Sequencing::LatestIssued && self.tokens.latest(kind) != token {
            return match (settlement, result) {
                (Settlement::Commit, Ok(value)) => {
                    debug!(?kind, token, "Applying superseded committed change");
                    self.state.send_modify(|state| apply(state, value));
                    OperationStatus::Succeeded
                }
                _ => {
                    warn!(?kind, token, "Dropping superseded response");
                    self.status(kind)
                }
            };
        }

        match result {
            Ok(value) => {
                self.state.send_modify(|state| {
                    apply(state, value);
                    *state.status_mut(kind) = OperationStatus::Succeeded;
                });
                OperationStatus::Succeeded
            }
            Err(err) => {
                let message = match err.message() {
                    "" => kind.fallback_message().to_string(),
                    message => message.to_string(),
                };
                warn!(?kind, error = %message, "Shortcut operation failed");
                self.state.send_modify(|state| {
                    *state.status_mut(kind) = OperationStatus::Failed;
                    state.error = Some(message);
                });
                OperationStatus::Failed
            }
        }
    }
}
