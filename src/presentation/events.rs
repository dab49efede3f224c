use serde::Serialize;
use tokio::sync::broadcast;

/// Notifications pushed to whatever shell hosts the engine (webview, CLI).
///
/// Serialization is untagged so each variant serializes as exactly the
/// payload the host contract expects; the channel name comes from [`UiEvent::name`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UiEvent {
    ConnectivityChanged {
        online: bool,
    },
    QueuedForSync {
        #[serde(rename = "type")]
        tipo: String,
        method: String,
    },
    SyncSuccess {
        url: String,
    },
    PendingCountChanged {
        count: u64,
    },
}

impl UiEvent {
    /// Channel name the host shell forwards this event under.
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::ConnectivityChanged { .. } => "connectivity-changed",
            UiEvent::QueuedForSync { .. } => "queued-for-sync",
            UiEvent::SyncSuccess { .. } => "sync-success",
            UiEvent::PendingCountChanged { .. } => "pending-count-changed",
        }
    }
}

/// In-process broadcast bus carrying [`UiEvent`]s from the engine to hosts.
///
/// Cloning shares the underlying channel. Subscribers that lag or disconnect
/// are skipped; delivery is best-effort.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<UiEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(64);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.sender.subscribe()
    }

    /// A send with no live subscribers is not an error.
    pub fn emit(&self, event: UiEvent) {
        let _ = self.sender.send(event);
    }

    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
