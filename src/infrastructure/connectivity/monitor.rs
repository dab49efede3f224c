use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::presentation::{EventBus, UiEvent};

/// Tracks whether the host currently has network reachability.
///
/// The engine never probes the network itself. The host shell reports
/// transitions through [`ConnectivityMonitor::set_online`] and downstream
/// tasks observe them via the watch channel. Reporting the same state twice
/// is suppressed, so watchers only wake on real edges.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    sender: Arc<watch::Sender<bool>>,
    events: EventBus,
}

impl ConnectivityMonitor {
    /// `initial_online` is the host's best guess until it reports a real state.
    pub fn new(initial_online: bool, events: EventBus) -> Self {
        let (sender, _) = watch::channel(initial_online);
        Self {
            sender: Arc::new(sender),
            events,
        }
    }

    /// Records a connectivity report. Returns true when the state actually
    /// changed; duplicate reports are dropped without waking watchers.
    pub fn set_online(&self, online: bool) -> bool {
        let changed = self.sender.send_if_modified(|state| {
            if *state == online {
                false
            } else {
                *state = online;
                true
            }
        });

        if changed {
            info!(
                "Connectivity changed: {}",
                if online { "online" } else { "offline" }
            );
            self.events.emit(UiEvent::ConnectivityChanged { online });
        }

        changed
    }

    pub fn report_online(&self) -> bool {
        self.set_online(true)
    }

    pub fn report_offline(&self) -> bool {
        self.set_online(false)
    }

    pub fn is_online(&self) -> bool {
        *self.sender.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}
