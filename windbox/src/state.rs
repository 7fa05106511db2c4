//! Panel state and change notifications.

use std::sync::{Arc, RwLock};

/// Open/closed state of one item. Every item starts closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    pub fn is_open(self) -> bool {
        self == PanelState::Open
    }
}

/// Emitted once per item whose state changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    /// 1-based group sequence number.
    pub group: usize,
    /// 0-based item index within the group.
    pub item: usize,
    pub item_id: String,
    pub state: PanelState,
}

pub type ChangeListener = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Change subscribers shared by every group of one mount.
#[derive(Clone, Default)]
pub(crate) struct Observers {
    listeners: Arc<RwLock<Vec<ChangeListener>>>,
}

impl Observers {
    pub(crate) fn subscribe(&self, listener: ChangeListener) {
        if let Ok(mut guard) = self.listeners.write() {
            guard.push(listener);
        }
    }

    pub(crate) fn notify(&self, events: &[ChangeEvent]) {
        if events.is_empty() {
            return;
        }
        // Clone out so a subscriber may subscribe again without deadlocking
        let listeners: Vec<ChangeListener> = self
            .listeners
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default();

        for event in events {
            for listener in &listeners {
                listener(event);
            }
        }
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.listeners.read().map(|g| g.len()).unwrap_or(0);
        write!(f, "Observers({count})")
    }
}
