use crate::element::NodeId;

/// Events dispatched through a [`Document`](crate::Document).
///
/// `target` is the node the event was fired at. `current_target` is the node
/// whose listener is being invoked, which differs from `target` while the
/// event bubbles up through ancestors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pointer activation
    Click {
        target: NodeId,
        current_target: NodeId,
    },
    /// Key press on a focused node
    Key {
        target: NodeId,
        current_target: NodeId,
        key: Key,
    },
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::Key { .. } => EventKind::Key,
        }
    }

    pub fn target(&self) -> NodeId {
        match self {
            Self::Click { target, .. } | Self::Key { target, .. } => *target,
        }
    }

    pub fn current_target(&self) -> NodeId {
        match self {
            Self::Click { current_target, .. } | Self::Key { current_target, .. } => {
                *current_target
            }
        }
    }

    pub(crate) fn with_current_target(&self, node: NodeId) -> Self {
        let mut event = self.clone();
        match &mut event {
            Self::Click { current_target, .. } | Self::Key { current_target, .. } => {
                *current_target = node;
            }
        }
        event
    }
}

/// Listener subscription key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Key,
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

impl Key {
    /// Keys that activate a button-like element.
    pub fn is_activation(&self) -> bool {
        matches!(self, Key::Enter | Key::Char(' '))
    }
}
