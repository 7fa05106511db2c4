//! Toggle controller: owns the open/closed state of one group's items and
//! renders it into the document.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use windom::{Document, NodeId};

use crate::attrs::set_attrs;
use crate::config::Visibility;
use crate::error::WindBoxError;
use crate::group::{Item, OPEN_CLASS};
use crate::state::{ChangeEvent, Observers, PanelState};

/// Shared handle to a group's state. Clones refer to the same group, which is
/// how header listeners reach the controller that owns them.
#[derive(Debug, Clone)]
pub struct ToggleController {
    inner: Arc<RwLock<ControllerInner>>,
    observers: Observers,
}

#[derive(Debug)]
struct ControllerInner {
    group: usize,
    items: Vec<Item>,
    states: Vec<PanelState>,
    visibility: Visibility,
}

impl ToggleController {
    pub(crate) fn new(
        group: usize,
        items: Vec<Item>,
        visibility: Visibility,
        observers: Observers,
    ) -> Self {
        let states = vec![PanelState::Closed; items.len()];
        Self {
            inner: Arc::new(RwLock::new(ControllerInner {
                group,
                items,
                states,
                visibility,
            })),
            observers,
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, ControllerInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Number of indexed items, including any whose nodes were since removed
    /// from the document.
    pub fn len(&self) -> usize {
        self.with_items(<[Item]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` over the indexed items without cloning them.
    pub fn with_items<R>(&self, f: impl FnOnce(&[Item]) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard.items)
    }

    pub fn items(&self) -> Vec<Item> {
        self.with_items(<[Item]>::to_vec)
    }

    pub fn item(&self, index: usize) -> Option<Item> {
        self.with_items(|items| items.get(index).cloned())
    }

    /// Recorded state of an item. An item removed from the document keeps its
    /// last state until [`sync`](Self::sync) or the next transition.
    pub fn state(&self, index: usize) -> Option<PanelState> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.states.get(index).copied())
    }

    /// Index of the open item, if any. See [`state`](Self::state) for removed items.
    pub fn open_index(&self) -> Option<usize> {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.states.iter().position(|s| s.is_open()))
    }

    /// Whether the item's header and content are both still in `doc`.
    pub fn is_attached(&self, doc: &Document, index: usize) -> bool {
        self.with_items(|items| {
            items
                .get(index)
                .is_some_and(|item| doc.contains(item.header) && doc.contains(item.content))
        })
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Close every item of this group.
    pub fn close_all(&self, doc: &mut Document) {
        let changes = {
            let mut inner = self.write();
            let before = inner.states.clone();
            inner.close_all(doc);
            inner.changes(&before)
        };
        self.observers.notify(&changes);
    }

    /// Mark items whose nodes left `doc` as closed. Returns how many changed.
    pub fn sync(&self, doc: &Document) -> usize {
        let changes = {
            let mut inner = self.write();
            let before = inner.states.clone();
            let ControllerInner { items, states, .. } = &mut *inner;
            for (item, state) in items.iter().zip(states.iter_mut()) {
                if !doc.contains(item.header) || !doc.contains(item.content) {
                    *state = PanelState::Closed;
                }
            }
            inner.changes(&before)
        };
        if !changes.is_empty() {
            log::debug!("[windbox] closed {} detached item(s)", changes.len());
        }
        self.observers.notify(&changes);
        changes.len()
    }

    /// Close the whole group, then open `index` unless `was_open`.
    ///
    /// Returns the item's resulting state.
    pub fn set_state(
        &self,
        doc: &mut Document,
        index: usize,
        was_open: bool,
    ) -> Result<PanelState, WindBoxError> {
        self.transition(doc, index, |_| was_open)
    }

    /// Header activation: open a closed item, close an open one.
    pub fn activate(&self, doc: &mut Document, index: usize) -> Result<PanelState, WindBoxError> {
        self.transition(doc, index, PanelState::is_open)
    }

    /// Open `index`, closing its siblings. Opening an open item is a no-op.
    pub fn open(&self, doc: &mut Document, index: usize) -> Result<(), WindBoxError> {
        self.transition(doc, index, |_| false).map(|_| ())
    }

    /// Close `index` if it is open. Closing a closed item is a no-op.
    pub fn close(&self, doc: &mut Document, index: usize) -> Result<(), WindBoxError> {
        let len = self.len();
        match self.state(index) {
            Some(PanelState::Open) => {
                self.close_all(doc);
                Ok(())
            }
            Some(PanelState::Closed) => Ok(()),
            None => Err(WindBoxError::ItemOutOfRange { index, len }),
        }
    }

    fn transition(
        &self,
        doc: &mut Document,
        index: usize,
        was_open: impl FnOnce(PanelState) -> bool,
    ) -> Result<PanelState, WindBoxError> {
        let (state, changes) = {
            let mut inner = self.write();
            let len = inner.items.len();
            let Some(current) = inner.states.get(index).copied() else {
                return Err(WindBoxError::ItemOutOfRange { index, len });
            };

            let before = inner.states.clone();
            let was_open = was_open(current);
            inner.close_all(doc);
            if !was_open {
                inner.open(doc, index);
            }

            log::debug!(
                "[windbox] group {} item {}: {:?} -> {:?}",
                inner.group,
                index,
                current,
                inner.states[index]
            );
            (inner.states[index], inner.changes(&before))
        };

        self.observers.notify(&changes);
        Ok(state)
    }
}

impl ControllerInner {
    fn close_all(&mut self, doc: &mut Document) {
        for (item, state) in self.items.iter().zip(self.states.iter_mut()) {
            *state = PanelState::Closed;
            render(doc, item, PanelState::Closed, self.visibility);
        }
    }

    fn open(&mut self, doc: &mut Document, index: usize) {
        self.states[index] = PanelState::Open;
        render(doc, &self.items[index], PanelState::Open, self.visibility);
    }

    /// Items whose state differs from `before`: closings first, then the opening.
    fn changes(&self, before: &[PanelState]) -> Vec<ChangeEvent> {
        let changed = |target: PanelState| {
            self.states
                .iter()
                .zip(before)
                .enumerate()
                .filter(move |(_, (now, was))| now != was && **now == target)
                .map(move |(index, _)| ChangeEvent {
                    group: self.group,
                    item: index,
                    item_id: self.items[index].id.clone(),
                    state: target,
                })
        };
        changed(PanelState::Closed)
            .chain(changed(PanelState::Open))
            .collect()
    }
}

/// Write an item's state into the document.
fn render(doc: &mut Document, item: &Item, state: PanelState, visibility: Visibility) {
    let open = state.is_open();
    set_attrs(
        doc,
        item.content,
        [
            ("aria-hidden", if open { "false" } else { "true" }),
            ("disabled", if open { "true" } else { "false" }),
        ],
    );
    set_attrs(
        doc,
        item.header,
        [("aria-expanded", if open { "true" } else { "false" })],
    );
    render_visual(doc, item.content, state, visibility);
}

/// Class and inline display for a content panel.
pub(crate) fn render_visual(
    doc: &mut Document,
    content: NodeId,
    state: PanelState,
    visibility: Visibility,
) {
    let Some(el) = doc.get_mut(content) else {
        return;
    };

    match (visibility, state) {
        (Visibility::Inline, PanelState::Open) => {
            el.add_class(OPEN_CLASS);
            el.set_style_property("display", "block");
        }
        (Visibility::Inline, PanelState::Closed) => {
            el.remove_class(OPEN_CLASS);
            el.set_style_property("display", "none");
        }
        // External styling animates on the class; display is left alone
        (Visibility::CustomTransitions, PanelState::Open) => {
            el.add_class(OPEN_CLASS);
        }
        (Visibility::CustomTransitions, PanelState::Closed) => {
            el.remove_class(OPEN_CLASS);
            el.set_style_property("display", "block");
        }
    }
}
