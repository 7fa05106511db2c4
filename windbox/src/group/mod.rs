//! One mounted accordion group.

mod controller;
pub(crate) mod indexer;

pub use controller::ToggleController;

use windom::{listener, Document, Event, EventKind, NodeId};

use crate::config::Visibility;
use crate::error::WindBoxError;
use crate::state::{Observers, PanelState};
use crate::token::GroupToken;

use indexer::GroupPlan;

/// Marker class added to every indexed header.
pub const HEADER_CLASS: &str = "windbox-header";
/// Marker class added to every indexed content panel.
pub const CONTENT_CLASS: &str = "windbox-content";
/// Class present on a content panel while it is open.
pub const OPEN_CLASS: &str = "open";
/// Attribute set on a mounted container, holding its group token.
pub const CONTAINER_ATTR: &str = "data-windbox";

/// One header/content pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// `<token>-item-<group>-<item>`, also the content's `id` attribute.
    pub id: String,
    pub header: NodeId,
    pub content: NodeId,
}

/// A mounted group: one container and its items.
#[derive(Debug, Clone)]
pub struct Group {
    index: usize,
    token: GroupToken,
    container: NodeId,
    controller: ToggleController,
}

impl Group {
    /// Write the plan into the document and bind header listeners.
    pub(crate) fn mount(
        doc: &mut Document,
        plan: GroupPlan,
        visibility: Visibility,
        observers: Observers,
    ) -> Self {
        indexer::apply(doc, &plan, visibility);

        let controller =
            ToggleController::new(plan.index, plan.items.clone(), visibility, observers);
        bind(doc, &controller, &plan.items);

        log::debug!(
            "[windbox] mounted group {} ({}) on {} with {} item(s)",
            plan.index,
            plan.token,
            plan.container,
            plan.items.len()
        );

        Self {
            index: plan.index,
            token: plan.token,
            container: plan.container,
            controller,
        }
    }

    /// 1-based position of this group among the containers matched at construction.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn token(&self) -> &GroupToken {
        &self.token
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn controller(&self) -> &ToggleController {
        &self.controller
    }

    pub fn items(&self) -> Vec<Item> {
        self.controller.items()
    }

    pub fn item(&self, index: usize) -> Option<Item> {
        self.controller.item(index)
    }

    pub fn item_ids(&self) -> Vec<String> {
        self.controller
            .with_items(|items| items.iter().map(|item| item.id.clone()).collect())
    }

    pub fn len(&self) -> usize {
        self.controller.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controller.is_empty()
    }

    /// Index of the item with the given id.
    pub fn position(&self, item_id: &str) -> Option<usize> {
        self.controller
            .with_items(|items| items.iter().position(|item| item.id == item_id))
    }

    pub fn is_attached(&self, doc: &Document, index: usize) -> bool {
        self.controller.is_attached(doc, index)
    }

    /// Close items removed from `doc` since the last transition.
    pub fn sync(&self, doc: &Document) -> usize {
        self.controller.sync(doc)
    }

    pub fn state(&self, index: usize) -> Option<PanelState> {
        self.controller.state(index)
    }

    pub fn open_index(&self) -> Option<usize> {
        self.controller.open_index()
    }

    pub fn open(&self, doc: &mut Document, index: usize) -> Result<(), WindBoxError> {
        self.controller.open(doc, index)
    }

    pub fn close(&self, doc: &mut Document, index: usize) -> Result<(), WindBoxError> {
        self.controller.close(doc, index)
    }

    pub fn toggle(&self, doc: &mut Document, index: usize) -> Result<PanelState, WindBoxError> {
        self.controller.activate(doc, index)
    }

    pub fn close_all(&self, doc: &mut Document) {
        self.controller.close_all(doc)
    }
}

/// Register click and activation-key listeners on every header. Each
/// listener captures the controller and its item index.
fn bind(doc: &mut Document, controller: &ToggleController, items: &[Item]) {
    for (index, item) in items.iter().enumerate() {
        let on_click = controller.clone();
        doc.add_event_listener(
            item.header,
            EventKind::Click,
            listener(move |doc, _| {
                if let Err(err) = on_click.activate(doc, index) {
                    log::warn!("[windbox] click on item {index}: {err}");
                }
            }),
        );

        let on_key = controller.clone();
        doc.add_event_listener(
            item.header,
            EventKind::Key,
            listener(move |doc, event| {
                if let Event::Key { key, .. } = event
                    && key.is_activation()
                    && let Err(err) = on_key.activate(doc, index)
                {
                    log::warn!("[windbox] key on item {index}: {err}");
                }
            }),
        );
    }
}
