//! Indexing: turning a container's children into header/content items.
//!
//! Indexing runs in two phases. [`plan`] only reads the document and fails
//! on the first invalid item, so construction can reject a configuration
//! before anything is touched. [`apply`] then writes the classes, ARIA
//! attributes and closed visibility state.

use std::collections::HashMap;

use windom::{Document, NodeId, Selector};

use crate::attrs::set_attrs;
use crate::config::{MissingParts, Visibility};
use crate::error::WindBoxError;
use crate::group::{Item, CONTAINER_ATTR, CONTENT_CLASS, HEADER_CLASS};
use crate::group::controller::render_visual;
use crate::state::PanelState;
use crate::token::GroupToken;

/// Everything needed to mount one group, computed without mutating the document.
#[derive(Debug)]
pub(crate) struct GroupPlan {
    pub index: usize,
    pub container: NodeId,
    pub token: GroupToken,
    pub items: Vec<Item>,
}

pub(crate) struct PartSelectors<'a> {
    pub header: &'a Selector,
    pub content: &'a Selector,
    pub missing: MissingParts,
}

pub(crate) fn plan(
    doc: &Document,
    container: NodeId,
    index: usize,
    parts: &PartSelectors<'_>,
) -> Result<GroupPlan, WindBoxError> {
    let token = GroupToken::generate();
    let mut items = Vec::new();

    for (position, child) in doc.children(container).into_iter().enumerate() {
        let header = doc.select(parts.header, Some(child)).into_iter().next();
        let content = doc
            .select(parts.content, Some(child))
            .into_iter()
            .find(|node| Some(*node) != header);

        let (header, content) = match (header, content) {
            (Some(header), Some(content)) => (header, content),
            (header, _) if parts.missing == MissingParts::Skip => {
                log::warn!(
                    "[windbox] group {index}: child {} has no {}, skipped",
                    position + 1,
                    if header.is_none() { "header" } else { "content" }
                );
                continue;
            }
            (None, _) => {
                return Err(WindBoxError::MissingHeader {
                    group: index,
                    item: position + 1,
                    selector: parts.header.to_string(),
                });
            }
            (Some(_), None) => {
                return Err(WindBoxError::MissingContent {
                    group: index,
                    item: position + 1,
                    selector: parts.content.to_string(),
                });
            }
        };

        items.push(Item {
            id: token.item_id(index, items.len() + 1),
            header,
            content,
        });
    }

    log::trace!(
        "[windbox] planned group {index} ({token}) with {} item(s)",
        items.len()
    );

    Ok(GroupPlan {
        index,
        container,
        token,
        items,
    })
}

/// Reject plans that share a node.
///
/// A container, header or content element may belong to one group only, and
/// parts already indexed by an earlier mount cannot be claimed again. Nested
/// containers matched by one selector trip this check.
pub(crate) fn check_overlap(doc: &Document, plans: &[GroupPlan]) -> Result<(), WindBoxError> {
    let mut claimed: HashMap<NodeId, usize> = HashMap::new();

    for plan in plans {
        let parts = plan
            .items
            .iter()
            .flat_map(|item| [item.header, item.content]);

        for node in std::iter::once(plan.container).chain(parts) {
            let indexed = doc.has_class(node, HEADER_CLASS) || doc.has_class(node, CONTENT_CLASS);
            let taken = claimed.insert(node, plan.index).is_some();
            if indexed || taken {
                return Err(WindBoxError::Overlapping {
                    node,
                    group: plan.index,
                });
            }
        }
    }

    Ok(())
}

pub(crate) fn apply(doc: &mut Document, plan: &GroupPlan, visibility: Visibility) {
    set_attrs(doc, plan.container, [(CONTAINER_ATTR, plan.token.as_str())]);

    for item in &plan.items {
        if let Some(header) = doc.get_mut(item.header) {
            header.add_class(HEADER_CLASS);
        }
        if let Some(content) = doc.get_mut(item.content) {
            content.add_class(CONTENT_CLASS);
        }

        let id = item.id.as_str();
        set_attrs(
            doc,
            item.header,
            [
                ("target", id),
                ("role", "heading"),
                ("aria-expanded", "false"),
                ("aria-controls", id),
            ],
        );
        set_attrs(
            doc,
            item.content,
            [
                ("id", id),
                ("aria-hidden", "true"),
                ("disabled", "true"),
                ("role", "region"),
            ],
        );
        render_visual(doc, item.content, PanelState::Closed, visibility);
    }
}
