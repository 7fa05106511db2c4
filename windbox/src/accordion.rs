//! Mounting accordion groups onto a document.

use std::sync::Arc;

use windom::{Document, Selector};

use crate::config::WindBoxConfig;
use crate::error::WindBoxError;
use crate::group::indexer::{self, PartSelectors};
use crate::group::{Group, CONTAINER_ATTR};
use crate::state::{ChangeEvent, Observers};

/// Accordion groups mounted from one selector.
///
/// # Example
///
/// ```
/// use windbox::{WindBox, WindBoxConfig};
/// use windom::{Document, Element};
///
/// let mut doc = Document::new(Element::new("body").child(
///     Element::div().class("faq").children([
///         Element::div()
///             .child(Element::button().text("Question"))
///             .child(Element::div().text("Answer")),
///     ]),
/// ));
///
/// let windbox = WindBox::create(&mut doc, WindBoxConfig::new(".faq")).unwrap();
/// let header = windbox.groups()[0].item(0).unwrap().header;
///
/// doc.click(header);
/// assert_eq!(windbox.groups()[0].open_index(), Some(0));
/// ```
#[derive(Debug)]
pub struct WindBox {
    config: WindBoxConfig,
    groups: Vec<Group>,
    observers: Observers,
}

impl WindBox {
    /// Index every container matching the configured selector and bind its
    /// headers.
    ///
    /// Fails before touching the document when the configuration is invalid,
    /// nothing matches, a container is already mounted, two groups would share
    /// an element, or (under
    /// [`MissingParts::Reject`](crate::MissingParts::Reject)) an item lacks a
    /// header or content element.
    pub fn create(doc: &mut Document, config: WindBoxConfig) -> Result<Self, WindBoxError> {
        let selector = config.validate()?.to_string();
        let header = Selector::parse(&config.header_selector)?;
        let content = Selector::parse(&config.content_selector)?;

        let containers = doc.query_selector_all(&selector)?;
        if containers.is_empty() {
            return Err(WindBoxError::ContainerNotFound(selector));
        }
        if let Some(mounted) = containers
            .iter()
            .find(|c| doc.get_attribute(**c, CONTAINER_ATTR).is_some())
        {
            return Err(WindBoxError::AlreadyMounted(format!("{selector} ({mounted})")));
        }

        let parts = PartSelectors {
            header: &header,
            content: &content,
            missing: config.missing_parts,
        };
        let plans = containers
            .iter()
            .enumerate()
            .map(|(i, container)| indexer::plan(doc, *container, i + 1, &parts))
            .collect::<Result<Vec<_>, _>>()?;
        indexer::check_overlap(doc, &plans)?;

        let observers = Observers::default();
        let visibility = config.visibility();
        let groups: Vec<Group> = plans
            .into_iter()
            .map(|plan| Group::mount(doc, plan, visibility, observers.clone()))
            .collect();

        log::debug!(
            "[windbox] {selector:?}: {} group(s), {:?}",
            groups.len(),
            visibility
        );

        Ok(Self {
            config,
            groups,
            observers,
        })
    }

    pub fn config(&self) -> &WindBoxConfig {
        &self.config
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Group by 1-based sequence number.
    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.iter().find(|g| g.index() == index)
    }

    /// Every item id across all groups, in group then item order.
    pub fn item_ids(&self) -> Vec<String> {
        self.groups.iter().flat_map(Group::item_ids).collect()
    }

    /// Locate an item by id. Returns the group and the item index within it.
    pub fn find_item(&self, item_id: &str) -> Option<(&Group, usize)> {
        self.groups
            .iter()
            .find_map(|group| group.position(item_id).map(|index| (group, index)))
    }

    /// Close items of every group whose nodes were removed from `doc`.
    pub fn sync(&self, doc: &Document) -> usize {
        self.groups.iter().map(|group| group.sync(doc)).sum()
    }

    /// Subscribe to state changes of every group mounted by this instance.
    pub fn on_change<F>(&self, listener: F)
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(Arc::new(listener));
    }
}
