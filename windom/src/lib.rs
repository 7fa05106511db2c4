pub mod document;
pub mod element;
pub mod event;
pub mod markup;
pub mod selector;

pub use document::{listener, Document, Listener};
pub use element::{find_element, find_element_mut, Content, Element, NodeId};
pub use event::{Event, EventKind, Key};
pub use selector::{Selector, SelectorError};
