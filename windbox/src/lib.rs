//! WindBox: accordion groups over a [`windom`] document.
//!
//! Each container matched by the configured selector becomes one group. Its
//! direct children are items, each with a header and a content panel. At most
//! one panel per group is open; activating the open header closes it.

pub mod accordion;
pub mod attrs;
pub mod config;
pub mod error;
pub mod group;
pub mod state;
pub mod token;

pub use accordion::WindBox;
pub use attrs::set_attrs;
pub use config::{MissingParts, Visibility, WindBoxConfig};
pub use error::{ConfigError, WindBoxError};
pub use group::{Group, Item, ToggleController, CONTENT_CLASS, HEADER_CLASS, OPEN_CLASS};
pub use state::{ChangeEvent, PanelState};
pub use token::GroupToken;
