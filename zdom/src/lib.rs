pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod selector;

pub use document::Document;
pub use element::{el, ElementBuilder, NodeId};
pub use error::{DomError, Result};
pub use event::{Event, Listener, ListenerId};
pub use selector::Selector;
