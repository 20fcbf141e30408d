//! Spoiler (disclosure) widget and the group that keeps siblings exclusive.
//!
//! A [`Spoiler`] toggles when its head is clicked, mirrors its state into CSS
//! classes and attribute-declared text, and announces every transition with a
//! cancelable "before" event and a non-cancelable "after" event, both bubbling
//! from its root. A [`SpoilerGroup`] listens for the "after" event from its
//! descendants and, in exclusive mode, closes the previously open member.
//!
//! # Example
//!
//! ```ignore
//! let doc = Document::new();
//! doc.append(doc.body(), el("div").class("js-spoiler-group").flag("data-spoiler-group-exclusive")
//!     .child(el("div").class("js-spoiler").child(el("button").class("js-spoiler__head")))
//!     .child(el("div").class("js-spoiler").child(el("button").class("js-spoiler__head"))))?;
//!
//! let spoilers = spoiler_factory(&doc);
//! spoilers.init()?;
//! spoiler_group_factory(&doc, &spoilers).init()?;
//! ```

mod events;
mod group;
mod options;
mod state;

pub use events::ChangeStateDetail;
pub use group::SpoilerGroup;
pub use options::{SpoilerGroupOptions, SpoilerOptions};
pub use state::Spoiler;

use zdom::Document;

use crate::base::ComponentFactory;

/// Factory for spoilers with the default options.
pub fn spoiler_factory(doc: &Document) -> ComponentFactory<Spoiler> {
    ComponentFactory::new("spoiler", doc, ())
}

/// Factory for spoiler groups resolving members through `spoilers`.
pub fn spoiler_group_factory(
    doc: &Document,
    spoilers: &ComponentFactory<Spoiler>,
) -> ComponentFactory<SpoilerGroup> {
    ComponentFactory::new("spoiler-group", doc, spoilers.clone())
}
