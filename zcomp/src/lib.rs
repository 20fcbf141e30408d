pub mod base;
pub mod error;
pub mod spoiler;

pub use base::{Component, ComponentFactory, ComponentOptions};
pub use error::{ComponentError, Result};
pub use spoiler::{
    spoiler_factory, spoiler_group_factory, ChangeStateDetail, Spoiler, SpoilerGroup,
    SpoilerGroupOptions, SpoilerOptions,
};

pub mod prelude {
    pub use crate::base::{Component, ComponentFactory, ComponentOptions};
    pub use crate::error::{ComponentError, Result};
    pub use crate::spoiler::{
        spoiler_factory, spoiler_group_factory, ChangeStateDetail, Spoiler, SpoilerGroup,
        SpoilerGroupOptions, SpoilerOptions,
    };
    pub use zdom::{el, Document, Event, NodeId};
}
