//! Component base: the capability every widget implements, the factory that
//! constructs and registers instances, and option helpers.

mod factory;
mod options;

use std::rc::Rc;

use zdom::{Document, NodeId};

use crate::error::Result;

pub use factory::ComponentFactory;
pub use options::{non_empty, ComponentOptions};

/// A widget bound to a root element.
pub trait Component: Sized + 'static {
    type Options: ComponentOptions;

    /// Collaborators shared by every instance a factory builds, e.g. the
    /// factory of the components this one coordinates. `()` when unused.
    type Services: Clone + 'static;

    /// Construct an instance bound to `root`.
    ///
    /// Called by [`ComponentFactory`]; the instance is registered only if
    /// this returns `Ok`.
    fn bind(
        doc: &Document,
        root: NodeId,
        options: Self::Options,
        services: &Self::Services,
    ) -> Result<Rc<Self>>;

    fn root(&self) -> NodeId;

    fn options(&self) -> &Self::Options;
}

/// Resolve a presence flag: true if `element` carries `attr` (whatever its
/// value), `default` if it does not or no attribute is configured.
pub fn bool_option(doc: &Document, element: NodeId, attr: Option<&str>, default: bool) -> bool {
    match attr.filter(|a| !a.is_empty()) {
        Some(attr) if doc.has_attr(element, attr) => true,
        _ => default,
    }
}

/// Resolve an integer option from `attr`, falling back to `default` when the
/// attribute is absent or not a whole number.
///
/// Decimal and exponent spellings of whole numbers (`"1.0"`, `"1e0"`) count.
pub fn int_option(doc: &Document, element: NodeId, attr: Option<&str>, default: i64) -> i64 {
    attr.filter(|a| !a.is_empty())
        .and_then(|attr| doc.attr(element, attr))
        .and_then(|value| parse_whole(value.trim()))
        .unwrap_or(default)
}

fn parse_whole(value: &str) -> Option<i64> {
    if let Ok(int) = value.parse::<i64>() {
        return Some(int);
    }
    let float = value.parse::<f64>().ok()?;
    let in_range = float >= i64::MIN as f64 && float < i64::MAX as f64;
    (float.is_finite() && float.fract() == 0.0 && in_range).then_some(float as i64)
}
