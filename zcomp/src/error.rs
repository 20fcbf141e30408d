//! Component construction errors.

use zdom::DomError;

pub type Result<T> = std::result::Result<T, ComponentError>;

/// Configuration errors raised while binding a component to its root.
///
/// Runtime operations such as [`Spoiler::set_opened`](crate::Spoiler::set_opened)
/// never fail; these only surface from construction and option loading.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    #[error("Spoiler groups cannot be nested")]
    NestedGroup,

    /// A required option is absent or empty.
    #[error("{0} option is empty")]
    MissingOption(&'static str),

    #[error("Invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    #[error(transparent)]
    Dom(#[from] DomError),
}
