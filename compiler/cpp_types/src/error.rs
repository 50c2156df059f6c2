//! Recoverable model errors.

use thiserror::Error;

/// Errors raised while instantiating templates.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("`{name}` is not a template")]
    NotATemplate { name: String },

    #[error("`{name}` expects {expected} template argument(s), found {found}")]
    TemplateArgCount {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("template argument {index} of `{name}` is of the wrong kind")]
    TemplateArgKind { name: String, index: usize },
}
