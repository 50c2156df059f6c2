//! Build diagnostics and errors.

use std::fmt;

use thiserror::Error;

/// A problem that cost one definition but not the build: a constant that
/// would not fold, an inconsistent property, a missing accessor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    /// The declaration the message is about, as a qualified name.
    pub subject: String,
}

impl Diagnostic {
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            subject: subject.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.subject, self.message)
    }
}

/// Errors that stop a build.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("forced type `{name}` does not name a type")]
    UnknownForcedType { name: String },
}
