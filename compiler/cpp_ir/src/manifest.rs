//! Preprocessor manifests.

use crate::{Expr, SourceFile, Visibility};

/// A `#define` seen by the preprocessor.
///
/// Only parameterless manifests with a parsed expression can be exported as
/// constants; the rest are still recorded so their definition text is
/// available.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Manifest {
    pub name: String,
    /// Formal parameter names for function-like macros.
    pub parameters: Option<Vec<String>>,
    /// The replacement text, exactly as expanded.
    pub expansion: String,
    /// The replacement text parsed as an expression, if it parses.
    pub expr: Option<Expr>,
    pub file: SourceFile,
    pub vis: Visibility,
    pub comment: Option<String>,
}

impl Manifest {
    /// An object-like manifest whose expansion is the given expression.
    pub fn constant(name: impl Into<String>, expr: Expr, file: SourceFile) -> Self {
        Manifest {
            name: name.into(),
            parameters: None,
            expansion: expr.to_string(),
            expr: Some(expr),
            file,
            vis: Visibility::Published,
            comment: None,
        }
    }

    #[inline]
    pub fn has_parameters(&self) -> bool {
        self.parameters.is_some()
    }

    #[must_use]
    pub fn with_vis(mut self, vis: Visibility) -> Self {
        self.vis = vis;
        self
    }
}
