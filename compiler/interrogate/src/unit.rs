//! The builder's input.

use cpp_ir::Manifest;
use cpp_types::Pool;

/// How a header was included.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IncludeStyle {
    /// `#include "file.h"`
    Quote,
    /// `#include <file.h>`
    Angle,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Include {
    pub filename: String,
    pub style: IncludeStyle,
}

impl Include {
    pub fn quote(filename: impl Into<String>) -> Self {
        Include {
            filename: filename.into(),
            style: IncludeStyle::Quote,
        }
    }

    pub fn angle(filename: impl Into<String>) -> Self {
        Include {
            filename: filename.into(),
            style: IncludeStyle::Angle,
        }
    }
}

/// Everything a parsed set of headers produced: the declaration model,
/// the preprocessor manifests in definition order, and the headers named
/// on the command line.
pub struct TranslationUnit {
    pub pool: Pool,
    pub manifests: Vec<Manifest>,
    pub includes: Vec<Include>,
}

impl TranslationUnit {
    pub fn new(pool: Pool) -> Self {
        TranslationUnit {
            pool,
            manifests: Vec::new(),
            includes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_manifest(mut self, manifest: Manifest) -> Self {
        self.manifests.push(manifest);
        self
    }

    #[must_use]
    pub fn with_include(mut self, include: Include) -> Self {
        self.includes.push(include);
        self
    }
}
