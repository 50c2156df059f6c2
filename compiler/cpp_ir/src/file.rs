//! Source-file provenance.

use std::fmt;

/// Where a file was found relative to the package being interrogated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum FileOrigin {
    /// Part of the package being interrogated.
    #[default]
    Local,
    /// Found through an include path belonging to another package.
    Foreign,
    /// A system header.
    System,
}

/// The file a declaration appeared in.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceFile {
    /// The filename as written in the `#include` (or on the command line).
    pub filename: String,
    pub origin: FileOrigin,
}

impl SourceFile {
    pub fn new(filename: impl Into<String>, origin: FileOrigin) -> Self {
        SourceFile {
            filename: filename.into(),
            origin,
        }
    }

    /// A file belonging to the interrogated package.
    pub fn local(filename: impl Into<String>) -> Self {
        Self::new(filename, FileOrigin::Local)
    }

    /// A file belonging to some other package.
    pub fn foreign(filename: impl Into<String>) -> Self {
        Self::new(filename, FileOrigin::Foreign)
    }

    #[inline]
    pub fn is_local(&self) -> bool {
        self.origin == FileOrigin::Local
    }

    /// True for implementation files, whose declarations are never exported.
    pub fn is_c_file(&self) -> bool {
        is_c_file(&self.filename)
    }

    /// True for implementation files and inline (`.I`, `.T`) files.
    pub fn is_c_or_i_file(&self) -> bool {
        is_c_or_i_file(&self.filename)
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.filename)
    }
}

fn extension(filename: &str) -> Option<&str> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let dot = base.rfind('.')?;
    Some(&base[dot + 1..])
}

/// Whether `filename` names a C or C++ implementation file.
pub fn is_c_file(filename: &str) -> bool {
    match extension(filename) {
        // `.C` is C++ by convention; everything else is case-insensitive.
        Some("C") => true,
        Some(ext) => matches!(
            ext.to_ascii_lowercase().as_str(),
            "c" | "cc" | "cpp" | "cxx" | "c++"
        ),
        None => false,
    }
}

/// Whether `filename` names an implementation file or an inline file.
pub fn is_c_or_i_file(filename: &str) -> bool {
    is_c_file(filename)
        || matches!(
            extension(filename).map(str::to_ascii_lowercase).as_deref(),
            Some("i" | "t")
        )
}
