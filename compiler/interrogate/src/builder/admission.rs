//! Whether a declaration is exported at all.
//!
//! Each check returns the first reason to skip, in a fixed order: template,
//! implementation file, foreign or ignored file, visibility, storage,
//! protected types, explicit ignores.

use std::fmt;

use cpp_ir::{SourceFile, StorageClass, Visibility};
use cpp_types::Instance;

use super::InterrogateBuilder;
use crate::type_manager::{involves_ignored, involves_protected};

/// Why a declaration was left out of the database.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    Template,
    /// Declared in a `.c`/`.cxx`/… file rather than a header.
    ImplementationFile,
    ForeignFile,
    IgnoredFile,
    NotPublished,
    StaticOrDeleted,
    InvolvesProtected,
    /// Named on the `ignoreinvolved` or `ignoremember` list.
    Ignored,
    /// A qualified name that does not name a reachable scope, or a
    /// definition of something declared elsewhere.
    OutOfScope,
    /// A function-like macro.
    Parameterized,
}

impl SkipReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            SkipReason::Template => "template",
            SkipReason::ImplementationFile => "implementation file",
            SkipReason::ForeignFile => "foreign file",
            SkipReason::IgnoredFile => "ignored file",
            SkipReason::NotPublished => "not published",
            SkipReason::StaticOrDeleted => "static or deleted",
            SkipReason::InvolvesProtected => "involves a protected type",
            SkipReason::Ignored => "ignored by name",
            SkipReason::OutOfScope => "out of scope",
            SkipReason::Parameterized => "parameterized manifest",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(super) fn log_skip(what: &str, reason: SkipReason) {
    tracing::trace!(what, reason = reason.as_str(), "skipped");
}

impl InterrogateBuilder {
    /// Headers of this package only, and not ones the filter drops.
    pub(super) fn check_file(&self, file: &SourceFile) -> Result<(), SkipReason> {
        if file.is_c_file() {
            Err(SkipReason::ImplementationFile)
        } else if !file.is_local() {
            Err(SkipReason::ForeignFile)
        } else if self.filter.in_ignorefile(&file.filename) {
            Err(SkipReason::IgnoredFile)
        } else {
            Ok(())
        }
    }

    pub(super) fn check_vis(&self, vis: Visibility) -> Result<(), SkipReason> {
        if vis.meets(self.options.min_vis) {
            Ok(())
        } else {
            Err(SkipReason::NotPublished)
        }
    }

    /// The full chain for a free function. `inst.ty` must already be
    /// resolved.
    pub(super) fn admit_function(&self, inst: &Instance) -> Result<(), SkipReason> {
        if inst.is_template() {
            return Err(SkipReason::Template);
        }
        self.check_file(&inst.file)?;
        self.check_vis(inst.vis)?;
        if inst.storage.intersects(StorageClass::NOT_EXPORTABLE) {
            return Err(SkipReason::StaticOrDeleted);
        }
        if involves_protected(&self.pool, inst.ty) {
            return Err(SkipReason::InvolvesProtected);
        }
        if involves_ignored(&self.pool, &self.filter, inst.ty) {
            return Err(SkipReason::Ignored);
        }
        Ok(())
    }
}
