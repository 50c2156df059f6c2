//! Record indices.

use std::fmt;

/// A database index. All record kinds share one numbering; `0` is never
/// assigned and stands for "no record".
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Index(u32);

impl Index {
    pub const NONE: Index = Index(0);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Index(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// `Some(self)` unless this is [`Index::NONE`].
    #[inline]
    pub fn get(self) -> Option<Index> {
        self.is_some().then_some(self)
    }
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("Index::NONE")
        } else {
            write!(f, "Index({})", self.0)
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub type TypeIndex = Index;
pub type FunctionIndex = Index;
pub type WrapperIndex = Index;
pub type ManifestIndex = Index;
pub type ElementIndex = Index;
pub type MakeSeqIndex = Index;
