//! Storage-class specifiers.

use bitflags::bitflags;

bitflags! {
    /// Declaration specifiers attached to an instance.
    ///
    /// `INHERITED_VIRTUAL` is never written by a declaration stream; it is
    /// inferred when a method overrides a virtual function first declared in
    /// a base class.
    #[derive(Copy, Clone, Eq, PartialEq, PartialOrd, Ord, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct StorageClass: u32 {
        // === Linkage ===

        /// `static`.
        const STATIC = 1 << 0;
        /// `extern`.
        const EXTERN = 1 << 1;
        /// `mutable`.
        const MUTABLE = 1 << 2;
        /// `thread_local`.
        const THREAD_LOCAL = 1 << 3;

        // === Function specifiers ===

        /// `inline`.
        const INLINE = 1 << 8;
        /// `explicit`.
        const EXPLICIT = 1 << 9;
        /// `constexpr`.
        const CONSTEXPR = 1 << 10;
        /// `virtual`, written or inferred.
        const VIRTUAL = 1 << 11;
        /// `= 0`.
        const PURE_VIRTUAL = 1 << 12;
        /// Overrides a virtual function declared in some base class.
        const INHERITED_VIRTUAL = 1 << 13;
        /// `final` on a method.
        const FINAL = 1 << 14;
        /// `override`.
        const OVERRIDE = 1 << 15;

        // === Definition state ===

        /// `= delete`.
        const DELETED = 1 << 16;
        /// `= default`.
        const DEFAULTED = 1 << 17;
    }
}

impl StorageClass {
    /// Specifiers that prevent a declaration from being exported.
    pub const NOT_EXPORTABLE: Self = Self::STATIC.union(Self::DELETED);

    #[inline]
    pub const fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    #[inline]
    pub const fn is_deleted(self) -> bool {
        self.contains(Self::DELETED)
    }

    #[inline]
    pub const fn is_virtual(self) -> bool {
        self.contains(Self::VIRTUAL)
    }
}
