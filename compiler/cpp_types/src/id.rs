//! Arena handles.
//!
//! Every node of the model lives in a [`Pool`](crate::Pool) arena and is
//! referred to by a 32-bit handle. Type handles come from the canonical
//! registry, so `TypeId` equality is structural equality.

use std::fmt;

/// A 32-bit handle to an interned type.
///
/// Primitive types have fixed handles, pre-interned when the pool is
/// created, so they can be named without a pool. The default is `VOID`.
#[derive(Copy, Clone, Default, Eq, PartialEq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    // === Primitive Types (handles 0-9) ===

    /// `void`.
    pub const VOID: Self = Self(0);
    /// `bool`.
    pub const BOOL: Self = Self(1);
    /// `char`.
    pub const CHAR: Self = Self(2);
    /// `int`.
    pub const INT: Self = Self(3);
    /// `unsigned int`.
    pub const UNSIGNED_INT: Self = Self(4);
    /// `long int`.
    pub const LONG: Self = Self(5);
    /// `long long int`.
    pub const LONG_LONG: Self = Self(6);
    /// `float`.
    pub const FLOAT: Self = Self(7);
    /// `double`.
    pub const DOUBLE: Self = Self(8);
    /// The type of `nullptr`.
    pub const NULLPTR: Self = Self(9);

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 10;

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this is a pre-interned primitive.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::PRIMITIVE_COUNT
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "TypeId::VOID"),
            1 => write!(f, "TypeId::BOOL"),
            2 => write!(f, "TypeId::CHAR"),
            3 => write!(f, "TypeId::INT"),
            4 => write!(f, "TypeId::UNSIGNED_INT"),
            5 => write!(f, "TypeId::LONG"),
            6 => write!(f, "TypeId::LONG_LONG"),
            7 => write!(f, "TypeId::FLOAT"),
            8 => write!(f, "TypeId::DOUBLE"),
            9 => write!(f, "TypeId::NULLPTR"),
            n => write!(f, "TypeId({n})"),
        }
    }
}

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id! {
    /// Handle to a struct, class or union definition.
    StructId
}

arena_id! {
    /// Handle to an enum definition.
    EnumId
}

arena_id! {
    /// Handle to a typedef definition.
    TypedefId
}

arena_id! {
    /// Handle to a scope (global, namespace, or the body of a struct).
    ScopeId
}

arena_id! {
    /// Handle to a named declaration: function, variable or data member.
    InstanceId
}

impl ScopeId {
    /// The global scope, created with every pool.
    pub const GLOBAL: Self = Self(0);
}
