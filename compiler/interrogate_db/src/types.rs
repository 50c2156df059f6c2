//! Type records.

use bitflags::bitflags;

use crate::{ElementIndex, FunctionIndex, IndexRemapper, MakeSeqIndex, TypeIndex};

bitflags! {
    /// What kind of type a record describes, and how complete it is.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct TypeFlags: u32 {
        const GLOBAL = 1 << 0;
        const NESTED = 1 << 1;
        const FULLY_DEFINED = 1 << 2;
        const UNPUBLISHED = 1 << 3;
        const DEPRECATED = 1 << 4;

        // === Atomic modifiers ===
        const ATOMIC = 1 << 5;
        const UNSIGNED = 1 << 6;
        const SIGNED = 1 << 7;
        const LONG = 1 << 8;
        const LONGLONG = 1 << 9;
        const SHORT = 1 << 10;

        // === Wrappers ===
        const WRAPPED = 1 << 11;
        const POINTER = 1 << 12;
        const CONST = 1 << 13;
        const TYPEDEF = 1 << 14;
        const ARRAY = 1 << 15;

        // === Aggregates ===
        const ENUM = 1 << 16;
        const SCOPED_ENUM = 1 << 17;
        const STRUCT = 1 << 18;
        const CLASS = 1 << 19;
        const UNION = 1 << 20;
        const FINAL = 1 << 21;

        // === Destructors ===
        const TRUE_DESTRUCTOR = 1 << 22;
        const PRIVATE_DESTRUCTOR = 1 << 23;
        const INHERITED_DESTRUCTOR = 1 << 24;
        const IMPLICIT_DESTRUCTOR = 1 << 25;
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct DerivationFlags: u32 {
        const UPCAST = 1 << 0;
        const DOWNCAST = 1 << 1;
        /// The base is virtual, so no downcast can be written.
        const DOWNCAST_IMPOSSIBLE = 1 << 2;
    }
}

/// The primitive an atomic type maps to in a binding language.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum AtomicToken {
    #[default]
    NotAtomic,
    Int,
    Float,
    Double,
    Bool,
    Char,
    Void,
    /// `char *` and friends.
    String,
    LongLong,
    Null,
}

/// One enumerator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValue {
    pub name: String,
    pub scoped_name: String,
    pub comment: String,
    pub value: i64,
}

/// One base class of a struct, with the casts that cross it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Derivation {
    pub flags: DerivationFlags,
    pub base: TypeIndex,
    pub upcast: FunctionIndex,
    pub downcast: FunctionIndex,
}

/// A type: atomic, wrapped, enum or struct.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct InterrogateType {
    pub name: String,
    pub scoped_name: String,
    pub true_name: String,
    pub comment: String,
    pub flags: TypeFlags,
    pub outer_class: TypeIndex,
    pub atomic_token: AtomicToken,
    /// The pointee, const target, typedef target or array element.
    pub wrapped_type: TypeIndex,
    pub array_size: u32,
    pub enum_values: Vec<EnumValue>,
    pub constructors: Vec<FunctionIndex>,
    pub destructor: FunctionIndex,
    pub elements: Vec<ElementIndex>,
    pub methods: Vec<FunctionIndex>,
    pub make_seqs: Vec<MakeSeqIndex>,
    pub casts: Vec<FunctionIndex>,
    pub derivations: Vec<Derivation>,
    pub nested_types: Vec<TypeIndex>,
}

impl InterrogateType {
    pub const EMPTY: InterrogateType = InterrogateType {
        name: String::new(),
        scoped_name: String::new(),
        true_name: String::new(),
        comment: String::new(),
        flags: TypeFlags::empty(),
        outer_class: TypeIndex::NONE,
        atomic_token: AtomicToken::NotAtomic,
        wrapped_type: TypeIndex::NONE,
        array_size: 0,
        enum_values: Vec::new(),
        constructors: Vec::new(),
        destructor: FunctionIndex::NONE,
        elements: Vec::new(),
        methods: Vec::new(),
        make_seqs: Vec::new(),
        casts: Vec::new(),
        derivations: Vec::new(),
        nested_types: Vec::new(),
    };

    #[inline]
    pub fn is_global(&self) -> bool {
        self.flags.contains(TypeFlags::GLOBAL)
    }

    #[inline]
    pub fn is_fully_defined(&self) -> bool {
        self.flags.contains(TypeFlags::FULLY_DEFINED)
    }

    #[inline]
    pub fn is_nested(&self) -> bool {
        self.flags.contains(TypeFlags::NESTED)
    }

    #[inline]
    pub fn is_struct(&self) -> bool {
        self.flags
            .intersects(TypeFlags::STRUCT | TypeFlags::CLASS | TypeFlags::UNION)
    }

    #[inline]
    pub fn is_enum(&self) -> bool {
        self.flags.contains(TypeFlags::ENUM)
    }

    #[inline]
    pub fn has_destructor(&self) -> bool {
        self.destructor.is_some()
    }

    /// Fold a later description of the same type into a forward reference.
    ///
    /// A fully defined `other` replaces the content; otherwise only flags
    /// and missing names are taken. `GLOBAL` is kept from either side.
    pub fn merge_with(&mut self, other: &InterrogateType) {
        let global = (self.flags | other.flags) & TypeFlags::GLOBAL;
        if other.is_fully_defined() {
            *self = other.clone();
        } else {
            self.flags |= other.flags;
            for (mine, theirs) in [
                (&mut self.name, &other.name),
                (&mut self.scoped_name, &other.scoped_name),
                (&mut self.true_name, &other.true_name),
                (&mut self.comment, &other.comment),
            ] {
                if mine.is_empty() {
                    mine.clone_from(theirs);
                }
            }
        }
        self.flags |= global;
    }

    pub fn remap_indices(&mut self, remap: &IndexRemapper) {
        self.outer_class = remap.map_from(self.outer_class);
        self.wrapped_type = remap.map_from(self.wrapped_type);
        self.destructor = remap.map_from(self.destructor);
        remap.map_all(&mut self.constructors);
        remap.map_all(&mut self.elements);
        remap.map_all(&mut self.methods);
        remap.map_all(&mut self.make_seqs);
        remap.map_all(&mut self.casts);
        remap.map_all(&mut self.nested_types);
        for derivation in &mut self.derivations {
            derivation.base = remap.map_from(derivation.base);
            derivation.upcast = remap.map_from(derivation.upcast);
            derivation.downcast = remap.map_from(derivation.downcast);
        }
    }
}
