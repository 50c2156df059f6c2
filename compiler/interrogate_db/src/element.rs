//! Element, manifest and make-seq records.

use bitflags::bitflags;

use crate::{FunctionIndex, IndexRemapper, TypeIndex};

bitflags! {
    /// Which accessors an element (a data member, global, or synthesized
    /// property) has.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct ElementFlags: u32 {
        const GLOBAL = 1 << 0;
        const HAS_GETTER = 1 << 1;
        const HAS_SETTER = 1 << 2;
        const HAS_HAS_FUNCTION = 1 << 3;
        const HAS_CLEAR_FUNCTION = 1 << 4;
        const HAS_DEL_FUNCTION = 1 << 5;
        const HAS_INSERT_FUNCTION = 1 << 6;
        const HAS_GETKEY_FUNCTION = 1 << 7;
        const SEQUENCE = 1 << 8;
        const MAPPING = 1 << 9;
        /// Declared with `MAKE_PROPERTY` rather than as a data member.
        const PROPERTY = 1 << 10;
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct ManifestFlags: u32 {
        const HAS_TYPE = 1 << 0;
        const HAS_GETTER = 1 << 1;
        const HAS_INT_VALUE = 1 << 2;
    }
}

/// A data member, global variable or property.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct InterrogateElement {
    pub name: String,
    pub scoped_name: String,
    pub comment: String,
    pub flags: ElementFlags,
    pub ty: TypeIndex,
    pub getter: FunctionIndex,
    pub setter: FunctionIndex,
    pub length_function: FunctionIndex,
    pub has_function: FunctionIndex,
    pub clear_function: FunctionIndex,
    pub del_function: FunctionIndex,
    pub insert_function: FunctionIndex,
    pub getkey_function: FunctionIndex,
}

impl InterrogateElement {
    pub const EMPTY: InterrogateElement = InterrogateElement {
        name: String::new(),
        scoped_name: String::new(),
        comment: String::new(),
        flags: ElementFlags::empty(),
        ty: TypeIndex::NONE,
        getter: FunctionIndex::NONE,
        setter: FunctionIndex::NONE,
        length_function: FunctionIndex::NONE,
        has_function: FunctionIndex::NONE,
        clear_function: FunctionIndex::NONE,
        del_function: FunctionIndex::NONE,
        insert_function: FunctionIndex::NONE,
        getkey_function: FunctionIndex::NONE,
    };

    #[inline]
    pub fn is_global(&self) -> bool {
        self.flags.contains(ElementFlags::GLOBAL)
    }

    #[inline]
    pub fn has_getter(&self) -> bool {
        self.flags.contains(ElementFlags::HAS_GETTER)
    }

    #[inline]
    pub fn has_setter(&self) -> bool {
        self.flags.contains(ElementFlags::HAS_SETTER)
    }

    #[inline]
    pub fn is_sequence(&self) -> bool {
        self.flags.contains(ElementFlags::SEQUENCE)
    }

    #[inline]
    pub fn is_mapping(&self) -> bool {
        self.flags.contains(ElementFlags::MAPPING)
    }

    pub fn remap_indices(&mut self, remap: &IndexRemapper) {
        for index in [
            &mut self.ty,
            &mut self.getter,
            &mut self.setter,
            &mut self.length_function,
            &mut self.has_function,
            &mut self.clear_function,
            &mut self.del_function,
            &mut self.insert_function,
            &mut self.getkey_function,
        ] {
            *index = remap.map_from(*index);
        }
    }
}

/// A preprocessor constant.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct InterrogateManifest {
    pub name: String,
    /// The `#define` body as written.
    pub definition: String,
    pub flags: ManifestFlags,
    pub ty: TypeIndex,
    pub getter: FunctionIndex,
    pub int_value: i64,
}

impl InterrogateManifest {
    pub const EMPTY: InterrogateManifest = InterrogateManifest {
        name: String::new(),
        definition: String::new(),
        flags: ManifestFlags::empty(),
        ty: TypeIndex::NONE,
        getter: FunctionIndex::NONE,
        int_value: 0,
    };

    #[inline]
    pub fn has_type(&self) -> bool {
        self.flags.contains(ManifestFlags::HAS_TYPE)
    }

    #[inline]
    pub fn has_getter(&self) -> bool {
        self.flags.contains(ManifestFlags::HAS_GETTER)
    }

    #[inline]
    pub fn has_int_value(&self) -> bool {
        self.flags.contains(ManifestFlags::HAS_INT_VALUE)
    }

    pub fn remap_indices(&mut self, remap: &IndexRemapper) {
        self.ty = remap.map_from(self.ty);
        self.getter = remap.map_from(self.getter);
    }
}

/// A `MAKE_SEQ` declaration: a length getter paired with an element getter.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct InterrogateMakeSeq {
    pub name: String,
    pub scoped_name: String,
    pub comment: String,
    pub length_getter: FunctionIndex,
    pub element_getter: FunctionIndex,
}

impl InterrogateMakeSeq {
    pub const EMPTY: InterrogateMakeSeq = InterrogateMakeSeq {
        name: String::new(),
        scoped_name: String::new(),
        comment: String::new(),
        length_getter: FunctionIndex::NONE,
        element_getter: FunctionIndex::NONE,
    };

    pub fn remap_indices(&mut self, remap: &IndexRemapper) {
        self.length_getter = remap.map_from(self.length_getter);
        self.element_getter = remap.map_from(self.element_getter);
    }
}
