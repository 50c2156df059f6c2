//! Function and function-wrapper records.

use std::collections::BTreeSet;

use bitflags::bitflags;

use crate::{FunctionIndex, IndexRemapper, TypeIndex, WrapperIndex};

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct FunctionFlags: u32 {
        const GLOBAL = 1 << 0;
        const VIRTUAL = 1 << 1;
        const METHOD = 1 << 2;
        /// A synthesized upcast or downcast.
        const TYPECAST = 1 << 3;
        /// A conversion operator, `operator T()`.
        const OPERATOR_TYPECAST = 1 << 4;
        const UNARY_OP = 1 << 5;
        const GETTER = 1 << 6;
        const SETTER = 1 << 7;
        const CONSTRUCTOR = 1 << 8;
        const DESTRUCTOR = 1 << 9;
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct WrapperFlags: u32 {
        const CALLABLE_BY_NAME = 1 << 0;
        const HAS_RETURN = 1 << 1;
        const COPY_CONSTRUCTOR = 1 << 2;
        const COERCE_CONSTRUCTOR = 1 << 3;
        /// Not a member in C++, but exported as one.
        const EXTENSION = 1 << 4;
        const DEPRECATED = 1 << 5;
    }
}

bitflags! {
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct ParameterFlags: u32 {
        const HAS_NAME = 1 << 0;
        /// The implicit receiver of a non-static method.
        const IS_THIS = 1 << 1;
        const HAS_DEFAULT = 1 << 2;
    }
}

/// A function: every overload sharing one scoped name.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct InterrogateFunction {
    pub name: String,
    pub scoped_name: String,
    pub comment: String,
    /// One C++ prototype per line, one line per overload.
    pub prototype: String,
    pub flags: FunctionFlags,
    /// The owning class, for methods.
    pub class: TypeIndex,
    /// Overload signatures merged into this record.
    pub signatures: BTreeSet<String>,
    pub wrappers: Vec<WrapperIndex>,
}

impl InterrogateFunction {
    pub const EMPTY: InterrogateFunction = InterrogateFunction {
        name: String::new(),
        scoped_name: String::new(),
        comment: String::new(),
        prototype: String::new(),
        flags: FunctionFlags::empty(),
        class: TypeIndex::NONE,
        signatures: BTreeSet::new(),
        wrappers: Vec::new(),
    };

    #[inline]
    pub fn is_global(&self) -> bool {
        self.flags.contains(FunctionFlags::GLOBAL)
    }

    #[inline]
    pub fn is_method(&self) -> bool {
        self.flags.contains(FunctionFlags::METHOD)
    }

    #[inline]
    pub fn is_virtual(&self) -> bool {
        self.flags.contains(FunctionFlags::VIRTUAL)
    }

    pub fn remap_indices(&mut self, remap: &IndexRemapper) {
        self.class = remap.map_from(self.class);
        remap.map_all(&mut self.wrappers);
    }
}

/// One parameter of a wrapper.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct WrapperParameter {
    pub flags: ParameterFlags,
    pub ty: TypeIndex,
    pub name: String,
}

/// A single callable overload of a function.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct InterrogateFunctionWrapper {
    pub function: FunctionIndex,
    pub flags: WrapperFlags,
    pub return_type: TypeIndex,
    pub parameters: Vec<WrapperParameter>,
    /// Library hash plus a hash of the overload's signature; unique within
    /// the library.
    pub unique_name: String,
    pub comment: String,
}

impl InterrogateFunctionWrapper {
    pub const EMPTY: InterrogateFunctionWrapper = InterrogateFunctionWrapper {
        function: FunctionIndex::NONE,
        flags: WrapperFlags::empty(),
        return_type: TypeIndex::NONE,
        parameters: Vec::new(),
        unique_name: String::new(),
        comment: String::new(),
    };

    #[inline]
    pub fn has_return_value(&self) -> bool {
        self.flags.contains(WrapperFlags::HAS_RETURN)
    }

    pub fn remap_indices(&mut self, remap: &IndexRemapper) {
        self.function = remap.map_from(self.function);
        self.return_type = remap.map_from(self.return_type);
        for param in &mut self.parameters {
            param.ty = remap.map_from(param.ty);
        }
    }
}
