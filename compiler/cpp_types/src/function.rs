//! Function types and parameter lists.

use bitflags::bitflags;

use crate::{Instance, StructId, TypeId};

bitflags! {
    /// Properties of a function type.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FunctionFlags: u32 {
        // === Special Members ===
        const CONSTRUCTOR = 1 << 0;
        const DESTRUCTOR = 1 << 1;
        const COPY_CONSTRUCTOR = 1 << 2;
        const MOVE_CONSTRUCTOR = 1 << 3;
        const COPY_ASSIGNMENT = 1 << 4;
        const MOVE_ASSIGNMENT = 1 << 5;

        // === Operators ===
        const OPERATOR = 1 << 8;
        const UNARY_OP = 1 << 9;
        const OPERATOR_TYPECAST = 1 << 10;

        // === Qualifiers ===
        const METHOD_POINTER = 1 << 16;
        const CONST_METHOD = 1 << 17;
        const NOEXCEPT = 1 << 18;
    }
}

/// An ordered list of formal parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParameterList {
    pub params: Vec<Instance>,
    pub includes_ellipsis: bool,
}

impl ParameterList {
    /// Build a parameter list. `(void)` is the empty list.
    pub fn new(mut params: Vec<Instance>, includes_ellipsis: bool) -> Self {
        if params.len() == 1 && params[0].ident.is_none() && params[0].ty == TypeId::VOID {
            params.clear();
        }
        ParameterList {
            params,
            includes_ellipsis,
        }
    }

    pub fn empty() -> Self {
        ParameterList::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// The number of trailing parameters that have default values.
    ///
    /// Counts backward from the end and stops at the first parameter
    /// without an initializer.
    pub fn count_trailing_defaults(&self) -> usize {
        self.params
            .iter()
            .rev()
            .take_while(|p| p.initializer.is_some())
            .count()
    }
}

/// A function signature.
///
/// The class owner names the class of a pointer-to-member. It only
/// qualifies the printed name, but it is part of the key, so
/// `int (A::*)()` and `int (B::*)()` intern to different handles.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionType {
    pub return_type: TypeId,
    pub params: ParameterList,
    pub flags: FunctionFlags,
    pub class_owner: Option<StructId>,
}

impl FunctionType {
    pub fn new(return_type: TypeId, params: ParameterList) -> Self {
        FunctionType {
            return_type,
            params,
            flags: FunctionFlags::empty(),
            class_owner: None,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: FunctionFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_class_owner(mut self, owner: StructId) -> Self {
        self.class_owner = Some(owner);
        self
    }

    #[inline]
    pub fn is_const_method(&self) -> bool {
        self.flags.contains(FunctionFlags::CONST_METHOD)
    }
}

/// Flags implied by a function's name.
///
/// Any `operator X` is an operator. One that takes no parameters is unary,
/// except for `operator ()`, `operator []` and conversion operators. A
/// conversion operator is one whose symbol is a type name.
pub fn operator_flags(local_name: &str, param_count: usize) -> FunctionFlags {
    let Some(symbol) = local_name.strip_prefix("operator ") else {
        return FunctionFlags::empty();
    };
    let mut flags = FunctionFlags::OPERATOR;

    let is_typecast = symbol.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
        && !matches!(symbol, "new" | "delete" | "new[]" | "delete[]");
    if is_typecast {
        flags |= FunctionFlags::OPERATOR_TYPECAST;
    } else if param_count == 0 && symbol != "()" && symbol != "[]" {
        flags |= FunctionFlags::UNARY_OP;
    }
    flags
}

#[cfg(test)]
mod tests;
