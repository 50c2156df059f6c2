//! Type node data.
//!
//! `TypeData` is the value that gets interned. Children are referred to by
//! handle, so structural equality of two nodes is a shallow comparison once
//! their children are interned.

use bitflags::bitflags;
use cpp_ir::Expr;

use crate::{EnumId, FunctionType, Identifier, StructId, TypedefId, TypeId};

/// The base keyword of a simple (built-in) type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SimpleKind {
    Bool,
    Char,
    WChar,
    Char8,
    Char16,
    Char32,
    Int,
    Float,
    Double,
    Void,
    Nullptr,
    Auto,
}

bitflags! {
    /// Size and sign modifiers on a simple type.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct SimpleFlags: u8 {
        const LONG = 1 << 0;
        const LONGLONG = 1 << 1;
        const SHORT = 1 << 2;
        const UNSIGNED = 1 << 3;
        const SIGNED = 1 << 4;
    }
}

/// A built-in type such as `unsigned long long int`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SimpleType {
    pub kind: SimpleKind,
    pub flags: SimpleFlags,
}

impl SimpleType {
    pub const fn new(kind: SimpleKind) -> Self {
        SimpleType {
            kind,
            flags: SimpleFlags::empty(),
        }
    }

    pub const fn with_flags(kind: SimpleKind, flags: SimpleFlags) -> Self {
        SimpleType { kind, flags }
    }

    /// The C++ spelling, modifiers first.
    pub fn spelling(&self) -> String {
        let mut out = String::new();
        if self.flags.contains(SimpleFlags::UNSIGNED) {
            out.push_str("unsigned ");
        } else if self.flags.contains(SimpleFlags::SIGNED) {
            out.push_str("signed ");
        }
        if self.flags.contains(SimpleFlags::SHORT) {
            out.push_str("short ");
        } else if self.flags.contains(SimpleFlags::LONGLONG) {
            out.push_str("long long ");
        } else if self.flags.contains(SimpleFlags::LONG) {
            out.push_str("long ");
        }
        out.push_str(self.kind.keyword());
        out
    }

    /// Integral types, in the sense used when picking property indices.
    pub fn is_integral(&self) -> bool {
        matches!(
            self.kind,
            SimpleKind::Bool
                | SimpleKind::Char
                | SimpleKind::WChar
                | SimpleKind::Char8
                | SimpleKind::Char16
                | SimpleKind::Char32
                | SimpleKind::Int
        )
    }
}

impl SimpleKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            SimpleKind::Bool => "bool",
            SimpleKind::Char => "char",
            SimpleKind::WChar => "wchar_t",
            SimpleKind::Char8 => "char8_t",
            SimpleKind::Char16 => "char16_t",
            SimpleKind::Char32 => "char32_t",
            SimpleKind::Int => "int",
            SimpleKind::Float => "float",
            SimpleKind::Double => "double",
            SimpleKind::Void => "void",
            SimpleKind::Nullptr => "decltype(nullptr)",
            SimpleKind::Auto => "auto",
        }
    }
}

/// Reference value category.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueCategory {
    LValue,
    RValue,
}

/// The keyword of a forward reference (`class Foo;`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExtensionKind {
    Class,
    Struct,
    Union,
    Enum,
}

impl ExtensionKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            ExtensionKind::Class => "class",
            ExtensionKind::Struct => "struct",
            ExtensionKind::Union => "union",
            ExtensionKind::Enum => "enum",
        }
    }
}

/// An interned type node.
///
/// The derived ordering compares the variant first, then the payload, so
/// it is a total order across every variant.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeData {
    Simple(SimpleType),
    Const(TypeId),
    Pointer(TypeId),
    Reference(TypeId, ValueCategory),
    Array {
        element: TypeId,
        bounds: Option<Expr>,
    },
    Function(FunctionType),
    Struct(StructId),
    Enum(EnumId),
    /// A forward reference that has not been matched to a definition.
    Extension {
        kind: ExtensionKind,
        ident: Identifier,
    },
    Typedef(TypedefId),
    /// A name that has not been looked up yet.
    Tbd(Identifier),
    /// A class-template formal. The serial keeps formals of different
    /// templates apart even when they share a name.
    TemplateParam {
        name: String,
        serial: u32,
    },
}

/// The variant tag of a [`TypeData`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SubType {
    Simple,
    Const,
    Pointer,
    Reference,
    Array,
    Function,
    Struct,
    Enum,
    Extension,
    Typedef,
    Tbd,
    TemplateParam,
}

impl TypeData {
    pub fn subtype(&self) -> SubType {
        match self {
            TypeData::Simple(_) => SubType::Simple,
            TypeData::Const(_) => SubType::Const,
            TypeData::Pointer(_) => SubType::Pointer,
            TypeData::Reference(..) => SubType::Reference,
            TypeData::Array { .. } => SubType::Array,
            TypeData::Function(_) => SubType::Function,
            TypeData::Struct(_) => SubType::Struct,
            TypeData::Enum(_) => SubType::Enum,
            TypeData::Extension { .. } => SubType::Extension,
            TypeData::Typedef(_) => SubType::Typedef,
            TypeData::Tbd(_) => SubType::Tbd,
            TypeData::TemplateParam { .. } => SubType::TemplateParam,
        }
    }

    /// The single child of a wrapper node.
    pub fn wrapped(&self) -> Option<TypeId> {
        match self {
            TypeData::Const(t) | TypeData::Pointer(t) | TypeData::Reference(t, _) => Some(*t),
            TypeData::Array { element, .. } => Some(*element),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionType> {
        match self {
            TypeData::Function(f) => Some(f),
            _ => None,
        }
    }
}
