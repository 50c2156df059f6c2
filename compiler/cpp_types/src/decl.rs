//! Declarations owned by the pool: structs, enums, typedefs and scopes.

use std::collections::BTreeMap;

use cpp_ir::{Expr, SourceFile, Visibility};

use crate::{
    Identifier, InstanceId, NameComponent, ScopeId, StructId, TypeId, TypedefId,
};

/// `class`, `struct` or `union`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StructKind {
    Class,
    #[default]
    Struct,
    Union,
}

impl StructKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            StructKind::Class => "class",
            StructKind::Struct => "struct",
            StructKind::Union => "union",
        }
    }

    /// Visibility of members and bases when none is written.
    pub const fn default_vis(self) -> Visibility {
        match self {
            StructKind::Class => Visibility::Private,
            StructKind::Struct | StructKind::Union => Visibility::Public,
        }
    }
}

/// One entry of a derivation list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Base {
    pub base: TypeId,
    pub vis: Visibility,
    pub is_virtual: bool,
}

/// A class, struct or union definition.
#[derive(Clone, Debug)]
pub struct StructDef {
    pub kind: StructKind,
    /// `None` for anonymous structs.
    pub ident: Option<Identifier>,
    /// The scope holding the members.
    pub scope: ScopeId,
    pub derivation: Vec<Base>,
    pub file: SourceFile,
    pub vis: Visibility,
    pub is_final: bool,
    pub template_params: Option<TemplateParams>,
    /// The template this struct was instantiated from.
    pub template_of: Option<StructId>,
    pub comment: Option<String>,
}

impl StructDef {
    /// The unqualified name, or `""` if anonymous.
    pub fn simple_name(&self) -> &str {
        self.ident.as_ref().map_or("", Identifier::simple_name)
    }

    #[inline]
    pub fn is_template(&self) -> bool {
        self.template_params.is_some()
    }
}

/// One enumerator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub initializer: Option<Expr>,
    pub comment: Option<String>,
}

#[derive(Clone, Debug)]
pub struct EnumDef {
    pub ident: Option<Identifier>,
    pub parent_scope: ScopeId,
    pub values: Vec<EnumValue>,
    /// `enum class`.
    pub scoped: bool,
    pub file: SourceFile,
    pub vis: Visibility,
    pub comment: Option<String>,
}

impl EnumDef {
    pub fn simple_name(&self) -> &str {
        self.ident.as_ref().map_or("", Identifier::simple_name)
    }
}

#[derive(Clone, Debug)]
pub struct TypedefDef {
    pub ident: Identifier,
    pub scope: ScopeId,
    pub target: TypeId,
    pub vis: Visibility,
    pub file: SourceFile,
    pub comment: Option<String>,
}

/// What a scope belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    Global,
    Namespace,
    Struct(StructId),
}

/// A declaration in scope order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    /// A function, variable or data member.
    Instance(InstanceId),
    /// A struct or enum definition (or forward declaration).
    Type { ty: TypeId, vis: Visibility },
    Typedef(TypedefId),
    MakeProperty(MakeProperty),
    MakeSeq(MakeSeq),
}

/// All overloads of one function name in a scope.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FunctionGroup {
    pub name: String,
    pub instances: Vec<InstanceId>,
}

/// A lexical scope: the global scope, a namespace, or a struct body.
#[derive(Clone, Debug)]
pub struct Scope {
    pub name: NameComponent,
    pub parent: Option<ScopeId>,
    pub kind: ScopeKind,
    pub declarations: Vec<Declaration>,
    pub types: BTreeMap<String, TypeId>,
    pub functions: BTreeMap<String, FunctionGroup>,
    pub variables: BTreeMap<String, InstanceId>,
    pub namespaces: BTreeMap<String, ScopeId>,
}

impl Scope {
    pub fn new(name: NameComponent, parent: Option<ScopeId>, kind: ScopeKind) -> Self {
        Scope {
            name,
            parent,
            kind,
            declarations: Vec::new(),
            types: BTreeMap::new(),
            functions: BTreeMap::new(),
            variables: BTreeMap::new(),
            namespaces: BTreeMap::new(),
        }
    }

    pub fn struct_id(&self) -> Option<StructId> {
        match self.kind {
            ScopeKind::Struct(id) => Some(id),
            ScopeKind::Global | ScopeKind::Namespace => None,
        }
    }

    pub fn function_group(&self, name: &str) -> Option<&FunctionGroup> {
        self.functions.get(name)
    }
}

/// The flavour of a `MAKE_PROPERTY` declaration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    #[default]
    Normal,
    Sequence,
    Mapping,
}

/// A property published through accessor functions of the enclosing
/// struct. Accessors are named by function group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MakeProperty {
    pub name: String,
    pub kind: PropertyKind,
    pub getter: Option<String>,
    pub setter: Option<String>,
    pub hasser: Option<String>,
    pub deleter: Option<String>,
    pub inserter: Option<String>,
    pub get_key: Option<String>,
    pub clear: Option<String>,
    pub length: Option<String>,
    pub comment: Option<String>,
}

impl MakeProperty {
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        MakeProperty {
            name: name.into(),
            kind,
            ..MakeProperty::default()
        }
    }
}

/// A sequence published through a length and an element getter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MakeSeq {
    pub name: String,
    pub length_getter: String,
    pub element_getter: String,
    pub comment: Option<String>,
}

/// One formal of a template.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateParam {
    /// `typename T = D`. `formal` is a `TemplateParam` type.
    Type {
        name: String,
        formal: TypeId,
        default: Option<TypeId>,
    },
    /// `int N = D`.
    Value {
        name: String,
        ty: TypeId,
        default: Option<Expr>,
    },
}

impl TemplateParam {
    pub fn name(&self) -> &str {
        match self {
            TemplateParam::Type { name, .. } | TemplateParam::Value { name, .. } => name,
        }
    }
}

/// A template formal parameter list.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TemplateParams(pub Vec<TemplateParam>);

impl TemplateParams {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TemplateParam> {
        self.0.iter()
    }
}
