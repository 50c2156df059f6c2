//! Construction helpers for the Pool.
//!
//! Type constructors build a candidate and intern it. Declaration
//! constructors allocate the declaration, register its name in the
//! enclosing scope and append it to the scope's declaration order.

use cpp_ir::{Expr, SourceFile, Visibility};

use crate::function::operator_flags;
use crate::{
    Base, Declaration, EnumDef, EnumId, EnumValue, ExtensionKind, FunctionGroup, FunctionType,
    Identifier, Instance, InstanceId, MakeProperty, MakeSeq, NameComponent, ParameterList, Pool,
    Scope, ScopeId, ScopeKind, SimpleType, StructDef, StructId, StructKind, TemplateParam,
    TemplateParams, TypeData, TypeId, TypedefDef, TypedefId, ValueCategory,
};

impl Pool {
    // === Type Constructors ===

    pub fn simple(&mut self, simple: SimpleType) -> TypeId {
        self.intern(TypeData::Simple(simple))
    }

    /// `T const`. Already-const types are returned as is.
    pub fn const_of(&mut self, ty: TypeId) -> TypeId {
        if matches!(self.get(ty), TypeData::Const(_)) {
            return ty;
        }
        self.intern(TypeData::Const(ty))
    }

    /// `T *`.
    pub fn pointer(&mut self, ty: TypeId) -> TypeId {
        self.intern(TypeData::Pointer(ty))
    }

    /// `T &`.
    pub fn reference(&mut self, ty: TypeId) -> TypeId {
        self.intern(TypeData::Reference(ty, ValueCategory::LValue))
    }

    /// `T &&`.
    pub fn rvalue_reference(&mut self, ty: TypeId) -> TypeId {
        self.intern(TypeData::Reference(ty, ValueCategory::RValue))
    }

    /// `T const &`.
    pub fn const_reference(&mut self, ty: TypeId) -> TypeId {
        let c = self.const_of(ty);
        self.reference(c)
    }

    /// `T [bounds]`, or `T []` when unsized.
    pub fn array(&mut self, element: TypeId, bounds: Option<Expr>) -> TypeId {
        self.intern(TypeData::Array { element, bounds })
    }

    pub fn function(&mut self, ftype: FunctionType) -> TypeId {
        self.intern(TypeData::Function(ftype))
    }

    /// A plain function type `ret (params)`.
    pub fn function_of(&mut self, ret: TypeId, params: Vec<Instance>) -> TypeId {
        self.function(FunctionType::new(ret, ParameterList::new(params, false)))
    }

    /// A name to be looked up later.
    pub fn tbd(&mut self, ident: Identifier) -> TypeId {
        self.intern(TypeData::Tbd(ident))
    }

    /// A forward reference such as `class Foo`.
    pub fn extension(&mut self, kind: ExtensionKind, ident: Identifier) -> TypeId {
        self.intern(TypeData::Extension { kind, ident })
    }

    /// A fresh template formal. Each call yields a distinct type.
    pub fn template_param(&mut self, name: &str) -> TypeId {
        let serial = self.next_param_serial();
        self.intern(TypeData::TemplateParam {
            name: name.to_owned(),
            serial,
        })
    }

    // === Scopes ===

    /// The namespace `name` inside `parent`, created on first use.
    pub fn new_namespace(&mut self, parent: ScopeId, name: &str) -> ScopeId {
        if let Some(&existing) = self.scope(parent).namespaces.get(name) {
            return existing;
        }
        let id = self.alloc_scope(Scope::new(
            NameComponent::new(name),
            Some(parent),
            ScopeKind::Namespace,
        ));
        self.scope_mut(parent).namespaces.insert(name.to_owned(), id);
        id
    }

    // === Structs ===

    /// Define a struct in `parent`. Anonymous structs are declared but not
    /// named in the scope's type table.
    pub fn new_struct(
        &mut self,
        parent: ScopeId,
        kind: StructKind,
        name: Option<&str>,
        vis: Visibility,
        file: SourceFile,
    ) -> StructId {
        let def = StructDef {
            kind,
            ident: name.map(|n| Identifier::simple(n).with_native_scope(parent)),
            scope: ScopeId::GLOBAL,
            derivation: Vec::new(),
            file,
            vis,
            is_final: false,
            template_params: None,
            template_of: None,
            comment: None,
        };
        let id = self.alloc_struct(def);
        let scope = self.alloc_scope(Scope::new(
            NameComponent::new(name.unwrap_or_default()),
            Some(parent),
            ScopeKind::Struct(id),
        ));
        self.struct_def_mut(id).scope = scope;

        let ty = self.struct_type(id);
        let parent_scope = self.scope_mut(parent);
        if let Some(name) = name {
            parent_scope.types.insert(name.to_owned(), ty);
        }
        parent_scope.declarations.push(Declaration::Type { ty, vis });
        id
    }

    /// Define a class template. Type formals become visible by name inside
    /// the template's scope.
    pub fn new_struct_template(
        &mut self,
        parent: ScopeId,
        kind: StructKind,
        name: &str,
        params: TemplateParams,
        vis: Visibility,
        file: SourceFile,
    ) -> StructId {
        let id = self.new_struct(parent, kind, Some(name), vis, file);
        let scope = self.struct_def(id).scope;
        for param in params.iter() {
            if let TemplateParam::Type { name, formal, .. } = param {
                self.scope_mut(scope).types.insert(name.clone(), *formal);
            }
        }
        self.struct_def_mut(id).template_params = Some(params);
        id
    }

    pub fn add_base(&mut self, id: StructId, base: TypeId, vis: Visibility, is_virtual: bool) {
        self.struct_def_mut(id).derivation.push(Base {
            base,
            vis,
            is_virtual,
        });
    }

    /// Forward-declare `kind name` in `scope`. A later definition replaces
    /// the entry in the scope's type table.
    pub fn declare_forward(&mut self, scope: ScopeId, kind: ExtensionKind, name: &str) -> TypeId {
        let ty = self.extension(kind, Identifier::simple(name).with_native_scope(scope));
        self.scope_mut(scope)
            .types
            .entry(name.to_owned())
            .or_insert(ty);
        ty
    }

    // === Members ===

    /// Declare a function in `scope`.
    ///
    /// Operator flags are derived from the name, and inside a struct
    /// constructors, destructors and copy/move members are recognised.
    pub fn add_function(&mut self, scope: ScopeId, mut inst: Instance) -> InstanceId {
        let name = inst.simple_name().unwrap_or_default().to_owned();

        if let Some(ftype) = self.get(inst.ty).as_function().cloned() {
            let extra = operator_flags(&name, ftype.params.len());
            if !ftype.flags.contains(extra) {
                inst.ty = self.function(ftype.with_flags(extra));
            }
        }
        if let Some(sid) = self.scope(scope).struct_id() {
            self.detect_special_method(&mut inst, sid);
        }
        if let Some(ident) = inst.ident.as_mut() {
            ident.native_scope = Some(scope);
        }

        let id = self.alloc_instance(inst);
        let s = self.scope_mut(scope);
        s.functions
            .entry(name.clone())
            .or_insert_with(|| FunctionGroup {
                name,
                instances: Vec::new(),
            })
            .instances
            .push(id);
        s.declarations.push(Declaration::Instance(id));
        id
    }

    /// Declare a variable or data member in `scope`.
    pub fn add_variable(&mut self, scope: ScopeId, mut inst: Instance) -> InstanceId {
        if let Some(ident) = inst.ident.as_mut() {
            ident.native_scope = Some(scope);
        }
        let name = inst.simple_name().map(str::to_owned);
        let id = self.alloc_instance(inst);
        let s = self.scope_mut(scope);
        if let Some(name) = name {
            s.variables.insert(name, id);
        }
        s.declarations.push(Declaration::Instance(id));
        id
    }

    pub fn new_enum(
        &mut self,
        scope: ScopeId,
        name: Option<&str>,
        scoped: bool,
        vis: Visibility,
        file: SourceFile,
    ) -> EnumId {
        let id = self.alloc_enum(EnumDef {
            ident: name.map(|n| Identifier::simple(n).with_native_scope(scope)),
            parent_scope: scope,
            values: Vec::new(),
            scoped,
            file,
            vis,
            comment: None,
        });
        let ty = self.enum_type(id);
        let s = self.scope_mut(scope);
        if let Some(name) = name {
            s.types.insert(name.to_owned(), ty);
        }
        s.declarations.push(Declaration::Type { ty, vis });
        id
    }

    pub fn add_enum_value(&mut self, id: EnumId, name: &str, initializer: Option<Expr>) {
        self.enum_def_mut(id).values.push(EnumValue {
            name: name.to_owned(),
            initializer,
            comment: None,
        });
    }

    pub fn add_typedef(
        &mut self,
        scope: ScopeId,
        name: &str,
        target: TypeId,
        vis: Visibility,
        file: SourceFile,
    ) -> TypedefId {
        let id = self.alloc_typedef(TypedefDef {
            ident: Identifier::simple(name).with_native_scope(scope),
            scope,
            target,
            vis,
            file,
            comment: None,
        });
        let ty = self.typedef_type(id);
        let s = self.scope_mut(scope);
        s.types.insert(name.to_owned(), ty);
        s.declarations.push(Declaration::Typedef(id));
        id
    }

    pub fn add_make_property(&mut self, scope: ScopeId, prop: MakeProperty) {
        self.scope_mut(scope)
            .declarations
            .push(Declaration::MakeProperty(prop));
    }

    pub fn add_make_seq(&mut self, scope: ScopeId, seq: MakeSeq) {
        self.scope_mut(scope)
            .declarations
            .push(Declaration::MakeSeq(seq));
    }
}
