//! Template-parameter substitution.
//!
//! A [`SubstitutionMap`] maps formal declarations to actual ones and value
//! formals to expressions. It doubles as the memo table for one pass:
//! every declaration visited is recorded with its result, so a second
//! visit returns the same object. Structs are recorded before their
//! members are substituted, which is what makes self-referential
//! templates terminate.

use cpp_ir::Expr;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{
    Base, Declaration, FunctionType, Identifier, Instance, InstanceId, ParameterList, Pool, Scope,
    ScopeId, ScopeKind, StructDef, StructId, TemplateArg, TypeData, TypeId, TypedefDef,
};

/// A declaration that can be substituted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclRef {
    Type(TypeId),
    Instance(InstanceId),
    Scope(ScopeId),
}

/// Formal to actual mapping for one substitution pass.
#[derive(Clone, Debug, Default)]
pub struct SubstitutionMap {
    decls: FxHashMap<DeclRef, DeclRef>,
    values: FxHashMap<String, Expr>,
}

impl SubstitutionMap {
    pub fn new() -> Self {
        SubstitutionMap::default()
    }

    pub fn insert_type(&mut self, formal: TypeId, actual: TypeId) {
        self.decls
            .insert(DeclRef::Type(formal), DeclRef::Type(actual));
    }

    pub fn insert_value(&mut self, name: impl Into<String>, actual: Expr) {
        self.values.insert(name.into(), actual);
    }

    pub fn get_type(&self, formal: TypeId) -> Option<TypeId> {
        match self.decls.get(&DeclRef::Type(formal)) {
            Some(DeclRef::Type(t)) => Some(*t),
            _ => None,
        }
    }

    pub fn get_instance(&self, formal: InstanceId) -> Option<InstanceId> {
        match self.decls.get(&DeclRef::Instance(formal)) {
            Some(DeclRef::Instance(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn get_scope(&self, formal: ScopeId) -> Option<ScopeId> {
        match self.decls.get(&DeclRef::Scope(formal)) {
            Some(DeclRef::Scope(s)) => Some(*s),
            _ => None,
        }
    }

    pub fn get_value(&self, name: &str) -> Option<&Expr> {
        self.values.get(name)
    }

    /// Number of recorded declarations, memo entries included.
    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty() && self.values.is_empty()
    }

    fn remaps_type(&self, ty: TypeId) -> bool {
        self.get_type(ty).is_some_and(|t| t != ty)
    }
}

impl Pool {
    // === Types ===

    /// Substitute a type. Returns the input handle when nothing changed.
    pub fn substitute_type(&mut self, ty: TypeId, map: &mut SubstitutionMap) -> TypeId {
        if let Some(done) = map.get_type(ty) {
            return done;
        }
        let result = match self.get(ty).clone() {
            TypeData::Simple(_)
            | TypeData::Enum(_)
            | TypeData::Extension { .. }
            | TypeData::TemplateParam { .. } => ty,
            TypeData::Const(t) => {
                let s = self.substitute_type(t, map);
                if s == t {
                    ty
                } else {
                    self.const_of(s)
                }
            }
            TypeData::Pointer(t) => {
                let s = self.substitute_type(t, map);
                if s == t {
                    ty
                } else {
                    self.pointer(s)
                }
            }
            TypeData::Reference(t, category) => {
                let s = self.substitute_type(t, map);
                if s == t {
                    ty
                } else {
                    self.intern(TypeData::Reference(s, category))
                }
            }
            TypeData::Array { element, bounds } => {
                let s = self.substitute_type(element, map);
                let b = bounds.as_ref().map(|e| self.substitute_expr(e, map));
                if s == element && b == bounds {
                    ty
                } else {
                    self.array(s, b)
                }
            }
            TypeData::Function(ftype) => {
                let s = self.substitute_function_type(&ftype, map);
                if s == ftype {
                    ty
                } else {
                    self.function(s)
                }
            }
            TypeData::Tbd(ident) => {
                let s = self.substitute_ident(&ident, map);
                if s == ident && s.native_scope == ident.native_scope {
                    ty
                } else {
                    self.tbd(s)
                }
            }
            TypeData::Typedef(id) => {
                let def = self.typedef_def(id).clone();
                let target = self.substitute_type(def.target, map);
                if target == def.target {
                    ty
                } else {
                    let scope = self.remap_scope(def.scope, map);
                    let new_id = self.alloc_typedef(TypedefDef {
                        target,
                        scope,
                        ..def
                    });
                    self.typedef_type(new_id)
                }
            }
            TypeData::Struct(id) => self.substitute_struct(ty, id, map),
        };
        map.decls
            .insert(DeclRef::Type(ty), DeclRef::Type(result));
        result
    }

    /// Substitute value formals in an expression.
    pub fn substitute_expr(&self, expr: &Expr, map: &SubstitutionMap) -> Expr {
        expr.replace_idents(&|name| map.get_value(name).cloned())
            .unwrap_or_else(|| expr.clone())
    }

    /// Substitute template arguments and remap the native scope.
    pub fn substitute_ident(&mut self, ident: &Identifier, map: &mut SubstitutionMap) -> Identifier {
        let mut out = ident.clone();
        for component in &mut out.names {
            if let Some(args) = component.templ.as_mut() {
                for arg in args.iter_mut() {
                    match arg {
                        TemplateArg::Type(t) => *t = self.substitute_type(*t, map),
                        TemplateArg::Value(e) => *e = self.substitute_expr(e, map),
                    }
                }
            }
        }
        if let Some(scope) = out.native_scope {
            out.native_scope = Some(self.remap_scope(scope, map));
        }
        out
    }

    pub fn substitute_params(
        &mut self,
        params: &ParameterList,
        map: &mut SubstitutionMap,
    ) -> ParameterList {
        ParameterList {
            params: params
                .params
                .iter()
                .map(|p| self.substitute_instance_value(p, map))
                .collect(),
            includes_ellipsis: params.includes_ellipsis,
        }
    }

    pub fn substitute_function_type(
        &mut self,
        ftype: &FunctionType,
        map: &mut SubstitutionMap,
    ) -> FunctionType {
        let return_type = self.substitute_type(ftype.return_type, map);
        let params = self.substitute_params(&ftype.params, map);
        let class_owner = ftype.class_owner.map(|owner| {
            let owner_ty = self.struct_type(owner);
            let s = self.substitute_type(owner_ty, map);
            self.as_struct(s).unwrap_or(owner)
        });
        FunctionType {
            return_type,
            params,
            flags: ftype.flags,
            class_owner,
        }
    }

    // === Instances ===

    /// Substitute an instance by value: type, initializer and identifier.
    pub fn substitute_instance_value(
        &mut self,
        inst: &Instance,
        map: &mut SubstitutionMap,
    ) -> Instance {
        let mut out = inst.clone();
        out.ty = self.substitute_type(inst.ty, map);
        out.initializer = inst
            .initializer
            .as_ref()
            .map(|e| self.substitute_expr(e, map));
        out.ident = inst
            .ident
            .as_ref()
            .map(|i| self.substitute_ident(i, map));
        out
    }

    /// Substitute a declared instance. A new instance is allocated only if
    /// something changed.
    pub fn substitute_instance(&mut self, id: InstanceId, map: &mut SubstitutionMap) -> InstanceId {
        if let Some(done) = map.get_instance(id) {
            return done;
        }
        let inst = self.instance(id).clone();
        let new_inst = self.substitute_instance_value(&inst, map);
        let same_scope = new_inst.ident.as_ref().and_then(|i| i.native_scope)
            == inst.ident.as_ref().and_then(|i| i.native_scope);
        let result = if new_inst == inst && same_scope {
            id
        } else {
            self.alloc_instance(new_inst)
        };
        map.decls
            .insert(DeclRef::Instance(id), DeclRef::Instance(result));
        result
    }

    fn remap_scope(&self, scope: ScopeId, map: &SubstitutionMap) -> ScopeId {
        map.get_scope(scope).unwrap_or(scope)
    }

    // === Structs ===

    fn substitute_struct(&mut self, ty: TypeId, id: StructId, map: &mut SubstitutionMap) -> TypeId {
        let mut visiting = FxHashSet::default();
        if !self.struct_mentions(id, map, &mut visiting) {
            return ty;
        }
        let ident = self
            .struct_def(id)
            .ident
            .clone()
            .map(|i| self.substitute_ident(&i, map));
        let new_id = self.reserve_struct_copy(id, ident, map);
        self.fill_struct_copy(id, new_id, map);
        self.struct_type(new_id)
    }

    /// Allocate an empty copy of `id` and record it in the map, so
    /// references to `id` met while filling it in resolve to the copy.
    pub(crate) fn reserve_struct_copy(
        &mut self,
        id: StructId,
        ident: Option<Identifier>,
        map: &mut SubstitutionMap,
    ) -> StructId {
        let def = self.struct_def(id).clone();
        let old_scope = self.scope(def.scope);
        let parent = old_scope.parent.map(|p| self.remap_scope(p, map));
        let scope_name = ident
            .as_ref()
            .map_or_else(|| old_scope.name.clone(), |i| i.local().clone());

        let new_id = self.alloc_struct(StructDef {
            ident,
            derivation: Vec::new(),
            template_params: None,
            ..def.clone()
        });
        let new_scope = self.alloc_scope(Scope::new(scope_name, parent, ScopeKind::Struct(new_id)));
        self.struct_def_mut(new_id).scope = new_scope;

        map.decls.insert(
            DeclRef::Type(self.struct_type(id)),
            DeclRef::Type(self.struct_type(new_id)),
        );
        map.decls
            .insert(DeclRef::Scope(def.scope), DeclRef::Scope(new_scope));
        new_id
    }

    /// Substitute the bases and members of `old` into the reserved `new`.
    pub(crate) fn fill_struct_copy(
        &mut self,
        old: StructId,
        new: StructId,
        map: &mut SubstitutionMap,
    ) {
        let def = self.struct_def(old).clone();
        let new_scope = self.struct_def(new).scope;

        for base in &def.derivation {
            let b = self.substitute_type(base.base, map);
            self.struct_def_mut(new).derivation.push(Base { base: b, ..*base });
        }

        let old_scope = self.scope(def.scope).clone();
        for decl in &old_scope.declarations {
            match decl {
                Declaration::Instance(inst_id) => {
                    let inst = self.instance(*inst_id).clone();
                    let mut copy = self.substitute_instance_value(&inst, map);
                    if let Some(ident) = copy.ident.as_mut() {
                        ident.native_scope = Some(new_scope);
                    }
                    let new_inst = if self.get(copy.ty).as_function().is_some() {
                        self.add_function(new_scope, copy)
                    } else {
                        self.add_variable(new_scope, copy)
                    };
                    map.decls
                        .insert(DeclRef::Instance(*inst_id), DeclRef::Instance(new_inst));
                }
                Declaration::Type { ty, vis } => {
                    let t = self.substitute_type(*ty, map);
                    if let Some(name) = self.simple_type_name(t) {
                        self.scope_mut(new_scope).types.insert(name, t);
                    }
                    self.scope_mut(new_scope)
                        .declarations
                        .push(Declaration::Type { ty: t, vis: *vis });
                }
                Declaration::Typedef(td) => {
                    let td_def = self.typedef_def(*td).clone();
                    let target = self.substitute_type(td_def.target, map);
                    let name = td_def.ident.simple_name().to_owned();
                    let new_td = self.alloc_typedef(TypedefDef {
                        ident: td_def.ident.clone().with_native_scope(new_scope),
                        scope: new_scope,
                        target,
                        ..td_def
                    });
                    let new_ty = self.typedef_type(new_td);
                    map.decls.insert(
                        DeclRef::Type(self.typedef_type(*td)),
                        DeclRef::Type(new_ty),
                    );
                    let s = self.scope_mut(new_scope);
                    s.types.insert(name, new_ty);
                    s.declarations.push(Declaration::Typedef(new_td));
                }
                Declaration::MakeProperty(_) | Declaration::MakeSeq(_) => {
                    self.scope_mut(new_scope).declarations.push(decl.clone());
                }
            }
        }

        // Remaining names, such as template formals, map to their actuals.
        for (name, ty) in &old_scope.types {
            if !self.scope(new_scope).types.contains_key(name) {
                let t = self.substitute_type(*ty, map);
                self.scope_mut(new_scope).types.insert(name.clone(), t);
            }
        }
    }

    // === Mentions ===

    /// Whether substituting the struct with this map would change it.
    pub fn struct_mentions(
        &self,
        id: StructId,
        map: &SubstitutionMap,
        visiting: &mut FxHashSet<StructId>,
    ) -> bool {
        if !visiting.insert(id) {
            return false;
        }
        let def = self.struct_def(id);
        if map.remaps_type(self.struct_type(id)) {
            return true;
        }
        if def
            .derivation
            .iter()
            .any(|b| self.type_mentions(b.base, map, visiting))
        {
            return true;
        }
        let scope = self.scope(def.scope);
        scope.declarations.iter().any(|decl| match decl {
            Declaration::Instance(inst) => {
                let inst = self.instance(*inst);
                self.type_mentions(inst.ty, map, visiting)
                    || inst
                        .initializer
                        .as_ref()
                        .is_some_and(|e| expr_mentions(e, map))
            }
            Declaration::Type { ty, .. } => self.type_mentions(*ty, map, visiting),
            Declaration::Typedef(td) => {
                self.type_mentions(self.typedef_def(*td).target, map, visiting)
            }
            Declaration::MakeProperty(_) | Declaration::MakeSeq(_) => false,
        })
    }

    pub fn type_mentions(
        &self,
        ty: TypeId,
        map: &SubstitutionMap,
        visiting: &mut FxHashSet<StructId>,
    ) -> bool {
        if map.remaps_type(ty) {
            return true;
        }
        match self.get(ty) {
            TypeData::Simple(_)
            | TypeData::Enum(_)
            | TypeData::Extension { .. }
            | TypeData::TemplateParam { .. } => false,
            TypeData::Const(t) | TypeData::Pointer(t) | TypeData::Reference(t, _) => {
                self.type_mentions(*t, map, visiting)
            }
            TypeData::Array { element, bounds } => {
                self.type_mentions(*element, map, visiting)
                    || bounds.as_ref().is_some_and(|e| expr_mentions(e, map))
            }
            TypeData::Function(f) => {
                self.type_mentions(f.return_type, map, visiting)
                    || f.params.params.iter().any(|p| {
                        self.type_mentions(p.ty, map, visiting)
                            || p.initializer
                                .as_ref()
                                .is_some_and(|e| expr_mentions(e, map))
                    })
            }
            TypeData::Tbd(ident) => ident.names.iter().any(|c| {
                c.templ.iter().flatten().any(|arg| match arg {
                    TemplateArg::Type(t) => self.type_mentions(*t, map, visiting),
                    TemplateArg::Value(e) => expr_mentions(e, map),
                })
            }),
            TypeData::Typedef(id) => self.type_mentions(self.typedef_def(*id).target, map, visiting),
            TypeData::Struct(id) => self.struct_mentions(*id, map, visiting),
        }
    }
}

fn expr_mentions(expr: &Expr, map: &SubstitutionMap) -> bool {
    expr.mentions_ident(&|name| map.values.contains_key(name))
}

#[cfg(test)]
mod tests;
