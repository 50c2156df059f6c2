//! Name resolution: replacing placeholder types by the declarations they
//! name.

use crate::{Identifier, NameComponent, Pool, ScopeId, TemplateArg, TypeData, TypeId};

impl Pool {
    /// Resolve every placeholder inside `ty`, looking names up from
    /// `scope`.
    ///
    /// Names that cannot be found are left as they are, so the result may
    /// still be a placeholder. Resolving a resolved type returns it
    /// unchanged.
    pub fn resolve_type(&mut self, ty: TypeId, scope: ScopeId) -> TypeId {
        if !self.is_tbd(ty) {
            return ty;
        }
        if !self.resolving.insert(ty) {
            return ty;
        }
        let result = match self.get(ty).clone() {
            TypeData::Tbd(ident) | TypeData::Extension { ident, .. } => {
                match self.lookup_type(&ident, scope) {
                    Some(found) if found != ty => self.resolve_type(found, scope),
                    _ => ty,
                }
            }
            TypeData::Const(t) => {
                let r = self.resolve_type(t, scope);
                if r == t {
                    ty
                } else {
                    self.const_of(r)
                }
            }
            TypeData::Pointer(t) => {
                let r = self.resolve_type(t, scope);
                if r == t {
                    ty
                } else {
                    self.pointer(r)
                }
            }
            TypeData::Reference(t, category) => {
                let r = self.resolve_type(t, scope);
                if r == t {
                    ty
                } else {
                    self.intern(TypeData::Reference(r, category))
                }
            }
            TypeData::Array { element, bounds } => {
                let r = self.resolve_type(element, scope);
                if r == element {
                    ty
                } else {
                    self.array(r, bounds)
                }
            }
            TypeData::Function(mut ftype) => {
                let mut changed = false;
                let ret = self.resolve_type(ftype.return_type, scope);
                changed |= ret != ftype.return_type;
                ftype.return_type = ret;
                for param in &mut ftype.params.params {
                    let r = self.resolve_type(param.ty, scope);
                    changed |= r != param.ty;
                    param.ty = r;
                }
                if changed {
                    self.function(ftype)
                } else {
                    ty
                }
            }
            TypeData::Typedef(id) => {
                let def = self.typedef_def(id);
                let (target, def_scope) = (def.target, def.scope);
                let r = self.resolve_type(target, def_scope);
                if r != target {
                    self.typedef_def_mut(id).target = r;
                }
                ty
            }
            TypeData::Simple(_)
            | TypeData::Struct(_)
            | TypeData::Enum(_)
            | TypeData::TemplateParam { .. } => ty,
        };
        self.resolving.remove(&ty);
        result
    }

    /// Look a possibly-qualified name up from `scope`.
    ///
    /// The first component is searched outward through enclosing scopes
    /// (and the bases of enclosing classes); later components are searched
    /// only inside the scope named so far.
    pub fn lookup_type(&mut self, ident: &Identifier, scope: ScopeId) -> Option<TypeId> {
        let (last, qualifiers) = ident.names.split_last()?;
        if qualifiers.is_empty() {
            return self.find_type(last, scope);
        }
        let current = self.qualifier_scope(ident, scope)?;
        self.find_type_in(last, current, scope)
    }

    /// The scope named by everything but the last component of `ident`,
    /// looked up from `scope`. An unqualified name belongs to `scope`.
    pub fn qualifier_scope(&mut self, ident: &Identifier, scope: ScopeId) -> Option<ScopeId> {
        let (_, qualifiers) = ident.names.split_last()?;
        let Some((first, rest)) = qualifiers.split_first() else {
            return Some(scope);
        };
        let mut current = self.find_scope(first, scope, scope, true)?;
        for component in rest {
            current = self.find_scope(component, current, scope, false)?;
        }
        Some(current)
    }

    /// Search `scope` and its enclosing scopes for a type.
    fn find_type(&mut self, component: &NameComponent, scope: ScopeId) -> Option<TypeId> {
        let mut current = Some(scope);
        while let Some(s) = current {
            if let Some(found) = self.find_type_in(component, s, scope) {
                return Some(found);
            }
            current = self.scope(s).parent;
        }
        None
    }

    /// Search one scope, and its bases if it is a class, for a type.
    /// Template arguments are resolved from `from` and instantiate the
    /// template found.
    fn find_type_in(
        &mut self,
        component: &NameComponent,
        scope: ScopeId,
        from: ScopeId,
    ) -> Option<TypeId> {
        let found = self.find_type_name(&component.name, scope)?;
        let Some(args) = &component.templ else {
            return Some(found);
        };
        let args: Vec<TemplateArg> = args
            .iter()
            .map(|arg| match arg {
                TemplateArg::Type(t) => TemplateArg::Type(self.resolve_type(*t, from)),
                TemplateArg::Value(_) => arg.clone(),
            })
            .collect();
        let template = self.as_struct(found)?;
        match self.instantiate_struct(template, &args) {
            Ok(ty) => Some(ty),
            Err(err) => {
                tracing::debug!(%err, "template lookup failed");
                None
            }
        }
    }

    fn find_type_name(&self, name: &str, scope: ScopeId) -> Option<TypeId> {
        let s = self.scope(scope);
        if let Some(&ty) = s.types.get(name) {
            return Some(ty);
        }
        let id = s.struct_id()?;
        self.base_structs(id)
            .into_iter()
            .find_map(|base| self.find_type_name(name, self.struct_def(base).scope))
    }

    /// The namespace or class scope named by `component`.
    fn find_scope(
        &mut self,
        component: &NameComponent,
        scope: ScopeId,
        from: ScopeId,
        outward: bool,
    ) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(s) = current {
            if component.templ.is_none() {
                if let Some(&ns) = self.scope(s).namespaces.get(&component.name) {
                    return Some(ns);
                }
            }
            if let Some(ty) = self.find_type_in(component, s, from) {
                let ty = self.strip_typedefs(ty);
                if let Some(id) = self.as_struct(ty) {
                    return Some(self.struct_def(id).scope);
                }
            }
            if !outward {
                break;
            }
            current = self.scope(s).parent;
        }
        None
    }
}

#[cfg(test)]
mod tests;
