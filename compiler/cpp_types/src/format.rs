//! C++ rendering of names, types and declarations.
//!
//! Names are printed fully qualified unless a scope is given to print
//! them relative to. Signatures and prototypes built here are the keys the
//! export builder uses to tell overloads apart.

use crate::{
    FunctionFlags, FunctionType, Identifier, Instance, NameComponent, ParameterList, Pool,
    ScopeId, StructId, TemplateArg, TypeData, TypeId, ValueCategory,
};

impl Pool {
    // === Names ===

    /// `Name< A, B >`, or just `Name` without template arguments.
    pub fn component_name(&self, component: &NameComponent) -> String {
        match &component.templ {
            None => component.name.clone(),
            Some(args) => {
                let args: Vec<String> = args.iter().map(|a| self.template_arg_name(a)).collect();
                format!("{}< {} >", component.name, args.join(", "))
            }
        }
    }

    pub fn template_arg_name(&self, arg: &TemplateArg) -> String {
        match arg {
            TemplateArg::Type(ty) => self.type_name(*ty),
            TemplateArg::Value(expr) => expr.to_string(),
        }
    }

    /// The identifier as written, components joined by `::`.
    pub fn ident_name(&self, ident: &Identifier) -> String {
        let parts: Vec<String> = ident
            .names
            .iter()
            .map(|c| self.component_name(c))
            .collect();
        parts.join("::")
    }

    /// The fully qualified name of a scope; empty for the global scope.
    pub fn scope_name(&self, scope: ScopeId) -> String {
        let s = self.scope(scope);
        let Some(parent) = s.parent else {
            return String::new();
        };
        let local = self.component_name(&s.name);
        let outer = self.scope_name(parent);
        if outer.is_empty() {
            local
        } else {
            format!("{outer}::{local}")
        }
    }

    /// Prefix `local` with the qualified name of `scope`.
    pub fn qualify(&self, scope: ScopeId, local: &str) -> String {
        let outer = self.scope_name(scope);
        if outer.is_empty() {
            local.to_owned()
        } else {
            format!("{outer}::{local}")
        }
    }

    /// The name of `ident` as seen from `from`: bare when it was declared
    /// in that scope (or globally), qualified otherwise. With no `from`,
    /// fully qualified.
    pub fn relative_name(&self, ident: &Identifier, from: Option<ScopeId>) -> String {
        let local = self.ident_name(ident);
        match ident.native_scope {
            Some(native) if Some(native) != from && native != ScopeId::GLOBAL => {
                self.qualify(native, &local)
            }
            _ => local,
        }
    }

    /// Fully qualified struct name; empty for anonymous structs.
    pub fn struct_name(&self, id: StructId) -> String {
        let def = self.struct_def(id);
        if def.ident.is_none() {
            return String::new();
        }
        self.scope_name(def.scope)
    }

    /// The unqualified name of a named type, if it has one.
    pub fn simple_type_name(&self, ty: TypeId) -> Option<String> {
        match self.get(ty) {
            TypeData::Struct(id) => {
                let def = self.struct_def(*id);
                def.ident.as_ref().map(|i| i.simple_name().to_owned())
            }
            TypeData::Enum(id) => self
                .enum_def(*id)
                .ident
                .as_ref()
                .map(|i| i.simple_name().to_owned()),
            TypeData::Typedef(id) => Some(self.typedef_def(*id).ident.simple_name().to_owned()),
            TypeData::Extension { ident, .. } | TypeData::Tbd(ident) => {
                Some(ident.simple_name().to_owned())
            }
            TypeData::TemplateParam { name, .. } => Some(name.clone()),
            _ => None,
        }
    }

    // === Types ===

    /// The fully qualified C++ spelling of a type.
    pub fn type_name(&self, ty: TypeId) -> String {
        match self.get(ty) {
            TypeData::Simple(simple) => simple.spelling(),
            TypeData::Const(inner) => format!("{} const", self.type_name(*inner)),
            TypeData::Pointer(inner) => format!("{} *", self.type_name(*inner)),
            TypeData::Reference(inner, ValueCategory::LValue) => {
                format!("{} &", self.type_name(*inner))
            }
            TypeData::Reference(inner, ValueCategory::RValue) => {
                format!("{} &&", self.type_name(*inner))
            }
            TypeData::Array { element, bounds } => match bounds {
                Some(b) => format!("{} [{b}]", self.type_name(*element)),
                None => format!("{} []", self.type_name(*element)),
            },
            TypeData::Function(ftype) => self.function_type_name(ftype),
            TypeData::Struct(id) => self.struct_name(*id),
            TypeData::Enum(id) => {
                let def = self.enum_def(*id);
                match &def.ident {
                    Some(ident) => self.qualify(def.parent_scope, &self.ident_name(ident)),
                    None => String::new(),
                }
            }
            TypeData::Typedef(id) => {
                let def = self.typedef_def(*id);
                self.qualify(def.scope, &self.ident_name(&def.ident))
            }
            TypeData::Extension { ident, .. } | TypeData::Tbd(ident) => {
                self.relative_name(ident, None)
            }
            TypeData::TemplateParam { name, .. } => name.clone(),
        }
    }

    /// `R (*)(P, ...)`, or `R (C::*)(P) const` for a method pointer.
    pub fn function_type_name(&self, ftype: &FunctionType) -> String {
        let ret = self.type_name(ftype.return_type);
        let params = self.parameter_list_text(&ftype.params, 0);
        let pointer = match ftype.class_owner {
            Some(owner) if ftype.flags.contains(FunctionFlags::METHOD_POINTER) => {
                format!("{}::*", self.struct_name(owner))
            }
            _ => "*".to_owned(),
        };
        let mut out = format!("{ret} ({pointer})({params})");
        if ftype.is_const_method() {
            out.push_str(" const");
        }
        out
    }

    /// Parameter type names separated by `, `, leaving off the last
    /// `num_default` parameters.
    pub fn parameter_list_text(&self, params: &ParameterList, num_default: usize) -> String {
        let count = params.len().saturating_sub(num_default);
        let mut parts: Vec<String> = params.params[..count]
            .iter()
            .map(|p| self.type_name(p.ty))
            .collect();
        if params.includes_ellipsis && num_default == 0 {
            parts.push("...".to_owned());
        }
        parts.join(", ")
    }

    // === Declarations ===

    /// The instance's name relative to `from`, or fully qualified.
    pub fn instance_name(&self, inst: &Instance, from: Option<ScopeId>) -> String {
        inst.ident
            .as_ref()
            .map_or_else(String::new, |ident| self.relative_name(ident, from))
    }

    /// The signature that identifies one overload: the fully qualified
    /// name, the parameter types without their last `num_default`
    /// parameters, and `const` for const methods.
    ///
    /// A `T const &` parameter is listed as `T`, since the two cannot be
    /// told apart in a call.
    pub fn function_signature(&self, inst: &Instance, num_default: usize) -> String {
        let name = self.instance_name(inst, None);
        let Some(ftype) = self.get(inst.ty).as_function() else {
            return name;
        };
        let count = ftype.params.len().saturating_sub(num_default);
        let params: Vec<String> = ftype.params.params[..count]
            .iter()
            .map(|p| {
                let ty = self.unwrap_const_reference(p.ty).unwrap_or(p.ty);
                self.type_name(ty)
            })
            .collect();
        let mut out = format!("{name}({})", params.join(", "));
        if ftype.is_const_method() {
            out.push_str(" const");
        }
        out
    }

    /// A C++ prototype line, e.g. `static int A::f(int x, char c = 'a')`.
    pub fn prototype(&self, inst: &Instance) -> String {
        let name = self.instance_name(inst, None);
        let mut out = String::new();
        if inst.storage.is_static() {
            out.push_str("static ");
        }
        if inst.storage.is_virtual() {
            out.push_str("virtual ");
        }
        let Some(ftype) = self.get(inst.ty).as_function() else {
            out.push_str(&self.declaration_text(inst));
            return out;
        };
        let params: Vec<String> = ftype
            .params
            .params
            .iter()
            .map(|p| self.declaration_text(p))
            .collect();
        let mut params = params.join(", ");
        if ftype.params.includes_ellipsis {
            if !params.is_empty() {
                params.push_str(", ");
            }
            params.push_str("...");
        }
        if ftype
            .flags
            .intersects(FunctionFlags::CONSTRUCTOR | FunctionFlags::DESTRUCTOR)
        {
            out.push_str(&format!("{name}({params})"));
        } else {
            out.push_str(&format!(
                "{} {name}({params})",
                self.type_name(ftype.return_type)
            ));
        }
        if ftype.is_const_method() {
            out.push_str(" const");
        }
        out
    }

    /// `T name = init`, as the declaration would be written.
    pub fn declaration_text(&self, inst: &Instance) -> String {
        let mut out = self.type_name(inst.ty);
        if let Some(name) = inst.simple_name() {
            out.push(' ');
            out.push_str(name);
        }
        if let Some(init) = &inst.initializer {
            out.push_str(&format!(" = {init}"));
        }
        out
    }
}

#[cfg(test)]
mod tests;
