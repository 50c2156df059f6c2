//! Type queries that look through the pool.

use cpp_ir::Visibility;

use crate::{ParameterList, Pool, StructId, SubType, TypeData, TypeId, ValueCategory};

impl Pool {
    #[inline]
    pub fn subtype(&self, ty: TypeId) -> SubType {
        self.get(ty).subtype()
    }

    /// Remove any top-level `const`.
    pub fn strip_const(&self, mut ty: TypeId) -> TypeId {
        while let TypeData::Const(inner) = self.get(ty) {
            ty = *inner;
        }
        ty
    }

    /// Follow typedefs to the underlying type.
    pub fn strip_typedefs(&self, mut ty: TypeId) -> TypeId {
        while let TypeData::Typedef(id) = self.get(ty) {
            ty = self.typedef_def(*id).target;
        }
        ty
    }

    /// `T &` and `T &&` become `T`; anything else is returned as is.
    pub fn unwrap_reference(&self, ty: TypeId) -> TypeId {
        match self.get(ty) {
            TypeData::Reference(inner, _) => *inner,
            _ => ty,
        }
    }

    /// For `T const &`, the `T`.
    pub fn unwrap_const_reference(&self, ty: TypeId) -> Option<TypeId> {
        let TypeData::Reference(inner, ValueCategory::LValue) = self.get(ty) else {
            return None;
        };
        match self.get(self.strip_typedefs(*inner)) {
            TypeData::Const(t) => Some(*t),
            _ => None,
        }
    }

    /// The struct a type names, directly.
    pub fn as_struct(&self, ty: TypeId) -> Option<StructId> {
        match self.get(ty) {
            TypeData::Struct(id) => Some(*id),
            _ => None,
        }
    }

    /// The struct a type names, looking through typedefs and `const`.
    pub fn base_struct(&self, ty: TypeId) -> Option<StructId> {
        let mut ty = ty;
        loop {
            match self.get(ty) {
                TypeData::Struct(id) => return Some(*id),
                TypeData::Typedef(id) => ty = self.typedef_def(*id).target,
                TypeData::Const(inner) => ty = *inner,
                _ => return None,
            }
        }
    }

    /// Whether the type still contains an unresolved name or forward
    /// reference.
    pub fn is_tbd(&self, ty: TypeId) -> bool {
        match self.get(ty) {
            TypeData::Tbd(_) | TypeData::Extension { .. } => true,
            TypeData::Const(t) | TypeData::Pointer(t) | TypeData::Reference(t, _) => {
                self.is_tbd(*t)
            }
            TypeData::Array { element, .. } => self.is_tbd(*element),
            TypeData::Function(f) => {
                self.is_tbd(f.return_type) || f.params.params.iter().any(|p| self.is_tbd(p.ty))
            }
            TypeData::Typedef(id) => self.is_tbd(self.typedef_def(*id).target),
            TypeData::Simple(_)
            | TypeData::Struct(_)
            | TypeData::Enum(_)
            | TypeData::TemplateParam { .. } => false,
        }
    }

    /// Whether the type depends on no template formal.
    pub fn is_fully_specified(&self, ty: TypeId) -> bool {
        match self.get(ty) {
            TypeData::Simple(_) | TypeData::Enum(_) | TypeData::Extension { .. } => true,
            TypeData::Tbd(ident) => ident.names.iter().all(|c| c.templ.is_none()),
            TypeData::TemplateParam { .. } => false,
            TypeData::Const(t) | TypeData::Pointer(t) | TypeData::Reference(t, _) => {
                self.is_fully_specified(*t)
            }
            TypeData::Array { element, .. } => self.is_fully_specified(*element),
            TypeData::Function(f) => {
                self.is_fully_specified(f.return_type)
                    && f.params.params.iter().all(|p| self.is_fully_specified(p.ty))
            }
            TypeData::Struct(id) => !self.struct_def(*id).is_template(),
            TypeData::Typedef(id) => self.is_fully_specified(self.typedef_def(*id).target),
        }
    }

    /// Whether the type is an uninstantiated class template.
    pub fn is_template(&self, ty: TypeId) -> bool {
        self.as_struct(ty)
            .is_some_and(|id| self.struct_def(id).is_template())
    }

    /// Integral simple types and enums.
    pub fn is_integer(&self, ty: TypeId) -> bool {
        match self.get(self.strip_const(self.strip_typedefs(ty))) {
            TypeData::Simple(simple) => simple.is_integral(),
            TypeData::Enum(_) => true,
            TypeData::Typedef(id) => self.is_integer(self.typedef_def(*id).target),
            _ => false,
        }
    }

    // === Equivalence ===

    /// Loose type comparison, as used for overload matching.
    ///
    /// Typedefs are seen through. `const` and references are unwrapped only
    /// when both sides carry the same wrapper, so `int &` and `const int &`
    /// stay distinct. Pointees, array elements and function signatures are
    /// compared the same way.
    pub fn is_equivalent(&self, a: TypeId, b: TypeId) -> bool {
        let a = self.strip_typedefs(a);
        let b = self.strip_typedefs(b);
        if a == b {
            return true;
        }
        match (self.get(a), self.get(b)) {
            (TypeData::Const(x), TypeData::Const(y))
            | (TypeData::Pointer(x), TypeData::Pointer(y)) => self.is_equivalent(*x, *y),
            (TypeData::Reference(x, xc), TypeData::Reference(y, yc)) => {
                xc == yc && self.is_equivalent(*x, *y)
            }
            (TypeData::Array { element: x, .. }, TypeData::Array { element: y, .. }) => {
                self.is_equivalent(*x, *y)
            }
            (TypeData::Function(f), TypeData::Function(g)) => {
                self.is_equivalent(f.return_type, g.return_type)
                    && self.params_equivalent(&f.params, &g.params)
            }
            _ => false,
        }
    }

    /// Same arity, same ellipsis, and equivalent types position by position.
    /// Parameter names and defaults are ignored.
    pub fn params_equivalent(&self, a: &ParameterList, b: &ParameterList) -> bool {
        a.len() == b.len()
            && a.includes_ellipsis == b.includes_ellipsis
            && a.params
                .iter()
                .zip(&b.params)
                .all(|(x, y)| self.is_equivalent(x.ty, y.ty))
    }

    // === Type Traits ===

    /// Plain old data: no user-provided special members anywhere inside.
    pub fn is_trivial(&self, ty: TypeId) -> bool {
        match self.get(ty) {
            TypeData::Simple(_) | TypeData::Pointer(_) | TypeData::Enum(_) => true,
            TypeData::Const(t) => self.is_trivial(*t),
            TypeData::Array { element, .. } => self.is_trivial(*element),
            TypeData::Struct(id) => self.struct_is_trivial(*id),
            TypeData::Typedef(id) => self.is_trivial(self.typedef_def(*id).target),
            TypeData::Reference(..)
            | TypeData::Function(_)
            | TypeData::Extension { .. }
            | TypeData::Tbd(_)
            | TypeData::TemplateParam { .. } => false,
        }
    }

    pub fn type_is_default_constructible(&self, ty: TypeId) -> bool {
        match self.get(ty) {
            TypeData::Simple(_) | TypeData::Pointer(_) | TypeData::Enum(_) => true,
            TypeData::Const(t) => self
                .base_struct(*t)
                .is_some_and(|id| self.default_constructor(id).is_some()),
            TypeData::Array { element, .. } => self.type_is_default_constructible(*element),
            TypeData::Struct(id) => self.is_default_constructible(*id, Visibility::Public),
            TypeData::Typedef(id) => {
                self.type_is_default_constructible(self.typedef_def(*id).target)
            }
            TypeData::Reference(..)
            | TypeData::Function(_)
            | TypeData::Extension { .. }
            | TypeData::Tbd(_)
            | TypeData::TemplateParam { .. } => false,
        }
    }

    pub fn type_is_copy_constructible(&self, ty: TypeId) -> bool {
        match self.get(ty) {
            TypeData::Simple(_)
            | TypeData::Pointer(_)
            | TypeData::Enum(_)
            | TypeData::Reference(_, ValueCategory::LValue) => true,
            TypeData::Const(t) => self.type_is_copy_constructible(*t),
            TypeData::Array { element, .. } => self.type_is_copy_constructible(*element),
            TypeData::Struct(id) => self.is_copy_constructible(*id, Visibility::Public),
            TypeData::Typedef(id) => self.type_is_copy_constructible(self.typedef_def(*id).target),
            TypeData::Reference(_, ValueCategory::RValue)
            | TypeData::Function(_)
            | TypeData::Extension { .. }
            | TypeData::Tbd(_)
            | TypeData::TemplateParam { .. } => false,
        }
    }

    pub fn type_is_copy_assignable(&self, ty: TypeId) -> bool {
        match self.get(ty) {
            TypeData::Simple(_) | TypeData::Pointer(_) | TypeData::Enum(_) => true,
            TypeData::Array { element, .. } => self.type_is_copy_assignable(*element),
            TypeData::Struct(id) => {
                !self.is_abstract(*id) && self.is_copy_assignable(*id, Visibility::Public)
            }
            TypeData::Typedef(id) => self.type_is_copy_assignable(self.typedef_def(*id).target),
            TypeData::Const(_)
            | TypeData::Reference(..)
            | TypeData::Function(_)
            | TypeData::Extension { .. }
            | TypeData::Tbd(_)
            | TypeData::TemplateParam { .. } => false,
        }
    }

    pub fn type_is_destructible(&self, ty: TypeId) -> bool {
        match self.get(ty) {
            TypeData::Const(t) => self.type_is_destructible(*t),
            TypeData::Array { element, .. } => self.type_is_destructible(*element),
            TypeData::Struct(id) => self.is_destructible(*id, Visibility::Public),
            TypeData::Typedef(id) => self.type_is_destructible(self.typedef_def(*id).target),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests;
