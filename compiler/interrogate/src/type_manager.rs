//! Export-oriented predicates over model types.
//!
//! These look through wrappers (`const`, pointers, references, typedefs,
//! function signatures) to the named types underneath and ask about their
//! declarations.

use cpp_ir::Visibility;
use cpp_types::{Declaration, Pool, ScopeId, TypeData, TypeId};

use crate::FilterTable;

/// The visibility a named type was declared with. Unnamed and primitive
/// types have none.
pub(crate) fn declared_vis(pool: &Pool, ty: TypeId) -> Option<Visibility> {
    match pool.get(ty) {
        TypeData::Struct(id) => Some(pool.struct_def(*id).vis),
        TypeData::Enum(id) => Some(pool.enum_def(*id).vis),
        TypeData::Typedef(id) => Some(pool.typedef_def(*id).vis),
        _ => None,
    }
}

/// Whether any declaration in `scope` meets `min_vis`.
///
/// `MAKE_PROPERTY`/`MAKE_SEQ` entries carry no visibility and do not count.
pub(crate) fn any_exported(pool: &Pool, scope: ScopeId, min_vis: Visibility) -> bool {
    pool.scope(scope).declarations.iter().any(|decl| {
        let vis = match decl {
            Declaration::Instance(id) => pool.instance(*id).vis,
            Declaration::Type { vis, .. } => *vis,
            Declaration::Typedef(id) => pool.typedef_def(*id).vis,
            Declaration::MakeProperty(_) | Declaration::MakeSeq(_) => return false,
        };
        vis.meets(min_vis)
    })
}

/// Whether the type refers to something that is not exported.
///
/// A struct counts as exported when it meets the threshold itself or
/// anything declared inside it does. Function types are never exported
/// as values.
pub(crate) fn involves_unpublished(pool: &Pool, ty: TypeId, min_vis: Visibility) -> bool {
    match pool.get(ty) {
        TypeData::Const(inner) | TypeData::Pointer(inner) | TypeData::Reference(inner, _) => {
            involves_unpublished(pool, *inner, min_vis)
        }
        TypeData::Struct(id) => {
            let def = pool.struct_def(*id);
            if def.vis.meets(min_vis) {
                return false;
            }
            !any_exported(pool, def.scope, min_vis)
        }
        TypeData::Function(_) => true,
        TypeData::Typedef(id) => involves_unpublished(pool, pool.typedef_def(*id).target, min_vis),
        _ => declared_vis(pool, ty).is_some_and(|vis| !vis.meets(min_vis)),
    }
}

/// Whether the type mentions anything declared protected or private.
pub(crate) fn involves_protected(pool: &Pool, ty: TypeId) -> bool {
    match pool.get(ty) {
        TypeData::Const(inner) | TypeData::Pointer(inner) | TypeData::Reference(inner, _) => {
            involves_protected(pool, *inner)
        }
        TypeData::Function(ftype) => {
            involves_protected(pool, ftype.return_type)
                || ftype
                    .params
                    .params
                    .iter()
                    .any(|p| involves_protected(pool, p.ty))
        }
        TypeData::Typedef(id) => involves_protected(pool, pool.typedef_def(*id).target),
        _ => declared_vis(pool, ty).is_some_and(|vis| vis > Visibility::Public),
    }
}

/// Whether a setter can be synthesized for a value of this type.
///
/// Struct values are left alone: their assignment operator may be private
/// or deleted, and a hand-written setter is the way to export one.
pub(crate) fn is_assignable(pool: &Pool, ty: TypeId) -> bool {
    match pool.get(ty) {
        TypeData::Const(_)
        | TypeData::Reference(..)
        | TypeData::Extension { .. }
        | TypeData::Struct(_) => false,
        TypeData::Typedef(id) => is_assignable(pool, pool.typedef_def(*id).target),
        _ => true,
    }
}

/// Whether the type mentions, anywhere, a name on the `ignoreinvolved`
/// list. Typedef names are checked before their targets.
pub(crate) fn involves_ignored(pool: &Pool, filter: &FilterTable, ty: TypeId) -> bool {
    match pool.get(ty) {
        TypeData::Const(inner) | TypeData::Pointer(inner) | TypeData::Reference(inner, _) => {
            involves_ignored(pool, filter, *inner)
        }
        TypeData::Array { element, .. } => involves_ignored(pool, filter, *element),
        TypeData::Function(ftype) => {
            involves_ignored(pool, filter, ftype.return_type)
                || ftype
                    .params
                    .params
                    .iter()
                    .any(|p| involves_ignored(pool, filter, p.ty))
        }
        TypeData::Typedef(id) => {
            filter.in_ignoreinvolved(&pool.type_name(ty))
                || involves_ignored(pool, filter, pool.typedef_def(*id).target)
        }
        _ => {
            let name = pool
                .simple_type_name(ty)
                .unwrap_or_else(|| pool.type_name(ty));
            filter.in_ignoreinvolved(&name) || filter.in_ignoreinvolved(&pool.type_name(ty))
        }
    }
}

#[cfg(test)]
mod tests;
