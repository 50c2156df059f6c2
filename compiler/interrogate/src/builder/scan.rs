//! Top-level scan: walks the global scope, its namespaces and the
//! manifests, handing every exportable declaration to the index passes.

use cpp_ir::{ExprResult, LiteralKind, Manifest};
use cpp_types::{Declaration, Instance, ScopeId, StructId, TypeData, TypeId};
use interrogate_db::{
    ElementFlags, ElementIndex, FunctionFlags, InterrogateElement, InterrogateManifest,
    ManifestFlags,
};

use super::admission::{log_skip, SkipReason};
use super::{scoped_instance, synth, InterrogateBuilder};
use crate::names::{descope, trim_blanks};
use crate::type_manager::{any_exported, involves_protected, is_assignable};

/// Scan the global scope and, recursively, every namespace in it.
#[tracing::instrument(level = "debug", skip_all)]
pub(super) fn scan_globals(b: &mut InterrogateBuilder) {
    scan_scope(b, ScopeId::GLOBAL);
}

fn scan_scope(b: &mut InterrogateBuilder, scope: ScopeId) {
    let declarations = b.pool.scope(scope).declarations.clone();
    for decl in declarations {
        match decl {
            Declaration::Instance(id) => {
                let inst = b.pool.instance(id).clone();
                if b.pool.get(inst.ty).as_function().is_some() {
                    scan_function(b, &inst, scope);
                } else {
                    scan_element(b, &inst, None, scope);
                }
            }
            Declaration::Typedef(id) => {
                let def = b.pool.typedef_def(id);
                let (target, def_scope) = (def.target, def.scope);
                let target = b.pool.resolve_type(target, def_scope);
                if b.pool.as_struct(target).is_some() {
                    scan_struct_type(b, target);
                }
                let typedef = b.pool.typedef_type(id);
                scan_typedef_type(b, typedef);
            }
            Declaration::Type { ty, .. } => match b.pool.get(ty) {
                TypeData::Struct(_) => scan_struct_type(b, ty),
                TypeData::Enum(_) => scan_enum_type(b, ty),
                _ => {}
            },
            Declaration::MakeProperty(_) | Declaration::MakeSeq(_) => {}
        }
    }

    let namespaces: Vec<ScopeId> = b.pool.scope(scope).namespaces.values().copied().collect();
    for namespace in namespaces {
        scan_scope(b, namespace);
    }
}

/// A free function, or an out-of-class definition of a method.
fn scan_function(b: &mut InterrogateBuilder, inst: &Instance, scope: ScopeId) {
    let what = b.pool.instance_name(inst, None);
    let mut scope = scope;
    if let Some(ident) = inst.ident.as_ref().filter(|ident| ident.is_scoped()) {
        let ident = ident.clone();
        let Some(qualifier) = b.pool.qualifier_scope(&ident, scope) else {
            log_skip(&what, SkipReason::OutOfScope);
            return;
        };
        scope = qualifier;
    }
    if b.pool.scope(scope).struct_id().is_some() {
        // A method body; the class declaration already did the rest.
        b.update_function_comment(inst, scope);
        log_skip(&what, SkipReason::OutOfScope);
        return;
    }

    let mut function = inst.clone();
    function.ty = b.pool.resolve_type(function.ty, scope);
    match b.admit_function(&function) {
        Ok(()) => {
            b.get_function(&function, None, scope, FunctionFlags::GLOBAL);
        }
        Err(SkipReason::ImplementationFile) => {
            b.update_function_comment(&function, scope);
            log_skip(&what, SkipReason::ImplementationFile);
        }
        Err(reason) => log_skip(&what, reason),
    }
}

fn scan_struct_type(b: &mut InterrogateBuilder, ty: TypeId) {
    let Some(id) = b.pool.as_struct(ty) else {
        return;
    };
    let def = b.pool.struct_def(id);
    let what = b.pool.type_name(ty);
    if def.is_template() {
        log_skip(&what, SkipReason::Template);
        return;
    }
    if let Err(reason) = b.check_file(&def.file) {
        log_skip(&what, reason);
        return;
    }
    if !def.vis.meets(b.options.min_vis) && !any_exported(&b.pool, def.scope, b.options.min_vis) {
        log_skip(&what, SkipReason::NotPublished);
        return;
    }
    b.get_type(ty, true);
}

fn scan_enum_type(b: &mut InterrogateBuilder, ty: TypeId) {
    let TypeData::Enum(id) = b.pool.get(ty) else {
        return;
    };
    let def = b.pool.enum_def(*id);
    let what = b.pool.type_name(ty);
    if let Err(reason) = b.check_file(&def.file).and_then(|()| b.check_vis(def.vis)) {
        log_skip(&what, reason);
        return;
    }
    b.get_type(ty, true);
}

/// Typedefs are exported only when they name a struct, possibly through
/// other typedefs.
fn scan_typedef_type(b: &mut InterrogateBuilder, ty: TypeId) {
    let TypeData::Typedef(id) = b.pool.get(ty) else {
        return;
    };
    let def = b.pool.typedef_def(*id);
    let what = b.pool.type_name(ty);
    if let Err(reason) = b.check_file(&def.file) {
        log_skip(&what, reason);
        return;
    }

    let mut forced = b.filter.in_forcetype(&what);
    let mut target = ty;
    while let TypeData::Typedef(inner) = b.pool.get(target) {
        let (next, scope) = {
            let inner = b.pool.typedef_def(*inner);
            (inner.target, inner.scope)
        };
        target = b.pool.resolve_type(next, scope);
        forced |= b.filter.in_forcetype(&b.pool.type_name(target));
    }
    let Some(sid) = b.pool.as_struct(target) else {
        return;
    };
    let def = b.pool.struct_def(sid);
    if def.is_template() {
        log_skip(&what, SkipReason::Template);
        return;
    }
    if !forced {
        if !def.file.is_local() || b.filter.in_ignorefile(&def.file.filename) {
            log_skip(&what, SkipReason::ForeignFile);
            return;
        }
        if !def.vis.meets(b.options.min_vis)
            && !any_exported(&b.pool, def.scope, b.options.min_vis)
        {
            log_skip(&what, SkipReason::NotPublished);
            return;
        }
    }
    b.get_type(ty, true);
}

// === Manifests ===

#[tracing::instrument(level = "debug", skip_all, fields(count = b.manifests.len()))]
pub(super) fn scan_manifests(b: &mut InterrogateBuilder) {
    let manifests = std::mem::take(&mut b.manifests);
    for manifest in &manifests {
        scan_manifest(b, manifest);
    }
    b.manifests = manifests;
}

fn scan_manifest(b: &mut InterrogateBuilder, manifest: &Manifest) {
    if let Err(reason) = b.check_file(&manifest.file) {
        log_skip(&manifest.name, reason);
        return;
    }
    if let Err(reason) = b.check_vis(manifest.vis) {
        log_skip(&manifest.name, reason);
        return;
    }
    if manifest.has_parameters() {
        log_skip(&manifest.name, SkipReason::Parameterized);
        return;
    }

    let mut record = InterrogateManifest {
        name: manifest.name.clone(),
        definition: manifest.expansion.clone(),
        ..InterrogateManifest::default()
    };

    if let Some(expr) = &manifest.expr {
        let result = expr.evaluate();
        if result.is_error() {
            b.diagnose(
                manifest.name.clone(),
                format!("cannot evaluate manifest definition `{}`", manifest.expansion),
            );
        } else if let Some(ty) = expr.literal_kind().map(|kind| literal_type(b, kind)) {
            record.flags |= ManifestFlags::HAS_TYPE;
            record.ty = b.get_type(ty, false);
            if let ExprResult::Integer(value) = result {
                record.flags |= ManifestFlags::HAS_INT_VALUE;
                record.int_value = value;
            } else {
                let getter = synth::get_getter(
                    b,
                    ty,
                    &manifest.name,
                    None,
                    ScopeId::GLOBAL,
                    None,
                );
                if getter.is_some() {
                    record.flags |= ManifestFlags::HAS_GETTER;
                    record.getter = getter;
                }
            }
        }
    }

    let index = b.db.next_index();
    tracing::debug!(%index, name = %record.name, "new manifest");
    b.db.add_manifest(index, record);
}

/// The C++ type of a literal of the given kind.
fn literal_type(b: &mut InterrogateBuilder, kind: LiteralKind) -> TypeId {
    match kind {
        LiteralKind::Integer => TypeId::INT,
        LiteralKind::Real => TypeId::DOUBLE,
        LiteralKind::Char => TypeId::CHAR,
        LiteralKind::String => {
            let chars = b.pool.const_of(TypeId::CHAR);
            b.pool.pointer(chars)
        }
        LiteralKind::Bool => TypeId::BOOL,
        LiteralKind::Null => TypeId::NULLPTR,
    }
}

// === Elements ===

/// A global variable (`strct` is `None`) or a data member.
pub(super) fn scan_element(
    b: &mut InterrogateBuilder,
    inst: &Instance,
    strct: Option<StructId>,
    scope: ScopeId,
) -> ElementIndex {
    let what = b.pool.instance_name(inst, None);
    if let Err(reason) = admit_element(b, inst, strct.is_none(), scope) {
        log_skip(&what, reason);
        return ElementIndex::NONE;
    }

    let mut element = scoped_instance(inst, scope);
    let ty = b.pool.resolve_type(element.ty, scope);
    element.ty = ty;

    let name = b.pool.instance_name(&element, Some(scope));
    let scoped_name = descope(&b.pool.instance_name(&element, None)).to_owned();
    let value_ty = b.pool.unwrap_reference(ty);
    let type_index = b.get_type(value_ty, false);
    if type_index.is_none() {
        log_skip(&what, SkipReason::Ignored);
        return ElementIndex::NONE;
    }

    let mut record = InterrogateElement {
        comment: element
            .comment
            .as_deref()
            .map(trim_blanks)
            .unwrap_or_default()
            .to_owned(),
        name,
        scoped_name,
        ty: type_index,
        ..InterrogateElement::default()
    };

    if !involves_protected(&b.pool, ty) {
        let param_ty = if b.pool.as_struct(ty).is_some() {
            b.pool.const_reference(ty)
        } else {
            ty
        };
        let getter = synth::get_getter(b, ty, &record.name, strct, scope, Some(&element));
        if getter.is_some() {
            record.flags |= ElementFlags::HAS_GETTER;
            record.getter = getter;
        }
        if is_assignable(&b.pool, ty) {
            let setter = synth::get_setter(b, param_ty, &record.name, strct, scope, &element);
            if setter.is_some() {
                record.flags |= ElementFlags::HAS_SETTER;
                record.setter = setter;
            }
        }
    }
    if strct.is_none() {
        record.flags |= ElementFlags::GLOBAL;
    }

    let index = b.db.next_index();
    tracing::debug!(%index, name = %record.scoped_name, "new element");
    b.db.add_element(index, record);
    index
}

fn admit_element(
    b: &mut InterrogateBuilder,
    inst: &Instance,
    global: bool,
    scope: ScopeId,
) -> Result<(), SkipReason> {
    if inst.is_template() {
        return Err(SkipReason::Template);
    }
    if let Some(ident) = inst.ident.as_ref().filter(|ident| ident.is_scoped()) {
        let ident = ident.clone();
        if b.pool.qualifier_scope(&ident, scope) != Some(scope) {
            return Err(SkipReason::OutOfScope);
        }
    }
    if global {
        b.check_file(&inst.file)?;
    } else if inst.file.is_c_file() {
        return Err(SkipReason::ImplementationFile);
    }
    b.check_vis(inst.vis)?;
    if inst.storage.is_static() {
        return Err(SkipReason::StaticOrDeleted);
    }
    Ok(())
}
