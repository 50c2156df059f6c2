//! Functions made up by the builder: element accessors and the casts that
//! cross a derivation.

use cpp_ir::{StorageClass, Visibility};
use cpp_types::{
    FunctionFlags as CppFunctionFlags, FunctionType, Instance, ParameterList, ScopeId, StructId,
    TypeData, TypeId,
};
use interrogate_db::{FunctionFlags, FunctionIndex};

use super::{scoped_instance, InterrogateBuilder};
use crate::names::clean_identifier;

/// A getter for an element or a manifest.
///
/// The return type drops top-level `const`, and an array decays to a
/// pointer to its element. A getter of a non-static member is a `const`
/// method.
pub(super) fn get_getter(
    b: &mut InterrogateBuilder,
    expr_ty: TypeId,
    expression: &str,
    strct: Option<StructId>,
    scope: ScopeId,
    element: Option<&Instance>,
) -> FunctionIndex {
    let mut ret = b.pool.strip_const(expr_ty);
    if let TypeData::Array { element, .. } = b.pool.get(ret) {
        let element = *element;
        ret = b.pool.pointer(element);
    }

    let mut ftype = FunctionType::new(ret, ParameterList::empty());
    let mut storage = StorageClass::empty();
    let mut flags = FunctionFlags::GETTER;
    if strct.is_some() {
        if element.is_some_and(|e| e.storage.is_static()) {
            storage |= StorageClass::STATIC;
        } else {
            ftype = ftype.with_flags(CppFunctionFlags::CONST_METHOD);
            flags |= FunctionFlags::METHOD;
        }
    }

    let name = clean_identifier(&format!("get_{expression}"));
    let function = Instance::named(b.pool.function(ftype), &name)
        .with_storage(storage)
        .with_vis(Visibility::Published);
    let description = match element {
        Some(element) => {
            let mut element = element.clone();
            element.initializer = None;
            format!("getter for {};", b.pool.declaration_text(&element))
        }
        None => format!("getter for {expression}"),
    };
    synthesize(b, &function, strct, scope, flags, description)
}

/// A setter taking one `value` parameter of `param_ty`.
pub(super) fn get_setter(
    b: &mut InterrogateBuilder,
    param_ty: TypeId,
    expression: &str,
    strct: Option<StructId>,
    scope: ScopeId,
    element: &Instance,
) -> FunctionIndex {
    let mut storage = StorageClass::empty();
    let mut flags = FunctionFlags::SETTER;
    if strct.is_some() {
        if element.storage.is_static() {
            storage |= StorageClass::STATIC;
        } else {
            flags |= FunctionFlags::METHOD;
        }
    }

    let name = clean_identifier(&format!("set_{expression}"));
    let params = ParameterList::new(vec![Instance::param(param_ty, "value")], false);
    let ftype = FunctionType::new(TypeId::VOID, params);
    let function = Instance::named(b.pool.function(ftype), &name)
        .with_storage(storage)
        .with_vis(Visibility::Published);

    let mut element = element.clone();
    element.initializer = None;
    let description = format!("setter for {};", b.pool.declaration_text(&element));
    synthesize(b, &function, strct, scope, flags, description)
}

/// A cast from a pointer to `from` to a pointer to `to`.
///
/// For a struct `from` this is a method of `from` named
/// `<prefix>_to_<To>`; otherwise a free function taking `this`.
pub(super) fn get_cast_function(
    b: &mut InterrogateBuilder,
    to: TypeId,
    from: TypeId,
    prefix: &str,
) -> FunctionIndex {
    let to_name = b.preferred_name(to);
    let to_ptr = b.pool.pointer(to);
    let description = format!(
        "{prefix} from {} to {}",
        b.pool.type_name(from),
        b.pool.type_name(to)
    );

    let (function, strct, scope) = if let Some(id) = b.pool.as_struct(from) {
        let name = clean_identifier(&format!("{prefix}_to_{to_name}"));
        let ftype = b.pool.function_of(to_ptr, Vec::new());
        let scope = b.pool.struct_def(id).scope;
        (Instance::named(ftype, &name), Some(id), scope)
    } else {
        let from_name = b.preferred_name(from);
        let name = clean_identifier(&format!("{prefix}_{from_name}_to_{to_name}"));
        let from_ptr = b.pool.pointer(from);
        let ftype = b.pool.function_of(to_ptr, vec![Instance::param(from_ptr, "this")]);
        (Instance::named(ftype, &name), None, ScopeId::GLOBAL)
    };
    let function = function.with_vis(Visibility::Published);

    let index = b.get_function(&function, strct, scope, FunctionFlags::TYPECAST);
    describe(b, index, description);
    index
}

/// Record a made-up accessor unless the class already has a function of
/// the same name and signature.
fn synthesize(
    b: &mut InterrogateBuilder,
    function: &Instance,
    strct: Option<StructId>,
    scope: ScopeId,
    flags: FunctionFlags,
    description: String,
) -> FunctionIndex {
    let scoped = scoped_instance(function, scope);
    let key = b.pool.instance_name(&scoped, None);
    if let Some(&existing) = b.functions_by_name.get(&key) {
        let signature = b.pool.function_signature(&scoped, 0);
        if b.db.get_function(existing).signatures.contains(&signature) {
            tracing::trace!(name = %key, "accessor already declared");
            return FunctionIndex::NONE;
        }
    }

    let index = b.get_function(function, strct, scope, flags);
    describe(b, index, description);
    index
}

/// Made-up functions carry a description unless a declaration gave them a
/// comment.
fn describe(b: &mut InterrogateBuilder, index: FunctionIndex, description: String) {
    if index.is_none() {
        return;
    }
    let record = b.db.update_function(index);
    if record.comment.is_empty() {
        record.comment = description;
    }
}
