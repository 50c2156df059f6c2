//! One callable wrapper per overload.

use cpp_ir::StorageClass;
use cpp_types::{FunctionFlags as CppFunctionFlags, FunctionType, TypeId};
use interrogate_db::{
    FunctionIndex, InterrogateFunctionWrapper, ParameterFlags, TypeIndex, WrapperFlags,
    WrapperParameter,
};
use rustc_hash::FxHashSet;

use super::{InterrogateBuilder, Overload};
use crate::names::{hash_string, trim_blanks};

/// Emit a wrapper for every overload of every function, in index order and
/// then signature order.
#[tracing::instrument(level = "debug", skip_all, fields(functions = b.overloads.len()))]
pub(super) fn make_wrappers(b: &mut InterrogateBuilder) {
    let mut functions: Vec<FunctionIndex> = b.overloads.keys().copied().collect();
    functions.sort_unstable();

    let mut used = FxHashSet::default();
    for function in functions {
        let overloads: Vec<(String, Overload)> = b
            .overloads
            .get(&function)
            .map(|by_signature| {
                by_signature
                    .iter()
                    .map(|(sig, overload)| (sig.clone(), overload.clone()))
                    .collect()
            })
            .unwrap_or_default();
        for (signature, overload) in overloads {
            make_wrapper(b, function, &signature, &overload, &mut used);
        }
    }
}

fn make_wrapper(
    b: &mut InterrogateBuilder,
    function: FunctionIndex,
    signature: &str,
    overload: &Overload,
    used: &mut FxHashSet<String>,
) {
    let Some(ftype) = b.pool.get(overload.inst.ty).as_function().cloned() else {
        return;
    };
    let is_constructor = ftype.flags.contains(CppFunctionFlags::CONSTRUCTOR);
    let is_destructor = ftype.flags.contains(CppFunctionFlags::DESTRUCTOR);

    let mut wrapper = InterrogateFunctionWrapper {
        function,
        ..InterrogateFunctionWrapper::default()
    };

    if let Some(class) = overload.class {
        if !overload.inst.storage.is_static() && !is_constructor {
            let this = b.pool.pointer(class);
            wrapper.parameters.push(WrapperParameter {
                flags: ParameterFlags::IS_THIS,
                ty: b.get_type(this, false),
                name: "this".to_owned(),
            });
        }
    }
    for param in &ftype.params.params {
        let mut flags = ParameterFlags::empty();
        let name = param.simple_name().unwrap_or_default().to_owned();
        if !name.is_empty() {
            flags |= ParameterFlags::HAS_NAME;
        }
        if param.initializer.is_some() {
            flags |= ParameterFlags::HAS_DEFAULT;
        }
        let ty = b.pool.unwrap_reference(param.ty);
        wrapper.parameters.push(WrapperParameter {
            flags,
            ty: b.get_type(ty, false),
            name,
        });
    }

    match (is_constructor, overload.class) {
        (true, Some(class)) => {
            let ptr = b.pool.pointer(class);
            wrapper.return_type = b.get_type(ptr, false);
            wrapper.flags |= WrapperFlags::HAS_RETURN;
        }
        _ if ftype.return_type != TypeId::VOID => {
            let ret = b.pool.unwrap_reference(ftype.return_type);
            wrapper.return_type = b.get_type(ret, false);
            wrapper.flags |= WrapperFlags::HAS_RETURN;
        }
        _ => wrapper.return_type = TypeIndex::NONE,
    }

    if ftype.flags.contains(CppFunctionFlags::COPY_CONSTRUCTOR) {
        wrapper.flags |= WrapperFlags::COPY_CONSTRUCTOR;
    } else if is_coerce_constructor(&ftype, overload.inst.storage) {
        wrapper.flags |= WrapperFlags::COERCE_CONSTRUCTOR;
    }
    if !is_destructor {
        wrapper.flags |= WrapperFlags::CALLABLE_BY_NAME;
    }

    wrapper.unique_name = unique_name(&b.library_hash, signature, used);
    wrapper.comment = overload
        .inst
        .comment
        .as_deref()
        .map(trim_blanks)
        .unwrap_or_default()
        .to_owned();

    let index = b.db.next_index();
    tracing::trace!(%index, %function, name = %wrapper.unique_name, "new wrapper");
    b.db.add_wrapper(index, wrapper);
    b.db.update_function(function).wrappers.push(index);
}

/// A constructor that converts its single argument implicitly.
fn is_coerce_constructor(ftype: &FunctionType, storage: StorageClass) -> bool {
    ftype.flags.contains(CppFunctionFlags::CONSTRUCTOR)
        && ftype.params.len() == 1
        && !storage.contains(StorageClass::EXPLICIT)
}

/// `_in` + library hash + signature hash. A clash tries a second hash of
/// the signature, then suffixes `a` through `z`, then a counter.
fn unique_name(library_hash: &str, signature: &str, used: &mut FxHashSet<String>) -> String {
    let base = format!("_in{library_hash}{}", hash_string(signature, 5));
    if used.insert(base.clone()) {
        return base;
    }
    let second = format!("_in{library_hash}{}", hash_string(signature, 11));
    let suffixed = ('a'..='z').map(|suffix| format!("{second}{suffix}"));
    let counted = (0u32..).map(|n| format!("{second}z{n}"));
    let found = std::iter::once(second.clone())
        .chain(suffixed)
        .chain(counted)
        .find(|candidate| used.insert(candidate.clone()));
    found.unwrap_or(second)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_name_breaks_clashes() {
        let mut used = FxHashSet::default();
        let first = unique_name("ABCD", "void f(int)", &mut used);
        let again = unique_name("ABCD", "void f(int)", &mut used);
        let third = unique_name("ABCD", "void f(int)", &mut used);
        assert!(first.starts_with("_inABCD"));
        assert_ne!(first, again);
        assert_eq!(third, format!("{again}a"));
    }

    #[test]
    fn unique_name_never_repeats_once_suffixes_run_out() {
        let mut used = FxHashSet::default();
        let names: Vec<String> = (0..40)
            .map(|_| unique_name("ABCD", "int g()", &mut used))
            .collect();
        let distinct: FxHashSet<&String> = names.iter().collect();
        assert_eq!(distinct.len(), names.len());
        assert_eq!(used.len(), names.len());
    }
}
