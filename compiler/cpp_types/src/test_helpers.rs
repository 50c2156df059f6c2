//! Fixtures for model unit tests.

use cpp_ir::{SourceFile, StorageClass, Visibility};

use crate::{
    FunctionFlags, FunctionType, Instance, InstanceId, ParameterList, Pool, ScopeId, StructId,
    StructKind, TypeId,
};

pub fn header() -> SourceFile {
    SourceFile::local("test.h")
}

/// A public `struct name` in `parent`.
pub fn new_struct(pool: &mut Pool, parent: ScopeId, name: &str) -> StructId {
    pool.new_struct(parent, StructKind::Struct, Some(name), Visibility::Public, header())
}

pub fn scope_of(pool: &Pool, id: StructId) -> ScopeId {
    pool.struct_def(id).scope
}

/// A public method `ret name(params)` of `owner`.
pub fn method(
    pool: &mut Pool,
    owner: StructId,
    name: &str,
    ret: TypeId,
    params: Vec<Instance>,
) -> InstanceId {
    method_with(pool, owner, name, ret, params, FunctionFlags::empty(), StorageClass::empty())
}

pub fn method_with(
    pool: &mut Pool,
    owner: StructId,
    name: &str,
    ret: TypeId,
    params: Vec<Instance>,
    flags: FunctionFlags,
    storage: StorageClass,
) -> InstanceId {
    let ftype = FunctionType::new(ret, ParameterList::new(params, false)).with_flags(flags);
    let ty = pool.function(ftype);
    let scope = scope_of(pool, owner);
    pool.add_function(
        scope,
        Instance::named(ty, name)
            .with_storage(storage)
            .with_vis(Visibility::Public),
    )
}

/// A public non-static data member.
pub fn member(pool: &mut Pool, owner: StructId, name: &str, ty: TypeId) -> InstanceId {
    let scope = scope_of(pool, owner);
    pool.add_variable(scope, Instance::named(ty, name).with_vis(Visibility::Public))
}
