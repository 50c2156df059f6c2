#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::test_helpers::{method, new_struct};
use crate::ScopeId;
use cpp_ir::Expr;

fn flags_of(pool: &Pool, inst: crate::InstanceId) -> FunctionFlags {
    pool.get(pool.instance(inst).ty).as_function().unwrap().flags
}

#[test]
fn constructors_and_destructors() {
    let mut pool = Pool::new();
    let c = new_struct(&mut pool, ScopeId::GLOBAL, "C");
    let ctor = method(&mut pool, c, "C", TypeId::INT, vec![]);
    let dtor = method(&mut pool, c, "~C", TypeId::VOID, vec![]);

    assert!(flags_of(&pool, ctor).contains(FunctionFlags::CONSTRUCTOR));
    assert!(flags_of(&pool, dtor).contains(FunctionFlags::DESTRUCTOR));
    let ret = pool.get(pool.instance(ctor).ty).as_function().unwrap().return_type;
    assert_eq!(ret, TypeId::VOID);
}

#[test]
fn copy_and_move_constructors() {
    let mut pool = Pool::new();
    let c = new_struct(&mut pool, ScopeId::GLOBAL, "C");
    let c_ty = pool.struct_type(c);
    let cref = pool.const_reference(c_ty);
    let rref = pool.rvalue_reference(c_ty);

    let copy = method(&mut pool, c, "C", TypeId::VOID, vec![Instance::param(cref, "o")]);
    let mv = method(&mut pool, c, "C", TypeId::VOID, vec![Instance::param(rref, "o")]);

    assert!(flags_of(&pool, copy).contains(FunctionFlags::COPY_CONSTRUCTOR));
    assert!(!flags_of(&pool, copy).contains(FunctionFlags::MOVE_CONSTRUCTOR));
    assert!(flags_of(&pool, mv).contains(FunctionFlags::MOVE_CONSTRUCTOR));
}

#[test]
fn extra_parameters_need_defaults() {
    let mut pool = Pool::new();
    let c = new_struct(&mut pool, ScopeId::GLOBAL, "C");
    let c_ty = pool.struct_type(c);
    let cref = pool.const_reference(c_ty);

    let defaulted = method(
        &mut pool,
        c,
        "C",
        TypeId::VOID,
        vec![
            Instance::param(cref, "o"),
            Instance::param(TypeId::INT, "n").with_initializer(Expr::Integer(0)),
        ],
    );
    let plain = method(
        &mut pool,
        c,
        "C",
        TypeId::VOID,
        vec![Instance::param(cref, "o"), Instance::param(TypeId::INT, "n")],
    );

    assert!(flags_of(&pool, defaulted).contains(FunctionFlags::COPY_CONSTRUCTOR));
    assert!(!flags_of(&pool, plain).contains(FunctionFlags::COPY_CONSTRUCTOR));
    assert!(flags_of(&pool, plain).contains(FunctionFlags::CONSTRUCTOR));
}

#[test]
fn assignment_operators() {
    let mut pool = Pool::new();
    let c = new_struct(&mut pool, ScopeId::GLOBAL, "C");
    let c_ty = pool.struct_type(c);
    let cref = pool.const_reference(c_ty);
    let lref = pool.reference(c_ty);
    let rref = pool.rvalue_reference(c_ty);

    let copy = method(&mut pool, c, "operator =", lref, vec![Instance::param(cref, "o")]);
    let mv = method(&mut pool, c, "operator =", lref, vec![Instance::param(rref, "o")]);
    let other = method(
        &mut pool,
        c,
        "operator =",
        lref,
        vec![Instance::param(TypeId::INT, "v")],
    );

    assert!(flags_of(&pool, copy).contains(FunctionFlags::COPY_ASSIGNMENT));
    assert!(flags_of(&pool, mv).contains(FunctionFlags::MOVE_ASSIGNMENT));
    assert!(!flags_of(&pool, other).intersects(
        FunctionFlags::COPY_ASSIGNMENT | FunctionFlags::MOVE_ASSIGNMENT
    ));
    // Assignment keeps its declared return type.
    let ret = pool.get(pool.instance(copy).ty).as_function().unwrap().return_type;
    assert_eq!(ret, lref);
}

#[test]
fn free_functions_are_not_classified() {
    let mut pool = Pool::new();
    new_struct(&mut pool, ScopeId::GLOBAL, "C");
    let f = pool.function_of(TypeId::INT, vec![]);
    let id = pool.add_function(ScopeId::GLOBAL, Instance::named(f, "C"));
    assert!(!flags_of(&pool, id).contains(FunctionFlags::CONSTRUCTOR));
}
