#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::test_helpers::{header, member, method, method_with, new_struct};
use crate::{ExtensionKind, FunctionFlags, Identifier, Instance, ScopeId};
use cpp_ir::{Expr, StorageClass};

#[test]
fn equivalence_ignores_names_and_defaults() {
    let mut pool = Pool::new();
    let with_default = pool.function_of(
        TypeId::VOID,
        vec![Instance::param(TypeId::INT, "a").with_initializer(Expr::Integer(0))],
    );
    let plain = pool.function_of(TypeId::VOID, vec![Instance::param(TypeId::INT, "b")]);
    assert_ne!(with_default, plain);
    assert!(pool.is_equivalent(with_default, plain));
}

#[test]
fn equivalence_looks_through_typedefs_under_matching_wrappers() {
    let mut pool = Pool::new();
    let td = pool.add_typedef(
        ScopeId::GLOBAL,
        "Int",
        TypeId::INT,
        Visibility::Public,
        header(),
    );
    let td_ty = pool.typedef_type(td);
    let cref = pool.const_reference(TypeId::INT);
    let td_cref = pool.const_reference(td_ty);
    assert!(pool.is_equivalent(cref, td_cref));
    assert!(pool.is_equivalent(td_ty, TypeId::INT));

    let p1 = pool.pointer(td_ty);
    let p2 = pool.pointer(TypeId::INT);
    assert!(pool.is_equivalent(p1, p2));
    let p3 = pool.pointer(TypeId::CHAR);
    assert!(!pool.is_equivalent(p1, p3));
}

#[test]
fn const_and_reference_wrappers_must_agree() {
    let mut pool = Pool::new();
    let int_ref = pool.reference(TypeId::INT);
    let int_cref = pool.const_reference(TypeId::INT);
    let int_rref = pool.rvalue_reference(TypeId::INT);
    assert!(!pool.is_equivalent(int_ref, int_cref));
    assert!(!pool.is_equivalent(int_ref, int_rref));
    assert!(!pool.is_equivalent(int_ref, TypeId::INT));

    let const_int = pool.const_of(TypeId::INT);
    let p = pool.pointer(TypeId::INT);
    let pc = pool.pointer(const_int);
    assert!(!pool.is_equivalent(p, pc));

    let takes_ref = pool.function_of(TypeId::VOID, vec![Instance::param(int_ref, "a")]);
    let takes_cref = pool.function_of(TypeId::VOID, vec![Instance::param(int_cref, "a")]);
    assert!(!pool.is_equivalent(takes_ref, takes_cref));
}

#[test]
fn arity_and_ellipsis_matter() {
    let pool = Pool::new();
    let one = ParameterList::new(vec![Instance::param(TypeId::INT, "a")], false);
    let variadic = ParameterList::new(vec![Instance::param(TypeId::INT, "a")], true);
    let two = ParameterList::new(
        vec![Instance::param(TypeId::INT, "a"), Instance::param(TypeId::INT, "b")],
        false,
    );
    assert!(pool.params_equivalent(&one, &one));
    assert!(!pool.params_equivalent(&one, &variadic));
    assert!(!pool.params_equivalent(&one, &two));
}

#[test]
fn const_reference_unwrapping() {
    let mut pool = Pool::new();
    let cref = pool.const_reference(TypeId::DOUBLE);
    let plain_ref = pool.reference(TypeId::DOUBLE);
    assert_eq!(pool.unwrap_const_reference(cref), Some(TypeId::DOUBLE));
    assert_eq!(pool.unwrap_const_reference(plain_ref), None);
    assert_eq!(pool.unwrap_reference(plain_ref), TypeId::DOUBLE);
    let cc = pool.const_of(TypeId::DOUBLE);
    assert_eq!(pool.strip_const(cc), TypeId::DOUBLE);
}

#[test]
fn placeholders_are_tbd() {
    let mut pool = Pool::new();
    let tbd = pool.tbd(Identifier::simple("Widget"));
    let ptr = pool.pointer(tbd);
    let f = pool.function_of(TypeId::VOID, vec![Instance::param(ptr, "w")]);
    assert!(pool.is_tbd(tbd));
    assert!(pool.is_tbd(ptr));
    assert!(pool.is_tbd(f));
    let fwd = pool.extension(ExtensionKind::Struct, Identifier::simple("Gadget"));
    assert!(pool.is_tbd(fwd));
    assert!(!pool.is_tbd(TypeId::INT));
}

#[test]
fn template_formals_are_not_fully_specified() {
    let mut pool = Pool::new();
    let t = pool.template_param("T");
    let ptr = pool.pointer(t);
    assert!(!pool.is_fully_specified(ptr));
    assert!(pool.is_fully_specified(TypeId::FLOAT));
}

#[test]
fn integers_include_enums() {
    let mut pool = Pool::new();
    let e = pool.new_enum(ScopeId::GLOBAL, Some("Color"), false, Visibility::Public, header());
    let e_ty = pool.enum_type(e);
    let c = pool.const_of(e_ty);
    assert!(pool.is_integer(c));
    assert!(pool.is_integer(TypeId::BOOL));
    assert!(!pool.is_integer(TypeId::DOUBLE));
    let p = pool.pointer(TypeId::INT);
    assert!(!pool.is_integer(p));
}

#[test]
fn plain_structs_are_trivial() {
    let mut pool = Pool::new();
    let pod = new_struct(&mut pool, ScopeId::GLOBAL, "Pod");
    member(&mut pool, pod, "x", TypeId::INT);
    let ty = pool.struct_type(pod);
    assert!(pool.is_trivial(ty));
    assert!(pool.type_is_default_constructible(ty));
    assert!(pool.type_is_copy_constructible(ty));
    assert!(pool.type_is_copy_assignable(ty));
    assert!(pool.type_is_destructible(ty));

    let with_dtor = new_struct(&mut pool, ScopeId::GLOBAL, "Owner");
    method(&mut pool, with_dtor, "~Owner", TypeId::VOID, vec![]);
    assert!(!pool.is_trivial(pool.struct_type(with_dtor)));
}

#[test]
fn references_and_consts_limit_traits() {
    let mut pool = Pool::new();
    let r = pool.reference(TypeId::INT);
    let c = pool.const_of(TypeId::INT);
    assert!(!pool.type_is_default_constructible(r));
    assert!(pool.type_is_copy_constructible(r));
    assert!(!pool.type_is_copy_assignable(c));
    assert!(!pool.is_trivial(r));
}

#[test]
fn deleted_destructor_spreads_to_members() {
    let mut pool = Pool::new();
    let locked = new_struct(&mut pool, ScopeId::GLOBAL, "Locked");
    method_with(
        &mut pool,
        locked,
        "~Locked",
        TypeId::VOID,
        vec![],
        FunctionFlags::empty(),
        StorageClass::DELETED,
    );
    let holder = new_struct(&mut pool, ScopeId::GLOBAL, "Holder");
    let locked_ty = pool.struct_type(locked);
    member(&mut pool, holder, "l", locked_ty);
    assert!(!pool.type_is_destructible(pool.struct_type(holder)));
}
