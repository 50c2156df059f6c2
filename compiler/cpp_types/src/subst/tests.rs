#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::test_helpers::{header, member, new_struct};
use crate::{FunctionFlags, FunctionType, ParameterList, StructKind, TemplateParam, TemplateParams};
use cpp_ir::Visibility;
use pretty_assertions::assert_eq;

#[test]
fn formals_are_replaced_inside_wrappers() {
    let mut pool = Pool::new();
    let t = pool.template_param("T");
    let ct = pool.const_of(t);
    let ref_ct = pool.reference(ct);
    let f = pool.function_of(t, vec![Instance::param(ref_ct, "v")]);

    let mut map = SubstitutionMap::new();
    map.insert_type(t, TypeId::INT);
    let out = pool.substitute_type(f, &mut map);

    let expected_param = pool.const_reference(TypeId::INT);
    let expected = pool.function_of(TypeId::INT, vec![Instance::param(expected_param, "v")]);
    assert_eq!(out, expected);
}

#[test]
fn unrelated_types_come_back_unchanged() {
    let mut pool = Pool::new();
    let t = pool.template_param("T");
    let p = pool.pointer(TypeId::CHAR);
    let plain = new_struct(&mut pool, ScopeId::GLOBAL, "Plain");
    member(&mut pool, plain, "x", TypeId::INT);
    let plain_ty = pool.struct_type(plain);

    let mut map = SubstitutionMap::new();
    map.insert_type(t, TypeId::INT);
    let before = pool.type_count();
    assert_eq!(pool.substitute_type(p, &mut map), p);
    assert_eq!(pool.substitute_type(plain_ty, &mut map), plain_ty);
    assert_eq!(pool.type_count(), before);
}

#[test]
fn results_are_memoized() {
    let mut pool = Pool::new();
    let t = pool.template_param("T");
    let pt = pool.pointer(t);

    let mut map = SubstitutionMap::new();
    map.insert_type(t, TypeId::DOUBLE);
    let first = pool.substitute_type(pt, &mut map);
    let recorded = map.len();
    let count = pool.type_count();
    let second = pool.substitute_type(pt, &mut map);

    assert_eq!(first, second);
    assert_eq!(map.len(), recorded);
    assert_eq!(pool.type_count(), count);
    assert_eq!(map.get_type(pt), Some(first));
}

#[test]
fn method_pointer_owner_is_substituted() {
    let mut pool = Pool::new();
    let generic = new_struct(&mut pool, ScopeId::GLOBAL, "Generic");
    let concrete = new_struct(&mut pool, ScopeId::GLOBAL, "Concrete");
    let sig = FunctionType::new(TypeId::INT, ParameterList::empty())
        .with_flags(FunctionFlags::METHOD_POINTER);
    let pm = pool.function(sig.with_class_owner(generic));

    let mut map = SubstitutionMap::new();
    let (from, to) = (pool.struct_type(generic), pool.struct_type(concrete));
    map.insert_type(from, to);
    let out = pool.substitute_type(pm, &mut map);

    assert_ne!(out, pm);
    assert_eq!(pool.type_name(out), "int (Concrete::*)()");
}

#[test]
fn value_formals_substitute_into_bounds() {
    let mut pool = Pool::new();
    let arr = pool.array(TypeId::CHAR, Some(Expr::ident("N")));
    let mut map = SubstitutionMap::new();
    map.insert_value("N", Expr::Integer(16));
    let out = pool.substitute_type(arr, &mut map);
    assert_eq!(pool.type_name(out), "char [16]");
}

#[test]
fn instances_are_copied_only_when_changed() {
    let mut pool = Pool::new();
    let t = pool.template_param("T");
    let holder = new_struct(&mut pool, ScopeId::GLOBAL, "Holder");
    let fixed = member(&mut pool, holder, "count", TypeId::INT);
    let generic = member(&mut pool, holder, "value", t);

    let mut map = SubstitutionMap::new();
    map.insert_type(t, TypeId::FLOAT);
    assert_eq!(pool.substitute_instance(fixed, &mut map), fixed);
    let copied = pool.substitute_instance(generic, &mut map);
    assert_ne!(copied, generic);
    assert_eq!(pool.instance(copied).ty, TypeId::FLOAT);
    assert_eq!(pool.substitute_instance(generic, &mut map), copied);
}

#[test]
fn self_referential_structs_terminate() {
    let mut pool = Pool::new();
    let t = pool.template_param("T");
    let node = pool.new_struct_template(
        ScopeId::GLOBAL,
        StructKind::Struct,
        "Node",
        TemplateParams(vec![TemplateParam::Type {
            name: "T".into(),
            formal: t,
            default: None,
        }]),
        Visibility::Public,
        header(),
    );
    let node_ty = pool.struct_type(node);
    let next_ty = pool.pointer(node_ty);
    member(&mut pool, node, "value", t);
    member(&mut pool, node, "next", next_ty);

    let mut map = SubstitutionMap::new();
    map.insert_type(t, TypeId::INT);
    let out = pool.substitute_type(node_ty, &mut map);
    assert_ne!(out, node_ty);

    let copy = pool.as_struct(out).unwrap();
    let scope = pool.scope(pool.struct_def(copy).scope);
    let value = scope.variables["value"];
    let next = scope.variables["next"];
    assert_eq!(pool.instance(value).ty, TypeId::INT);
    let expected_next = pool.lookup(&TypeData::Pointer(out)).unwrap();
    assert_eq!(pool.instance(next).ty, expected_next);
    assert_eq!(pool.scope(pool.struct_def(copy).scope).types["T"], TypeId::INT);

    assert_eq!(pool.substitute_type(node_ty, &mut map), out);
}

#[test]
fn mentions_follow_members() {
    let mut pool = Pool::new();
    let t = pool.template_param("T");
    let inner = new_struct(&mut pool, ScopeId::GLOBAL, "Inner");
    member(&mut pool, inner, "v", t);
    let outer = new_struct(&mut pool, ScopeId::GLOBAL, "Outer");
    let inner_ty = pool.struct_type(inner);
    member(&mut pool, outer, "i", inner_ty);

    let mut map = SubstitutionMap::new();
    map.insert_type(t, TypeId::BOOL);
    let mut visiting = FxHashSet::default();
    assert!(pool.struct_mentions(outer, &map, &mut visiting));
    let mut visiting = FxHashSet::default();
    assert!(!pool.type_mentions(TypeId::INT, &map, &mut visiting));
}
