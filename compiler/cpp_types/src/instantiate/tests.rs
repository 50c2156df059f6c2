#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use super::*;
use crate::test_helpers::{header, member};
use crate::{Instance, ScopeId, StructKind, TypeData};
use cpp_ir::{Expr, Visibility};
use pretty_assertions::assert_eq;

fn type_formal(pool: &mut Pool, name: &str, default: Option<TypeId>) -> TemplateParam {
    TemplateParam::Type {
        name: name.into(),
        formal: pool.template_param(name),
        default,
    }
}

fn class_template(pool: &mut Pool, name: &str, params: Vec<TemplateParam>) -> StructId {
    pool.new_struct_template(
        ScopeId::GLOBAL,
        StructKind::Class,
        name,
        TemplateParams(params),
        Visibility::Public,
        header(),
    )
}

fn formal_of(param: &TemplateParam) -> TypeId {
    match param {
        TemplateParam::Type { formal, .. } => *formal,
        TemplateParam::Value { .. } => panic!("value formal"),
    }
}

fn member_type(pool: &Pool, ty: TypeId, name: &str) -> TypeId {
    let id = pool.as_struct(ty).expect("struct");
    let scope = pool.scope(pool.struct_def(id).scope);
    pool.instance(scope.variables[name]).ty
}

#[test]
fn instantiations_are_cached_per_argument_list() {
    let mut pool = Pool::new();
    let t = type_formal(&mut pool, "T", None);
    let formal = formal_of(&t);
    let boxed = class_template(&mut pool, "Box", vec![t]);
    member(&mut pool, boxed, "item", formal);

    let a = pool
        .instantiate_struct(boxed, &[TemplateArg::Type(TypeId::INT)])
        .unwrap();
    let b = pool
        .instantiate_struct(boxed, &[TemplateArg::Type(TypeId::INT)])
        .unwrap();
    let c = pool
        .instantiate_struct(boxed, &[TemplateArg::Type(TypeId::DOUBLE)])
        .unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(pool.struct_instantiation_count(boxed), 2);
    assert_eq!(pool.type_name(a), "Box< int >");
    assert_eq!(member_type(&pool, a, "item"), TypeId::INT);
    assert_eq!(member_type(&pool, c, "item"), TypeId::DOUBLE);

    let id = pool.as_struct(a).unwrap();
    assert_eq!(pool.struct_def(id).template_of, Some(boxed));
    assert!(!pool.struct_def(id).is_template());
}

#[test]
fn defaults_may_refer_to_earlier_formals() {
    let mut pool = Pool::new();
    let t = type_formal(&mut pool, "T", None);
    let t_formal = formal_of(&t);
    let t_ptr = pool.pointer(t_formal);
    let u = type_formal(&mut pool, "U", Some(t_ptr));
    let u_formal = formal_of(&u);
    let pair = class_template(&mut pool, "Pair", vec![t, u]);
    member(&mut pool, pair, "second", u_formal);

    let ty = pool
        .instantiate_struct(pair, &[TemplateArg::Type(TypeId::CHAR)])
        .unwrap();
    let char_ptr = pool.pointer(TypeId::CHAR);
    assert_eq!(member_type(&pool, ty, "second"), char_ptr);
}

#[test]
fn value_arguments_fill_array_bounds() {
    let mut pool = Pool::new();
    let n = TemplateParam::Value {
        name: "N".into(),
        ty: TypeId::INT,
        default: Some(Expr::Integer(4)),
    };
    let buf = class_template(&mut pool, "Buffer", vec![n]);
    let arr = pool.array(TypeId::CHAR, Some(Expr::ident("N")));
    member(&mut pool, buf, "data", arr);

    let sized = pool
        .instantiate_struct(buf, &[TemplateArg::Value(Expr::Integer(32))])
        .unwrap();
    assert_eq!(pool.type_name(member_type(&pool, sized, "data")), "char [32]");

    let defaulted = pool.instantiate_struct(buf, &[]).unwrap();
    assert_eq!(pool.type_name(member_type(&pool, defaulted, "data")), "char [4]");
}

#[test]
fn self_reference_yields_the_same_instantiation() {
    let mut pool = Pool::new();
    let t = type_formal(&mut pool, "T", None);
    let formal = formal_of(&t);
    let list = class_template(&mut pool, "List", vec![t]);
    let list_ty = pool.struct_type(list);
    let next = pool.pointer(list_ty);
    member(&mut pool, list, "value", formal);
    member(&mut pool, list, "next", next);

    let ty = pool
        .instantiate_struct(list, &[TemplateArg::Type(TypeId::BOOL)])
        .unwrap();
    let next_ty = member_type(&pool, ty, "next");
    assert_eq!(pool.get(next_ty), &TypeData::Pointer(ty));
    assert_eq!(pool.struct_instantiation_count(list), 1);
}

#[test]
fn argument_errors() {
    let mut pool = Pool::new();
    let t = type_formal(&mut pool, "T", None);
    let boxed = class_template(&mut pool, "Box", vec![t]);

    let err = pool.instantiate_struct(boxed, &[]).unwrap_err();
    assert_eq!(
        err,
        ModelError::TemplateArgCount {
            name: "Box".into(),
            expected: 1,
            found: 0,
        }
    );

    let err = pool
        .instantiate_struct(
            boxed,
            &[TemplateArg::Type(TypeId::INT), TemplateArg::Type(TypeId::INT)],
        )
        .unwrap_err();
    assert!(matches!(err, ModelError::TemplateArgCount { found: 2, .. }));

    let err = pool
        .instantiate_struct(boxed, &[TemplateArg::Value(Expr::Integer(1))])
        .unwrap_err();
    assert_eq!(
        err,
        ModelError::TemplateArgKind {
            name: "Box".into(),
            index: 0,
        }
    );
    assert_eq!(pool.struct_instantiation_count(boxed), 0);
}

#[test]
fn plain_structs_are_not_templates() {
    let mut pool = Pool::new();
    let plain = crate::test_helpers::new_struct(&mut pool, ScopeId::GLOBAL, "Plain");
    let err = pool.instantiate_struct(plain, &[]).unwrap_err();
    assert!(matches!(err, ModelError::NotATemplate { .. }));
}

#[test]
fn function_templates() {
    let mut pool = Pool::new();
    let t = type_formal(&mut pool, "T", None);
    let formal = formal_of(&t);
    let f = pool.function_of(
        formal,
        vec![Instance::param(formal, "a"), Instance::param(formal, "b")],
    );
    let template = pool.add_function(
        ScopeId::GLOBAL,
        Instance::named(f, "max").with_template_params(TemplateParams(vec![t])),
    );

    let args = [TemplateArg::Type(TypeId::DOUBLE)];
    let id = pool.instantiate_function(template, &args).unwrap();
    assert_eq!(pool.instantiate_function(template, &args).unwrap(), id);

    let inst = pool.instance(id).clone();
    assert!(!inst.is_template());
    assert_eq!(pool.prototype(&inst), "double max< double >(double a, double b)");
}
