#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::test_helpers::{method, method_with, new_struct};
use crate::{SimpleFlags, SimpleKind, SimpleType};
use cpp_ir::{Expr, StorageClass};
use pretty_assertions::assert_eq;

#[test]
fn simple_spellings() {
    let mut pool = Pool::new();
    assert_eq!(pool.type_name(TypeId::UNSIGNED_INT), "unsigned int");
    assert_eq!(pool.type_name(TypeId::LONG_LONG), "long long int");
    let ull = pool.simple(SimpleType::with_flags(
        SimpleKind::Int,
        SimpleFlags::UNSIGNED | SimpleFlags::LONGLONG,
    ));
    assert_eq!(pool.type_name(ull), "unsigned long long int");
    let ld = pool.simple(SimpleType::with_flags(SimpleKind::Double, SimpleFlags::LONG));
    assert_eq!(pool.type_name(ld), "long double");
}

#[test]
fn wrapper_spellings() {
    let mut pool = Pool::new();
    let cc = pool.const_of(TypeId::CHAR);
    let p = pool.pointer(cc);
    assert_eq!(pool.type_name(p), "char const *");
    let r = pool.reference(TypeId::INT);
    assert_eq!(pool.type_name(r), "int &");
    let rr = pool.rvalue_reference(TypeId::INT);
    assert_eq!(pool.type_name(rr), "int &&");
    let arr = pool.array(TypeId::FLOAT, Some(Expr::Integer(3)));
    assert_eq!(pool.type_name(arr), "float [3]");
    let unsized_arr = pool.array(TypeId::FLOAT, None);
    assert_eq!(pool.type_name(unsized_arr), "float []");
    let f = pool.function_of(
        TypeId::INT,
        vec![Instance::param(TypeId::CHAR, "c"), Instance::param(TypeId::DOUBLE, "d")],
    );
    assert_eq!(pool.type_name(f), "int (*)(char, double)");
}

#[test]
fn named_types_are_qualified() {
    let mut pool = Pool::new();
    let ns = pool.new_namespace(ScopeId::GLOBAL, "geom");
    let point = new_struct(&mut pool, ns, "Point");
    let inner_scope = pool.struct_def(point).scope;
    let inner = new_struct(&mut pool, inner_scope, "Coord");
    assert_eq!(pool.type_name(pool.struct_type(point)), "geom::Point");
    assert_eq!(pool.type_name(pool.struct_type(inner)), "geom::Point::Coord");

    let td = pool.add_typedef(
        ns,
        "real",
        TypeId::DOUBLE,
        cpp_ir::Visibility::Public,
        crate::test_helpers::header(),
    );
    assert_eq!(pool.type_name(pool.typedef_type(td)), "geom::real");
}

#[test]
fn template_arguments_render_spaced() {
    let pool = Pool::new();
    let component = NameComponent {
        name: "vector".into(),
        templ: Some(vec![
            TemplateArg::Type(TypeId::INT),
            TemplateArg::Value(Expr::Integer(4)),
        ]),
    };
    assert_eq!(pool.component_name(&component), "vector< int, 4 >");
}

#[test]
fn signatures_unwrap_const_references() {
    let mut pool = Pool::new();
    let foo = new_struct(&mut pool, ScopeId::GLOBAL, "Foo");
    let foo_ty = pool.struct_type(foo);
    let cref = pool.const_reference(foo_ty);
    let id = method(
        &mut pool,
        foo,
        "assign",
        TypeId::VOID,
        vec![Instance::param(cref, "other"), Instance::param(TypeId::INT, "n")],
    );
    let inst = pool.instance(id).clone();
    assert_eq!(pool.function_signature(&inst, 0), "Foo::assign(Foo, int)");
    assert_eq!(pool.function_signature(&inst, 1), "Foo::assign(Foo)");
}

#[test]
fn const_methods_are_marked() {
    let mut pool = Pool::new();
    let foo = new_struct(&mut pool, ScopeId::GLOBAL, "Foo");
    let id = method_with(
        &mut pool,
        foo,
        "size",
        TypeId::INT,
        vec![],
        FunctionFlags::CONST_METHOD,
        StorageClass::empty(),
    );
    let inst = pool.instance(id).clone();
    assert_eq!(pool.function_signature(&inst, 0), "Foo::size() const");
    assert_eq!(pool.prototype(&inst), "int Foo::size() const");
}

#[test]
fn prototypes_include_defaults() {
    let mut pool = Pool::new();
    let f = pool.function_of(
        TypeId::VOID,
        vec![
            Instance::param(TypeId::INT, "x"),
            Instance::param(TypeId::CHAR, "c").with_initializer(Expr::Char('a')),
        ],
    );
    let id = pool.add_function(
        ScopeId::GLOBAL,
        Instance::named(f, "draw").with_storage(StorageClass::STATIC),
    );
    let inst = pool.instance(id).clone();
    assert_eq!(pool.prototype(&inst), "static void draw(int x, char c = 'a')");
}

#[test]
fn relative_names() {
    let mut pool = Pool::new();
    let foo = new_struct(&mut pool, ScopeId::GLOBAL, "Foo");
    let scope = pool.struct_def(foo).scope;
    let id = method(&mut pool, foo, "run", TypeId::VOID, vec![]);
    let inst = pool.instance(id).clone();
    assert_eq!(pool.instance_name(&inst, Some(scope)), "run");
    assert_eq!(pool.instance_name(&inst, None), "Foo::run");
}
