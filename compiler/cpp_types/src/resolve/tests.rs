#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use crate::test_helpers::{header, member, new_struct};
use crate::{ExtensionKind, StructKind, TemplateParam, TemplateParams};
use cpp_ir::Visibility;

#[test]
fn placeholders_resolve_to_definitions() {
    let mut pool = Pool::new();
    let tbd = pool.tbd(Identifier::simple("Widget"));
    let ptr = pool.pointer(tbd);
    let widget = new_struct(&mut pool, ScopeId::GLOBAL, "Widget");
    let widget_ty = pool.struct_type(widget);

    assert_eq!(pool.resolve_type(tbd, ScopeId::GLOBAL), widget_ty);
    let resolved = pool.resolve_type(ptr, ScopeId::GLOBAL);
    assert_eq!(pool.get(resolved), &TypeData::Pointer(widget_ty));
}

#[test]
fn resolution_is_idempotent() {
    let mut pool = Pool::new();
    new_struct(&mut pool, ScopeId::GLOBAL, "Widget");
    let tbd = pool.tbd(Identifier::simple("Widget"));
    let cref = pool.const_reference(tbd);
    let once = pool.resolve_type(cref, ScopeId::GLOBAL);
    let count = pool.type_count();
    assert_eq!(pool.resolve_type(once, ScopeId::GLOBAL), once);
    assert_eq!(pool.type_count(), count);
}

#[test]
fn unknown_names_stay_placeholders() {
    let mut pool = Pool::new();
    let tbd = pool.tbd(Identifier::simple("Missing"));
    assert_eq!(pool.resolve_type(tbd, ScopeId::GLOBAL), tbd);
    assert!(pool.is_tbd(tbd));
}

#[test]
fn qualified_names() {
    let mut pool = Pool::new();
    let ns = pool.new_namespace(ScopeId::GLOBAL, "geom");
    let point = new_struct(&mut pool, ns, "Point");
    let point_scope = pool.struct_def(point).scope;
    let coord = new_struct(&mut pool, point_scope, "Coord");

    let tbd = pool.tbd(Identifier::qualified(&["geom", "Point", "Coord"]));
    assert_eq!(pool.resolve_type(tbd, ScopeId::GLOBAL), pool.struct_type(coord));

    let unqualified = pool.tbd(Identifier::simple("Point"));
    assert_eq!(pool.resolve_type(unqualified, ScopeId::GLOBAL), unqualified);
    assert_eq!(pool.resolve_type(unqualified, point_scope), pool.struct_type(point));
}

#[test]
fn qualifier_scopes() {
    let mut pool = Pool::new();
    let ns = pool.new_namespace(ScopeId::GLOBAL, "geom");
    let point = new_struct(&mut pool, ns, "Point");
    let point_scope = pool.struct_def(point).scope;

    let method = Identifier::qualified(&["geom", "Point", "length"]);
    assert_eq!(pool.qualifier_scope(&method, ScopeId::GLOBAL), Some(point_scope));
    let free = Identifier::simple("length");
    assert_eq!(pool.qualifier_scope(&free, ns), Some(ns));
    let missing = Identifier::qualified(&["shapes", "length"]);
    assert_eq!(pool.qualifier_scope(&missing, ScopeId::GLOBAL), None);
}

#[test]
fn names_are_found_in_bases() {
    let mut pool = Pool::new();
    let base = new_struct(&mut pool, ScopeId::GLOBAL, "Base");
    let base_scope = pool.struct_def(base).scope;
    let inner = new_struct(&mut pool, base_scope, "Inner");
    let derived = new_struct(&mut pool, ScopeId::GLOBAL, "Derived");
    let base_ty = pool.struct_type(base);
    pool.add_base(derived, base_ty, Visibility::Public, false);
    let derived_scope = pool.struct_def(derived).scope;

    let tbd = pool.tbd(Identifier::simple("Inner"));
    assert_eq!(pool.resolve_type(tbd, derived_scope), pool.struct_type(inner));
}

#[test]
fn forward_declarations_resolve() {
    let mut pool = Pool::new();
    let fwd = pool.declare_forward(ScopeId::GLOBAL, ExtensionKind::Struct, "Gadget");
    let gadget = pool.new_struct(
        ScopeId::GLOBAL,
        StructKind::Struct,
        Some("Gadget"),
        Visibility::Public,
        header(),
    );
    assert_eq!(pool.resolve_type(fwd, ScopeId::GLOBAL), pool.struct_type(gadget));
}

#[test]
fn typedef_targets_are_resolved_in_place() {
    let mut pool = Pool::new();
    let tbd = pool.tbd(Identifier::simple("Widget"));
    let td = pool.add_typedef(ScopeId::GLOBAL, "WidgetRef", tbd, Visibility::Public, header());
    let td_ty = pool.typedef_type(td);
    let widget = new_struct(&mut pool, ScopeId::GLOBAL, "Widget");

    assert_eq!(pool.resolve_type(td_ty, ScopeId::GLOBAL), td_ty);
    assert_eq!(pool.typedef_def(td).target, pool.struct_type(widget));
    assert!(!pool.is_tbd(td_ty));
}

#[test]
fn template_arguments_instantiate() {
    let mut pool = Pool::new();
    let formal = pool.template_param("T");
    let boxed = pool.new_struct_template(
        ScopeId::GLOBAL,
        StructKind::Class,
        "Box",
        TemplateParams(vec![TemplateParam::Type {
            name: "T".into(),
            formal,
            default: None,
        }]),
        Visibility::Public,
        header(),
    );
    member(&mut pool, boxed, "item", formal);
    let item = new_struct(&mut pool, ScopeId::GLOBAL, "Item");

    let arg = pool.tbd(Identifier::simple("Item"));
    let name = Identifier::simple("Box").with_template_args(vec![TemplateArg::Type(arg)]);
    let tbd = pool.tbd(name);

    let first = pool.resolve_type(tbd, ScopeId::GLOBAL);
    let second = pool.resolve_type(tbd, ScopeId::GLOBAL);
    assert_eq!(first, second);
    assert_eq!(pool.struct_instantiation_count(boxed), 1);
    assert_eq!(pool.type_name(first), "Box< Item >");

    let copy = pool.as_struct(first).unwrap();
    let scope = pool.scope(pool.struct_def(copy).scope);
    assert_eq!(pool.instance(scope.variables["item"]).ty, pool.struct_type(item));
}

#[test]
fn function_types_are_rebuilt() {
    let mut pool = Pool::new();
    let tbd = pool.tbd(Identifier::simple("Widget"));
    let f = pool.function_of(tbd, vec![crate::Instance::param(tbd, "w")]);
    let widget = new_struct(&mut pool, ScopeId::GLOBAL, "Widget");
    let widget_ty = pool.struct_type(widget);

    let resolved = pool.resolve_type(f, ScopeId::GLOBAL);
    let expected = pool.function_of(widget_ty, vec![crate::Instance::param(widget_ty, "w")]);
    assert_eq!(resolved, expected);
}
