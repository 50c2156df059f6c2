use super::*;
use rustc_hash::FxHashSet;

#[test]
fn native_scope_is_not_identity() {
    let a = Identifier::simple("Foo");
    let b = Identifier::simple("Foo").with_native_scope(ScopeId::from_raw(3));
    assert_eq!(a, b);
    assert_eq!(a.cmp(&b), Ordering::Equal);

    let mut set = FxHashSet::default();
    set.insert(a);
    assert!(set.contains(&b));
}

#[test]
fn qualified_names() {
    let id = Identifier::qualified(&["std", "string"]);
    assert!(id.is_scoped());
    assert_eq!(id.simple_name(), "string");
    assert!(!Identifier::simple("x").is_scoped());
}

#[test]
fn template_args_attach_to_last_component() {
    let id = Identifier::qualified(&["ns", "vector"])
        .with_template_args(vec![TemplateArg::Type(TypeId::INT)]);
    assert_eq!(id.template_args(), Some(&[TemplateArg::Type(TypeId::INT)][..]));
    assert!(!id.names[0].has_templ());
    assert_ne!(id, Identifier::qualified(&["ns", "vector"]));
}
