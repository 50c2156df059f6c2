use super::*;
use cpp_ir::Expr;

fn param(name: &str, default: Option<i64>) -> Instance {
    let p = Instance::param(TypeId::INT, name);
    match default {
        Some(v) => p.with_initializer(Expr::Integer(v)),
        None => p,
    }
}

#[test]
fn void_parameter_collapses() {
    let list = ParameterList::new(vec![Instance::new(TypeId::VOID, None)], false);
    assert!(list.is_empty());

    let named = ParameterList::new(vec![Instance::param(TypeId::VOID, "v")], false);
    assert_eq!(named.len(), 1);
}

#[test]
fn trailing_defaults() {
    let list = ParameterList::new(
        vec![param("a", None), param("b", Some(1)), param("c", Some(2))],
        false,
    );
    assert_eq!(list.count_trailing_defaults(), 2);
    assert_eq!(ParameterList::empty().count_trailing_defaults(), 0);
}

#[test]
fn trailing_defaults_stop_at_first_gap() {
    // (int a = 1, int b, int c = 2): only the last one counts.
    let list = ParameterList::new(
        vec![param("a", Some(1)), param("b", None), param("c", Some(2))],
        false,
    );
    assert_eq!(list.count_trailing_defaults(), 1);
}

#[test]
fn parameter_lists_compare_names_and_defaults() {
    let a = ParameterList::new(vec![param("a", Some(0))], false);
    let b = ParameterList::new(vec![param("b", None)], false);
    assert_ne!(a, b);
    assert_eq!(a, ParameterList::new(vec![param("a", Some(0))], false));
}

#[test]
fn class_owner_keeps_method_pointers_apart() {
    let f = FunctionType::new(TypeId::INT, ParameterList::empty());
    let g = f.clone().with_class_owner(StructId::from_raw(1));
    assert_ne!(f, g);
    assert_ne!(g, f.clone().with_class_owner(StructId::from_raw(2)));
    assert_ne!(f, f.clone().with_flags(FunctionFlags::CONST_METHOD));
}

#[test]
fn operator_heuristic() {
    assert_eq!(operator_flags("size", 0), FunctionFlags::empty());
    assert_eq!(
        operator_flags("operator -", 0),
        FunctionFlags::OPERATOR | FunctionFlags::UNARY_OP
    );
    assert_eq!(operator_flags("operator -", 1), FunctionFlags::OPERATOR);
    assert_eq!(operator_flags("operator ()", 0), FunctionFlags::OPERATOR);
    assert_eq!(operator_flags("operator []", 0), FunctionFlags::OPERATOR);
    assert_eq!(
        operator_flags("operator bool", 0),
        FunctionFlags::OPERATOR | FunctionFlags::OPERATOR_TYPECAST
    );
    assert_eq!(operator_flags("operator new", 1), FunctionFlags::OPERATOR);
}
