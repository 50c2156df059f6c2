use super::*;
use proptest::prelude::*;

fn int(i: i64) -> Expr {
    Expr::Integer(i)
}

#[test]
fn literals_fold_to_themselves() {
    assert_eq!(int(42).evaluate(), ExprResult::Integer(42));
    assert_eq!(Expr::Bool(true).evaluate(), ExprResult::Integer(1));
    assert_eq!(Expr::Char('A').evaluate(), ExprResult::Integer(65));
    assert_eq!(Expr::Float("2.5f".into()).evaluate(), ExprResult::Real(2.5));
    assert_eq!(Expr::String("hi".into()).evaluate(), ExprResult::Literal);
    assert_eq!(Expr::Nullptr.evaluate(), ExprResult::Literal);
}

#[test]
fn identifiers_are_not_constants() {
    assert!(Expr::ident("FOO").evaluate().is_error());
    assert!(Expr::Raw("sizeof(int)".into()).evaluate().is_error());
    let sum = Expr::binary(BinaryOp::Add, int(1), Expr::ident("N"));
    assert!(sum.evaluate().is_error());
}

#[test]
fn integer_arithmetic() {
    let e = Expr::binary(
        BinaryOp::Shl,
        int(1),
        Expr::binary(BinaryOp::Add, int(2), int(3)),
    );
    assert_eq!(e.evaluate(), ExprResult::Integer(32));
    let neg = Expr::unary(UnaryOp::Neg, int(7));
    assert_eq!(neg.evaluate(), ExprResult::Integer(-7));
    let not = Expr::unary(UnaryOp::BitNot, int(0));
    assert_eq!(not.evaluate(), ExprResult::Integer(-1));
}

#[test]
fn division_by_zero_is_an_error() {
    assert!(Expr::binary(BinaryOp::Div, int(1), int(0)).evaluate().is_error());
    assert!(Expr::binary(BinaryOp::Mod, int(1), int(0)).evaluate().is_error());
}

#[test]
fn mixed_arithmetic_promotes_to_real() {
    let e = Expr::binary(BinaryOp::Mul, int(2), Expr::Float("1.5".into()));
    assert_eq!(e.evaluate(), ExprResult::Real(3.0));
    assert_eq!(e.literal_kind(), Some(LiteralKind::Real));
    assert_eq!(e.evaluate().as_integer(), Some(3));
}

#[test]
fn literal_kinds() {
    assert_eq!(int(1).literal_kind(), Some(LiteralKind::Integer));
    assert_eq!(Expr::String("x".into()).literal_kind(), Some(LiteralKind::String));
    let cmp = Expr::binary(BinaryOp::Lt, int(1), int(2));
    assert_eq!(cmp.literal_kind(), Some(LiteralKind::Bool));
    assert_eq!(Expr::ident("x").literal_kind(), None);
}

#[test]
fn replace_idents_reports_no_change() {
    let e = Expr::binary(BinaryOp::Add, int(1), int(2));
    assert_eq!(e.replace_idents(&|_| Some(int(9))), None);

    let e = Expr::binary(BinaryOp::Add, Expr::ident("N"), int(2));
    let replaced = e.replace_idents(&|name| (name == "N").then(|| int(4)));
    assert_eq!(replaced, Some(Expr::binary(BinaryOp::Add, int(4), int(2))));
    assert!(e.mentions_ident(&|name| name == "N"));
}

#[test]
fn display_uses_cpp_spelling() {
    assert_eq!(Expr::Nullptr.to_string(), "nullptr");
    assert_eq!(Expr::String("a\"b".into()).to_string(), "\"a\\\"b\"");
    let e = Expr::binary(BinaryOp::BitOr, int(1), Expr::ident("FLAG"));
    assert_eq!(e.to_string(), "(1 | FLAG)");
}

proptest! {
    #[test]
    fn integer_addition_matches_wrapping_add(a in any::<i64>(), b in any::<i64>()) {
        let e = Expr::binary(BinaryOp::Add, int(a), int(b));
        prop_assert_eq!(e.evaluate(), ExprResult::Integer(a.wrapping_add(b)));
    }

    #[test]
    fn comparisons_are_boolean(a in -1000i64..1000, b in -1000i64..1000) {
        let e = Expr::binary(BinaryOp::Le, int(a), int(b));
        prop_assert_eq!(e.evaluate(), ExprResult::Integer(i64::from(a <= b)));
    }
}
