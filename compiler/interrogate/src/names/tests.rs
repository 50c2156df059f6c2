use super::*;
use proptest::prelude::*;

#[test]
fn clean_identifier_collapses_invalid_runs() {
    assert_eq!(clean_identifier("get_bar"), "get_bar");
    assert_eq!(clean_identifier("get_a::b"), "get_a_b");
    assert_eq!(clean_identifier("upcast_to_Foo< int >"), "upcast_to_Foo_int");
    assert_eq!(clean_identifier("operator =="), "operator");
}

#[test]
fn clean_identifier_keeps_a_leading_separator() {
    assert_eq!(clean_identifier("::x"), "_x");
    assert_eq!(clean_identifier("~Foo"), "_Foo");
    assert_eq!(clean_identifier("..."), "");
}

#[test]
fn descope_strips_only_the_leading_separator() {
    assert_eq!(descope("::ns::Foo"), "ns::Foo");
    assert_eq!(descope("ns::Foo"), "ns::Foo");
    assert_eq!(descope(""), "");
}

#[test]
fn trim_blanks_trims_both_ends() {
    assert_eq!(trim_blanks("  // a comment\n\n"), "// a comment");
}

#[test]
fn hash_of_empty_name() {
    assert_eq!(hash_string("", 5), "AAAA");
}

#[test]
fn hash_depends_on_the_offset() {
    let name = "Foo::get_bar() const";
    assert_eq!(hash_string(name, 5), hash_string(name, 5));
    assert_ne!(hash_string(name, 5), hash_string(name, 11));
}

#[test]
fn hash_of_single_byte() {
    // 65 * 4999 = 324935 fits in 24 bits, so the fold leaves it alone.
    // Six bits at a time from the bottom: 7, 21, 15, 1.
    assert_eq!(hash_string("A", 5), "HVPB");
}

proptest! {
    #[test]
    fn clean_identifier_output_is_an_identifier(name in ".{0,40}") {
        let cleaned = clean_identifier(&name);
        prop_assert!(cleaned.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        prop_assert!(!cleaned.contains("__"));
        prop_assert!(!cleaned.ends_with('_'));
    }

    #[test]
    fn clean_identifier_is_idempotent_on_valid_names(name in "[A-Za-z][A-Za-z0-9]{0,20}") {
        prop_assert_eq!(clean_identifier(&name), name);
    }

    #[test]
    fn hash_is_four_identifier_chars(name in ".{0,60}", offset in 1u32..24) {
        let hash = hash_string(&name, offset);
        prop_assert_eq!(hash.len(), 4);
        prop_assert!(hash.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }
}
