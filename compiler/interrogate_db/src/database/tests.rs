use super::*;
use crate::{FunctionFlags, TypeFlags};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn named_type(name: &str, flags: TypeFlags) -> InterrogateType {
    InterrogateType {
        name: name.to_owned(),
        scoped_name: name.to_owned(),
        true_name: name.to_owned(),
        flags,
        ..InterrogateType::default()
    }
}

#[test]
fn indices_start_at_one_and_increase() {
    let mut db = InterrogateDatabase::new();
    assert_eq!(db.next_index(), Index::from_raw(1));
    assert_eq!(db.next_index(), Index::from_raw(2));
    assert_eq!(db.peek_next_index(), Index::from_raw(3));
}

#[test]
fn missing_records_read_as_empty() {
    let db = InterrogateDatabase::new();
    assert_eq!(db.get_type(Index::from_raw(5)), &InterrogateType::EMPTY);
    assert_eq!(db.get_function(Index::NONE).name, "");
    assert!(!db.get_manifest(Index::from_raw(1)).has_type());
}

#[test]
fn forward_references_merge() {
    let mut db = InterrogateDatabase::new();
    let index = db.next_index();
    db.add_type(index, named_type("Node", TypeFlags::GLOBAL));
    db.add_type(
        index,
        named_type("Node", TypeFlags::FULLY_DEFINED | TypeFlags::STRUCT),
    );

    let ty = db.get_type(index);
    assert!(ty.is_fully_defined());
    assert!(ty.is_struct());
    assert!(ty.is_global());
    assert_eq!(db.global_types(), &[index]);
    assert_eq!(db.all_types(), &[index, index]);
}

#[test]
fn removed_types_leave_the_listings() {
    let mut db = InterrogateDatabase::new();
    let a = db.next_index();
    let b = db.next_index();
    db.add_type(a, named_type("A", TypeFlags::GLOBAL));
    db.add_type(b, named_type("B", TypeFlags::GLOBAL));
    db.remove_type(a);
    assert!(!db.has_type(a));
    assert_eq!(db.global_types(), &[b]);
    assert_eq!(db.type_by_name("A"), Index::NONE);
    assert_eq!(db.type_by_name("B"), b);
}

#[test]
fn remap_puts_wrappers_first() {
    let mut db = InterrogateDatabase::new();
    let ty = db.next_index();
    let func = db.next_index();
    let w1 = db.next_index();
    let gap = db.next_index();
    let w2 = db.next_index();

    db.add_type(ty, named_type("Foo", TypeFlags::GLOBAL | TypeFlags::FULLY_DEFINED));
    db.update_type(ty).methods.push(func);
    db.add_function(
        func,
        InterrogateFunction {
            name: "run".into(),
            scoped_name: "Foo::run".into(),
            flags: FunctionFlags::METHOD,
            class: ty,
            wrappers: vec![w1, w2],
            ..InterrogateFunction::default()
        },
    );
    for w in [w1, w2] {
        db.add_wrapper(
            w,
            InterrogateFunctionWrapper {
                function: func,
                return_type: gap,
                ..InterrogateFunctionWrapper::default()
            },
        );
    }

    let remap = db.remap_indices(1);
    assert_eq!(remap.map_from(w1), Index::from_raw(1));
    assert_eq!(remap.map_from(w2), Index::from_raw(2));
    let new_func = remap.map_from(func);
    let new_ty = remap.map_from(ty);
    assert_eq!(new_func, Index::from_raw(3));
    assert_eq!(new_ty, Index::from_raw(4));
    assert_eq!(db.peek_next_index(), Index::from_raw(5));

    let f = db.get_function(new_func);
    assert_eq!(f.class, new_ty);
    assert_eq!(f.wrappers, vec![Index::from_raw(1), Index::from_raw(2)]);
    assert_eq!(db.get_type(new_ty).methods, vec![new_func]);
    // The wrapper referred to an index that never held a record.
    assert_eq!(db.get_wrapper(Index::from_raw(1)).return_type, Index::NONE);
    assert_eq!(db.get_wrapper(Index::from_raw(1)).function, new_func);
    assert_eq!(db.global_types(), &[new_ty]);
}

proptest! {
    #[test]
    fn wrappers_are_dense_after_remap(spread in proptest::collection::vec(1u32..5, 1..20)) {
        let mut db = InterrogateDatabase::new();
        for gap in spread {
            for _ in 1..gap {
                db.next_index();
            }
            let index = db.next_index();
            db.add_wrapper(index, InterrogateFunctionWrapper::default());
        }
        let count = db.num_wrappers();
        db.remap_indices(1);
        let indices: Vec<u32> = db.wrappers().map(|(i, _)| i.raw()).collect();
        let expected: Vec<u32> = (1..).take(count).collect();
        prop_assert_eq!(indices, expected);
    }
}
