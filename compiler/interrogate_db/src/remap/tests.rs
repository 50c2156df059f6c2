use super::*;

#[test]
fn unknown_indices_map_to_none() {
    let mut remap = IndexRemapper::new();
    remap.add_mapping(Index::from_raw(7), Index::from_raw(1));
    assert_eq!(remap.map_from(Index::from_raw(7)), Index::from_raw(1));
    assert_eq!(remap.map_from(Index::from_raw(8)), Index::NONE);
    assert_eq!(remap.map_from(Index::NONE), Index::NONE);
    assert!(remap.in_map(Index::from_raw(7)));
    assert!(!remap.in_map(Index::NONE));
}

#[test]
fn lists_are_mapped_in_place() {
    let mut remap = IndexRemapper::new();
    remap.add_mapping(Index::from_raw(3), Index::from_raw(10));
    remap.add_mapping(Index::from_raw(5), Index::from_raw(11));
    let mut list = vec![Index::from_raw(5), Index::from_raw(4), Index::from_raw(3)];
    remap.map_all(&mut list);
    assert_eq!(
        list,
        vec![Index::from_raw(11), Index::NONE, Index::from_raw(10)]
    );
    assert_eq!(remap.len(), 2);
    remap.clear();
    assert!(remap.is_empty());
}
