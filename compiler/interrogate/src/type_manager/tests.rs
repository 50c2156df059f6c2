use super::*;
use cpp_ir::SourceFile;
use cpp_types::{Instance, StructKind};

fn header() -> SourceFile {
    SourceFile::local("shapes.h")
}

#[test]
fn struct_with_a_published_member_is_not_unpublished() {
    let mut pool = Pool::new();
    let id = pool.new_struct(
        ScopeId::GLOBAL,
        StructKind::Class,
        Some("Shape"),
        Visibility::Public,
        header(),
    );
    let ty = pool.struct_type(id);
    assert!(involves_unpublished(&pool, ty, Visibility::Published));

    let scope = pool.struct_def(id).scope;
    pool.add_variable(
        scope,
        Instance::named(TypeId::INT, "sides").with_vis(Visibility::Published),
    );
    assert!(!involves_unpublished(&pool, ty, Visibility::Published));
    let ptr = pool.pointer(ty);
    assert!(!involves_unpublished(&pool, ptr, Visibility::Published));
}

#[test]
fn primitives_are_never_unpublished_or_protected() {
    let pool = Pool::new();
    assert!(!involves_unpublished(&pool, TypeId::INT, Visibility::Published));
    assert!(!involves_protected(&pool, TypeId::DOUBLE));
}

#[test]
fn function_types_count_as_unpublished() {
    let mut pool = Pool::new();
    let f = pool.function_of(TypeId::VOID, Vec::new());
    assert!(involves_unpublished(&pool, f, Visibility::Published));
}

#[test]
fn protected_nested_type_taints_a_signature() {
    let mut pool = Pool::new();
    let outer = pool.new_struct(
        ScopeId::GLOBAL,
        StructKind::Class,
        Some("Outer"),
        Visibility::Public,
        header(),
    );
    let scope = pool.struct_def(outer).scope;
    let inner = pool.new_struct(
        scope,
        StructKind::Struct,
        Some("Hidden"),
        Visibility::Protected,
        header(),
    );
    let hidden = pool.struct_type(inner);
    let hidden_ref = pool.const_reference(hidden);
    let f = pool.function_of(TypeId::VOID, vec![Instance::param(hidden_ref, "h")]);
    assert!(involves_protected(&pool, f));

    let g = pool.function_of(TypeId::INT, vec![Instance::param(TypeId::INT, "x")]);
    assert!(!involves_protected(&pool, g));
}

#[test]
fn only_plain_values_are_assignable() {
    let mut pool = Pool::new();
    let id = pool.new_struct(
        ScopeId::GLOBAL,
        StructKind::Struct,
        Some("Point"),
        Visibility::Published,
        header(),
    );
    let point = pool.struct_type(id);
    let const_int = pool.const_of(TypeId::INT);
    let int_ref = pool.reference(TypeId::INT);
    let point_ptr = pool.pointer(point);

    assert!(is_assignable(&pool, TypeId::INT));
    assert!(is_assignable(&pool, point_ptr));
    assert!(!is_assignable(&pool, const_int));
    assert!(!is_assignable(&pool, int_ref));
    assert!(!is_assignable(&pool, point));

    let td = pool.add_typedef(
        ScopeId::GLOBAL,
        "Coord",
        const_int,
        Visibility::Published,
        header(),
    );
    assert!(!is_assignable(&pool, pool.typedef_type(td)));
}

#[test]
fn ignored_names_are_found_through_wrappers() {
    let mut pool = Pool::new();
    let id = pool.new_struct(
        ScopeId::GLOBAL,
        StructKind::Class,
        Some("Mutex"),
        Visibility::Published,
        header(),
    );
    let mutex = pool.struct_type(id);
    let mutex_ref = pool.reference(mutex);
    let f = pool.function_of(TypeId::VOID, vec![Instance::param(mutex_ref, "lock")]);
    let filter = FilterTable::new().with_ignoreinvolved("Mutex");

    assert!(involves_ignored(&pool, &filter, f));
    assert!(!involves_ignored(&pool, &filter, TypeId::INT));

    let td = pool.add_typedef(
        ScopeId::GLOBAL,
        "Lock",
        TypeId::INT,
        Visibility::Published,
        header(),
    );
    let by_typedef = FilterTable::new().with_ignoreinvolved("Lock");
    assert!(involves_ignored(&pool, &by_typedef, pool.typedef_type(td)));
}
