//! The model arena and the canonical type registry.
//!
//! Types are interned: `intern` returns the one handle whose data is
//! structurally equal to the candidate, so handle equality is type
//! equality. Declarations (structs, enums, typedefs, scopes, instances)
//! live in plain arenas and are referred to by handle; struct, enum and
//! typedef types are distinct per declaration.
//!
//! Interned data is never mutated. Changing a type means building a new
//! candidate and interning it again.

mod construct;

use std::collections::BTreeMap;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::instantiate::InstantiationCache;
use crate::{
    EnumDef, EnumId, Instance, InstanceId, NameComponent, Scope, ScopeId, ScopeKind, SimpleFlags,
    SimpleKind, SimpleType, StructDef, StructId, TypeData, TypeId, TypedefDef, TypedefId,
};

/// The arena owning every type and declaration of one translation unit.
pub struct Pool {
    /// Interned type data, indexed by `TypeId`.
    types: Vec<TypeData>,
    /// Type data to handle, for deduplication. Unresolved names also key on
    /// the scope they were written in.
    registry: BTreeMap<(TypeData, Option<ScopeId>), TypeId>,

    structs: Vec<StructDef>,
    struct_types: Vec<TypeId>,
    enums: Vec<EnumDef>,
    enum_types: Vec<TypeId>,
    typedefs: Vec<TypedefDef>,
    typedef_types: Vec<TypeId>,
    scopes: Vec<Scope>,
    instances: Vec<Instance>,

    pub(crate) fn_instantiations: FxHashMap<InstanceId, InstantiationCache<InstanceId>>,
    pub(crate) struct_instantiations: FxHashMap<StructId, InstantiationCache<TypeId>>,
    /// Types currently being resolved; guards against cycles.
    pub(crate) resolving: FxHashSet<TypeId>,
    next_param: u32,
}

impl Pool {
    /// Create a pool with the primitive types pre-interned and an empty
    /// global scope.
    pub fn new() -> Self {
        let mut pool = Pool {
            types: Vec::with_capacity(256),
            registry: BTreeMap::new(),
            structs: Vec::new(),
            struct_types: Vec::new(),
            enums: Vec::new(),
            enum_types: Vec::new(),
            typedefs: Vec::new(),
            typedef_types: Vec::new(),
            scopes: Vec::new(),
            instances: Vec::new(),
            fn_instantiations: FxHashMap::default(),
            struct_instantiations: FxHashMap::default(),
            resolving: FxHashSet::default(),
            next_param: 0,
        };

        // Order must match the TypeId constants.
        let primitives = [
            SimpleType::new(SimpleKind::Void),
            SimpleType::new(SimpleKind::Bool),
            SimpleType::new(SimpleKind::Char),
            SimpleType::new(SimpleKind::Int),
            SimpleType::with_flags(SimpleKind::Int, SimpleFlags::UNSIGNED),
            SimpleType::with_flags(SimpleKind::Int, SimpleFlags::LONG),
            SimpleType::with_flags(SimpleKind::Int, SimpleFlags::LONGLONG),
            SimpleType::new(SimpleKind::Float),
            SimpleType::new(SimpleKind::Double),
            SimpleType::new(SimpleKind::Nullptr),
        ];
        for simple in primitives {
            pool.intern(TypeData::Simple(simple));
        }
        debug_assert_eq!(pool.types.len(), TypeId::PRIMITIVE_COUNT as usize);

        pool.scopes.push(Scope::new(
            NameComponent::new(""),
            None,
            ScopeKind::Global,
        ));
        pool
    }

    // === Registry ===

    /// Return the canonical handle for `data`, registering it if new.
    pub fn intern(&mut self, data: TypeData) -> TypeId {
        let scope = written_in(&data);
        let key = (data, scope);
        if let Some(&id) = self.registry.get(&key) {
            return id;
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "type count cannot exceed u32::MAX in practice"
        )]
        let id = TypeId::from_raw(self.types.len() as u32);
        self.types.push(key.0.clone());
        self.registry.insert(key, id);
        id
    }

    /// Look up the handle for `data` without registering it.
    pub fn lookup(&self, data: &TypeData) -> Option<TypeId> {
        self.registry
            .get(&(data.clone(), written_in(data)))
            .copied()
    }

    /// The data behind a type handle.
    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.types[id.index()]
    }

    /// Number of distinct interned types.
    #[inline]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub(crate) fn next_param_serial(&mut self) -> u32 {
        let serial = self.next_param;
        self.next_param += 1;
        serial
    }

    // === Declarations ===

    #[inline]
    pub fn struct_def(&self, id: StructId) -> &StructDef {
        &self.structs[id.index()]
    }

    #[inline]
    pub fn struct_def_mut(&mut self, id: StructId) -> &mut StructDef {
        &mut self.structs[id.index()]
    }

    /// The type handle of a struct declaration.
    #[inline]
    pub fn struct_type(&self, id: StructId) -> TypeId {
        self.struct_types[id.index()]
    }

    #[inline]
    pub fn enum_def(&self, id: EnumId) -> &EnumDef {
        &self.enums[id.index()]
    }

    #[inline]
    pub fn enum_def_mut(&mut self, id: EnumId) -> &mut EnumDef {
        &mut self.enums[id.index()]
    }

    #[inline]
    pub fn enum_type(&self, id: EnumId) -> TypeId {
        self.enum_types[id.index()]
    }

    #[inline]
    pub fn typedef_def(&self, id: TypedefId) -> &TypedefDef {
        &self.typedefs[id.index()]
    }

    #[inline]
    pub fn typedef_def_mut(&mut self, id: TypedefId) -> &mut TypedefDef {
        &mut self.typedefs[id.index()]
    }

    #[inline]
    pub fn typedef_type(&self, id: TypedefId) -> TypeId {
        self.typedef_types[id.index()]
    }

    #[inline]
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    #[inline]
    pub fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    #[inline]
    pub fn instance(&self, id: InstanceId) -> &Instance {
        &self.instances[id.index()]
    }

    #[inline]
    pub fn instance_mut(&mut self, id: InstanceId) -> &mut Instance {
        &mut self.instances[id.index()]
    }

    /// The top-level declarations, in source order.
    pub fn global_declarations(&self) -> &[crate::Declaration] {
        &self.scope(ScopeId::GLOBAL).declarations
    }

    // === Arena Allocation ===

    #[expect(
        clippy::cast_possible_truncation,
        reason = "arena sizes cannot exceed u32::MAX in practice"
    )]
    pub(crate) fn alloc_struct(&mut self, def: StructDef) -> StructId {
        let id = StructId::from_raw(self.structs.len() as u32);
        self.structs.push(def);
        let ty = self.intern(TypeData::Struct(id));
        self.struct_types.push(ty);
        id
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "arena sizes cannot exceed u32::MAX in practice"
    )]
    pub(crate) fn alloc_enum(&mut self, def: EnumDef) -> EnumId {
        let id = EnumId::from_raw(self.enums.len() as u32);
        self.enums.push(def);
        let ty = self.intern(TypeData::Enum(id));
        self.enum_types.push(ty);
        id
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "arena sizes cannot exceed u32::MAX in practice"
    )]
    pub(crate) fn alloc_typedef(&mut self, def: TypedefDef) -> TypedefId {
        let id = TypedefId::from_raw(self.typedefs.len() as u32);
        self.typedefs.push(def);
        let ty = self.intern(TypeData::Typedef(id));
        self.typedef_types.push(ty);
        id
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "arena sizes cannot exceed u32::MAX in practice"
    )]
    pub(crate) fn alloc_scope(&mut self, scope: Scope) -> ScopeId {
        let id = ScopeId::from_raw(self.scopes.len() as u32);
        self.scopes.push(scope);
        id
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "arena sizes cannot exceed u32::MAX in practice"
    )]
    pub(crate) fn alloc_instance(&mut self, inst: Instance) -> InstanceId {
        let id = InstanceId::from_raw(self.instances.len() as u32);
        self.instances.push(inst);
        id
    }
}

/// The native scope of a forward reference or unresolved name. `class Foo;`
/// in two namespaces names two different types.
fn written_in(data: &TypeData) -> Option<ScopeId> {
    match data {
        TypeData::Extension { ident, .. } | TypeData::Tbd(ident) => ident.native_scope,
        _ => None,
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}
