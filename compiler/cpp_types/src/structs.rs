//! Semantic queries on class definitions: special members, virtual
//! functions, and which implicit members C++ would provide.
//!
//! The `min_vis` argument of the constructibility queries is the most
//! restrictive access the caller has: `Public` for outside code,
//! `Protected` for a derived class.

use std::ops::Bound;

use cpp_ir::{StorageClass, Visibility};
use rustc_hash::FxHashSet;

use crate::{FunctionFlags, FunctionGroup, FunctionType, InstanceId, Pool, StructId, StructKind};

impl Pool {
    // === Member Lookup ===

    /// The function group named after the class.
    pub fn constructor_group(&self, id: StructId) -> Option<&FunctionGroup> {
        let def = self.struct_def(id);
        self.scope(def.scope).function_group(def.simple_name())
    }

    /// A constructor callable without arguments.
    pub fn default_constructor(&self, id: StructId) -> Option<InstanceId> {
        self.constructor_group(id)?
            .instances
            .iter()
            .copied()
            .find(|&inst| {
                self.function_type_of(inst).is_some_and(|f| {
                    f.params
                        .params
                        .first()
                        .map_or(true, |p| p.initializer.is_some())
                })
            })
    }

    pub fn copy_constructor(&self, id: StructId) -> Option<InstanceId> {
        self.find_constructor(id, FunctionFlags::COPY_CONSTRUCTOR)
    }

    pub fn move_constructor(&self, id: StructId) -> Option<InstanceId> {
        self.find_constructor(id, FunctionFlags::MOVE_CONSTRUCTOR)
    }

    pub fn copy_assignment(&self, id: StructId) -> Option<InstanceId> {
        self.find_in_group(id, "operator =", FunctionFlags::COPY_ASSIGNMENT)
    }

    pub fn move_assignment(&self, id: StructId) -> Option<InstanceId> {
        self.find_in_group(id, "operator =", FunctionFlags::MOVE_ASSIGNMENT)
    }

    /// The user-declared destructor.
    pub fn destructor(&self, id: StructId) -> Option<InstanceId> {
        let scope = self.scope(self.struct_def(id).scope);
        scope
            .functions
            .range::<str, _>((Bound::Included("~"), Bound::Unbounded))
            .take_while(|(name, _)| name.starts_with('~'))
            .flat_map(|(_, group)| group.instances.iter().copied())
            .find(|&inst| self.has_function_flags(inst, FunctionFlags::DESTRUCTOR))
    }

    fn find_constructor(&self, id: StructId, flag: FunctionFlags) -> Option<InstanceId> {
        let name = self.struct_def(id).simple_name().to_owned();
        self.find_in_group(id, &name, flag)
    }

    fn find_in_group(&self, id: StructId, name: &str, flag: FunctionFlags) -> Option<InstanceId> {
        let scope = self.scope(self.struct_def(id).scope);
        scope
            .function_group(name)?
            .instances
            .iter()
            .copied()
            .find(|&inst| self.has_function_flags(inst, flag))
    }

    pub(crate) fn function_type_of(&self, inst: InstanceId) -> Option<&FunctionType> {
        self.get(self.instance(inst).ty).as_function()
    }

    fn has_function_flags(&self, inst: InstanceId, flags: FunctionFlags) -> bool {
        self.function_type_of(inst)
            .is_some_and(|f| f.flags.contains(flags))
    }

    /// Struct bases, in derivation order. Bases that are not structs are
    /// skipped.
    pub fn base_structs(&self, id: StructId) -> Vec<StructId> {
        self.struct_def(id)
            .derivation
            .iter()
            .filter_map(|b| self.base_struct(b.base))
            .collect()
    }

    /// The function group `name` as seen from inside the class: its own
    /// declarations, else those of the first base that has any, depth first.
    pub fn find_function_group(&self, id: StructId, name: &str) -> Option<&FunctionGroup> {
        self.scope(self.struct_def(id).scope)
            .function_group(name)
            .or_else(|| {
                self.base_structs(id)
                    .into_iter()
                    .find_map(|base| self.find_function_group(base, name))
            })
    }

    // === Virtual Functions ===

    /// Every virtual function declared or inherited by the class, with
    /// inherited ones replaced by their overriders.
    ///
    /// An override is matched by name, equivalent parameters and the same
    /// const-ness, whether or not it is declared `virtual`. Destructors
    /// match destructors.
    pub fn virtual_funcs(&self, id: StructId) -> Vec<InstanceId> {
        let mut overriders = Vec::new();
        self.collect_virtuals(id, &mut overriders)
    }

    /// Mark every function that overrides an inherited virtual as
    /// `VIRTUAL | INHERITED_VIRTUAL`, here and in all bases.
    pub fn mark_virtual_overrides(&mut self, id: StructId) {
        let mut overriders = Vec::new();
        self.collect_virtuals(id, &mut overriders);
        for inst in overriders {
            self.instance_mut(inst).storage |= StorageClass::VIRTUAL | StorageClass::INHERITED_VIRTUAL;
        }
    }

    fn collect_virtuals(&self, id: StructId, overriders: &mut Vec<InstanceId>) -> Vec<InstanceId> {
        let mut funcs = Vec::new();
        for base in self.base_structs(id) {
            funcs.extend(self.collect_virtuals(base, overriders));
        }

        let scope = self.scope(self.struct_def(id).scope);
        let mut matched = FxHashSet::default();
        funcs.retain(|&base_inst| {
            let inst = self.instance(base_inst);
            let Some(base_ftype) = self.function_type_of(base_inst) else {
                return true;
            };
            if inst.storage.is_deleted() {
                return true;
            }
            if base_ftype.flags.contains(FunctionFlags::DESTRUCTOR) {
                return match self.destructor(id) {
                    Some(dtor) => {
                        matched.insert(dtor);
                        false
                    }
                    None => true,
                };
            }
            let Some(group) = inst.simple_name().and_then(|n| scope.function_group(n)) else {
                return true;
            };
            let found = group.instances.iter().copied().find(|&candidate| {
                self.function_type_of(candidate)
                    .is_some_and(|f| self.matches_virtual_override(f, base_ftype))
            });
            match found {
                Some(candidate) => {
                    matched.insert(candidate);
                    false
                }
                None => true,
            }
        });

        for group in scope.functions.values() {
            for &inst in &group.instances {
                let storage = self.instance(inst).storage;
                if (storage.is_virtual() || matched.contains(&inst)) && !storage.is_deleted() {
                    funcs.push(inst);
                }
            }
        }
        overriders.extend(matched);
        funcs
    }

    fn matches_virtual_override(&self, derived: &FunctionType, base: &FunctionType) -> bool {
        derived.is_const_method() == base.is_const_method()
            && self.params_equivalent(&derived.params, &base.params)
    }

    /// A pure virtual function remains without an overrider.
    pub fn is_abstract(&self, id: StructId) -> bool {
        self.virtual_funcs(id).into_iter().any(|inst| {
            self.instance(inst)
                .storage
                .contains(StorageClass::PURE_VIRTUAL)
        })
    }

    /// The class declares or inherits a virtual function. Unions never do.
    pub fn is_polymorphic(&self, id: StructId) -> bool {
        self.struct_def(id).kind != StructKind::Union && !self.virtual_funcs(id).is_empty()
    }

    pub fn has_virtual_destructor(&self, id: StructId) -> bool {
        if let Some(dtor) = self.destructor(id) {
            if self.instance(dtor).storage.is_virtual() {
                return true;
            }
        }
        self.base_structs(id)
            .into_iter()
            .any(|base| self.has_virtual_destructor(base))
    }

    /// Whether `base` is `id` or one of its (transitive) bases.
    pub fn is_base_of(&self, base: StructId, id: StructId) -> bool {
        base == id
            || self
                .base_structs(id)
                .into_iter()
                .any(|b| self.is_base_of(base, b))
    }

    // === Implicit Members ===

    /// Non-static data members.
    fn data_members(&self, id: StructId) -> impl Iterator<Item = InstanceId> + '_ {
        let scope = self.scope(self.struct_def(id).scope);
        scope
            .variables
            .values()
            .copied()
            .filter(|&inst| !self.instance(inst).storage.is_static())
    }

    /// No virtuals, no virtual bases, no user-provided special members, no
    /// member initializers, and trivial all the way down.
    pub fn struct_is_trivial(&self, id: StructId) -> bool {
        let def = self.struct_def(id);
        for base in &def.derivation {
            if base.is_virtual
                || self
                    .base_struct(base.base)
                    .is_some_and(|b| !self.struct_is_trivial(b))
            {
                return false;
            }
        }
        for inst in self.data_members(id) {
            let member = self.instance(inst);
            if member.initializer.is_some() || !self.is_trivial(member.ty) {
                return false;
            }
        }

        let scope = self.scope(def.scope);
        for group in scope.functions.values() {
            for &inst in &group.instances {
                let storage = self.instance(inst).storage;
                if storage.is_virtual() {
                    return false;
                }
                if storage.contains(StorageClass::DEFAULTED) {
                    continue;
                }
                let Some(ftype) = self.function_type_of(inst) else {
                    continue;
                };
                if ftype.flags.intersects(
                    FunctionFlags::DESTRUCTOR
                        | FunctionFlags::COPY_CONSTRUCTOR
                        | FunctionFlags::MOVE_CONSTRUCTOR,
                ) {
                    return false;
                }
                if ftype.flags.contains(FunctionFlags::CONSTRUCTOR)
                    && ftype.params.is_empty()
                    && !ftype.params.includes_ellipsis
                {
                    return false;
                }
                if group.name == "operator =" {
                    return false;
                }
            }
        }
        self.is_default_constructible(id, Visibility::Public)
    }

    pub fn is_default_constructible(&self, id: StructId, min_vis: Visibility) -> bool {
        if self.is_abstract(id) {
            return false;
        }
        if let Some(ctor) = self.default_constructor(id) {
            let inst = self.instance(ctor);
            return inst.vis.meets(min_vis) && !inst.storage.is_deleted();
        }
        if self.constructor_group(id).is_some() {
            return false;
        }
        if self
            .base_structs(id)
            .into_iter()
            .any(|b| !self.is_default_constructible(b, Visibility::Protected))
        {
            return false;
        }
        self.data_members(id).all(|inst| {
            let member = self.instance(inst);
            member.initializer.is_some() || self.type_is_default_constructible(member.ty)
        })
    }

    pub fn is_copy_constructible(&self, id: StructId, min_vis: Visibility) -> bool {
        if self.is_abstract(id) {
            return false;
        }
        if let Some(ctor) = self.copy_constructor(id) {
            let inst = self.instance(ctor);
            return inst.vis.meets(min_vis) && !inst.storage.is_deleted();
        }
        if self.move_constructor(id).is_some() || self.move_assignment(id).is_some() {
            return false;
        }
        if let Some(dtor) = self.destructor(id) {
            let inst = self.instance(dtor);
            if !inst.vis.meets(min_vis) || inst.storage.is_deleted() {
                return false;
            }
        }
        if self
            .base_structs(id)
            .into_iter()
            .any(|b| !self.is_copy_constructible(b, Visibility::Protected))
        {
            return false;
        }
        self.data_members(id)
            .all(|inst| self.type_is_copy_constructible(self.instance(inst).ty))
    }

    pub fn is_move_constructible(&self, id: StructId, min_vis: Visibility) -> bool {
        if let Some(ctor) = self.move_constructor(id) {
            let inst = self.instance(ctor);
            return inst.vis.meets(min_vis) && !inst.storage.is_deleted() && !self.is_abstract(id);
        }
        self.is_copy_constructible(id, min_vis)
    }

    /// Copy-assignability, without the abstractness check.
    pub fn is_copy_assignable(&self, id: StructId, min_vis: Visibility) -> bool {
        let assign = self.copy_assignment(id);
        if let Some(op) = assign {
            let inst = self.instance(op);
            if !inst.vis.meets(min_vis) || inst.storage.is_deleted() {
                return false;
            }
            // A defaulted operator may still be implicitly deleted.
            if !inst.storage.contains(StorageClass::DEFAULTED) {
                return true;
            }
        }
        if assign.is_none()
            && (self.move_constructor(id).is_some() || self.move_assignment(id).is_some())
        {
            return false;
        }
        if self
            .base_structs(id)
            .into_iter()
            .any(|b| !self.is_copy_assignable(b, Visibility::Protected))
        {
            return false;
        }
        self.data_members(id)
            .all(|inst| self.type_is_copy_assignable(self.instance(inst).ty))
    }

    pub fn is_destructible(&self, id: StructId, min_vis: Visibility) -> bool {
        if let Some(dtor) = self.destructor(id) {
            let inst = self.instance(dtor);
            return inst.vis.meets(min_vis) && !inst.storage.is_deleted();
        }
        if self
            .base_structs(id)
            .into_iter()
            .any(|b| !self.is_destructible(b, Visibility::Protected))
        {
            return false;
        }
        self.data_members(id)
            .all(|inst| self.type_is_destructible(self.instance(inst).ty))
    }
}
