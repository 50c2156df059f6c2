//! Function indices and class methods.
//!
//! A function record collects every overload sharing one fully scoped
//! name. Overloads are told apart by signature; each keeps its resolved
//! declaration for the wrapper pass.

use std::collections::btree_map::Entry;

use cpp_ir::{StorageClass, Visibility};
use cpp_types::{FunctionFlags as CppFunctionFlags, FunctionType, Instance, ScopeId, StructId};
use interrogate_db::{
    FunctionFlags, FunctionIndex, InterrogateFunction, InterrogateType, TypeFlags, TypeIndex,
};

use super::admission::{log_skip, SkipReason};
use super::types::push_unique;
use super::{scoped_instance, InterrogateBuilder, Overload};
use crate::names::{descope, trim_blanks};
use crate::type_manager::{involves_ignored, involves_protected};

impl InterrogateBuilder {
    /// The index of the function `inst` names, seen from `scope`.
    ///
    /// Overloads with the same scoped name share one record; a new
    /// signature adds a prototype line. `strct` makes the function a
    /// method of that class. Constructors of abstract classes, and
    /// anything that is not a function, get [`FunctionIndex::NONE`].
    pub fn get_function(
        &mut self,
        inst: &Instance,
        strct: Option<StructId>,
        scope: ScopeId,
        flags: FunctionFlags,
    ) -> FunctionIndex {
        let mut function = scoped_instance(inst, scope);
        function.ty = self.pool.resolve_type(function.ty, scope);
        let Some(ftype) = self.pool.get(function.ty).as_function().cloned() else {
            return FunctionIndex::NONE;
        };
        if ftype.flags.contains(CppFunctionFlags::CONSTRUCTOR)
            && strct.is_some_and(|id| self.pool.is_abstract(id))
        {
            return FunctionIndex::NONE;
        }

        let class = strct.map(|id| self.pool.struct_type(id));
        let class_index = class.map_or(TypeIndex::NONE, |ty| self.get_type(ty, false));

        let key = self.function_key(&function, &ftype);
        let signature = self.pool.function_signature(&function, 0);
        let prototype = format!("{};", self.pool.prototype(&function));
        let comment = function.comment.as_deref().map(trim_blanks).map(str::to_owned);

        if let Some(&index) = self.functions_by_name.get(&key) {
            let record = self.db.update_function(index);
            record.flags |= flags;
            if record.signatures.insert(signature.clone()) {
                record.prototype.push('\n');
                record.prototype.push_str(&prototype);
            }
            if let Some(comment) = &comment {
                if !record.comment.is_empty() {
                    record.comment.push_str("\n\n");
                }
                record.comment.push_str(comment);
            }
            match self.overloads.entry(index).or_default().entry(signature) {
                Entry::Vacant(slot) => {
                    slot.insert(Overload {
                        inst: function,
                        class,
                    });
                }
                Entry::Occupied(mut slot) => {
                    let known = slot.get().inst.comment.as_ref().map_or(0, String::len);
                    if function.comment.as_ref().is_some_and(|c| c.len() > known) {
                        slot.get_mut().inst.comment = function.comment;
                    }
                }
            }
            return index;
        }

        let index = self.db.next_index();
        self.functions_by_name.insert(key, index);

        let mut record = InterrogateFunction {
            name: self.pool.instance_name(&function, Some(scope)),
            scoped_name: descope(&self.pool.instance_name(&function, None)).to_owned(),
            comment: comment.unwrap_or_default(),
            prototype,
            ..InterrogateFunction::default()
        };
        if strct.is_some() {
            record.flags |= FunctionFlags::METHOD;
            record.class = class_index;
        }
        if ftype.flags.contains(CppFunctionFlags::UNARY_OP) {
            record.flags |= FunctionFlags::UNARY_OP;
        }
        if ftype.flags.contains(CppFunctionFlags::OPERATOR_TYPECAST) {
            record.flags |= FunctionFlags::OPERATOR_TYPECAST;
        }
        if ftype.flags.contains(CppFunctionFlags::CONSTRUCTOR) {
            record.flags |= FunctionFlags::CONSTRUCTOR;
        }
        if ftype.flags.contains(CppFunctionFlags::DESTRUCTOR) {
            record.flags |= FunctionFlags::DESTRUCTOR;
        }
        if function.storage.is_virtual() {
            record.flags |= FunctionFlags::VIRTUAL;
        }
        record.flags |= flags;
        record.signatures.insert(signature.clone());

        tracing::debug!(%index, name = %record.scoped_name, "new function");
        self.db.add_function(index, record);
        self.overloads.entry(index).or_default().insert(
            signature,
            Overload {
                inst: function,
                class,
            },
        );
        index
    }

    /// The by-name key of a function: its fully scoped name, with unary
    /// operators kept apart from their binary namesakes.
    pub(super) fn function_key(&self, function: &Instance, ftype: &FunctionType) -> String {
        let mut key = self.pool.instance_name(function, None);
        if ftype.flags.contains(CppFunctionFlags::UNARY_OP) {
            key.push_str("unary");
        }
        key
    }

    /// Fold the comment of a definition found outside its class (or in an
    /// implementation file) into the function already recorded.
    pub(super) fn update_function_comment(&mut self, inst: &Instance, scope: ScopeId) {
        let Some(comment) = inst.comment.as_deref().map(trim_blanks) else {
            return;
        };
        let mut function = scoped_instance(inst, scope);
        function.ty = self.pool.resolve_type(function.ty, scope);
        let Some(ftype) = self.pool.get(function.ty).as_function().cloned() else {
            return;
        };
        let key = self.function_key(&function, &ftype);
        let Some(&index) = self.functions_by_name.get(&key) else {
            return;
        };

        let record = self.db.update_function(index);
        if !record.comment.is_empty() {
            record.comment.push_str("\n\n");
        }
        record.comment.push_str(comment);

        let signature = self.pool.function_signature(&function, 0);
        if let Some(overload) = self
            .overloads
            .get_mut(&index)
            .and_then(|overloads| overloads.get_mut(&signature))
        {
            let known = overload.inst.comment.as_ref().map_or(0, String::len);
            if inst.comment.as_ref().is_some_and(|c| c.len() > known) {
                overload.inst.comment.clone_from(&inst.comment);
            }
        }
    }

    /// Export one member function of a class being defined.
    pub(super) fn define_method(
        &mut self,
        inst: &Instance,
        record: &mut InterrogateType,
        strct: StructId,
        scope: ScopeId,
    ) {
        let ty = self.pool.resolve_type(inst.ty, scope);
        let Some(ftype) = self.pool.get(ty).as_function().cloned() else {
            return;
        };
        let what = self.pool.instance_name(inst, None);
        if inst.is_template() {
            log_skip(&what, SkipReason::Template);
            return;
        }
        if inst.storage.is_deleted() {
            log_skip(&what, SkipReason::StaticOrDeleted);
            return;
        }

        let name = inst.simple_name().unwrap_or_default();
        let is_destructor = ftype.flags.contains(CppFunctionFlags::DESTRUCTOR);
        let mut force_publish = name == "get_class_type"
            && inst.storage.is_static()
            && inst.vis.meets(Visibility::Public);
        if is_destructor {
            if !inst.vis.meets(Visibility::Public) {
                record.flags |= TypeFlags::PRIVATE_DESTRUCTOR;
                return;
            }
            force_publish = true;
        }
        if !force_publish && !inst.vis.meets(self.options.min_vis) {
            log_skip(&what, SkipReason::NotPublished);
            return;
        }
        if involves_protected(&self.pool, ty) {
            log_skip(&what, SkipReason::InvolvesProtected);
            return;
        }
        if involves_ignored(&self.pool, &self.filter, ty) || self.filter.in_ignoremember(name) {
            if is_destructor {
                record.flags |= TypeFlags::PRIVATE_DESTRUCTOR;
            }
            log_skip(&what, SkipReason::Ignored);
            return;
        }

        if inst.storage.contains(StorageClass::INHERITED_VIRTUAL) {
            let derivation = &self.pool.struct_def(strct).derivation;
            let single_public_base = derivation.len() == 1
                && derivation[0].vis.meets(Visibility::Public)
                && !derivation[0].is_virtual;
            if single_public_base {
                if is_destructor {
                    record.flags |= TypeFlags::INHERITED_DESTRUCTOR;
                    return;
                }
                if self.is_inherited_published(name, strct) {
                    tracing::trace!(what = %what, "inherited from a published base");
                    return;
                }
            }
        }

        let index = self.get_function(inst, Some(strct), scope, FunctionFlags::empty());
        if index.is_none() {
            return;
        }
        if ftype.flags.contains(CppFunctionFlags::CONSTRUCTOR) {
            push_unique(&mut record.constructors, index);
        } else if is_destructor {
            record.flags |= TypeFlags::TRUE_DESTRUCTOR;
            record.destructor = index;
        } else if ftype.flags.contains(CppFunctionFlags::OPERATOR_TYPECAST) {
            push_unique(&mut record.casts, index);
        } else {
            push_unique(&mut record.methods, index);
        }
    }

    /// Whether every overload of `name` that the single base of `strct`
    /// sees, declared there or further up, is published, so bindings reach
    /// it through the base.
    fn is_inherited_published(&mut self, name: &str, strct: StructId) -> bool {
        let def = self.pool.struct_def(strct);
        let Some(first) = def.derivation.first() else {
            return false;
        };
        let (base, scope) = (first.base, def.scope);
        let base = self.pool.resolve_type(base, scope);
        let Some(base) = self.pool.base_struct(base) else {
            return false;
        };
        let Some(group) = self.pool.find_function_group(base, name) else {
            return false;
        };
        group
            .instances
            .iter()
            .all(|&id| self.pool.instance(id).vis == Visibility::Published)
    }
}
