//! Type indices: `get_type` and the per-kind definitions it dispatches to.

use cpp_ir::{StorageClass, Visibility};
use cpp_types::{
    Declaration, EnumId, ExtensionKind, FunctionFlags as CppFunctionFlags, FunctionType,
    Instance, ParameterList, ScopeId, SimpleFlags, SimpleKind, SimpleType, StructId, StructKind,
    TypeData, TypeId,
};
use interrogate_db::{
    AtomicToken, Derivation, DerivationFlags, EnumValue, FunctionFlags, FunctionIndex, Index,
    InterrogateType, TypeFlags, TypeIndex,
};

use super::{property, scan, synth, InterrogateBuilder};
use crate::names::{descope, trim_blanks};
use crate::type_manager::{involves_protected, involves_unpublished};

impl InterrogateBuilder {
    /// The index of `ty`, defining it on first sight.
    ///
    /// Types are keyed by their fully qualified name, so asking twice
    /// returns the same index. `global` marks the type as exported at top
    /// level. Returns [`TypeIndex::NONE`] for templates and for kinds that
    /// cannot be exported (references, function types, unresolved names).
    pub fn get_type(&mut self, ty: TypeId, global: bool) -> TypeIndex {
        let ty = if self.pool.is_tbd(ty) {
            self.pool.resolve_type(ty, ScopeId::GLOBAL)
        } else {
            ty
        };
        if self.pool.is_template(ty) {
            return TypeIndex::NONE;
        }

        let true_name = self.pool.type_name(ty);
        let mut index = TypeIndex::NONE;
        if let Some(&known) = self
            .types_by_name
            .get(&true_name)
            .filter(|_| !true_name.is_empty())
        {
            if known.is_none() {
                return TypeIndex::NONE;
            }
            if global {
                self.db.mark_type_global(known);
            }
            if self.db.get_type(known).is_fully_defined() {
                return known;
            }
            index = known;
        }

        if index.is_none() {
            index = self.db.next_index();
            if !true_name.is_empty() {
                self.types_by_name.insert(true_name.clone(), index);
            }
            let flags = if global {
                TypeFlags::GLOBAL
            } else {
                TypeFlags::empty()
            };
            tracing::debug!(%index, name = %true_name, "new type");
            self.db.add_type(
                index,
                InterrogateType {
                    flags,
                    ..InterrogateType::default()
                },
            );
        }

        let mut record = self.db.get_type(index).clone();
        record.name = self.preferred_name(ty);
        record.scoped_name.clone_from(&true_name);
        record.true_name.clone_from(&true_name);
        if let Some(comment) = self.declared_comment(ty) {
            record.comment = comment;
        }
        let forced = self.filter.in_forcetype(&true_name);
        let ignored = !forced && self.filter.in_ignoretype(&true_name);
        if !ignored {
            // Set before anything recurses, so a reference back to this
            // type finds it.
            record.flags |= TypeFlags::FULLY_DEFINED;
        }
        self.store_type(index, record.clone());

        if let Some(scope) = self.declaring_scope(ty).filter(|&s| s != ScopeId::GLOBAL) {
            record.scoped_name =
                descope(&format!("{}::{}", self.pool.scope_name(scope), record.name)).to_owned();
            if let Some(outer) = self.pool.scope(scope).struct_id() {
                record.flags |= TypeFlags::NESTED;
                let outer_ty = self.pool.struct_type(outer);
                record.outer_class = self.get_type(outer_ty, false);
            }
        }
        if ignored {
            tracing::trace!(name = %true_name, "ignored type");
            self.store_type(index, record);
            return index;
        }

        match self.pool.get(ty).clone() {
            TypeData::Simple(simple) => define_atomic(&mut record, simple),
            TypeData::Pointer(inner) => {
                record.flags |= TypeFlags::WRAPPED | TypeFlags::POINTER;
                record.wrapped_type = self.get_type(inner, false);
            }
            TypeData::Const(inner) => {
                record.flags |= TypeFlags::WRAPPED | TypeFlags::CONST;
                record.wrapped_type = self.get_type(inner, false);
            }
            TypeData::Struct(id) => self.define_struct(&mut record, id, forced),
            TypeData::Enum(id) => self.define_enum(&mut record, ty, id),
            TypeData::Extension { kind, .. } => {
                // A forward reference that never got a definition.
                record.flags.remove(TypeFlags::FULLY_DEFINED);
                record.flags |= match kind {
                    ExtensionKind::Class => TypeFlags::CLASS,
                    ExtensionKind::Struct => TypeFlags::STRUCT,
                    ExtensionKind::Union => TypeFlags::UNION,
                    ExtensionKind::Enum => TypeFlags::ENUM,
                };
            }
            TypeData::Typedef(id) => {
                let def = self.pool.typedef_def(id);
                let (target, scope) = (def.target, def.scope);
                let target = self.pool.resolve_type(target, scope);
                record.flags |= TypeFlags::TYPEDEF;
                record.wrapped_type = self.get_type(target, false);
            }
            TypeData::Array { element, bounds } => {
                record.flags |= TypeFlags::ARRAY;
                record.wrapped_type = self.get_type(element, false);
                record.array_size = bounds
                    .and_then(|b| b.evaluate().as_integer())
                    .and_then(|size| u32::try_from(size).ok())
                    .unwrap_or(0);
            }
            TypeData::Reference(..)
            | TypeData::Function(_)
            | TypeData::Tbd(_)
            | TypeData::TemplateParam { .. } => {
                tracing::debug!(%index, name = %true_name, "type cannot be exported");
                self.db.remove_type(index);
                if !true_name.is_empty() {
                    self.types_by_name.insert(true_name, TypeIndex::NONE);
                }
                return TypeIndex::NONE;
            }
        }

        self.store_type(index, record);
        index
    }

    /// The name a binding should use: a rename, else the unqualified name,
    /// else the full spelling.
    pub(super) fn preferred_name(&self, ty: TypeId) -> String {
        let true_name = self.pool.type_name(ty);
        if let Some(renamed) = self.filter.in_renametype(&true_name) {
            return renamed.to_owned();
        }
        self.pool.simple_type_name(ty).unwrap_or(true_name)
    }

    fn declared_comment(&self, ty: TypeId) -> Option<String> {
        let comment = match self.pool.get(ty) {
            TypeData::Struct(id) => self.pool.struct_def(*id).comment.as_deref(),
            TypeData::Enum(id) => self.pool.enum_def(*id).comment.as_deref(),
            TypeData::Typedef(id) => self.pool.typedef_def(*id).comment.as_deref(),
            _ => None,
        };
        comment.map(|c| trim_blanks(c).to_owned())
    }

    /// The scope a named type is declared in.
    fn declaring_scope(&self, ty: TypeId) -> Option<ScopeId> {
        match self.pool.get(ty) {
            TypeData::Struct(id) => {
                let def = self.pool.struct_def(*id);
                def.ident.as_ref()?;
                self.pool.scope(def.scope).parent
            }
            TypeData::Enum(id) => Some(self.pool.enum_def(*id).parent_scope),
            TypeData::Typedef(id) => Some(self.pool.typedef_def(*id).scope),
            TypeData::Extension { ident, .. } => ident.native_scope,
            _ => None,
        }
    }

    // === Enums ===

    fn define_enum(&mut self, record: &mut InterrogateType, ty: TypeId, id: EnumId) {
        record.flags |= TypeFlags::ENUM;
        if involves_unpublished(&self.pool, ty, self.options.min_vis) {
            record.flags.remove(TypeFlags::FULLY_DEFINED);
            record.flags |= TypeFlags::UNPUBLISHED;
            return;
        }

        let def = self.pool.enum_def(id).clone();
        if def.scoped {
            record.flags |= TypeFlags::SCOPED_ENUM;
        }
        // Enumerators of an `enum class` live inside the enum.
        let prefix = if def.scoped {
            self.pool.qualify(def.parent_scope, def.simple_name())
        } else {
            self.pool.scope_name(def.parent_scope)
        };

        let mut next_value: i64 = 0;
        for value in &def.values {
            if let Some(init) = &value.initializer {
                let Some(folded) = init.evaluate().as_integer() else {
                    self.diagnose(
                        format!("{}::{}", record.scoped_name, value.name),
                        format!("enum value has invalid definition `{init}`"),
                    );
                    return;
                };
                next_value = folded;
            }
            let scoped_name = if prefix.is_empty() {
                value.name.clone()
            } else {
                format!("{prefix}::{}", value.name)
            };
            record.enum_values.push(EnumValue {
                name: value.name.clone(),
                scoped_name: descope(&scoped_name).to_owned(),
                comment: value
                    .comment
                    .as_deref()
                    .map(trim_blanks)
                    .unwrap_or_default()
                    .to_owned(),
                value: next_value,
            });
            next_value = next_value.wrapping_add(1);
        }
    }

    // === Structs ===

    fn define_struct(&mut self, record: &mut InterrogateType, id: StructId, forced: bool) {
        let def = self.pool.struct_def(id).clone();
        if def.ident.is_none() {
            return;
        }
        let ty = self.pool.struct_type(id);

        record.flags |= match def.kind {
            StructKind::Class => TypeFlags::CLASS,
            StructKind::Struct => TypeFlags::STRUCT,
            StructKind::Union => TypeFlags::UNION,
        };
        if def.is_final {
            record.flags |= TypeFlags::FINAL;
        }
        if def.file.is_c_file() {
            return;
        }
        if !forced && (!def.file.is_local() || self.filter.in_ignorefile(&def.file.filename)) {
            record.flags.remove(TypeFlags::FULLY_DEFINED);
            return;
        }
        if involves_unpublished(&self.pool, ty, self.options.min_vis) {
            record.flags.remove(TypeFlags::FULLY_DEFINED);
            record.flags |= TypeFlags::UNPUBLISHED;
            return;
        }
        if involves_protected(&self.pool, ty) {
            record.flags.remove(TypeFlags::FULLY_DEFINED);
            return;
        }

        record.flags |= TypeFlags::GLOBAL;
        self.pool.mark_virtual_overrides(id);
        let polymorphic = self.pool.is_polymorphic(id);
        let scope = def.scope;

        for (position, base) in def.derivation.iter().enumerate() {
            if base.vis > Visibility::Public {
                continue;
            }
            let base_ty = self.pool.resolve_type(base.base, scope);
            let base_index = self.get_type(base_ty, false);
            if base_index.is_none() {
                let base_name = self.pool.type_name(base_ty);
                self.diagnose(
                    record.true_name.clone(),
                    format!("derivation from invalid type `{base_name}`"),
                );
                continue;
            }

            let mut derivation = Derivation {
                flags: DerivationFlags::empty(),
                base: base_index,
                upcast: FunctionIndex::NONE,
                downcast: FunctionIndex::NONE,
            };
            let base_polymorphic = self
                .pool
                .as_struct(base_ty)
                .is_some_and(|b| self.pool.is_polymorphic(b));
            let needs_casts = base.is_virtual
                || position > 0
                || (def.derivation.len() != 1 && self.options.left_inheritance_requires_upcast)
                || (polymorphic && !base_polymorphic);
            if needs_casts {
                derivation.upcast = synth::get_cast_function(self, base_ty, ty, "upcast");
                derivation.flags |= DerivationFlags::UPCAST;
                if base.is_virtual {
                    derivation.flags |= DerivationFlags::DOWNCAST_IMPOSSIBLE;
                } else {
                    derivation.downcast = synth::get_cast_function(self, ty, base_ty, "downcast");
                    derivation.flags |= DerivationFlags::DOWNCAST;
                }
            }
            record.derivations.push(derivation);
        }

        self.define_members(record, id, scope);
        self.define_implicit_members(record, id, scope);
    }

    fn define_members(&mut self, record: &mut InterrogateType, id: StructId, scope: ScopeId) {
        let min_vis = self.options.min_vis;
        let declarations = self.pool.scope(scope).declarations.clone();
        for decl in declarations {
            match decl {
                Declaration::Instance(inst) => {
                    let inst = self.pool.instance(inst).clone();
                    if self.pool.get(inst.ty).as_function().is_some() {
                        self.define_method(&inst, record, id, scope);
                    } else {
                        let element = scan::scan_element(self, &inst, Some(id), scope);
                        if element.is_some() {
                            record.elements.push(element);
                        }
                    }
                }
                Declaration::Type { ty, vis } => {
                    let local = self.pool.simple_type_name(ty).unwrap_or_default();
                    if !vis.meets(min_vis) && !self.filter.in_forcetype(&local) {
                        continue;
                    }
                    let nested = match self.pool.get(ty) {
                        TypeData::Struct(sid) => self.pool.struct_def(*sid).ident.is_some(),
                        TypeData::Enum(_) => true,
                        _ => false,
                    };
                    if nested {
                        let index = self.get_type(ty, false);
                        if index.is_some() {
                            record.nested_types.push(index);
                        }
                    }
                }
                Declaration::Typedef(tid) => {
                    let typedef = self.pool.typedef_type(tid);
                    let vis = self.pool.typedef_def(tid).vis;
                    let target = self.pool.strip_typedefs(typedef);
                    if vis.meets(min_vis) && self.pool.as_struct(target).is_some() {
                        let index = self.get_type(typedef, false);
                        if index.is_some() {
                            record.nested_types.push(index);
                        }
                    }
                }
                Declaration::MakeProperty(prop) => {
                    let element = property::get_make_property(self, &prop, id, scope);
                    if element.is_some() && !record.elements.contains(&element) {
                        record.elements.push(element);
                    }
                }
                Declaration::MakeSeq(seq) => {
                    let make_seq = property::get_make_seq(self, &seq, id, scope);
                    if make_seq.is_some() {
                        record.make_seqs.push(make_seq);
                    }
                }
            }
        }
    }

    /// Default and copy constructors and the destructor C++ would provide.
    fn define_implicit_members(
        &mut self,
        record: &mut InterrogateType,
        id: StructId,
        scope: ScopeId,
    ) {
        let name = self.pool.struct_def(id).simple_name().to_owned();
        let implicit = StorageClass::INLINE | StorageClass::DEFAULTED;

        if self.pool.constructor_group(id).is_none()
            && self.pool.is_default_constructible(id, Visibility::Public)
        {
            let ftype = FunctionType::new(TypeId::VOID, ParameterList::empty())
                .with_flags(CppFunctionFlags::CONSTRUCTOR);
            let ctor = Instance::named(self.pool.function(ftype), &name)
                .with_storage(implicit)
                .with_vis(Visibility::Published);
            let index = self.get_function(&ctor, Some(id), scope, FunctionFlags::empty());
            push_unique(&mut record.constructors, index);
        }

        if self.pool.copy_constructor(id).is_none()
            && self.pool.is_copy_constructible(id, Visibility::Public)
        {
            let this_ty = self.pool.struct_type(id);
            let param = Instance::new(self.pool.const_reference(this_ty), None);
            let ftype = FunctionType::new(TypeId::VOID, ParameterList::new(vec![param], false))
                .with_flags(
                    CppFunctionFlags::CONSTRUCTOR
                        | CppFunctionFlags::COPY_CONSTRUCTOR,
                );
            let ctor = Instance::named(self.pool.function(ftype), &name)
                .with_storage(implicit)
                .with_vis(Visibility::Published);
            let index = self.get_function(&ctor, Some(id), scope, FunctionFlags::empty());
            push_unique(&mut record.constructors, index);
        }

        let explicit_destructor = TypeFlags::TRUE_DESTRUCTOR
            | TypeFlags::PRIVATE_DESTRUCTOR
            | TypeFlags::INHERITED_DESTRUCTOR
            | TypeFlags::IMPLICIT_DESTRUCTOR;
        if !self.pool.is_destructible(id, Visibility::Public) {
            record.destructor = FunctionIndex::NONE;
        } else if record.flags.contains(TypeFlags::INHERITED_DESTRUCTOR) {
            if let Some(first) = record.derivations.first() {
                record.destructor = self.db.get_type(first.base).destructor;
            }
        } else if !record.flags.intersects(explicit_destructor) {
            let ftype = FunctionType::new(TypeId::VOID, ParameterList::empty())
                .with_flags(CppFunctionFlags::DESTRUCTOR);
            let dtor = Instance::named(self.pool.function(ftype), &format!("~{name}"));
            record.destructor = self.get_function(&dtor, Some(id), scope, FunctionFlags::empty());
            record.flags |= TypeFlags::IMPLICIT_DESTRUCTOR;
        }
    }
}

pub(super) fn push_unique(list: &mut Vec<Index>, index: Index) {
    if index.is_some() && !list.contains(&index) {
        list.push(index);
    }
}

fn define_atomic(record: &mut InterrogateType, simple: SimpleType) {
    record.flags |= TypeFlags::ATOMIC;
    record.atomic_token = match simple.kind {
        SimpleKind::Bool => AtomicToken::Bool,
        SimpleKind::Char => AtomicToken::Char,
        SimpleKind::WChar => AtomicToken::Int,
        SimpleKind::Char16 | SimpleKind::Char32 => {
            record.flags |= TypeFlags::UNSIGNED;
            AtomicToken::Int
        }
        SimpleKind::Int if simple.flags.contains(SimpleFlags::LONGLONG) => AtomicToken::LongLong,
        SimpleKind::Int => AtomicToken::Int,
        SimpleKind::Float => AtomicToken::Float,
        SimpleKind::Double => AtomicToken::Double,
        SimpleKind::Void => AtomicToken::Void,
        SimpleKind::Nullptr => AtomicToken::Null,
        SimpleKind::Char8 | SimpleKind::Auto => AtomicToken::NotAtomic,
    };

    if simple.flags.contains(SimpleFlags::LONGLONG) {
        record.flags |= TypeFlags::LONGLONG;
    } else if simple.flags.contains(SimpleFlags::LONG) {
        record.flags |= TypeFlags::LONG;
    }
    if simple.flags.contains(SimpleFlags::SHORT) {
        record.flags |= TypeFlags::SHORT;
    }
    if simple.flags.contains(SimpleFlags::UNSIGNED) {
        record.flags |= TypeFlags::UNSIGNED;
    }
    if simple.flags.contains(SimpleFlags::SIGNED) {
        record.flags |= TypeFlags::SIGNED;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_long_int_is_its_own_token() {
        let mut record = InterrogateType::default();
        define_atomic(
            &mut record,
            SimpleType::with_flags(
                SimpleKind::Int,
                SimpleFlags::LONGLONG | SimpleFlags::UNSIGNED,
            ),
        );
        assert_eq!(record.atomic_token, AtomicToken::LongLong);
        assert!(record
            .flags
            .contains(TypeFlags::ATOMIC | TypeFlags::LONGLONG | TypeFlags::UNSIGNED));
        assert!(!record.flags.contains(TypeFlags::LONG));
    }

    #[test]
    fn wide_characters_are_ints() {
        let mut record = InterrogateType::default();
        define_atomic(&mut record, SimpleType::new(SimpleKind::Char32));
        assert_eq!(record.atomic_token, AtomicToken::Int);
        assert!(record.flags.contains(TypeFlags::UNSIGNED));
    }
}
