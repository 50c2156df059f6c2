//! Template instantiation with per-template caches.

use std::collections::BTreeMap;

use crate::{
    InstanceId, ModelError, Pool, StructId, SubstitutionMap, TemplateArg, TemplateParam,
    TemplateParams, TypeId,
};

/// Instantiations of one template, keyed by the full argument list.
#[derive(Clone, Debug)]
pub struct InstantiationCache<T> {
    entries: BTreeMap<Vec<TemplateArg>, T>,
}

impl<T: Copy> InstantiationCache<T> {
    pub fn new() -> Self {
        InstantiationCache {
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, args: &[TemplateArg]) -> Option<T> {
        self.entries.get(args).copied()
    }

    pub fn insert(&mut self, args: Vec<TemplateArg>, value: T) {
        self.entries.insert(args, value);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Copy> Default for InstantiationCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl Pool {
    /// Map each formal to its actual argument.
    ///
    /// Missing trailing arguments take their defaults, which may refer to
    /// earlier formals.
    pub fn build_substitution_map(
        &mut self,
        name: &str,
        formals: &TemplateParams,
        args: &[TemplateArg],
    ) -> Result<SubstitutionMap, ModelError> {
        let count_error = || ModelError::TemplateArgCount {
            name: name.to_owned(),
            expected: formals.len(),
            found: args.len(),
        };
        if args.len() > formals.len() {
            return Err(count_error());
        }

        let mut map = SubstitutionMap::new();
        for (index, formal) in formals.iter().enumerate() {
            match (formal, args.get(index)) {
                (TemplateParam::Type { formal, .. }, Some(TemplateArg::Type(actual))) => {
                    map.insert_type(*formal, *actual);
                }
                (TemplateParam::Value { name, .. }, Some(TemplateArg::Value(actual))) => {
                    map.insert_value(name.clone(), actual.clone());
                }
                (
                    TemplateParam::Type {
                        formal,
                        default: Some(default),
                        ..
                    },
                    None,
                ) => {
                    let actual = self.substitute_type(*default, &mut map);
                    map.insert_type(*formal, actual);
                }
                (
                    TemplateParam::Value {
                        name,
                        default: Some(default),
                        ..
                    },
                    None,
                ) => {
                    let actual = self.substitute_expr(default, &map);
                    map.insert_value(name.clone(), actual);
                }
                (_, None) => return Err(count_error()),
                (_, Some(_)) => {
                    return Err(ModelError::TemplateArgKind {
                        name: name.to_owned(),
                        index,
                    })
                }
            }
        }
        Ok(map)
    }

    /// Instantiate a function template.
    pub fn instantiate_function(
        &mut self,
        template: InstanceId,
        args: &[TemplateArg],
    ) -> Result<InstanceId, ModelError> {
        let inst = self.instance(template).clone();
        let name = self.instance_name(&inst, None);
        let Some(formals) = inst.template_params.clone() else {
            return Err(ModelError::NotATemplate { name });
        };
        if let Some(done) = self
            .fn_instantiations
            .get(&template)
            .and_then(|cache| cache.get(args))
        {
            return Ok(done);
        }

        let mut map = self.build_substitution_map(&name, &formals, args)?;
        let mut copy = self.substitute_instance_value(&inst, &mut map);
        copy.template_params = None;
        copy.ident = copy
            .ident
            .map(|ident| ident.with_template_args(args.to_vec()));
        let id = self.alloc_instance(copy);

        self.fn_instantiations
            .entry(template)
            .or_default()
            .insert(args.to_vec(), id);
        tracing::debug!(template = %name, "instantiated function template");
        Ok(id)
    }

    /// Instantiate a class template, returning the struct type.
    ///
    /// The instantiation is cached before its members are substituted, so
    /// a member that names the same instantiation gets this one.
    pub fn instantiate_struct(
        &mut self,
        template: StructId,
        args: &[TemplateArg],
    ) -> Result<TypeId, ModelError> {
        let name = self.struct_name(template);
        let def = self.struct_def(template);
        let Some(formals) = def.template_params.clone() else {
            return Err(ModelError::NotATemplate { name });
        };
        let ident = def
            .ident
            .clone()
            .map(|ident| ident.with_template_args(args.to_vec()));
        if let Some(done) = self
            .struct_instantiations
            .get(&template)
            .and_then(|cache| cache.get(args))
        {
            return Ok(done);
        }

        let mut map = self.build_substitution_map(&name, &formals, args)?;
        let new_id = self.reserve_struct_copy(template, ident, &mut map);
        self.struct_def_mut(new_id).template_of = Some(template);
        let new_ty = self.struct_type(new_id);
        self.struct_instantiations
            .entry(template)
            .or_default()
            .insert(args.to_vec(), new_ty);

        self.fill_struct_copy(template, new_id, &mut map);
        tracing::debug!(template = %name, instance = %self.type_name(new_ty), "instantiated class template");
        Ok(new_ty)
    }

    /// The instantiations of a class template made so far.
    pub fn struct_instantiation_count(&self, template: StructId) -> usize {
        self.struct_instantiations
            .get(&template)
            .map_or(0, InstantiationCache::len)
    }
}

#[cfg(test)]
mod tests;
