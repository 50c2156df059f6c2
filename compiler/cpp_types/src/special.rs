//! Recognition of constructors, destructors and copy/move members.

use crate::{FunctionFlags, Instance, Pool, StructId, TypeData, TypeId, ValueCategory};

impl Pool {
    /// Classify a member function of `owner` by its name and parameters.
    ///
    /// Constructors and destructors get a `void` return type. A single
    /// reference parameter to the class itself marks a copy or move
    /// constructor or assignment, depending on the reference's category.
    pub fn detect_special_method(&mut self, inst: &mut Instance, owner: StructId) {
        let Some(mut ftype) = self.get(inst.ty).as_function().cloned() else {
            return;
        };
        let Some(local) = inst.simple_name() else {
            return;
        };
        let class_name = self.struct_def(owner).simple_name();
        if class_name.is_empty() {
            return;
        }

        let mut flags = FunctionFlags::empty();
        if local == class_name {
            flags |= FunctionFlags::CONSTRUCTOR;
            match self.self_reference_category(&ftype.params.params, class_name) {
                Some(ValueCategory::LValue) => flags |= FunctionFlags::COPY_CONSTRUCTOR,
                Some(ValueCategory::RValue) => flags |= FunctionFlags::MOVE_CONSTRUCTOR,
                None => {}
            }
        } else if local.strip_prefix('~') == Some(class_name) {
            flags |= FunctionFlags::DESTRUCTOR;
        } else if local == "operator =" {
            match self.self_reference_category(&ftype.params.params, class_name) {
                Some(ValueCategory::LValue) => flags |= FunctionFlags::COPY_ASSIGNMENT,
                Some(ValueCategory::RValue) => flags |= FunctionFlags::MOVE_ASSIGNMENT,
                None => {}
            }
        }
        if flags.is_empty() {
            return;
        }

        ftype.flags |= flags;
        if flags.intersects(FunctionFlags::CONSTRUCTOR | FunctionFlags::DESTRUCTOR) {
            ftype.return_type = TypeId::VOID;
        }
        inst.ty = self.function(ftype);
    }

    /// If the parameters are one reference to the named class (further
    /// parameters must have defaults), the reference's category.
    fn self_reference_category(
        &self,
        params: &[Instance],
        class_name: &str,
    ) -> Option<ValueCategory> {
        let (first, rest) = params.split_first()?;
        if rest.iter().any(|p| p.initializer.is_none()) {
            return None;
        }
        let TypeData::Reference(inner, category) = self.get(first.ty) else {
            return None;
        };
        let pointee = self.strip_const(*inner);
        (self.simple_type_name(pointee).as_deref() == Some(class_name)).then_some(*category)
    }
}

#[cfg(test)]
mod tests;
