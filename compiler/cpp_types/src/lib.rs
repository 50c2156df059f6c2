//! The C++ declaration and type model.
//!
//! All types and declarations of a translation unit live in a [`Pool`].
//! Types are interned so structurally equal types share one [`TypeId`];
//! declarations are arena entries referred to by handle.
//!
//! # Operations
//!
//! - **Interning**: [`Pool::intern`] and the constructors in `pool`.
//! - **Substitution**: [`Pool::substitute_type`] and friends replace
//!   template formals by actuals, memoizing through a [`SubstitutionMap`].
//! - **Resolution**: [`Pool::resolve_type`] replaces placeholder names by
//!   the declarations they refer to.
//! - **Instantiation**: [`Pool::instantiate_struct`] and
//!   [`Pool::instantiate_function`], cached per template.
//! - **Queries**: equivalence, triviality, special members, virtual
//!   functions and implicit-member rules.

mod data;
mod decl;
mod error;
mod format;
mod function;
mod id;
mod ident;
mod instance;
mod instantiate;
mod pool;
mod query;
mod resolve;
mod special;
mod structs;
mod subst;

pub use data::{ExtensionKind, SimpleFlags, SimpleKind, SimpleType, SubType, TypeData, ValueCategory};
pub use decl::{
    Base, Declaration, EnumDef, EnumValue, FunctionGroup, MakeProperty, MakeSeq, PropertyKind,
    Scope, ScopeKind, StructDef, StructKind, TemplateParam, TemplateParams, TypedefDef,
};
pub use error::ModelError;
pub use function::{operator_flags, FunctionFlags, FunctionType, ParameterList};
pub use id::{EnumId, InstanceId, ScopeId, StructId, TypeId, TypedefId};
pub use ident::{Identifier, NameComponent, TemplateArg};
pub use instance::Instance;
pub use instantiate::InstantiationCache;
pub use pool::Pool;
pub use subst::{DeclRef, SubstitutionMap};

#[cfg(test)]
mod test_helpers;
