//! Named declarations of a type: variables, data members, parameters and
//! functions.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use cpp_ir::{Expr, SourceFile, StorageClass, Visibility};

use crate::{Identifier, TemplateParams, TypeId};

/// A typed, optionally named declaration.
///
/// Identity is the type, the identifier and the initializer. Storage
/// class, visibility and provenance are metadata.
#[derive(Clone, Debug, Default)]
pub struct Instance {
    pub ty: TypeId,
    pub ident: Option<Identifier>,
    pub storage: StorageClass,
    pub initializer: Option<Expr>,
    pub template_params: Option<TemplateParams>,
    pub vis: Visibility,
    pub file: SourceFile,
    pub comment: Option<String>,
    pub bit_width: Option<u32>,
}

impl Instance {
    pub fn new(ty: TypeId, ident: Option<Identifier>) -> Self {
        Instance {
            ty,
            ident,
            ..Instance::default()
        }
    }

    /// A named instance, such as a function or a parameter.
    pub fn named(ty: TypeId, name: &str) -> Self {
        Instance::new(ty, Some(Identifier::simple(name)))
    }

    pub fn param(ty: TypeId, name: &str) -> Self {
        Instance::named(ty, name)
    }

    #[must_use]
    pub fn with_storage(mut self, storage: StorageClass) -> Self {
        self.storage |= storage;
        self
    }

    #[must_use]
    pub fn with_initializer(mut self, expr: Expr) -> Self {
        self.initializer = Some(expr);
        self
    }

    #[must_use]
    pub fn with_vis(mut self, vis: Visibility) -> Self {
        self.vis = vis;
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: SourceFile) -> Self {
        self.file = file;
        self
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn with_template_params(mut self, params: TemplateParams) -> Self {
        self.template_params = Some(params);
        self
    }

    /// The unqualified name, if this instance is named.
    pub fn simple_name(&self) -> Option<&str> {
        self.ident.as_ref().map(Identifier::simple_name)
    }

    #[inline]
    pub fn is_template(&self) -> bool {
        self.template_params.is_some()
    }

    fn identity(&self) -> (TypeId, Option<&Identifier>, Option<&Expr>) {
        (self.ty, self.ident.as_ref(), self.initializer.as_ref())
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Instance {}

impl PartialOrd for Instance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.identity().cmp(&other.identity())
    }
}

impl Hash for Instance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}
