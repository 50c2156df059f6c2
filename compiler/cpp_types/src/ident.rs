//! Qualified C++ names.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use cpp_ir::Expr;
use smallvec::SmallVec;

use crate::{ScopeId, TypeId};

/// One actual argument in a template argument list.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemplateArg {
    Type(TypeId),
    Value(Expr),
}

/// One `::`-separated piece of a name, e.g. `vector<int>`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameComponent {
    pub name: String,
    pub templ: Option<Vec<TemplateArg>>,
}

impl NameComponent {
    pub fn new(name: impl Into<String>) -> Self {
        NameComponent {
            name: name.into(),
            templ: None,
        }
    }

    #[inline]
    pub fn has_templ(&self) -> bool {
        self.templ.is_some()
    }
}

/// A possibly-qualified name such as `A::B<int>::c`.
///
/// The native scope records where the name was declared so it can be
/// printed fully qualified. It takes no part in equality, ordering or
/// hashing: two identifiers spelled the same are the same identifier.
#[derive(Clone, Debug)]
pub struct Identifier {
    pub names: SmallVec<[NameComponent; 2]>,
    pub native_scope: Option<ScopeId>,
}

impl Identifier {
    /// A single unqualified name.
    pub fn simple(name: impl Into<String>) -> Self {
        let mut names = SmallVec::new();
        names.push(NameComponent::new(name));
        Identifier {
            names,
            native_scope: None,
        }
    }

    /// A name built from `::`-separated pieces, without template arguments.
    pub fn qualified<S: AsRef<str>>(parts: &[S]) -> Self {
        Identifier {
            names: parts
                .iter()
                .map(|p| NameComponent::new(p.as_ref()))
                .collect(),
            native_scope: None,
        }
    }

    /// The last component.
    ///
    /// # Panics
    /// Never in practice: identifiers are constructed with at least one
    /// component.
    #[inline]
    pub fn local(&self) -> &NameComponent {
        &self.names[self.names.len() - 1]
    }

    /// The last component's name, without template arguments.
    #[inline]
    pub fn simple_name(&self) -> &str {
        &self.local().name
    }

    #[inline]
    pub fn is_scoped(&self) -> bool {
        self.names.len() > 1
    }

    /// Template arguments on the last component, if any.
    pub fn template_args(&self) -> Option<&[TemplateArg]> {
        self.local().templ.as_deref()
    }

    #[must_use]
    pub fn with_native_scope(mut self, scope: ScopeId) -> Self {
        self.native_scope = Some(scope);
        self
    }

    /// A copy with `args` attached to the last component.
    #[must_use]
    pub fn with_template_args(mut self, args: Vec<TemplateArg>) -> Self {
        let last = self.names.len() - 1;
        self.names[last].templ = Some(args);
        self
    }
}

impl PartialEq for Identifier {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names
    }
}

impl Eq for Identifier {}

impl PartialOrd for Identifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Identifier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.names.cmp(&other.names)
    }
}

impl Hash for Identifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.names.hash(state);
    }
}

#[cfg(test)]
mod tests;
