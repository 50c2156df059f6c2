//! The interrogate builder context.
//!
//! `InterrogateBuilder` owns the declaration model, the filter table and
//! the database being built, plus the by-name tables that make every
//! `get_*` call idempotent.
//!
//! # Component Structure
//!
//! ```text
//! InterrogateBuilder
//! ├── Input
//! │   ├── pool: Pool                (types and declarations)
//! │   ├── manifests: Vec<Manifest>
//! │   └── includes: Vec<Include>
//! │
//! ├── Configuration
//! │   ├── filter: FilterTable
//! │   └── options: BuildOptions
//! │
//! ├── Name Tables
//! │   ├── types_by_name             (true name → type, 0 = invalid)
//! │   ├── functions_by_name         (scoped name → function)
//! │   ├── properties_by_name        (scoped name → element)
//! │   ├── make_seqs_by_name
//! │   └── overloads                 (function → signature → instance)
//! │
//! └── Output
//!     ├── db: InterrogateDatabase
//!     └── diagnostics: Vec<Diagnostic>
//! ```
//!
//! The passes live in sibling modules: `scan` walks the top-level
//! declarations, `types` and `methods` assign indices, `synth` makes up
//! accessors and casts, `property` handles `MAKE_PROPERTY`/`MAKE_SEQ`, and
//! `wrappers` emits one wrapper per overload.

mod admission;
mod methods;
mod property;
mod scan;
mod synth;
mod types;
mod wrappers;

use std::collections::BTreeMap;

use cpp_ir::Manifest;
use cpp_types::{Identifier, Instance, MakeProperty, Pool, ScopeId, TypeId};
use interrogate_db::{
    ElementIndex, FunctionIndex, InterrogateDatabase, InterrogateType, MakeSeqIndex, TypeFlags,
    TypeIndex,
};
use rustc_hash::FxHashMap;

use crate::names::{descope, hash_string};
use crate::{BuildError, BuildOptions, Diagnostic, FilterTable, Include, TranslationUnit};

pub use admission::SkipReason;

/// One C++ overload merged into a function record.
#[derive(Clone, Debug)]
struct Overload {
    /// The declaration, scoped and resolved.
    inst: Instance,
    /// The owning class, for methods.
    class: Option<TypeId>,
}

/// Builds an [`InterrogateDatabase`] from a [`TranslationUnit`].
pub struct InterrogateBuilder {
    // === Input ===
    pool: Pool,
    manifests: Vec<Manifest>,
    includes: Vec<Include>,

    // === Configuration ===
    filter: FilterTable,
    options: BuildOptions,

    // === Name Tables ===
    types_by_name: FxHashMap<String, TypeIndex>,
    functions_by_name: FxHashMap<String, FunctionIndex>,
    properties_by_name: FxHashMap<String, (ElementIndex, MakeProperty)>,
    make_seqs_by_name: FxHashMap<String, MakeSeqIndex>,
    /// Overloads per function, keyed by signature so wrappers come out in
    /// a stable order.
    overloads: FxHashMap<FunctionIndex, BTreeMap<String, Overload>>,
    /// Hash of the library name; the prefix of every wrapper name.
    library_hash: String,

    // === Output ===
    db: InterrogateDatabase,
    diagnostics: Vec<Diagnostic>,
}

impl InterrogateBuilder {
    pub fn new(unit: TranslationUnit, filter: FilterTable, options: BuildOptions) -> Self {
        let library_hash = hash_string(&options.library_name, 5);
        InterrogateBuilder {
            pool: unit.pool,
            manifests: unit.manifests,
            includes: unit.includes,
            filter,
            options,
            types_by_name: FxHashMap::default(),
            functions_by_name: FxHashMap::default(),
            properties_by_name: FxHashMap::default(),
            make_seqs_by_name: FxHashMap::default(),
            overloads: FxHashMap::default(),
            library_hash,
            db: InterrogateDatabase::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Run every pass, leaving the finished database in the builder.
    ///
    /// Fails only when a forced type name does not resolve; every other
    /// problem is recorded as a [`Diagnostic`] and costs just the
    /// definition it occurred in.
    #[tracing::instrument(level = "debug", skip_all, fields(
        library = %self.options.library_name,
        declarations = self.pool.global_declarations().len(),
        manifests = self.manifests.len(),
    ))]
    pub fn build(&mut self) -> Result<(), BuildError> {
        self.add_forced_types()?;
        scan::scan_globals(self);
        scan::scan_manifests(self);
        tracing::debug!(
            types = self.db.num_types(),
            functions = self.db.num_functions(),
            "scan complete"
        );
        wrappers::make_wrappers(self);
        self.remap();
        tracing::debug!(
            wrappers = self.db.num_wrappers(),
            diagnostics = self.diagnostics.len(),
            "build complete"
        );
        Ok(())
    }

    fn add_forced_types(&mut self) -> Result<(), BuildError> {
        let names: Vec<String> = self
            .filter
            .forced_types()
            .into_iter()
            .map(str::to_owned)
            .collect();
        for name in names {
            let parts: Vec<&str> = descope(&name).split("::").collect();
            let ident = Identifier::qualified(&parts);
            let Some(ty) = self.pool.lookup_type(&ident, ScopeId::GLOBAL) else {
                return Err(BuildError::UnknownForcedType { name });
            };
            let index = self.get_type(ty, true);
            tracing::debug!(%name, %index, "forced type");
        }
        Ok(())
    }

    /// Renumber the database and every index the builder holds.
    fn remap(&mut self) {
        let remap = self.db.remap_indices(1);
        for index in self
            .types_by_name
            .values_mut()
            .chain(self.functions_by_name.values_mut())
            .chain(self.make_seqs_by_name.values_mut())
            .chain(self.properties_by_name.values_mut().map(|(index, _)| index))
        {
            *index = remap.map_from(*index);
        }
        self.overloads = std::mem::take(&mut self.overloads)
            .into_iter()
            .map(|(index, overloads)| (remap.map_from(index), overloads))
            .collect();
    }

    // === Accessors ===

    pub fn database(&self) -> &InterrogateDatabase {
        &self.db
    }

    pub fn into_database(self) -> InterrogateDatabase {
        self.db
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn filter(&self) -> &FilterTable {
        &self.filter
    }

    /// The index assigned to a type, by its fully qualified C++ name.
    pub fn type_index(&self, true_name: &str) -> TypeIndex {
        self.types_by_name
            .get(true_name)
            .copied()
            .unwrap_or(TypeIndex::NONE)
    }

    /// The index assigned to a function, by its fully qualified name.
    pub fn function_index(&self, name: &str) -> FunctionIndex {
        self.functions_by_name
            .get(name)
            .copied()
            .unwrap_or(FunctionIndex::NONE)
    }

    /// The prefix of every wrapper name in this library.
    pub fn library_hash_name(&self) -> &str {
        &self.library_hash
    }

    /// The headers generated code should include.
    pub fn include_files(&self) -> impl Iterator<Item = &Include> + '_ {
        self.includes
            .iter()
            .filter(|include| self.filter.should_include(&include.filename))
    }

    // === Helpers ===

    /// Record a problem with one definition.
    fn diagnose(&mut self, subject: impl Into<String>, message: impl Into<String>) {
        let diagnostic = Diagnostic::new(subject, message);
        tracing::warn!(subject = %diagnostic.subject, "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    /// Write a finished type record back.
    ///
    /// `GLOBAL` may have been set on the stored record by a recursive
    /// `get_type` while this one was being defined; it is never lost, and a
    /// newly global record joins the global listing.
    fn store_type(&mut self, index: TypeIndex, mut record: InterrogateType) {
        let wants_global = record.is_global();
        let stored = self.db.update_type(index);
        record.flags.set(TypeFlags::GLOBAL, stored.is_global());
        *stored = record;
        if wants_global {
            self.db.mark_type_global(index);
        }
    }
}

/// A copy of `inst` named as if declared directly in `scope`: a qualified
/// name keeps only its last component.
fn scoped_instance(inst: &Instance, scope: ScopeId) -> Instance {
    let mut inst = inst.clone();
    if let Some(ident) = inst.ident.as_mut() {
        let qualifiers = ident.names.len().saturating_sub(1);
        ident.names.drain(..qualifiers);
        ident.native_scope = Some(scope);
    }
    inst
}
