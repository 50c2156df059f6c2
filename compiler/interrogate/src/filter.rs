//! The filter table: per-library overrides of what gets exported.
//!
//! Type names are fully qualified C++ spellings (`ns::Foo`); member names
//! are unqualified; file names are as written in the `#include`.

use rustc_hash::{FxHashMap, FxHashSet};

use cpp_ir::is_c_or_i_file;

#[derive(Clone, Debug, Default)]
pub struct FilterTable {
    /// Types exported even when their file or visibility says otherwise.
    forcetype: FxHashSet<String>,
    /// Exported names that differ from the C++ name.
    renametype: FxHashMap<String, String>,
    /// Types recorded but never defined.
    ignoretype: FxHashSet<String>,
    /// Functions mentioning one of these types anywhere are skipped.
    ignoreinvolved: FxHashSet<String>,
    ignorefile: FxHashSet<String>,
    ignoremember: FxHashSet<String>,
    /// Headers never written into generated `#include` lines.
    noinclude: FxHashSet<String>,
    /// Expressions that default-construct a type, for the code generators.
    defconstruct: FxHashMap<String, String>,
}

impl FilterTable {
    pub fn new() -> Self {
        Self::default()
    }

    // === Builders ===

    #[must_use]
    pub fn with_forcetype(mut self, name: impl Into<String>) -> Self {
        self.forcetype.insert(name.into());
        self
    }

    #[must_use]
    pub fn with_renametype(mut self, name: impl Into<String>, new_name: impl Into<String>) -> Self {
        self.renametype.insert(name.into(), new_name.into());
        self
    }

    #[must_use]
    pub fn with_ignoretype(mut self, name: impl Into<String>) -> Self {
        self.ignoretype.insert(name.into());
        self
    }

    #[must_use]
    pub fn with_ignoreinvolved(mut self, name: impl Into<String>) -> Self {
        self.ignoreinvolved.insert(name.into());
        self
    }

    #[must_use]
    pub fn with_ignorefile(mut self, filename: impl Into<String>) -> Self {
        self.ignorefile.insert(filename.into());
        self
    }

    #[must_use]
    pub fn with_ignoremember(mut self, name: impl Into<String>) -> Self {
        self.ignoremember.insert(name.into());
        self
    }

    #[must_use]
    pub fn with_noinclude(mut self, filename: impl Into<String>) -> Self {
        self.noinclude.insert(filename.into());
        self
    }

    #[must_use]
    pub fn with_defconstruct(mut self, name: impl Into<String>, expr: impl Into<String>) -> Self {
        self.defconstruct.insert(name.into(), expr.into());
        self
    }

    /// Add every whitespace-separated word of `params` to the list `add`
    /// writes to, e.g. `table.add_words("a.h b.h", FilterTable::with_ignorefile)`.
    #[must_use]
    pub fn add_words(mut self, params: &str, add: fn(Self, String) -> Self) -> Self {
        for word in params.split_whitespace() {
            self = add(self, word.to_owned());
        }
        self
    }

    // === Queries ===

    /// Forced type names, sorted so the builder visits them in a stable
    /// order.
    pub fn forced_types(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.forcetype.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    #[inline]
    pub fn in_forcetype(&self, name: &str) -> bool {
        self.forcetype.contains(name)
    }

    pub fn in_renametype(&self, name: &str) -> Option<&str> {
        self.renametype.get(name).map(String::as_str)
    }

    #[inline]
    pub fn in_ignoretype(&self, name: &str) -> bool {
        self.ignoretype.contains(name)
    }

    #[inline]
    pub fn in_ignoreinvolved(&self, name: &str) -> bool {
        self.ignoreinvolved.contains(name)
    }

    #[inline]
    pub fn in_ignorefile(&self, filename: &str) -> bool {
        self.ignorefile.contains(filename)
    }

    #[inline]
    pub fn in_ignoremember(&self, name: &str) -> bool {
        self.ignoremember.contains(name)
    }

    #[inline]
    pub fn in_noinclude(&self, filename: &str) -> bool {
        self.noinclude.contains(filename)
    }

    pub fn in_defconstruct(&self, name: &str) -> Option<&str> {
        self.defconstruct.get(name).map(String::as_str)
    }

    /// Whether a generated source file may `#include` this header.
    ///
    /// Implementation and inline files, `noinclude` entries, the Windows
    /// system headers, `*_src.h`/`*_src.cxx` template sources and
    /// Objective-C++ files are all excluded.
    pub fn should_include(&self, filename: &str) -> bool {
        if is_c_or_i_file(filename) || self.in_noinclude(filename) {
            return false;
        }
        if filename == "winbase.h" || filename == "windows.h" {
            return false;
        }
        let excluded_suffix = [("_src.h", 6), ("_src.cxx", 8), (".mm", 3)]
            .iter()
            .any(|&(suffix, len)| filename.len() > len && filename.ends_with(suffix));
        !excluded_suffix
    }
}
