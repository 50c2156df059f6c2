//! Build configuration.

use cpp_ir::Visibility;

/// Options that shape what the builder exports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Declarations less exposed than this are not exported.
    pub min_vis: Visibility,
    /// Synthesize upcasts for the leftmost base of a multiply-derived
    /// class too. Needed on compilers that move the pointer even there.
    pub left_inheritance_requires_upcast: bool,
    /// Hashed into every wrapper name.
    pub library_name: String,
    pub module_name: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            min_vis: Visibility::Published,
            left_inheritance_requires_upcast: false,
            library_name: String::new(),
            module_name: String::new(),
        }
    }
}

impl BuildOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_vis(mut self, min_vis: Visibility) -> Self {
        self.min_vis = min_vis;
        self
    }

    #[must_use]
    pub fn with_left_inheritance_requires_upcast(mut self, value: bool) -> Self {
        self.left_inheritance_requires_upcast = value;
        self
    }

    #[must_use]
    pub fn with_library_name(mut self, name: impl Into<String>) -> Self {
        self.library_name = name.into();
        self
    }

    #[must_use]
    pub fn with_module_name(mut self, name: impl Into<String>) -> Self {
        self.module_name = name.into();
        self
    }
}
