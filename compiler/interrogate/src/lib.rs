//! The interrogate builder.
//!
//! Walks a C++ declaration model and records the exportable part of its
//! API in an [`InterrogateDatabase`](interrogate_db::InterrogateDatabase):
//! types, functions and their overloads, data members, properties,
//! sequences and preprocessor constants.
//!
//! # Passes
//!
//! ```text
//! forced types      → get_type(global)
//! top-level decls   → functions, globals, typedefs, structs, enums
//! manifests         → constants and synthesized getters
//! wrappers          → one per overload signature
//! remap             → wrappers occupy [1..N], everything else follows
//! ```
//!
//! What gets exported is controlled by [`BuildOptions`] (the visibility
//! threshold and cast rules) and a [`FilterTable`] (names and files to
//! force, rename or ignore).
//!
//! # Usage
//!
//! ```ignore
//! let unit = TranslationUnit::new(pool);
//! let mut builder = InterrogateBuilder::new(unit, FilterTable::new(), BuildOptions::default());
//! builder.build()?;
//! let db = builder.into_database();
//! ```

mod builder;
mod diagnostic;
mod filter;
mod names;
mod options;
mod type_manager;
mod unit;

pub use builder::{InterrogateBuilder, SkipReason};
pub use diagnostic::{BuildError, Diagnostic};
pub use filter::FilterTable;
pub use names::{clean_identifier, descope, hash_string, trim_blanks};
pub use options::BuildOptions;
pub use unit::{Include, IncludeStyle, TranslationUnit};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=interrogate=debug` or `RUST_LOG=interrogate=trace`;
/// skipped declarations are reported at `trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
