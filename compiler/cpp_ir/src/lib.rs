//! Leaf vocabulary shared by the C++ declaration model and the interrogate
//! builder.
//!
//! Nothing here knows about types or scopes. These are the small value types
//! every declaration carries:
//!
//! - [`SourceFile`]: where a declaration came from, and whether it belongs to
//!   the package being interrogated.
//! - [`Visibility`]: the ordered exposure level used by the export threshold.
//! - [`StorageClass`]: declaration specifiers (`static`, `virtual`, ...).
//! - [`Expr`]: literal expressions with the trivial constant folding needed
//!   for manifests, enum values and array bounds.
//! - [`Manifest`]: a preprocessor `#define` tracked for export.

mod expr;
mod file;
mod manifest;
mod storage;
mod visibility;

pub use expr::{BinaryOp, Expr, ExprResult, LiteralKind, UnaryOp};
pub use file::{is_c_file, is_c_or_i_file, FileOrigin, SourceFile};
pub use manifest::Manifest;
pub use storage::StorageClass;
pub use visibility::Visibility;
