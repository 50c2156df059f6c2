//! The interrogate export database.
//!
//! A flat, indexed description of a library's public API, written by the
//! interrogate builder and read by binding generators. Every record lives
//! under a non-zero [`Index`] drawn from one counter shared by all record
//! kinds; index 0 means "none" wherever one record refers to another.
//!
//! Records are created once, updated in place while the builder learns
//! more about them, and renumbered exactly once by
//! [`InterrogateDatabase::remap_indices`].

mod database;
mod element;
mod function;
mod index;
mod remap;
mod types;

pub use database::InterrogateDatabase;
pub use element::{
    ElementFlags, InterrogateElement, InterrogateMakeSeq, InterrogateManifest, ManifestFlags,
};
pub use function::{
    FunctionFlags, InterrogateFunction, InterrogateFunctionWrapper, ParameterFlags,
    WrapperFlags, WrapperParameter,
};
pub use index::{
    ElementIndex, FunctionIndex, Index, MakeSeqIndex, ManifestIndex, TypeIndex, WrapperIndex,
};
pub use remap::IndexRemapper;
pub use types::{
    AtomicToken, Derivation, DerivationFlags, EnumValue, InterrogateType, TypeFlags,
};
