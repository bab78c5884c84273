//! Root of the `mcpreg-core` library.

// Prevent accidental direct writes to stdout/stderr in library code. All
// user-visible output belongs to the CLI layer.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod backup;
pub mod document;
pub mod error;
pub mod host;
pub mod mutator;
pub mod paths;

pub use document::ServerEntry;
pub use error::MutateErr;
pub use mutator::MutationStatus;
pub use mutator::Outcome;
