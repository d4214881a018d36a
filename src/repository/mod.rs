//! Record repository boundary.
//!
//! The engine reads subjects and offers through [`RecordRepository`]; persistence is
//! someone else's job. [`InMemoryRepository`] backs tests and the command-line runner.

pub mod error;
pub mod memory;
pub mod source;

#[cfg(test)]
mod tests;

pub use error::{RepositoryError, RepositoryResult};
pub use memory::{InMemoryRepository, RepositoryFixture};
pub use source::RecordRepository;
