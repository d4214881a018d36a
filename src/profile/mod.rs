//! Subject profile maintenance: edits, resume ingestion and external-profile linking.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{ProfileError, ProfileResult};
pub use service::ProfileService;
pub use types::{ProfileDraft, ResumeExtract, merge_tags};
