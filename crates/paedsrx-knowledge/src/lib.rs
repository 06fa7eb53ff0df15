//! paedsrx-knowledge
//!
//! Read-only access to the clinical knowledge store: the conditions and
//! guidelines reference documents. Load once, share behind an `Arc`.

pub mod config;
pub mod error;
pub mod source;
pub mod store;

pub use source::{DirectorySource, DocumentKind, KnowledgeSource, StaticSource};
pub use store::KnowledgeStore;
