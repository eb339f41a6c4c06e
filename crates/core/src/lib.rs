//! # TaskWeaver Core
//!
//! Domain types, traits, and error definitions for the TaskWeaver planning
//! assistant. This crate has **no I/O of its own**: it defines the model
//! that the index, provider, and planner crates implement against.
//!
//! ## Seams
//!
//! - [`Provider`]: the language-model backend (one request, one reply).
//! - [`FileIndex`]: project listing, file reads, and keyword search.
//!
//! Everything that crosses the host boundary (file lists, plans, resets)
//! lives in [`host`].

pub mod error;
pub mod file;
pub mod host;
pub mod index;
pub mod message;
pub mod plan;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{Error, IndexError, PlanError, ProviderError, Result};
pub use file::{FileReference, WorkspaceFile, normalize_path};
pub use host::{HostRequest, HostResponse};
pub use index::FileIndex;
pub use message::{Message, Role};
pub use plan::{KeywordSuggestion, PlanResult, PlanStep};
pub use provider::{Provider, ProviderRequest, ProviderResponse, ResponseFormat, Usage};
