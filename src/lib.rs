//! DeepL API client - async Rust client library
//!
//! Text translation, asynchronous document translation (submit, poll, fetch)
//! and account usage queries against the free or pro DeepL endpoints.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use crate::core::{
    client::DeepLClient,
    config::{ClientConfig, Tier},
    document::{validate_extension, SUPPORTED_EXTENSIONS},
    errors::{Result, TranslationError},
    languages::{language_code, Language},
    models::{
        DocumentJob, DocumentParams, DocumentStatus, JobStatus, RemoteError, SplitSentences,
        TranslationRequest, TranslationResult, Usage,
    },
    storage::ResultStore,
    translate::split_into_sentences,
};

pub use tokio_util::sync::CancellationToken;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
