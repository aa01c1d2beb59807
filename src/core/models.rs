//! Core data models for the DeepL API

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::core::languages::Language;

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    pub message: String,
    #[serde(default)]
    pub detail: String,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} ({})", self.message, self.detail)
        }
    }
}

/// Sentence splitting mode for text translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitSentences {
    /// No splitting at all
    None,
    /// Split on punctuation and newlines
    All,
    /// Split on punctuation only
    NoNewlines,
}

impl SplitSentences {
    /// Value of the `split_sentences` parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            SplitSentences::None => "0",
            SplitSentences::All => "1",
            SplitSentences::NoNewlines => "nonewlines",
        }
    }
}

impl std::str::FromStr for SplitSentences {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "0" | "none" => Ok(SplitSentences::None),
            "1" | "all" => Ok(SplitSentences::All),
            "nonewlines" => Ok(SplitSentences::NoNewlines),
            other => Err(format!("unknown split_sentences value: {}", other)),
        }
    }
}

/// Text translation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
    pub target_lang: Option<Language>,
    pub source_lang: Option<Language>,
    pub split_sentences: Option<SplitSentences>,
    pub preserve_formatting: bool,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, target_lang: Language) -> Self {
        Self {
            text: text.into(),
            target_lang: Some(target_lang),
            ..Default::default()
        }
    }

    pub fn with_source_lang(mut self, source_lang: Language) -> Self {
        self.source_lang = Some(source_lang);
        self
    }

    pub fn with_split_sentences(mut self, split: SplitSentences) -> Self {
        self.split_sentences = Some(split);
        self
    }

    pub fn with_preserve_formatting(mut self, preserve: bool) -> Self {
        self.preserve_formatting = preserve;
        self
    }
}

/// Text translation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub translation: String,
    pub detected_source_lang: Option<String>,
}

/// One entry of the `/translate` response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TranslatedSegment {
    pub text: String,
    #[serde(default)]
    pub detected_source_language: Option<String>,
}

/// `/translate` response body
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TranslateResponse {
    pub translations: Vec<TranslatedSegment>,
}

/// Character usage for the current billing period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub character_count: u64,
    pub character_limit: u64,
}

impl Usage {
    pub fn remaining(&self) -> u64 {
        self.character_limit.saturating_sub(self.character_count)
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

/// Parameters for a document translation
#[derive(Debug, Clone)]
pub struct DocumentParams {
    pub file: PathBuf,
    pub target_lang: Language,
    pub source_lang: Option<Language>,
}

impl DocumentParams {
    pub fn new(file: impl Into<PathBuf>, target_lang: Language) -> Self {
        Self {
            file: file.into(),
            target_lang,
            source_lang: None,
        }
    }

    pub fn with_source_lang(mut self, source_lang: Language) -> Self {
        self.source_lang = Some(source_lang);
        self
    }
}

/// `/document` response body
#[derive(Deserialize)]
pub(crate) struct DocumentHandle {
    pub document_id: String,
    pub document_key: String,
}

/// An in-flight document translation.
///
/// The key is only valid together with the id it was issued with, so both
/// live in one value and the key never leaves the crate.
#[derive(Clone)]
pub struct DocumentJob {
    document_id: String,
    document_key: String,
    target_lang: Language,
    source_path: PathBuf,
}

impl DocumentJob {
    pub(crate) fn new(handle: DocumentHandle, target_lang: Language, source_path: PathBuf) -> Self {
        Self {
            document_id: handle.document_id,
            document_key: handle.document_key,
            target_lang,
            source_path,
        }
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub(crate) fn document_key(&self) -> &str {
        &self.document_key
    }

    pub fn target_lang(&self) -> Language {
        self.target_lang
    }

    pub fn source_path(&self) -> &PathBuf {
        &self.source_path
    }
}

impl fmt::Debug for DocumentJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentJob")
            .field("document_id", &self.document_id)
            .field("document_key", &"<redacted>")
            .field("target_lang", &self.target_lang)
            .field("source_path", &self.source_path)
            .finish()
    }
}

/// Remote job status vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Translating,
    Done,
    Error,
}

impl JobStatus {
    /// `done` and `error` end the polling loop
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Done | JobStatus::Error)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::Translating => write!(f, "translating"),
            JobStatus::Done => write!(f, "done"),
            JobStatus::Error => write!(f, "error"),
        }
    }
}

/// `/document/{id}` response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStatus {
    pub document_id: String,
    pub status: JobStatus,
    #[serde(default)]
    pub seconds_remaining: Option<u64>,
    #[serde(default)]
    pub billed_characters: Option<u64>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl DocumentStatus {
    /// Remote error describing a failed job
    pub fn failure(&self) -> RemoteError {
        RemoteError {
            message: "document translation failed".to_string(),
            detail: self.error_message.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_decoding() {
        let status: DocumentStatus = serde_json::from_str(
            r#"{"document_id":"abc","status":"translating","seconds_remaining":20}"#,
        )
        .unwrap();
        assert_eq!(status.status, JobStatus::Translating);
        assert_eq!(status.seconds_remaining, Some(20));
        assert!(!status.status.is_terminal());
    }

    #[test]
    fn test_unknown_status_fails_to_decode() {
        let result = serde_json::from_str::<DocumentStatus>(
            r#"{"document_id":"abc","status":"paused"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_job_debug_redacts_key() {
        let job = DocumentJob::new(
            DocumentHandle {
                document_id: "ID1".to_string(),
                document_key: "SECRET".to_string(),
            },
            Language::German,
            PathBuf::from("a.txt"),
        );
        let rendered = format!("{:?}", job);
        assert!(rendered.contains("ID1"));
        assert!(!rendered.contains("SECRET"));
    }

    #[test]
    fn test_usage_remaining() {
        let usage = Usage {
            character_count: 400_000,
            character_limit: 500_000,
        };
        assert_eq!(usage.remaining(), 100_000);
        assert!(!usage.is_exhausted());

        let full = Usage {
            character_count: 600,
            character_limit: 500,
        };
        assert!(full.is_exhausted());
    }

    #[test]
    fn test_split_sentences_params() {
        assert_eq!(SplitSentences::None.as_param(), "0");
        assert_eq!("nonewlines".parse::<SplitSentences>().unwrap(), SplitSentences::NoNewlines);
        assert!("sometimes".parse::<SplitSentences>().is_err());
    }
}
