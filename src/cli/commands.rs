//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;

use crate::core::languages::Language;
use crate::core::models::SplitSentences;

/// Commands for the DeepL client
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a piece of text
    Text {
        /// Text to translate
        text: String,

        /// Target language code (e.g. DE)
        #[arg(short, long)]
        target_lang: Language,

        /// Source language (auto-detect if not specified)
        #[arg(long)]
        source_lang: Option<Language>,

        /// Sentence splitting: 0, 1 or nonewlines
        #[arg(long)]
        split_sentences: Option<SplitSentences>,

        /// Keep the original formatting
        #[arg(long)]
        preserve_formatting: bool,
    },

    /// Translate a document (.docx, .pptx, .pdf, .html, .txt)
    Document {
        /// Input file (required)
        #[arg(short, long)]
        file: PathBuf,

        /// Target language code (e.g. DE)
        #[arg(short, long)]
        target_lang: Language,

        /// Source language (auto-detect if not specified)
        #[arg(long)]
        source_lang: Option<Language>,

        /// Print the result instead of saving it
        #[arg(long)]
        stdout: bool,
    },

    /// Show character usage for the current period
    Usage,

    /// List supported language codes
    Languages,
}

/// Handle text translation command
pub async fn handle_text(
    text: String,
    target_lang: Language,
    source_lang: Option<Language>,
    split_sentences: Option<SplitSentences>,
    preserve_formatting: bool,
) -> anyhow::Result<()> {
    use crate::core::client::DeepLClient;
    use crate::core::models::TranslationRequest;
    use tracing::info;

    let client = DeepLClient::from_env()?;

    let mut request = TranslationRequest::new(text, target_lang)
        .with_preserve_formatting(preserve_formatting);
    request.source_lang = source_lang;
    request.split_sentences = split_sentences;

    info!("Translating {} characters to {}", request.text.chars().count(), target_lang);

    let result = client.translate_text(&request).await?;

    if let Some(detected) = &result.detected_source_lang {
        info!("Detected source language: {}", detected);
    }
    println!("{}", result.translation);

    Ok(())
}

/// Handle document translation command
pub async fn handle_document(
    file: PathBuf,
    target_lang: Language,
    source_lang: Option<Language>,
    stdout: bool,
) -> anyhow::Result<()> {
    use crate::core::client::DeepLClient;
    use crate::core::models::DocumentParams;
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::{Duration, Instant};
    use tokio_util::sync::CancellationToken;
    use tracing::{info, warn};

    let start_time = Instant::now();

    info!("Starting document translation");
    info!("Input: {}", file.display());
    info!("Target language: {}", target_lang);

    let client = DeepLClient::from_env()?;

    let mut params = DocumentParams::new(file, target_lang);
    params.source_lang = source_lang;

    // Ctrl-C cancels the workflow
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    let signal_task = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling document translation");
            on_signal.cancel();
        }
    });

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
        .unwrap());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(format!("Translating {}", params.file.display()));

    let outcome = if stdout {
        client
            .translate_document_to_string(&params, &cancel)
            .await
            .map(|text| {
                pb.finish_and_clear();
                println!("{}", text);
            })
    } else {
        client.translate_document(&params, &cancel).await.map(|path| {
            pb.finish_with_message("Completed");
            println!("\n✅ Document translation completed!");
            println!("   Output: {}", path.display());
        })
    };

    signal_task.abort();

    if let Err(e) = outcome {
        pb.abandon_with_message("Failed");
        return Err(e.into());
    }

    info!("Completed in {:?}", start_time.elapsed());

    Ok(())
}

/// Handle usage command
pub async fn handle_usage() -> anyhow::Result<()> {
    use crate::core::client::DeepLClient;

    let client = DeepLClient::from_env()?;
    let usage = client.usage().await?;

    println!("Characters used:      {}", usage.character_count);
    println!("Character limit:      {}", usage.character_limit);
    println!("Characters remaining: {}", usage.remaining());

    if usage.is_exhausted() {
        println!("\n⚠️  Character quota exhausted for this period");
    }

    Ok(())
}

/// Handle languages command
pub fn handle_languages() {
    for lang in Language::ALL {
        println!("{}  {}", lang.code(), lang.name());
    }
}
