//! Document translation workflow: submit, poll, fetch, persist

use reqwest::multipart::{Form, Part};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::client::DeepLClient;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{DocumentHandle, DocumentJob, DocumentParams, DocumentStatus, JobStatus};
use crate::core::storage::ResultStore;

/// Extensions accepted for document upload
pub const SUPPORTED_EXTENSIONS: &[&str] = &["docx", "pptx", "pdf", "html", "txt"];

/// Reject files whose extension is not in [`SUPPORTED_EXTENSIONS`]
pub fn validate_extension(path: &Path) -> Result<()> {
    let supported = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e))
        .unwrap_or(false);

    if supported {
        Ok(())
    } else {
        Err(TranslationError::InvalidExtension {
            path: path.display().to_string(),
        })
    }
}

impl DeepLClient {
    /// Upload a document and start its translation
    pub async fn submit_document(&self, params: &DocumentParams) -> Result<DocumentJob> {
        validate_extension(&params.file)?;

        let file_error = |e: std::io::Error| TranslationError::FileError {
            path: params.file.display().to_string(),
            message: e.to_string(),
        };
        let file = tokio::fs::File::open(&params.file).await.map_err(file_error)?;
        let length = file.metadata().await.map_err(file_error)?.len();

        let file_name = params
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        let form = Form::new().part("file", Part::stream_with_length(file, length).file_name(file_name));

        let mut query = vec![("target_lang", params.target_lang.code())];
        if let Some(source_lang) = params.source_lang {
            query.push(("source_lang", source_lang.code()));
        }

        let request = self.post("document").query(&query).multipart(form);
        let response = self.send(request).await?;
        let body = response.bytes().await?;
        let handle: DocumentHandle = serde_json::from_slice(&body)?;

        let job = DocumentJob::new(handle, params.target_lang, params.file.clone());
        info!(
            "Submitted {} as document {} ({} bytes, target {})",
            params.file.display(),
            job.document_id(),
            length,
            params.target_lang
        );

        Ok(job)
    }

    /// One status check for a job
    pub async fn document_status(&self, job: &DocumentJob) -> Result<DocumentStatus> {
        let request = self
            .post(&format!("document/{}", job.document_id()))
            .form(&[("document_key", job.document_key())]);

        let response = self.send(request).await?;
        let body = response.bytes().await?;
        let status: DocumentStatus = serde_json::from_slice(&body)?;

        debug!(
            "Document {} is {} (remaining: {:?}s)",
            job.document_id(),
            status.status,
            status.seconds_remaining
        );

        Ok(status)
    }

    /// Poll until the job is done, fails, or `cancel` fires.
    ///
    /// Polling runs in a spawned task that reports through a oneshot channel;
    /// on cancellation the task is aborted and no further polls are sent.
    pub async fn wait_for_document(
        &self,
        job: &DocumentJob,
        cancel: &CancellationToken,
    ) -> Result<DocumentStatus> {
        if cancel.is_cancelled() {
            return Err(TranslationError::Cancelled);
        }

        let (tx, rx) = oneshot::channel();
        let poller = tokio::spawn(poll_until_terminal(
            self.clone(),
            job.clone(),
            cancel.clone(),
            tx,
        ));

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                poller.abort();
                warn!("Document {} cancelled by caller", job.document_id());
                Err(TranslationError::Cancelled)
            }
            outcome = rx => match outcome {
                Ok(result) => result,
                Err(_) => Err(TranslationError::InternalError(format!(
                    "status poller for document {} stopped without reporting",
                    job.document_id()
                ))),
            },
        }
    }

    /// Fetch the translated document; only valid once the job is `done`
    pub async fn download_document(&self, job: &DocumentJob) -> Result<Vec<u8>> {
        let request = self
            .post(&format!("document/{}/result", job.document_id()))
            .form(&[("document_key", job.document_key())]);

        let response = self.send(request).await?;
        let body = response.bytes().await?;

        debug!("Downloaded {} bytes for document {}", body.len(), job.document_id());
        Ok(body.to_vec())
    }

    /// Translate a document and save the result under the output directory
    pub async fn translate_document(
        &self,
        params: &DocumentParams,
        cancel: &CancellationToken,
    ) -> Result<PathBuf> {
        let body = self.run_document_workflow(params, cancel).await?;
        ResultStore::new(&self.config().output_dir).persist(&body).await
    }

    /// Translate a document and return the result as text
    pub async fn translate_document_to_string(
        &self,
        params: &DocumentParams,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let body = self.run_document_workflow(params, cancel).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    async fn run_document_workflow(
        &self,
        params: &DocumentParams,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>> {
        let job = until_cancelled(cancel, self.submit_document(params)).await?;
        let status = self.wait_for_document(&job, cancel).await?;

        info!(
            "Document {} done ({} characters billed)",
            job.document_id(),
            status.billed_characters.unwrap_or_default()
        );

        until_cancelled(cancel, self.download_document(&job)).await
    }
}

async fn until_cancelled<T>(
    cancel: &CancellationToken,
    operation: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(TranslationError::Cancelled),
        result = operation => result,
    }
}

/// Body of the spawned poller. Exactly one outcome is sent, unless the
/// waiter has gone away or the token fired, in which case it just stops.
async fn poll_until_terminal(
    client: DeepLClient,
    job: DocumentJob,
    cancel: CancellationToken,
    mut tx: oneshot::Sender<Result<DocumentStatus>>,
) {
    let interval = Duration::from_millis(client.config().poll_interval_ms);
    let mut last_seen: Option<JobStatus> = None;

    loop {
        let polled = tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            _ = tx.closed() => return,
            polled = client.document_status(&job) => polled,
        };

        let status = match polled {
            Ok(status) => status,
            Err(e) => {
                let _ = tx.send(Err(e));
                return;
            }
        };

        match status.status {
            JobStatus::Done => {
                let _ = tx.send(Ok(status));
                return;
            }
            JobStatus::Error => {
                let error = status.failure();
                warn!("Document {} failed: {}", job.document_id(), error);
                let _ = tx.send(Err(TranslationError::DocumentFailed {
                    document_id: job.document_id().to_string(),
                    error,
                }));
                return;
            }
            JobStatus::Queued | JobStatus::Translating => {}
        }

        if last_seen != Some(status.status) {
            info!("Document {} is {}", job.document_id(), status.status);
            last_seen = Some(status.status);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            _ = tx.closed() => return,
            _ = sleep(interval) => {}
        }
    }
}
