use super::traits::MetadataProvider;
use crate::services::credential_scope::{CredentialScope, CredentialScopeManager, ScopeError};
use crate::services::lookup_executor::{LookupExecutor, TaskHandle, WaitError};
use metadata_providers::{ProviderError, SearchResults, VideoDetail};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub(crate) enum LookupError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error("lookup timed out")]
    TimedOut,
    #[error("lookup worker is unavailable")]
    Unavailable,
}

/// Orchestrates one lookup: submit a task that acquires a credential scope,
/// runs the provider call and releases the scope on the worker thread, then
/// wait for it with a fixed deadline.
pub(crate) struct LookupService {
    executor: Arc<LookupExecutor>,
    provider: Arc<dyn MetadataProvider>,
    scopes: Arc<dyn CredentialScopeManager>,
    wait_timeout: Duration,
}

impl LookupService {
    pub(crate) fn new(
        executor: Arc<LookupExecutor>,
        provider: Arc<dyn MetadataProvider>,
        scopes: Arc<dyn CredentialScopeManager>,
        wait_timeout: Duration,
    ) -> Self {
        Self {
            executor,
            provider,
            scopes,
            wait_timeout,
        }
    }

    pub(crate) async fn search(&self, keyword: &str) -> Result<SearchResults, LookupError> {
        let keyword = keyword.to_string();
        let provider = Arc::clone(&self.provider);
        let scopes = Arc::clone(&self.scopes);

        let handle = self
            .executor
            .submit(move || run_scoped(&*scopes, |scope| provider.search(&keyword, scope)));

        info!(task_id = %handle.task_id(), "Submitted search lookup");

        self.finish(handle).await
    }

    pub(crate) async fn lookup_video(&self, video_id: &str) -> Result<VideoDetail, LookupError> {
        let video_id = video_id.to_string();
        let provider = Arc::clone(&self.provider);
        let scopes = Arc::clone(&self.scopes);

        let handle = self
            .executor
            .submit(move || run_scoped(&*scopes, |scope| provider.lookup_video(&video_id, scope)));

        info!(task_id = %handle.task_id(), "Submitted video lookup");

        self.finish(handle).await
    }

    async fn finish<T>(
        &self,
        handle: TaskHandle<Result<T, LookupError>>,
    ) -> Result<T, LookupError> {
        let task_id = handle.task_id();

        match handle.wait(self.wait_timeout).await {
            Ok(outcome) => {
                if let Err(error) = &outcome {
                    warn!(%task_id, %error, "Lookup failed");
                }
                outcome
            }
            Err(WaitError::TimedOut) => {
                warn!(%task_id, "Lookup did not finish before the deadline, abandoning it");
                Err(LookupError::TimedOut)
            }
            Err(WaitError::Unavailable) => {
                warn!(%task_id, "Lookup worker is unavailable");
                Err(LookupError::Unavailable)
            }
        }
    }
}

/// Runs one provider call inside a fresh credential scope. Acquisition happens
/// on the worker thread so at most one scope is ever open, and the scope is
/// released there no matter how the call ends; a panic is covered by the
/// scope's drop.
fn run_scoped<T>(
    scopes: &dyn CredentialScopeManager,
    call: impl FnOnce(&CredentialScope) -> Result<T, ProviderError>,
) -> Result<T, LookupError> {
    let scope = scopes.acquire()?;

    let outcome = call(&scope);

    scope.release();

    Ok(outcome?)
}
