use super::service::{LookupError, LookupService};
use super::traits::MetadataProvider;
use crate::services::credential_scope::{CredentialScope, EphemeralCookieFile};
use crate::services::lookup_executor::LookupExecutor;
use metadata_providers::{ProviderError, SearchResults, VideoDetail, VideoSummary};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

struct ProviderMock {
    scope_dir: PathBuf,
    calls: AtomicUsize,
    max_open_cookie_files: AtomicUsize,
    slow_call_completed: AtomicBool,
}

impl ProviderMock {
    fn new(scope_dir: PathBuf) -> Self {
        Self {
            scope_dir,
            calls: AtomicUsize::new(0),
            max_open_cookie_files: AtomicUsize::new(0),
            slow_call_completed: AtomicBool::new(false),
        }
    }

    fn observe_scope(&self, scope: &CredentialScope) {
        assert!(scope.path().exists());

        let open = std::fs::read_dir(&self.scope_dir).unwrap().count();
        self.max_open_cookie_files.fetch_max(open, Ordering::SeqCst);
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl MetadataProvider for ProviderMock {
    fn search(
        &self,
        keyword: &str,
        scope: &CredentialScope,
    ) -> Result<SearchResults, ProviderError> {
        self.observe_scope(scope);

        match keyword {
            "lofi" => Ok(vec![VideoSummary {
                id: "jfKfPfyJRdk".into(),
                title: "lofi hip hop radio - beats to relax/study to".into(),
            }]),
            "sleepy" => {
                thread::sleep(Duration::from_millis(300));
                self.slow_call_completed.store(true, Ordering::SeqCst);
                Ok(vec![])
            }
            _ => Ok(vec![]),
        }
    }

    fn lookup_video(
        &self,
        video_id: &str,
        scope: &CredentialScope,
    ) -> Result<VideoDetail, ProviderError> {
        self.observe_scope(scope);

        match video_id {
            "jfKfPfyJRdk" => Ok(VideoDetail {
                title: "lofi hip hop radio - beats to relax/study to".into(),
                formats: vec![],
            }),
            _ => Err(ProviderError::Extraction("not found".to_string())),
        }
    }
}

fn create_service(provider: Arc<ProviderMock>, scope_dir: &Path, wait_timeout: Duration) -> LookupService {
    let scopes = Arc::new(EphemeralCookieFile::new_in(
        scope_dir.to_path_buf(),
        "cookie-text".to_string(),
    ));

    LookupService::new(
        Arc::new(LookupExecutor::start()),
        provider,
        scopes,
        wait_timeout,
    )
}

fn count_cookie_files(scope_dir: &Path) -> usize {
    std::fs::read_dir(scope_dir).unwrap().count()
}

async fn wait_until(deadline: Duration, condition: impl Fn() -> bool) {
    let deadline = Instant::now() + deadline;

    while !condition() {
        assert!(Instant::now() < deadline, "condition never became true");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[actix_rt::test]
async fn should_return_search_results_and_release_scope() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(ProviderMock::new(dir.path().to_path_buf()));
    let service = create_service(Arc::clone(&provider), dir.path(), Duration::from_secs(5));

    let results = service.search("lofi").await.unwrap();

    assert_eq!(1, results.len());
    assert_eq!("jfKfPfyJRdk", &*results[0].id);
    assert_eq!(1, provider.calls.load(Ordering::SeqCst));
    assert_eq!(0, count_cookie_files(dir.path()));
}

#[actix_rt::test]
async fn should_surface_provider_error_and_release_scope() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(ProviderMock::new(dir.path().to_path_buf()));
    let service = create_service(Arc::clone(&provider), dir.path(), Duration::from_secs(5));

    let error = service.lookup_video("badid").await.unwrap_err();

    assert!(matches!(error, LookupError::Provider(_)));
    assert_eq!("not found", error.to_string());
    assert_eq!(0, count_cookie_files(dir.path()));
}

#[actix_rt::test]
async fn should_release_scope_after_caller_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(ProviderMock::new(dir.path().to_path_buf()));
    let service = create_service(Arc::clone(&provider), dir.path(), Duration::from_millis(50));

    let error = service.search("sleepy").await.unwrap_err();

    assert!(matches!(error, LookupError::TimedOut));
    assert!(!provider.slow_call_completed.load(Ordering::SeqCst));

    // The abandoned lookup still finishes on the worker and releases its scope.
    wait_until(Duration::from_secs(5), || {
        provider.slow_call_completed.load(Ordering::SeqCst)
    })
    .await;
    wait_until(Duration::from_secs(5), || count_cookie_files(dir.path()) == 0).await;

    assert_eq!(1, provider.calls.load(Ordering::SeqCst));
}

#[actix_rt::test]
async fn should_open_at_most_one_scope_across_lookups() {
    let dir = tempfile::tempdir().unwrap();
    let provider = Arc::new(ProviderMock::new(dir.path().to_path_buf()));
    let service = Arc::new(create_service(
        Arc::clone(&provider),
        dir.path(),
        Duration::from_secs(5),
    ));

    let lookups: Vec<_> = (0..3)
        .map(|_| {
            let service = Arc::clone(&service);
            actix_rt::spawn(async move { service.search("lofi").await })
        })
        .collect();

    for lookup in lookups {
        lookup.await.unwrap().unwrap();
    }

    assert_eq!(3, provider.calls.load(Ordering::SeqCst));
    assert!(provider.max_open_cookie_files.load(Ordering::SeqCst) <= 1);
    assert_eq!(0, count_cookie_files(dir.path()));
}
