use crate::services::credential_scope::CredentialScope;
use metadata_providers::{ProviderError, SearchResults, VideoDetail};

/// Boundary of the opaque metadata provider.
///
/// Both calls are synchronous and may block for tens of seconds on network
/// I/O, so they only ever run on the lookup worker thread, authenticated by
/// the credential scope passed in.
pub(crate) trait MetadataProvider: Send + Sync {
    fn search(
        &self,
        keyword: &str,
        scope: &CredentialScope,
    ) -> Result<SearchResults, ProviderError>;

    fn lookup_video(
        &self,
        video_id: &str,
        scope: &CredentialScope,
    ) -> Result<VideoDetail, ProviderError>;
}
