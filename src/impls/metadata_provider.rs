use crate::services::{CredentialScope, MetadataProvider};
use metadata_providers::{ProviderError, SearchResults, VideoDetail, YtDlpClient};

impl MetadataProvider for YtDlpClient {
    fn search(
        &self,
        keyword: &str,
        scope: &CredentialScope,
    ) -> Result<SearchResults, ProviderError> {
        YtDlpClient::search(self, keyword, scope.path())
    }

    fn lookup_video(
        &self,
        video_id: &str,
        scope: &CredentialScope,
    ) -> Result<VideoDetail, ProviderError> {
        self.video_details(video_id, scope.path())
    }
}
