use crate::http::render;
use crate::services::LookupService;
use actix_web::web::{Data, Path};
use actix_web::HttpResponse;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn video_page(
    path: Path<String>,
    lookup_service: Data<Arc<LookupService>>,
) -> HttpResponse {
    let video_id = path.into_inner();

    info!(%video_id, "Video detail requested");

    match lookup_service.lookup_video(&video_id).await {
        Ok(video) => super::html_response(render::video_detail_page(&video)),
        // Lookup failures on this page are rendered inline with a 200 status,
        // matching the search site's established behavior.
        Err(error) => super::html_response(format!(
            "動画情報取得エラー: {}",
            render::escape(&error.to_string()),
        )),
    }
}
