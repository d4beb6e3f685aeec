use crate::http::render;
use crate::services::{LookupError, LookupService};
use actix_web::web::{Data, Query};
use actix_web::HttpResponse;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    q: Option<String>,
}

pub(crate) async fn search_page(
    params: Query<SearchParams>,
    lookup_service: Data<Arc<LookupService>>,
) -> HttpResponse {
    let keyword = params.q.as_deref().unwrap_or("").trim().to_string();

    if keyword.is_empty() {
        return super::html_response(render::SEARCH_PROMPT.to_string());
    }

    info!(%keyword, "Search requested");

    match lookup_service.search(&keyword).await {
        Ok(results) => super::html_response(render::search_results_page(&results)),
        Err(LookupError::TimedOut) => HttpResponse::GatewayTimeout()
            .content_type("text/plain; charset=utf-8")
            .body(render::SEARCH_TIMEOUT_MESSAGE),
        Err(error) => HttpResponse::InternalServerError()
            .content_type("text/plain; charset=utf-8")
            .body(format!("検索エラー: {}", error)),
    }
}
