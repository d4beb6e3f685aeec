use crate::http::render;
use actix_web::HttpResponse;

pub(crate) async fn index() -> HttpResponse {
    super::html_response(render::home_page())
}
