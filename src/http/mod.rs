mod home;
mod render;
mod search;
mod video;


pub(crate) use home::index;
pub(crate) use search::search_page;
pub(crate) use video::video_page;

use actix_web::HttpResponse;

fn html_response(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}
