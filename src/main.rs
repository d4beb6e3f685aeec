use crate::config::Config;
use crate::services::{
    CredentialScopeManager, EphemeralCookieFile, LookupExecutor, LookupService, SharedCookieFile,
    DEFAULT_YOUTUBE_COOKIES,
};
use actix_rt::signal::unix;
use actix_web::web::Data;
use actix_web::{web, App, HttpServer};
use futures_lite::FutureExt;
use metadata_providers::{YtDlpClient, YtDlpOptions};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

mod config;
mod http;
mod impls;
mod services;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[actix_rt::main]
async fn main() -> std::io::Result<()> {
    let mut terminate = unix::signal(unix::SignalKind::terminate())?;
    let mut interrupt = unix::signal(unix::SignalKind::interrupt())?;

    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    info!(version = VERSION, "Starting application...");

    let provider = Arc::new(YtDlpClient::new(YtDlpOptions {
        binary: config.yt_dlp_binary.clone().into(),
        socket_timeout_secs: config.socket_timeout,
        search_page_size: config.search_page_size,
        search_user_agent: config.search_user_agent.clone(),
        video_user_agent: config.video_user_agent.clone(),
    }));

    let scope_manager: Arc<dyn CredentialScopeManager> = match &config.cookies_file {
        Some(path) => Arc::new(SharedCookieFile::new(path.clone().into())),
        None => {
            let cookie_text = config
                .youtube_cookies
                .clone()
                .unwrap_or_else(|| DEFAULT_YOUTUBE_COOKIES.to_string());
            Arc::new(EphemeralCookieFile::new(cookie_text))
        }
    };

    let executor = Arc::new(LookupExecutor::start());

    let lookup_service = Arc::new(LookupService::new(
        Arc::clone(&executor),
        provider,
        scope_manager,
        Duration::from_secs(config.lookup_timeout),
    ));

    let shutdown_timeout = config.shutdown_timeout;
    let bind_address = config.bind_address.clone();

    let server = HttpServer::new({
        move || {
            App::new()
                .app_data(Data::new(Arc::clone(&lookup_service)))
                .service(web::resource("/").route(web::get().to(http::index)))
                .service(web::resource("/search").route(web::get().to(http::search_page)))
                .service(web::resource("/video/{video_id}").route(web::get().to(http::video_page)))
        }
    })
    .shutdown_timeout(shutdown_timeout)
    .bind(bind_address)?
    .run();

    let server_handle = server.handle();

    actix_rt::spawn({
        async move {
            if let Err(error) = server.await {
                error!(?error, "Error on http server");
            }
        }
    });

    info!("Application started");

    interrupt.recv().or(terminate.recv()).await;

    info!("Received shutdown signal. Shutting down gracefully...");

    server_handle.stop(true).await;
    executor.shutdown();

    Ok(())
}
