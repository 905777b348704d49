mod config;
mod services;

use actix_web::http::header;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use clap::Parser;
use env_logger::Env;
use include_dir::{include_dir, Dir};
use log::{debug, info};
use mime_guess::from_path;
use std::thread;
use std::time::Duration;

use crate::config::ServerConfig;

static STATIC_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/static/dist");

/// Serves the embedded SPA. Unknown paths fall back to `index.html` so that
/// reloading a deep link still boots the console.
async fn serve_embedded(req: HttpRequest) -> HttpResponse {
    let path = req.path().trim_start_matches('/');
    let file_path = if path.is_empty() { "index.html" } else { path };

    let (file_path, file) = match STATIC_DIR.get_file(file_path) {
        Some(file) => (file_path, file),
        None => {
            debug!("No embedded asset for /{}, serving index.html", path);
            match STATIC_DIR.get_file("index.html") {
                Some(index) => ("index.html", index),
                None => return HttpResponse::NotFound().body("Not Found"),
            }
        }
    };

    let etag = format!("W/\"{:x}\"", md5::compute(file.contents()));
    let not_modified = req
        .headers()
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == etag);
    if not_modified {
        return HttpResponse::NotModified()
            .insert_header((header::ETAG, etag))
            .finish();
    }

    let mime = from_path(file_path).first_or_octet_stream();
    HttpResponse::Ok()
        .content_type(mime.as_ref())
        .insert_header((header::ETAG, etag))
        .body(file.contents().to_vec())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let server_config = ServerConfig::parse();
    let url = server_config.url();
    let console_config = server_config.console();

    info!(
        "Middleware API at {}, listener API at {}",
        console_config.api_base_url, console_config.listener_api_base_url
    );

    if server_config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            let _ = webbrowser::open(&url_clone);
        });
    }

    info!("Console running at {}", url);

    let console_data = web::Data::new(console_config);
    HttpServer::new(move || {
        App::new()
            .app_data(console_data.clone())
            .service(services::console::configure_routes())
            .default_service(web::route().to(serve_embedded))
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;

    #[actix_web::test]
    async fn deep_links_fall_back_to_index() {
        let app =
            test::init_service(App::new().default_service(web::route().to(serve_embedded))).await;

        let req = test::TestRequest::get()
            .uri("/listener-config/sftp/4")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"));
    }

    #[actix_web::test]
    async fn matching_etag_is_not_modified() {
        let app =
            test::init_service(App::new().default_service(web::route().to(serve_embedded))).await;

        let first = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let etag = first
            .headers()
            .get(header::ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap();

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((header::IF_NONE_MATCH, etag))
            .to_request();
        let second = test::call_service(&app, req).await;
        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }
}
