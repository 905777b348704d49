use actix_web::{web, HttpResponse, Responder};
use common::config::ConsoleConfig;

/// `GET /console/config`. Never cached so a restart with new flags is
/// picked up on the next page load.
pub async fn process(config: web::Data<ConsoleConfig>) -> impl Responder {
    HttpResponse::Ok()
        .insert_header(("Cache-Control", "no-store"))
        .json(config.get_ref())
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};
    use common::config::{ConsoleConfig, CONSOLE_CONFIG_PATH};

    use crate::services::console::configure_routes;

    #[actix_web::test]
    async fn publishes_console_config() {
        let config = ConsoleConfig {
            api_base_url: "https://mw.example.com".to_string(),
            ..ConsoleConfig::default()
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(config.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri(CONSOLE_CONFIG_PATH).to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("Cache-Control").and_then(|v| v.to_str().ok()),
            Some("no-store")
        );

        let body: ConsoleConfig = test::read_body_json(resp).await;
        assert_eq!(body, config);
    }
}
