//! Endpoints the console SPA calls on the server that hosts it.
//!
//! Everything under `/api` belongs to the middleware backend and is called
//! directly by the browser; only `/console` is answered here.

mod config;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/console";

/// Registered routes:
///
/// * `GET /console/config`: the runtime `ConsoleConfig` (base URLs and
///   reconnect policy) as JSON.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/config", get().to(config::process))
}
