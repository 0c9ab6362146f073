use std::sync::Arc;

use axum::Router;
use axum::middleware;
use http::header::{self, HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower_http::ServiceBuilderExt;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::APP_CONFIG;
use crate::middleware::http_logger::http_logger;
use crate::routes;
use crate::state::AppState;

// Lowercase form of the key header for the header tables below.
const API_KEY_HEADER_NAME: HeaderName = HeaderName::from_static("studentmanager-api-key");

fn cors() -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let headers = [header::CONTENT_TYPE, header::ACCEPT, API_KEY_HEADER_NAME];
    let base = CorsLayer::new().allow_methods(methods).allow_headers(headers);

    match APP_CONFIG.cors_allowed_origins.as_str() {
        // A wildcard origin cannot be combined with credentials
        "*" => base.allow_origin(Any).allow_credentials(false),
        listed => {
            let origins: Vec<HeaderValue> = listed
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            base.allow_origin(AllowOrigin::list(origins))
                .allow_credentials(true)
        }
    }
}

/// Assembles the application: the resource routers over shared state,
/// request logging, then the CORS/compression stack.
pub fn create_app(state: AppState) -> Router {
    let router = Router::new()
        .merge(routes::entrypoint::create_route())
        .merge(routes::students::create_route())
        .merge(routes::courses::create_route())
        .merge(routes::assessments::create_route())
        .with_state(state)
        // from_fn middleware cannot ride in the ServiceBuilder stack below
        .layer(middleware::from_fn(http_logger));

    let sensitive: Arc<[HeaderName]> = Arc::new([
        API_KEY_HEADER_NAME,
        header::AUTHORIZATION,
        header::COOKIE,
    ]);

    let stack = ServiceBuilder::new()
        .layer(cors())
        .sensitive_request_headers(sensitive.clone())
        .sensitive_response_headers(sensitive)
        .compression();

    router.layer(stack)
}
