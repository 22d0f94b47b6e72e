pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod schema;
pub mod services;
pub mod store;
pub mod validation;

use crate::config::Config;
use crate::store::CourseStore;
use crate::validation::enrollment::EnrollmentCapValidator;
use axum::{Router, http::HeaderValue, middleware::from_fn};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CourseStore>,
    pub config: Arc<Config>,
    pub enrollment: EnrollmentCapValidator,
}

impl AppState {
    pub fn new(store: Arc<dyn CourseStore>, config: Config) -> Self {
        let enrollment = EnrollmentCapValidator::new(config.enrollment_cap());
        Self {
            store,
            config: Arc::new(config),
            enrollment,
        }
    }
}

/// Full application: API routes plus CORS, request logging and request ids.
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server().cors_origins);

    routes::create_router(state)
        .layer(cors)
        .layer(from_fn(middleware::logger::logger))
        .layer(from_fn(middleware::request_tracking_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

pub fn init_tracing(config: &Config) {
    let logging = config.logging();
    let level = logging
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);

    let builder = tracing_subscriber::fmt().with_max_level(level);
    let result = match logging.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.pretty().try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
