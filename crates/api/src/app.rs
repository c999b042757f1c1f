use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{certifications, clients, health, iso_standards, public, templates};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let template_routes = Router::new()
        .route(
            "/api/v1/templates",
            post(templates::create_template).get(templates::list_templates),
        )
        .route("/api/v1/templates/active", get(templates::list_active))
        .route("/api/v1/templates/defaults", get(templates::list_defaults))
        .route(
            "/api/v1/templates/:template_id",
            get(templates::get_template).delete(templates::delete_template),
        )
        .route(
            "/api/v1/templates/:template_id/set-default",
            post(templates::set_default),
        )
        .route(
            "/api/v1/templates/:template_id/deactivate",
            post(templates::deactivate_template),
        );

    let certification_routes = Router::new()
        .route(
            "/api/v1/certifications",
            post(certifications::create_certification).get(certifications::list_certifications),
        )
        .route(
            "/api/v1/certifications/statistics",
            get(certifications::statistics),
        )
        .route(
            "/api/v1/certifications/expiring",
            get(certifications::expiring),
        )
        .route(
            "/api/v1/certifications/:certification_id",
            get(certifications::get_certification).patch(certifications::update_certification),
        )
        .route(
            "/api/v1/certifications/:certification_id/history",
            get(certifications::history),
        )
        .route(
            "/api/v1/certifications/:certification_id/issue",
            post(certifications::issue),
        )
        .route(
            "/api/v1/certifications/:certification_id/renew",
            post(certifications::renew),
        )
        .route(
            "/api/v1/certifications/:certification_id/suspend",
            post(certifications::suspend),
        )
        .route(
            "/api/v1/certifications/:certification_id/revoke",
            post(certifications::revoke),
        )
        .route(
            "/api/v1/certifications/:certification_id/reactivate",
            post(certifications::reactivate),
        )
        .route(
            "/api/v1/certifications/:certification_id/generate",
            post(certifications::generate_document),
        );

    let client_routes = Router::new()
        .route(
            "/api/v1/clients",
            post(clients::create_client).get(clients::list_clients),
        )
        .route(
            "/api/v1/clients/:client_id",
            get(clients::get_client)
                .patch(clients::update_client)
                .delete(clients::delete_client),
        );

    let iso_standard_routes = Router::new()
        .route(
            "/api/v1/iso-standards",
            post(iso_standards::create_iso_standard).get(iso_standards::list_iso_standards),
        )
        .route(
            "/api/v1/iso-standards/:iso_standard_id",
            get(iso_standards::get_iso_standard),
        )
        .route(
            "/api/v1/iso-standards/:iso_standard_id/deactivate",
            post(iso_standards::deactivate_iso_standard),
        );

    // Public directory: search over active certifications and verification
    // keyed by certificate number
    let public_routes = Router::new()
        .route(
            "/api/v1/public/certifications",
            get(public::search_certificates),
        )
        .route(
            "/api/v1/public/certifications/:certificate_number",
            get(public::verify_certificate),
        );

    let ops_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(ops_routes)
        .merge(template_routes)
        .merge(certification_routes)
        .merge(client_routes)
        .merge(iso_standard_routes)
        .merge(public_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
