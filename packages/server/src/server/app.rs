//! Application setup and router wiring.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{delete, get, post},
    Router,
};
use razorpay::{RazorpayOptions, RazorpayService};
use sqlx::PgPool;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::auth::JwtService;
use crate::server::middleware::{jwt_auth_middleware, require_auth};
use crate::server::routes::{
    create_listing, create_order, delete_listing, get_listing, get_listings, health_handler,
    update_listing, validate_order,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
    pub razorpay: Arc<RazorpayService>,
}

/// Build the Axum application router
pub fn build_app(pool: PgPool, config: &Config) -> Router {
    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));

    let razorpay = Arc::new(RazorpayService::new(RazorpayOptions {
        key_id: config.razorpay_key_id.clone(),
        key_secret: config.razorpay_key_secret.clone(),
    }));

    let app_state = AppState {
        db_pool: pool,
        jwt_service: jwt_service.clone(),
        razorpay,
    };

    // CORS: exact origins in production, permissive when unconfigured.
    // Credentials (the auth cookie) only work with explicit origins.
    let cors = if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers([AUTHORIZATION, CONTENT_TYPE])
            .allow_credentials(true)
    };

    // Rate limiting: 10 requests per second per client IP with bursts of 20
    let rate_limit_config = std::sync::Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .use_headers()
            .finish()
            .expect("Rate limiter configuration is valid and should never fail"),
    );

    let rate_limit_layer = GovernorLayer {
        config: rate_limit_config,
    };

    // Owner-only routes sit behind the auth gate
    let protected = Router::new()
        .route("/api/listing/create", post(create_listing))
        .route("/api/listing/update/:id", post(update_listing))
        .route("/api/listing/delete/:id", delete(delete_listing))
        .route_layer(middleware::from_fn(require_auth));

    let public = Router::new()
        .route("/api/listing/get/:id", get(get_listing))
        .route("/api/listing/get", get(get_listings))
        .route("/api/order", post(create_order))
        .route("/api/order/validate", post(validate_order))
        .route("/health", get(health_handler));

    let jwt_service_for_middleware = jwt_service.clone();

    protected
        .merge(public)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }))
        .layer(rate_limit_layer)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
