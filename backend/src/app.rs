use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers;
use crate::middleware as app_middleware;
use crate::state::AppState;

/// Assembles the full route tree with auth gates and shared layers.
pub fn build_router(state: AppState) -> Router {
    // Public routes: registration, login, and open reads
    let public_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/refresh", post(handlers::auth::refresh))
        .route("/api/vehicles", get(handlers::vehicles::list_vehicles))
        .route("/api/vehicles/{id}", get(handlers::vehicles::get_vehicle))
        .route("/api/listings", get(handlers::listings::list_listings))
        .route("/api/listings/{id}", get(handlers::listings::get_listing))
        .route(
            "/api/listings/{id}/bids",
            get(handlers::listings::list_bids),
        );

    // Authenticated routes
    let user_routes = Router::new()
        .route("/api/vehicles", post(handlers::vehicles::create_vehicle))
        .route(
            "/api/vehicles/{id}",
            put(handlers::vehicles::update_vehicle).delete(handlers::vehicles::delete_vehicle),
        )
        .route(
            "/api/vehicles/metadata",
            get(handlers::vehicles::vehicles_with_metadata),
        )
        .route("/api/listings", post(handlers::listings::create_listing))
        .route(
            "/api/listings/{id}",
            put(handlers::listings::update_listing).delete(handlers::listings::delete_listing),
        )
        .route(
            "/api/listings/{id}/bids",
            post(handlers::listings::place_bid),
        )
        .route(
            "/api/notifications",
            get(handlers::notifications::list_notifications)
                .post(handlers::notifications::create_notification),
        )
        .route(
            "/api/notifications/{id}/read",
            put(handlers::notifications::mark_read),
        )
        .route("/api/telemetry", post(handlers::telemetry::record_telemetry))
        .route(
            "/api/vehicles/{id}/telemetry",
            get(handlers::telemetry::list_vehicle_telemetry),
        )
        .route("/api/export/csv", get(handlers::export::export_vehicles_csv))
        .route("/api/export/pdf", get(handlers::export::export_vehicles_pdf))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            app_middleware::auth::auth,
        ));

    // Admin routes
    let admin_routes = Router::new()
        .route(
            "/api/admin/accounts",
            get(handlers::admin::accounts::list_accounts)
                .post(handlers::admin::accounts::create_account),
        )
        .route(
            "/api/admin/audit-logs",
            get(handlers::admin::audit_logs::list_audit_logs),
        )
        .route(
            "/api/admin/audit-logs/export",
            get(handlers::admin::audit_logs::export_audit_logs),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            app_middleware::auth::auth_admin,
        ));

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(
                    app_middleware::request_id::request_id,
                ))
                .layer(axum_middleware::from_fn(
                    app_middleware::logging::log_error_responses,
                ))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers(Any)
                        .max_age(std::time::Duration::from_secs(24 * 60 * 60)),
                ),
        )
        .with_state(state)
}
