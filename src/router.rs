use crate::handlers::{
    earnings::{
        get_all_earnings, get_current_earnings, get_previous_earnings, get_week_info,
        update_current_earnings,
    },
    health::health_check,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{Router, routing::get};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Weekly earnings routes
        .route("/api/v1/earnings", get(get_all_earnings))
        .route(
            "/api/v1/earnings/current",
            get(get_current_earnings).patch(update_current_earnings),
        )
        .route("/api/v1/earnings/previous", get(get_previous_earnings))
        .route("/api/v1/earnings/week-info", get(get_week_info))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
