use std::sync::Arc;

use common::{UpdateEarningsRequest, WeekInfoDto, WeekRangeDto, WeeklyEarningsDto};
use compute::ledger::EarningsLedger;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::config::StorageKind;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// The single earnings ledger of this process
    pub ledger: Arc<EarningsLedger>,
    /// Which store backs the ledger
    pub storage: StorageKind,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Backing store kind ("database" or "memory")
    pub storage: String,
    /// Backing store connection status
    pub storage_status: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::earnings::get_current_earnings,
        crate::handlers::earnings::get_previous_earnings,
        crate::handlers::earnings::get_all_earnings,
        crate::handlers::earnings::update_current_earnings,
        crate::handlers::earnings::get_week_info,
    ),
    components(
        schemas(
            ApiResponse<WeeklyEarningsDto>,
            ApiResponse<Vec<WeeklyEarningsDto>>,
            ApiResponse<WeekInfoDto>,
            ErrorResponse,
            HealthResponse,
            WeeklyEarningsDto,
            UpdateEarningsRequest,
            WeekInfoDto,
            WeekRangeDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "earnings", description = "Weekly earnings endpoints"),
    ),
    info(
        title = "Rideledger API",
        description = "Weekly rideshare earnings tracker - commission, fixed deduction and net payout per calendar week",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
