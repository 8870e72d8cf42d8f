use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use common::{UpdateEarningsRequest, WeekInfoDto, WeeklyEarningsDto};
use compute::error::LedgerError;
use tracing::{debug, error, info, instrument, trace, warn};

use crate::helpers::converters::{
    not_started_dto, record_to_dto, update_from_request, week_info_to_dto,
};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn storage_error(context: &str, err: &LedgerError) -> ErrorReply {
    error!("{}: {}", context, err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: format!("{context}: {err}"),
            code: "STORAGE_ERROR".to_string(),
            success: false,
        }),
    )
}

fn invalid_input(message: String) -> ErrorReply {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message,
            code: "INVALID_INPUT".to_string(),
            success: false,
        }),
    )
}

/// Get the earnings of the current week
///
/// A week nobody has written to yet is reported as zeros with the base fixed
/// deduction and no `id`. Reading never creates the record.
#[utoipa::path(
    get,
    path = "/api/v1/earnings/current",
    tag = "earnings",
    responses(
        (status = 200, description = "Current week retrieved successfully", body = ApiResponse<WeeklyEarningsDto>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_current_earnings(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<WeeklyEarningsDto>>, ErrorReply> {
    trace!("Entering get_current_earnings function");

    let record = state
        .ledger
        .get_current()
        .await
        .map_err(|e| storage_error("Failed to load current week", &e))?;

    let (data, message) = match record {
        Some(record) => {
            debug!("Found record {} for the current week", record.id);
            (record_to_dto(&record), "Current week retrieved successfully")
        }
        None => {
            debug!("No record for the current week yet");
            (
                not_started_dto(state.ledger.current_week()),
                "Current week has not been started",
            )
        }
    };

    Ok(Json(ApiResponse {
        data,
        message: message.to_string(),
        success: true,
    }))
}

/// Get the earnings of the previous week
///
/// `data` is null when no record was written for that week.
#[utoipa::path(
    get,
    path = "/api/v1/earnings/previous",
    tag = "earnings",
    responses(
        (status = 200, description = "Previous week retrieved; data is null when absent", body = ApiResponse<WeeklyEarningsDto>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_previous_earnings(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Option<WeeklyEarningsDto>>>, ErrorReply> {
    trace!("Entering get_previous_earnings function");

    let record = state
        .ledger
        .get_previous()
        .await
        .map_err(|e| storage_error("Failed to load previous week", &e))?;

    let message = if record.is_some() {
        "Previous week retrieved successfully"
    } else {
        "No record for the previous week"
    };
    debug!("{}", message);

    Ok(Json(ApiResponse {
        data: record.as_ref().map(record_to_dto),
        message: message.to_string(),
        success: true,
    }))
}

/// Get every stored week, most recent first
#[utoipa::path(
    get,
    path = "/api/v1/earnings",
    tag = "earnings",
    responses(
        (status = 200, description = "History retrieved successfully", body = ApiResponse<Vec<WeeklyEarningsDto>>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn get_all_earnings(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<WeeklyEarningsDto>>>, ErrorReply> {
    trace!("Entering get_all_earnings function");

    let records = state
        .ledger
        .get_all()
        .await
        .map_err(|e| storage_error("Failed to load earnings history", &e))?;

    let count = records.len();
    debug!("Returning {} weekly records", count);

    Ok(Json(ApiResponse {
        data: records.iter().map(record_to_dto).collect(),
        message: format!("Retrieved {count} weeks"),
        success: true,
    }))
}

/// Update the raw inputs of the current week
///
/// Only the fields present in the body are replaced; derived figures are
/// recomputed from the merged inputs. The week's record is created on first write.
#[utoipa::path(
    patch,
    path = "/api/v1/earnings/current",
    tag = "earnings",
    request_body = UpdateEarningsRequest,
    responses(
        (status = 200, description = "Current week updated successfully", body = ApiResponse<WeeklyEarningsDto>),
        (status = 400, description = "Negative amount, unknown field or malformed body", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
#[instrument]
pub async fn update_current_earnings(
    State(state): State<AppState>,
    request: Result<Json<UpdateEarningsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<WeeklyEarningsDto>>, ErrorReply> {
    trace!("Entering update_current_earnings function");

    let Json(request) = request.map_err(|rejection| {
        warn!("Rejected earnings update body: {}", rejection.body_text());
        invalid_input(format!("Invalid input: {}", rejection.body_text()))
    })?;

    let update = update_from_request(request);
    if update.is_empty() {
        debug!("Empty update, current week is only ensured to exist");
    }

    match state.ledger.upsert_current(update).await {
        Ok(record) => {
            info!(
                "Week starting {} now nets {}",
                record.week.start(),
                record.breakdown.net_earnings
            );
            Ok(Json(ApiResponse {
                data: record_to_dto(&record),
                message: "Current week updated successfully".to_string(),
                success: true,
            }))
        }
        Err(e) if e.is_validation() => {
            warn!("Earnings update rejected: {}", e);
            Err(invalid_input(e.to_string()))
        }
        Err(e) => Err(storage_error("Failed to update current week", &e)),
    }
}

/// Get the current and previous week boundaries and the next rollover
#[utoipa::path(
    get,
    path = "/api/v1/earnings/week-info",
    tag = "earnings",
    responses(
        (status = 200, description = "Week boundaries retrieved successfully", body = ApiResponse<WeekInfoDto>)
    )
)]
#[instrument]
pub async fn get_week_info(State(state): State<AppState>) -> Json<ApiResponse<WeekInfoDto>> {
    trace!("Entering get_week_info function");

    Json(ApiResponse {
        data: week_info_to_dto(&state.ledger.week_info()),
        message: "Week info retrieved successfully".to_string(),
        success: true,
    })
}
