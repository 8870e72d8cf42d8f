use chrono::{DateTime, Utc};
use common::{UpdateEarningsRequest, WeekInfoDto, WeekRangeDto, WeeklyEarningsDto, format_instant};
use compute::earnings::{EarningsBreakdown, EarningsRecord, EarningsUpdate, RawEarnings};
use compute::week::{WeekInfo, WeekInterval};

/// Converts a stored record into its API shape.
pub fn record_to_dto(record: &EarningsRecord) -> WeeklyEarningsDto {
    build_dto(
        Some(record.id),
        record.week,
        &record.inputs,
        &record.breakdown,
        Some(record.created_at),
    )
}

/// The "not yet started" view of a week without a record. Never persisted.
pub fn not_started_dto(week: WeekInterval) -> WeeklyEarningsDto {
    build_dto(
        None,
        week,
        &RawEarnings::default(),
        &EarningsBreakdown::not_started(),
        None,
    )
}

pub fn week_info_to_dto(info: &WeekInfo) -> WeekInfoDto {
    WeekInfoDto {
        current_week: WeekRangeDto::new(info.current_week.start(), info.current_week.end()),
        previous_week: WeekRangeDto::new(info.previous_week.start(), info.previous_week.end()),
        next_reset: format_instant(info.next_reset),
    }
}

pub fn update_from_request(request: UpdateEarningsRequest) -> EarningsUpdate {
    EarningsUpdate {
        bolt_gross: request.bolt_gross,
        uber_gross: request.uber_gross,
        bolt_cash: request.bolt_cash,
        uber_cash: request.uber_cash,
    }
}

fn build_dto(
    id: Option<i32>,
    week: WeekInterval,
    inputs: &RawEarnings,
    breakdown: &EarningsBreakdown,
    created_at: Option<DateTime<Utc>>,
) -> WeeklyEarningsDto {
    WeeklyEarningsDto {
        id,
        week_start: week.start(),
        week_end: week.end(),
        bolt_gross: inputs.bolt_gross,
        uber_gross: inputs.uber_gross,
        bolt_cash: inputs.bolt_cash,
        uber_cash: inputs.uber_cash,
        total_earnings: breakdown.total_earnings,
        platform_fee: breakdown.platform_fee,
        fixed_deduction: breakdown.fixed_deduction,
        total_cash_earnings: breakdown.total_cash_earnings,
        net_earnings: breakdown.net_earnings,
        created_at,
    }
}
