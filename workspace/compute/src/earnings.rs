//! Weekly earnings figures and the deduction rule.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{LedgerError, Result};
use crate::week::WeekInterval;

/// Share of gross earnings withheld by the platforms (10%).
pub const PLATFORM_FEE_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 2);
/// Gross earnings strictly above this pay the higher fixed deduction.
pub const FIXED_DEDUCTION_THRESHOLD: Decimal = Decimal::from_parts(999, 0, 0, false, 0);
pub const FIXED_DEDUCTION_LOW: Decimal = Decimal::from_parts(25, 0, 0, false, 0);
pub const FIXED_DEDUCTION_HIGH: Decimal = Decimal::from_parts(45, 0, 0, false, 0);
/// Every raw amount must stay strictly below this (one billion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);
/// Amounts are entered in cents at most.
pub const MAX_SCALE: u32 = 2;

/// Amounts entered by the driver for one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RawEarnings {
    pub bolt_gross: Decimal,
    pub uber_gross: Decimal,
    pub bolt_cash: Decimal,
    pub uber_cash: Decimal,
}

impl RawEarnings {
    pub fn gross(&self) -> Decimal {
        self.bolt_gross + self.uber_gross
    }

    pub fn cash(&self) -> Decimal {
        self.bolt_cash + self.uber_cash
    }

    /// Replaces every field present in `update`, keeping the others.
    pub fn apply(&self, update: &EarningsUpdate) -> Self {
        Self {
            bolt_gross: update.bolt_gross.unwrap_or(self.bolt_gross),
            uber_gross: update.uber_gross.unwrap_or(self.uber_gross),
            bolt_cash: update.bolt_cash.unwrap_or(self.bolt_cash),
            uber_cash: update.uber_cash.unwrap_or(self.uber_cash),
        }
    }
}

/// Partial overrides of the raw inputs. `None` leaves a field as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EarningsUpdate {
    pub bolt_gross: Option<Decimal>,
    pub uber_gross: Option<Decimal>,
    pub bolt_cash: Option<Decimal>,
    pub uber_cash: Option<Decimal>,
}

impl EarningsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Rejects amounts that are negative, not below [`MAX_AMOUNT`] or finer than
    /// [`MAX_SCALE`] decimal places, naming every offending field.
    ///
    /// Within these bounds the deduction rule cannot overflow and every figure fits
    /// the `Decimal(16, 4)` columns exactly.
    pub fn validate(&self) -> Result<()> {
        let fields: Vec<&'static str> = [
            ("bolt_gross", self.bolt_gross),
            ("uber_gross", self.uber_gross),
            ("bolt_cash", self.bolt_cash),
            ("uber_cash", self.uber_cash),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_some_and(|amount| !is_valid_amount(amount)))
        .map(|(name, _)| name)
        .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(LedgerError::Validation { fields })
        }
    }
}

fn is_valid_amount(amount: Decimal) -> bool {
    amount >= Decimal::ZERO && amount < MAX_AMOUNT && amount.normalize().scale() <= MAX_SCALE
}

/// Figures derived from [`RawEarnings`]. Only [`EarningsBreakdown::calculate`] produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EarningsBreakdown {
    /// Gross of both platforms; cash is not part of it.
    pub total_earnings: Decimal,
    pub platform_fee: Decimal,
    pub fixed_deduction: Decimal,
    pub total_cash_earnings: Decimal,
    pub net_earnings: Decimal,
}

impl EarningsBreakdown {
    /// The deduction rule, shared by record creation and every update.
    ///
    /// Commission applies to gross only. Cash already collected by the driver was
    /// never remitted through the platform, so it comes off the payout.
    pub fn calculate(inputs: &RawEarnings) -> Self {
        let gross = inputs.gross();
        let platform_fee = PLATFORM_FEE_RATE * gross;
        let fixed_deduction = if gross > FIXED_DEDUCTION_THRESHOLD {
            FIXED_DEDUCTION_HIGH
        } else {
            FIXED_DEDUCTION_LOW
        };
        let total_cash_earnings = inputs.cash();

        Self {
            total_earnings: gross,
            platform_fee,
            fixed_deduction,
            total_cash_earnings,
            net_earnings: gross - platform_fee - fixed_deduction - total_cash_earnings,
        }
    }

    /// What a week with no stored record reports: zeros and the base fixed deduction.
    pub fn not_started() -> Self {
        Self {
            total_earnings: Decimal::ZERO,
            platform_fee: Decimal::ZERO,
            fixed_deduction: FIXED_DEDUCTION_LOW,
            total_cash_earnings: Decimal::ZERO,
            net_earnings: Decimal::ZERO,
        }
    }
}

/// A stored week of earnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EarningsRecord {
    pub id: i32,
    pub week: WeekInterval,
    pub inputs: RawEarnings,
    pub breakdown: EarningsBreakdown,
    pub created_at: DateTime<Utc>,
}

impl EarningsRecord {
    /// Returns the record with `inputs` replaced and the breakdown recomputed.
    pub fn with_inputs(self, inputs: RawEarnings) -> Self {
        Self {
            inputs,
            breakdown: EarningsBreakdown::calculate(&inputs),
            ..self
        }
    }
}

/// A record that has not been assigned an id by the store yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEarningsRecord {
    pub week: WeekInterval,
    pub inputs: RawEarnings,
    pub breakdown: EarningsBreakdown,
    pub created_at: DateTime<Utc>,
}

impl NewEarningsRecord {
    pub fn new(week: WeekInterval, inputs: RawEarnings, created_at: DateTime<Utc>) -> Self {
        Self {
            week,
            inputs,
            breakdown: EarningsBreakdown::calculate(&inputs),
            created_at,
        }
    }

    pub fn with_id(self, id: i32) -> EarningsRecord {
        EarningsRecord {
            id,
            week: self.week,
            inputs: self.inputs,
            breakdown: self.breakdown,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn inputs(bolt_gross: &str, uber_gross: &str, bolt_cash: &str, uber_cash: &str) -> RawEarnings {
        RawEarnings {
            bolt_gross: dec(bolt_gross),
            uber_gross: dec(uber_gross),
            bolt_cash: dec(bolt_cash),
            uber_cash: dec(uber_cash),
        }
    }

    #[test]
    fn test_breakdown_above_threshold() {
        let breakdown = EarningsBreakdown::calculate(&inputs("500", "600", "0", "0"));

        assert_eq!(breakdown.total_earnings, dec("1100"));
        assert_eq!(breakdown.platform_fee, dec("110"));
        assert_eq!(breakdown.fixed_deduction, dec("45"));
        assert_eq!(breakdown.total_cash_earnings, dec("0"));
        assert_eq!(breakdown.net_earnings, dec("945"));
    }

    #[test]
    fn test_cash_reduces_net_but_not_fee() {
        let breakdown = EarningsBreakdown::calculate(&inputs("500", "600", "50", "0"));

        assert_eq!(breakdown.platform_fee, dec("110"));
        assert_eq!(breakdown.total_earnings, dec("1100"));
        assert_eq!(breakdown.total_cash_earnings, dec("50"));
        assert_eq!(breakdown.net_earnings, dec("895"));
    }

    #[test]
    fn test_threshold_is_strictly_above_999() {
        let at = EarningsBreakdown::calculate(&inputs("499", "500", "0", "0"));
        assert_eq!(at.fixed_deduction, FIXED_DEDUCTION_LOW);

        let just_above = EarningsBreakdown::calculate(&inputs("499.01", "500", "0", "0"));
        assert_eq!(just_above.fixed_deduction, FIXED_DEDUCTION_HIGH);
    }

    #[test]
    fn test_fee_and_deduction_hold_across_amounts() {
        for (bolt, uber) in [("0", "0"), ("12.34", "0"), ("0", "998.99"), ("1000", "0"), ("2500.50", "730.25")] {
            let raw = inputs(bolt, uber, "3", "4");
            let breakdown = EarningsBreakdown::calculate(&raw);
            let gross = raw.gross();

            assert_eq!(breakdown.platform_fee, dec("0.10") * gross);
            assert!(breakdown.fixed_deduction == dec("25") || breakdown.fixed_deduction == dec("45"));
            assert_eq!(
                breakdown.net_earnings,
                gross - breakdown.platform_fee - breakdown.fixed_deduction - dec("7")
            );
        }
    }

    #[test]
    fn test_zero_inputs_follow_the_rule() {
        let breakdown = EarningsBreakdown::calculate(&RawEarnings::default());
        assert_eq!(breakdown.fixed_deduction, dec("25"));
        assert_eq!(breakdown.net_earnings, dec("-25"));
    }

    #[test]
    fn test_not_started_projection() {
        let projection = EarningsBreakdown::not_started();
        assert_eq!(projection.fixed_deduction, dec("25"));
        assert_eq!(projection.net_earnings, Decimal::ZERO);
        assert_eq!(projection.total_earnings, Decimal::ZERO);
    }

    #[test]
    fn test_apply_replaces_only_present_fields() {
        let stored = inputs("500", "600", "0", "0");
        let updated = stored.apply(&EarningsUpdate {
            bolt_cash: Some(dec("50")),
            bolt_gross: Some(dec("450")),
            ..Default::default()
        });

        assert_eq!(updated, inputs("450", "600", "50", "0"));
    }

    #[test]
    fn test_validate_names_every_negative_field() {
        let update = EarningsUpdate {
            bolt_gross: Some(dec("-1")),
            uber_gross: Some(dec("10")),
            uber_cash: Some(dec("-0.01")),
            ..Default::default()
        };

        match update.validate() {
            Err(LedgerError::Validation { fields }) => assert_eq!(fields, vec!["bolt_gross", "uber_cash"]),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_accepts_zero_and_missing() {
        let update = EarningsUpdate {
            bolt_gross: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
        assert!(EarningsUpdate::default().validate().is_ok());
        assert!(EarningsUpdate::default().is_empty());
    }

    #[test]
    fn test_validate_rejects_out_of_range_amounts() {
        let update = EarningsUpdate {
            bolt_gross: Some(Decimal::MAX),
            uber_gross: Some(MAX_AMOUNT),
            bolt_cash: Some(dec("0.001")),
            uber_cash: Some(dec("999999999.99")),
        };

        match update.validate() {
            Err(LedgerError::Validation { fields }) => {
                assert_eq!(fields, vec!["bolt_gross", "uber_gross", "bolt_cash"])
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_ignores_trailing_zeros() {
        let update = EarningsUpdate {
            bolt_gross: Some(dec("12.5000")),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_with_inputs_recomputes_breakdown() {
        let week = WeekInterval::starting_at(DateTime::<Utc>::UNIX_EPOCH);
        let record = NewEarningsRecord::new(week, RawEarnings::default(), DateTime::<Utc>::UNIX_EPOCH).with_id(1);
        let record = record.with_inputs(inputs("500", "600", "0", "0"));

        assert_eq!(record.breakdown.net_earnings, dec("945"));
        assert_eq!(record.id, 1);
    }
}
