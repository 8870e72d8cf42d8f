use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Partial update of the raw inputs of the current week.
///
/// Missing fields keep their stored value. Present fields must be JSON numbers;
/// strings and `null` are rejected, as are unknown fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct UpdateEarningsRequest {
    /// Gross earnings paid out through Bolt
    #[serde(default, with = "json_number", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub bolt_gross: Option<Decimal>,
    /// Gross earnings paid out through Uber
    #[serde(default, with = "json_number", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub uber_gross: Option<Decimal>,
    /// Cash collected directly from Bolt riders
    #[serde(default, with = "json_number", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub bolt_cash: Option<Decimal>,
    /// Cash collected directly from Uber riders
    #[serde(default, with = "json_number", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<f64>)]
    pub uber_cash: Option<Decimal>,
}

/// Present amounts travel as plain JSON numbers in both directions.
mod json_number {
    use std::fmt;
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::de::{self, Unexpected, Visitor};
    use serde::{Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error> {
        match value.and_then(|amount| amount.to_f64()) {
            Some(number) => serializer.serialize_f64(number),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
        deserializer.deserialize_any(NumberVisitor).map(Some)
    }

    struct NumberVisitor;

    impl<'de> Visitor<'de> for NumberVisitor {
        type Value = Decimal;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a JSON number")
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Decimal, E> {
            Ok(Decimal::from(value))
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Decimal, E> {
            Ok(Decimal::from(value))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Decimal, E> {
            // Display gives the shortest digits that read back as the same f64
            Decimal::from_str(&value.to_string())
                .map_err(|_| E::invalid_value(Unexpected::Float(value), &"a number within the decimal range"))
        }
    }
}

/// One week of earnings as returned by the API.
///
/// `id` and `created_at` are absent for the "not yet started" projection of a week
/// that has no stored record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct WeeklyEarningsDto {
    pub id: Option<i32>,
    /// Local Monday 00:00 of the week, as a UTC instant
    pub week_start: DateTime<Utc>,
    /// Local Sunday 23:59:59.999 of the week, as a UTC instant
    pub week_end: DateTime<Utc>,
    #[schema(value_type = String)]
    pub bolt_gross: Decimal,
    #[schema(value_type = String)]
    pub uber_gross: Decimal,
    #[schema(value_type = String)]
    pub bolt_cash: Decimal,
    #[schema(value_type = String)]
    pub uber_cash: Decimal,
    /// Gross earnings of both platforms, cash excluded
    #[schema(value_type = String)]
    pub total_earnings: Decimal,
    /// Commission withheld by the platforms
    #[schema(value_type = String)]
    pub platform_fee: Decimal,
    /// Flat weekly fee
    #[schema(value_type = String)]
    pub fixed_deduction: Decimal,
    #[schema(value_type = String)]
    pub total_cash_earnings: Decimal,
    /// Amount still owed to the driver
    #[schema(value_type = String)]
    pub net_earnings: Decimal,
    pub created_at: Option<DateTime<Utc>>,
}
