use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;

/// One calendar week of rideshare earnings.
///
/// The week is identified by the pair `(week_start_date, week_end_date)`, stored as
/// naive UTC timestamps; a unique index on that pair keeps one row per week.
/// The derived columns are written by the ledger on every save and are never
/// edited on their own.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "weekly_earnings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Local Monday 00:00:00.000 of the week, in UTC.
    pub week_start_date: NaiveDateTime,
    /// Local Sunday 23:59:59.999 of the week, in UTC.
    pub week_end_date: NaiveDateTime,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub bolt_gross: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub uber_gross: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub bolt_cash: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub uber_cash: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub total_earnings: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub platform_fee: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub fixed_deduction: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub total_cash_earnings: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub net_earnings: Decimal,
    pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
