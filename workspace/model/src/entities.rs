//! Root of the SeaORM entity modules.
//! One table holds the whole weekly earnings history; the rows are keyed by
//! their week interval and never deleted.

pub mod weekly_earnings;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::weekly_earnings::Entity as WeeklyEarnings;
}

#[cfg(test)]
mod test {
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, DbErr, EntityTrait,
        QueryFilter, Set,
    };

    use super::*;
    use prelude::*;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;
        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    fn at(y: i32, m: u32, d: u32, time: NaiveTime) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_time(time)
    }

    fn week_row(start: NaiveDateTime, end: NaiveDateTime) -> weekly_earnings::ActiveModel {
        weekly_earnings::ActiveModel {
            week_start_date: Set(start),
            week_end_date: Set(end),
            bolt_gross: Set(Decimal::new(500, 0)),
            uber_gross: Set(Decimal::new(600, 0)),
            bolt_cash: Set(Decimal::ZERO),
            uber_cash: Set(Decimal::ZERO),
            total_earnings: Set(Decimal::new(1100, 0)),
            platform_fee: Set(Decimal::new(110, 0)),
            fixed_deduction: Set(Decimal::new(45, 0)),
            total_cash_earnings: Set(Decimal::ZERO),
            net_earnings: Set(Decimal::new(945, 0)),
            created_at: Set(start),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_weekly_earnings_roundtrip_by_week_key() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let start = at(2025, 6, 8, NaiveTime::from_hms_opt(22, 0, 0).unwrap());
        let end = at(2025, 6, 15, NaiveTime::from_hms_milli_opt(21, 59, 59, 999).unwrap());

        let inserted = week_row(start, end).insert(&db).await?;
        assert!(inserted.id > 0);

        let found = WeeklyEarnings::find()
            .filter(weekly_earnings::Column::WeekStartDate.eq(start))
            .filter(weekly_earnings::Column::WeekEndDate.eq(end))
            .one(&db)
            .await?
            .expect("row for the week should exist");

        assert_eq!(found.id, inserted.id);
        assert_eq!(found.week_end_date, end);
        assert_eq!(found.net_earnings, Decimal::new(945, 0));
        Ok(())
    }

    #[tokio::test]
    async fn test_week_interval_is_unique() -> Result<(), DbErr> {
        let db = setup_db().await?;
        let start = at(2025, 6, 8, NaiveTime::from_hms_opt(22, 0, 0).unwrap());
        let end = at(2025, 6, 15, NaiveTime::from_hms_milli_opt(21, 59, 59, 999).unwrap());

        week_row(start, end).insert(&db).await?;
        let duplicate = week_row(start, end).insert(&db).await;

        assert!(duplicate.is_err(), "a second row for the same week must be rejected");
        Ok(())
    }
}
