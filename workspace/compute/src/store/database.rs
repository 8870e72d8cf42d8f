use async_trait::async_trait;
use model::entities::weekly_earnings;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::{debug, instrument, trace};

use super::EarningsStore;
use crate::earnings::{EarningsBreakdown, EarningsRecord, NewEarningsRecord, RawEarnings};
use crate::error::Result;
use crate::week::WeekInterval;

/// Store backed by the `weekly_earnings` table.
///
/// The unique index on the week bounds is what guarantees one row per week
/// when several processes share a database.
#[derive(Debug, Clone)]
pub struct DatabaseStore {
    db: DatabaseConnection,
}

impl DatabaseStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn into_record(model: weekly_earnings::Model) -> EarningsRecord {
    EarningsRecord {
        id: model.id,
        week: WeekInterval::from_bounds(model.week_start_date.and_utc(), model.week_end_date.and_utc()),
        inputs: RawEarnings {
            bolt_gross: model.bolt_gross,
            uber_gross: model.uber_gross,
            bolt_cash: model.bolt_cash,
            uber_cash: model.uber_cash,
        },
        breakdown: EarningsBreakdown {
            total_earnings: model.total_earnings,
            platform_fee: model.platform_fee,
            fixed_deduction: model.fixed_deduction,
            total_cash_earnings: model.total_cash_earnings,
            net_earnings: model.net_earnings,
        },
        created_at: model.created_at.and_utc(),
    }
}

fn set_figures(active: &mut weekly_earnings::ActiveModel, inputs: &RawEarnings, breakdown: &EarningsBreakdown) {
    active.bolt_gross = Set(inputs.bolt_gross);
    active.uber_gross = Set(inputs.uber_gross);
    active.bolt_cash = Set(inputs.bolt_cash);
    active.uber_cash = Set(inputs.uber_cash);
    active.total_earnings = Set(breakdown.total_earnings);
    active.platform_fee = Set(breakdown.platform_fee);
    active.fixed_deduction = Set(breakdown.fixed_deduction);
    active.total_cash_earnings = Set(breakdown.total_cash_earnings);
    active.net_earnings = Set(breakdown.net_earnings);
}

#[async_trait]
impl EarningsStore for DatabaseStore {
    #[instrument(skip(self))]
    async fn find_by_week(&self, week: &WeekInterval) -> Result<Option<EarningsRecord>> {
        trace!("Querying weekly_earnings for week starting {}", week.start());
        let model = weekly_earnings::Entity::find()
            .filter(weekly_earnings::Column::WeekStartDate.eq(week.start().naive_utc()))
            .filter(weekly_earnings::Column::WeekEndDate.eq(week.end().naive_utc()))
            .one(&self.db)
            .await?;

        Ok(model.map(into_record))
    }

    #[instrument(skip(self))]
    async fn insert(&self, record: NewEarningsRecord) -> Result<EarningsRecord> {
        let mut active = weekly_earnings::ActiveModel {
            week_start_date: Set(record.week.start().naive_utc()),
            week_end_date: Set(record.week.end().naive_utc()),
            created_at: Set(record.created_at.naive_utc()),
            ..Default::default()
        };
        set_figures(&mut active, &record.inputs, &record.breakdown);

        let model = active.insert(&self.db).await?;
        debug!("Inserted weekly_earnings row {}", model.id);
        Ok(into_record(model))
    }

    #[instrument(skip(self))]
    async fn update(&self, record: EarningsRecord) -> Result<EarningsRecord> {
        let mut active = weekly_earnings::ActiveModel {
            id: Unchanged(record.id),
            ..Default::default()
        };
        set_figures(&mut active, &record.inputs, &record.breakdown);

        let model = active.update(&self.db).await?;
        debug!("Updated weekly_earnings row {}", model.id);
        Ok(into_record(model))
    }

    async fn list(&self) -> Result<Vec<EarningsRecord>> {
        let models = weekly_earnings::Entity::find()
            .order_by_asc(weekly_earnings::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(into_record).collect())
    }

    async fn ping(&self) -> Result<()> {
        self.db.ping().await?;
        Ok(())
    }
}
