use crate::entity_iden::EntityIden;
use model::entities::prelude::*;
use model::entities::weekly_earnings::Column;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

fn money(column: Column) -> ColumnDef {
    decimal(WeeklyEarnings::column(column))
        .decimal_len(16, 4)
        .default(0)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WeeklyEarnings::table())
                    .if_not_exists()
                    .col(pk_auto(WeeklyEarnings::column(Column::Id)))
                    .col(date_time(WeeklyEarnings::column(Column::WeekStartDate)))
                    .col(date_time(WeeklyEarnings::column(Column::WeekEndDate)))
                    .col(money(Column::BoltGross))
                    .col(money(Column::UberGross))
                    .col(money(Column::BoltCash))
                    .col(money(Column::UberCash))
                    .col(money(Column::TotalEarnings))
                    .col(money(Column::PlatformFee))
                    .col(money(Column::FixedDeduction))
                    .col(money(Column::TotalCashEarnings))
                    .col(money(Column::NetEarnings))
                    .col(
                        date_time(WeeklyEarnings::column(Column::CreatedAt))
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // One row per week interval
        manager
            .create_index(
                Index::create()
                    .name("idx_weekly_earnings_week")
                    .table(WeeklyEarnings::table())
                    .col(WeeklyEarnings::column(Column::WeekStartDate))
                    .col(WeeklyEarnings::column(Column::WeekEndDate))
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeeklyEarnings::table()).to_owned())
            .await?;

        Ok(())
    }
}
