//! Initial schema.
//!
//! - `users`: people costs are recorded for, created out-of-band
//! - `costs`: one row per expense
//!
//! `costs.userid` is deliberately not a foreign key: the existence check is
//! done by the API before inserting.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    Birthday,
    MaritalStatus,
}

#[derive(Iden)]
enum Costs {
    Table,
    Id,
    Description,
    Category,
    Userid,
    Sum,
    Date,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::Birthday).date())
                    .col(ColumnDef::new(Users::MaritalStatus).string())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Costs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Costs::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Costs::Description).string().not_null())
                    .col(ColumnDef::new(Costs::Category).string().not_null())
                    .col(ColumnDef::new(Costs::Userid).string().not_null())
                    .col(ColumnDef::new(Costs::Sum).double().not_null())
                    .col(ColumnDef::new(Costs::Date).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-costs-userid-date")
                    .table(Costs::Table)
                    .col(Costs::Userid)
                    .col(Costs::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Costs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}
