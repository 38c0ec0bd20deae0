//! Create dealers table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dealers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Dealers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Dealers::Name).string().not_null())
                    .col(ColumnDef::new(Dealers::PhoneNumber).string().not_null())
                    .col(ColumnDef::new(Dealers::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Dealers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One dealer per external user
        manager
            .create_index(
                Index::create()
                    .name("idx_dealers_user_id")
                    .table(Dealers::Table)
                    .col(Dealers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Dealers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Dealers {
    Table,
    Id,
    Name,
    PhoneNumber,
    UserId,
    CreatedAt,
}
