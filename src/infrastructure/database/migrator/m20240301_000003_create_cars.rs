//! Create cars table

use sea_orm_migration::prelude::*;

use super::m20240301_000001_create_categories::Categories;
use super::m20240301_000002_create_dealers::Dealers;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Cars::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Cars::Brand).string().not_null())
                    .col(ColumnDef::new(Cars::Model).string().not_null())
                    .col(ColumnDef::new(Cars::Description).text().not_null())
                    .col(ColumnDef::new(Cars::ImageUrl).string().not_null())
                    .col(ColumnDef::new(Cars::Year).integer().not_null())
                    .col(ColumnDef::new(Cars::CategoryId).integer().not_null())
                    .col(ColumnDef::new(Cars::DealerId).integer().not_null())
                    .col(
                        ColumnDef::new(Cars::IsPublic)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Cars::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Cars::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cars_category")
                            .from(Cars::Table, Cars::CategoryId)
                            .to(Categories::Table, Categories::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cars_dealer")
                            .from(Cars::Table, Cars::DealerId)
                            .to(Dealers::Table, Dealers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Brand powers the exact-match filter and the distinct-brands lookup
        manager
            .create_index(
                Index::create()
                    .name("idx_cars_brand")
                    .table(Cars::Table)
                    .col(Cars::Brand)
                    .to_owned(),
            )
            .await?;

        // Public listing queries always start from the visibility filter
        manager
            .create_index(
                Index::create()
                    .name("idx_cars_is_public")
                    .table(Cars::Table)
                    .col(Cars::IsPublic)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Cars {
    Table,
    Id,
    Brand,
    Model,
    Description,
    ImageUrl,
    Year,
    CategoryId,
    DealerId,
    IsPublic,
    CreatedAt,
    UpdatedAt,
}
