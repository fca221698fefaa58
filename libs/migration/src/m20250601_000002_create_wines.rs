use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Wines::Table)
                    .if_not_exists()
                    .col(pk_uuid(Wines::Id))
                    .col(string(Wines::Name))
                    .col(text_null(Wines::Description))
                    .col(double(Wines::Price))
                    .col(string_null(Wines::ImageUrl))
                    .col(string_null(Wines::Category))
                    .col(double(Wines::Rating).default(0.0))
                    .col(boolean(Wines::InStock).default(true))
                    .col(
                        timestamp_with_time_zone(Wines::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Wines::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_wines_category")
                    .table(Wines::Table)
                    .col(Wines::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Wines::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Wines {
    Table,
    Id,
    Name,
    Description,
    Price,
    ImageUrl,
    Category,
    Rating,
    InStock,
    CreatedAt,
    UpdatedAt,
}
