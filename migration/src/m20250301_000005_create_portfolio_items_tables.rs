use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum PriceItems {
    Table,
    Id,
    PortfolioId,
    ItemTitle,
    ItemPrice,
}

#[derive(DeriveIden)]
enum ImageItems {
    Table,
    Id,
    PortfolioId,
    Data,
    Thumbnail,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Portfolios {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PriceItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PriceItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PriceItems::PortfolioId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PriceItems::ItemTitle).string().not_null())
                    .col(ColumnDef::new(PriceItems::ItemPrice).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_price_items_portfolio_id")
                            .from(PriceItems::Table, PriceItems::PortfolioId)
                            .to(Portfolios::Table, Portfolios::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ImageItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ImageItems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ImageItems::PortfolioId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ImageItems::Data).binary().not_null())
                    .col(
                        ColumnDef::new(ImageItems::Thumbnail)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(ImageItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_image_items_portfolio_id")
                            .from(ImageItems::Table, ImageItems::PortfolioId)
                            .to(Portfolios::Table, Portfolios::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ImageItems::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(PriceItems::Table).to_owned())
            .await
    }
}
