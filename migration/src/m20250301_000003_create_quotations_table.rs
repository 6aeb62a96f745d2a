use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Quotations {
    Table,
    Id,
    MatchId,
    Title,
    Price,
    Company,
    Description,
    Status,
    ModifiedAt,
}

#[derive(DeriveIden)]
enum Matches {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Quotations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quotations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Quotations::MatchId).big_integer().not_null())
                    .col(ColumnDef::new(Quotations::Title).string().not_null())
                    .col(ColumnDef::new(Quotations::Price).big_integer().not_null())
                    .col(ColumnDef::new(Quotations::Company).string().not_null())
                    .col(ColumnDef::new(Quotations::Description).text().not_null())
                    .col(
                        ColumnDef::new(Quotations::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Quotations::ModifiedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quotations_match_id")
                            .from(Quotations::Table, Quotations::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Quotations::Table).to_owned())
            .await
    }
}
