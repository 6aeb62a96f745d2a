use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Matches {
    Table,
    CoupleId,
    PlannerId,
    Status,
}

#[derive(DeriveIden)]
enum Quotations {
    Table,
    MatchId,
}

#[derive(DeriveIden)]
enum PriceItems {
    Table,
    PortfolioId,
}

#[derive(DeriveIden)]
enum ImageItems {
    Table,
    PortfolioId,
    Thumbnail,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    PlannerId,
    CoupleId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_matches_couple_id")
                    .table(Matches::Table)
                    .col(Matches::CoupleId)
                    .to_owned(),
            )
            .await?;

        // Confirmed-deal statistics scan a planner's confirmed matches.
        manager
            .create_index(
                Index::create()
                    .name("idx_matches_planner_id_status")
                    .table(Matches::Table)
                    .col(Matches::PlannerId)
                    .col(Matches::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quotations_match_id")
                    .table(Quotations::Table)
                    .col(Quotations::MatchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_price_items_portfolio_id")
                    .table(PriceItems::Table)
                    .col(PriceItems::PortfolioId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_image_items_portfolio_id_thumbnail")
                    .table(ImageItems::Table)
                    .col(ImageItems::PortfolioId)
                    .col(ImageItems::Thumbnail)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_planner_id")
                    .table(Reviews::Table)
                    .col(Reviews::PlannerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_couple_id")
                    .table(Reviews::Table)
                    .col(Reviews::CoupleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_reviews_couple_id",
            "idx_reviews_planner_id",
            "idx_image_items_portfolio_id_thumbnail",
            "idx_price_items_portfolio_id",
            "idx_quotations_match_id",
            "idx_matches_planner_id_status",
            "idx_matches_couple_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}
