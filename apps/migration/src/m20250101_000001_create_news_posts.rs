use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NewsPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NewsPosts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NewsPosts::Title).string_len(500).not_null())
                    .col(ColumnDef::new(NewsPosts::Content).text())
                    .col(ColumnDef::new(NewsPosts::ImageUrl).text())
                    .col(
                        ColumnDef::new(NewsPosts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(NewsPosts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(NewsPosts::Author)
                            .string_len(200)
                            .not_null()
                            .default("Admin"),
                    )
                    .col(ColumnDef::new(NewsPosts::SourceUrl).text())
                    .col(
                        ColumnDef::new(NewsPosts::IsPublished)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_news_posts_title", NewsPosts::Title),
            ("idx_news_posts_created_at", NewsPosts::CreatedAt),
            ("idx_news_posts_is_published", NewsPosts::IsPublished),
        ] {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name(name)
                        .table(NewsPosts::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NewsPosts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum NewsPosts {
    Table,
    Id,
    Title,
    Content,
    ImageUrl,
    CreatedAt,
    UpdatedAt,
    Author,
    SourceUrl,
    IsPublished,
}
