//! Create video table migration.

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Video::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Video::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Video::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Video::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Video::Description).text().not_null().default(""))
                    .col(ColumnDef::new(Video::Link).string_len(2048))
                    .col(ColumnDef::new(Video::Platform).string_len(16).not_null())
                    .col(ColumnDef::new(Video::Category).string_len(64).not_null())
                    .col(ColumnDef::new(Video::Tags).json_binary().not_null().default("[]"))
                    .col(ColumnDef::new(Video::Status).string_len(16).not_null())
                    .col(ColumnDef::new(Video::ScheduledDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(Video::PublishedDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Video::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_video_user")
                            .from(Video::Table, Video::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, created_at) - owner scan, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_video_user_created")
                    .table(Video::Table)
                    .col(Video::UserId)
                    .col(Video::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, platform)
        manager
            .create_index(
                Index::create()
                    .name("idx_video_user_platform")
                    .table(Video::Table)
                    .col(Video::UserId)
                    .col(Video::Platform)
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, status) - also serves the upcoming view
        manager
            .create_index(
                Index::create()
                    .name("idx_video_user_status")
                    .table(Video::Table)
                    .col(Video::UserId)
                    .col(Video::Status)
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, category)
        manager
            .create_index(
                Index::create()
                    .name("idx_video_user_category")
                    .table(Video::Table)
                    .col(Video::UserId)
                    .col(Video::Category)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Video::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Video {
    Table,
    Id,
    UserId,
    Title,
    Description,
    Link,
    Platform,
    Category,
    Tags,
    Status,
    ScheduledDate,
    PublishedDate,
    CreatedAt,
}
