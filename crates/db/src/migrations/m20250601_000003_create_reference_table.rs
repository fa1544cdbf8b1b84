//! Create reference table migration.

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
                    .table(Reference::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reference::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Reference::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Reference::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Reference::Link).string_len(2048).not_null())
                    .col(ColumnDef::new(Reference::Platform).string_len(16).not_null())
                    .col(ColumnDef::new(Reference::Notes).text())
                    .col(ColumnDef::new(Reference::Tags).json_binary().not_null().default("[]"))
                    .col(ColumnDef::new(Reference::Folder).string_len(64))
                    .col(
                        ColumnDef::new(Reference::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reference_user")
                            .from(Reference::Table, Reference::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, created_at) - owner scan and recent view
        manager
            .create_index(
                Index::create()
                    .name("idx_reference_user_created")
                    .table(Reference::Table)
                    .col(Reference::UserId)
                    .col(Reference::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, platform)
        manager
            .create_index(
                Index::create()
                    .name("idx_reference_user_platform")
                    .table(Reference::Table)
                    .col(Reference::UserId)
                    .col(Reference::Platform)
                    .to_owned(),
            )
            .await?;

        // Index: (user_id, folder)
        manager
            .create_index(
                Index::create()
                    .name("idx_reference_user_folder")
                    .table(Reference::Table)
                    .col(Reference::UserId)
                    .col(Reference::Folder)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reference::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reference {
    Table,
    Id,
    UserId,
    Title,
    Link,
    Platform,
    Notes,
    Tags,
    Folder,
    CreatedAt,
}
