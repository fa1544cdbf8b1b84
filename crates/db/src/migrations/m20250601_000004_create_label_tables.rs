//! Create category and folder tables migration.
//!
//! Neither table is referenced by a foreign key: videos and references hold
//! the label name as a plain string.

use sea_orm_migration::prelude::*;

use super::m20250601_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        create_label_table(manager, Category::Table, "category").await?;
        create_label_table(manager, Folder::Table, "folder").await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Folder::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Category::Table).to_owned())
            .await
    }
}

async fn create_label_table<T>(manager: &SchemaManager<'_>, table: T, name: &str) -> Result<(), DbErr>
where
    T: Iden + Copy + 'static,
{
    manager
        .create_table(
            Table::create()
                .table(table)
                .if_not_exists()
                .col(ColumnDef::new(Label::Id).string_len(32).not_null().primary_key())
                .col(ColumnDef::new(Label::UserId).string_len(32).not_null())
                .col(ColumnDef::new(Label::Name).string_len(64).not_null())
                .col(ColumnDef::new(Label::Color).string_len(32).not_null())
                .col(
                    ColumnDef::new(Label::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name(format!("fk_{name}_user"))
                        .from(table, Label::UserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

    // Index: user_id (owner scan)
    manager
        .create_index(
            Index::create()
                .name(format!("idx_{name}_user_id"))
                .table(table)
                .col(Label::UserId)
                .to_owned(),
        )
        .await
}

#[derive(Iden, Clone, Copy)]
enum Category {
    Table,
}

#[derive(Iden, Clone, Copy)]
enum Folder {
    Table,
}

/// Columns shared by both label tables.
#[derive(Iden)]
enum Label {
    Id,
    UserId,
    Name,
    Color,
    CreatedAt,
}
