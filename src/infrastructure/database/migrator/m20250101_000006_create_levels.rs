//! Create levels table migration

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Levels::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Levels::Id).string().not_null().primary_key())
                    .col(
                        ColumnDef::new(Levels::LevelId)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Levels::LevelName).string_len(100).not_null())
                    .col(ColumnDef::new(Levels::LevelFullName).string_len(255).null())
                    .col(
                        ColumnDef::new(Levels::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Levels::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Levels::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Levels {
    Table,
    Id,
    LevelId,
    LevelName,
    LevelFullName,
    CreatedAt,
    UpdatedAt,
}
