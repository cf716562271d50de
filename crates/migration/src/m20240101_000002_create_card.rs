//! Create `card` table.
//!
//! `account_id` is an advisory reference: no foreign key, no cascade.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Card::Table).to_owned()).await
    }
}

/// Text columns carry no length limit; values are stored as given.
fn table() -> TableCreateStatement {
    Table::create()
        .table(Card::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Card::CardId)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Card::CardAlias).string().not_null())
        .col(ColumnDef::new(Card::AccountId).big_integer().not_null())
        .col(ColumnDef::new(Card::TypeOfCard).string().not_null())
        .to_owned()
}

#[derive(DeriveIden)]
enum Card { Table, CardId, CardAlias, AccountId, TypeOfCard }
