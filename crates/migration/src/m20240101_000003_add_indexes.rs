use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Card: lookup by owning account
        manager
            .create_index(
                Index::create()
                    .name("idx_card_account")
                    .table(Card::Table)
                    .col(Card::AccountId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_card_account").table(Card::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Card { Table, AccountId }
