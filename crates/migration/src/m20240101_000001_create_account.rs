//! Create `account` table.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(table()).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Account::Table).to_owned()).await
    }
}

/// Text columns carry no length limit; values are stored as given.
fn table() -> TableCreateStatement {
    Table::create()
        .table(Account::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Account::AccountId)
                .big_integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Account::Iban).string().not_null())
        .col(ColumnDef::new(Account::BicSwift).string().not_null())
        .col(ColumnDef::new(Account::ClientId).big_integer().not_null())
        .to_owned()
}

#[derive(DeriveIden)]
enum Account { Table, AccountId, Iban, BicSwift, ClientId }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_columns_are_unbounded_on_postgres() {
        let sql = table().to_string(PostgresQueryBuilder);
        assert!(sql.contains("varchar"), "{sql}");
        assert!(!sql.contains("varchar("), "{sql}");
    }
}
