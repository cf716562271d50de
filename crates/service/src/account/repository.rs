use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use models::account::{self, AccountDraft};

use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// Store adapter for accounts. Every call touches at most one record.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<account::Model>, ServiceError>;
    async fn get(&self, account_id: i64) -> Result<Option<account::Model>, ServiceError>;
    /// Store a new account under a freshly generated id.
    async fn insert(&self, draft: AccountDraft) -> Result<account::Model, ServiceError>;
    /// Overwrite the stored row with `record`; `None` if the row is gone.
    async fn update(&self, record: account::Model) -> Result<Option<account::Model>, ServiceError>;
    /// Returns whether a row was removed.
    async fn delete(&self, account_id: i64) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmAccountRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn list(&self) -> Result<Vec<account::Model>, ServiceError> {
        Ok(account::Entity::find().order_by_asc(account::Column::AccountId).all(&self.db).await?)
    }

    async fn get(&self, account_id: i64) -> Result<Option<account::Model>, ServiceError> {
        Ok(account::Entity::find_by_id(account_id).one(&self.db).await?)
    }

    async fn insert(&self, draft: AccountDraft) -> Result<account::Model, ServiceError> {
        Ok(account::create(&self.db, draft).await?)
    }

    async fn update(&self, record: account::Model) -> Result<Option<account::Model>, ServiceError> {
        Ok(account::save(&self.db, record).await?)
    }

    async fn delete(&self, account_id: i64) -> Result<bool, ServiceError> {
        let res = account::Entity::delete_by_id(account_id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

/// JSON-file repository; ids come from the store's persisted sequence.
pub struct FileAccountRepository {
    store: Arc<JsonMapStore<i64, account::Model>>,
}

impl FileAccountRepository {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        Ok(Self { store: JsonMapStore::new(path).await? })
    }
}

#[async_trait]
impl AccountRepository for FileAccountRepository {
    async fn list(&self) -> Result<Vec<account::Model>, ServiceError> {
        Ok(self.store.values().await)
    }

    async fn get(&self, account_id: i64) -> Result<Option<account::Model>, ServiceError> {
        Ok(self.store.get(&account_id).await)
    }

    async fn insert(&self, draft: AccountDraft) -> Result<account::Model, ServiceError> {
        self.store
            .insert_next(|account_id| (account_id, draft.into_model(account_id)))
            .await
    }

    async fn update(&self, record: account::Model) -> Result<Option<account::Model>, ServiceError> {
        let replaced = self.store.replace_existing(&record.account_id, record.clone()).await?;
        Ok(replaced.map(|_| record))
    }

    async fn delete(&self, account_id: i64) -> Result<bool, ServiceError> {
        Ok(self.store.remove(&account_id).await?.is_some())
    }
}
