use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};
use tokio::sync::RwLock;

use models::card::{self, CardDraft};

use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// Store adapter for cards, with a secondary lookup by owning account.
#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<card::Model>, ServiceError>;
    /// Cards whose `account_id` equals the argument, in id order.
    async fn list_by_account(&self, account_id: i64) -> Result<Vec<card::Model>, ServiceError>;
    async fn get(&self, card_id: i64) -> Result<Option<card::Model>, ServiceError>;
    async fn insert(&self, draft: CardDraft) -> Result<card::Model, ServiceError>;
    /// Overwrite the stored row with `record`; `None` if the row is gone.
    async fn update(&self, record: card::Model) -> Result<Option<card::Model>, ServiceError>;
    /// Returns whether a row was removed.
    async fn delete(&self, card_id: i64) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository; the by-account lookup uses `idx_card_account`.
pub struct SeaOrmCardRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCardRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl CardRepository for SeaOrmCardRepository {
    async fn list(&self) -> Result<Vec<card::Model>, ServiceError> {
        Ok(card::Entity::find().order_by_asc(card::Column::CardId).all(&self.db).await?)
    }

    async fn list_by_account(&self, account_id: i64) -> Result<Vec<card::Model>, ServiceError> {
        Ok(card::find_by_account(&self.db, account_id).await?)
    }

    async fn get(&self, card_id: i64) -> Result<Option<card::Model>, ServiceError> {
        Ok(card::Entity::find_by_id(card_id).one(&self.db).await?)
    }

    async fn insert(&self, draft: CardDraft) -> Result<card::Model, ServiceError> {
        Ok(card::create(&self.db, draft).await?)
    }

    async fn update(&self, record: card::Model) -> Result<Option<card::Model>, ServiceError> {
        Ok(card::save(&self.db, record).await?)
    }

    async fn delete(&self, card_id: i64) -> Result<bool, ServiceError> {
        let res = card::Entity::delete_by_id(card_id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

/// JSON-file repository with an in-memory `account_id -> card ids` index.
///
/// The index is rebuilt from the file on open and kept in step with every write.
pub struct FileCardRepository {
    store: Arc<JsonMapStore<i64, card::Model>>,
    by_account: RwLock<HashMap<i64, BTreeSet<i64>>>,
}

impl FileCardRepository {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let store = JsonMapStore::<i64, card::Model>::new(path).await?;
        let mut index: HashMap<i64, BTreeSet<i64>> = HashMap::new();
        for c in store.values().await {
            index.entry(c.account_id).or_default().insert(c.card_id);
        }
        Ok(Self { store, by_account: RwLock::new(index) })
    }

    /// Move `card_id` out of `stale_account`'s bucket and file it under the account the
    /// store holds right now, if the card still exists.
    ///
    /// The store is read while the index lock is held, so a write that races with
    /// this call can never leave an id behind for a card that is gone.
    async fn reindex(&self, card_id: i64, stale_account: Option<i64>) {
        let mut index = self.by_account.write().await;
        if let Some(account_id) = stale_account {
            if let Some(ids) = index.get_mut(&account_id) {
                ids.remove(&card_id);
                if ids.is_empty() {
                    index.remove(&account_id);
                }
            }
        }
        if let Some(current) = self.store.get(&card_id).await {
            index.entry(current.account_id).or_default().insert(card_id);
        }
    }
}

#[async_trait]
impl CardRepository for FileCardRepository {
    async fn list(&self) -> Result<Vec<card::Model>, ServiceError> {
        Ok(self.store.values().await)
    }

    async fn list_by_account(&self, account_id: i64) -> Result<Vec<card::Model>, ServiceError> {
        let ids: Vec<i64> = match self.by_account.read().await.get(&account_id) {
            Some(ids) => ids.iter().copied().collect(),
            None => return Ok(Vec::new()),
        };
        let mut cards = self.store.get_many(&ids).await;
        cards.retain(|c| c.account_id == account_id);
        Ok(cards)
    }

    async fn get(&self, card_id: i64) -> Result<Option<card::Model>, ServiceError> {
        Ok(self.store.get(&card_id).await)
    }

    async fn insert(&self, draft: CardDraft) -> Result<card::Model, ServiceError> {
        let created = self
            .store
            .insert_next(|card_id| (card_id, draft.into_model(card_id)))
            .await?;
        self.reindex(created.card_id, None).await;
        Ok(created)
    }

    async fn update(&self, record: card::Model) -> Result<Option<card::Model>, ServiceError> {
        let Some(previous) = self.store.replace_existing(&record.card_id, record.clone()).await? else {
            return Ok(None);
        };
        if previous.account_id != record.account_id {
            self.reindex(record.card_id, Some(previous.account_id)).await;
        }
        Ok(Some(record))
    }

    async fn delete(&self, card_id: i64) -> Result<bool, ServiceError> {
        match self.store.remove(&card_id).await? {
            Some(removed) => {
                self.reindex(card_id, Some(removed.account_id)).await;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
