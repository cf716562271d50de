use std::sync::Arc;
use tracing::{debug, info, instrument};

use models::card::{self, CardDraft, CardPatch};

use crate::card::repository::CardRepository;
use crate::errors::ServiceError;

/// Application service encapsulating the card lifecycle.
///
/// `account_id` on a card is advisory: it is never checked against the
/// account store and deleting an account leaves its cards in place.
pub struct CardService<R: CardRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CardRepository + ?Sized> CardService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list_all_cards(&self) -> Result<Vec<card::Model>, ServiceError> {
        self.repo.list().await
    }

    /// Cards referencing `account_id`, whether or not such an account exists.
    pub async fn list_cards_for_account(&self, account_id: i64) -> Result<Vec<card::Model>, ServiceError> {
        self.repo.list_by_account(account_id).await
    }

    pub async fn get_card(&self, card_id: i64) -> Result<Option<card::Model>, ServiceError> {
        self.repo.get(card_id).await
    }

    #[instrument(skip(self, draft), fields(account_id = draft.account_id))]
    pub async fn create_card(&self, draft: CardDraft) -> Result<card::Model, ServiceError> {
        let created = self.repo.insert(draft).await?;
        info!(card_id = created.card_id, "card_created");
        Ok(created)
    }

    /// Rename an existing card. Only the alias changes; `account_id` and
    /// `type_of_card` keep their stored values whatever the patch carries.
    /// Returns `None` when the card does not exist.
    #[instrument(skip(self, patch))]
    pub async fn update_card(&self, card_id: i64, patch: CardPatch) -> Result<Option<card::Model>, ServiceError> {
        let Some(mut existing) = self.repo.get(card_id).await? else {
            debug!("card_update_missing");
            return Ok(None);
        };
        if patch.account_id.is_some_and(|a| a != existing.account_id)
            || patch.type_of_card.as_deref().is_some_and(|t| t != existing.type_of_card)
        {
            debug!("card_update_ignores_non_alias_fields");
        }
        existing.apply_patch(patch);
        let updated = self.repo.update(existing).await?;
        if updated.is_some() {
            info!("card_updated");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_card(&self, card_id: i64) -> Result<(), ServiceError> {
        let existed = self.repo.delete(card_id).await?;
        info!(existed, "card_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::repository::{FileCardRepository, SeaOrmCardRepository};
    use crate::test_support::{block_writes, get_db, temp_path};

    fn draft(alias: &str, account_id: i64, kind: &str) -> CardDraft {
        CardDraft { card_alias: alias.into(), account_id, type_of_card: kind.into() }
    }

    async fn lifecycle<R: CardRepository + ?Sized>(svc: CardService<R>) -> Result<(), anyhow::Error> {
        // account 500 exists nowhere
        let c1 = svc.create_card(draft("travel", 500, "Virtual")).await?;
        let c2 = svc.create_card(draft("groceries", 500, "Physical")).await?;
        let c3 = svc.create_card(draft("other", 501, "Virtual")).await?;
        assert_ne!(c1.card_id, c2.card_id);

        assert_eq!(svc.list_cards_for_account(500).await?, vec![c1.clone(), c2.clone()]);
        assert_eq!(svc.list_cards_for_account(501).await?, vec![c3.clone()]);
        assert!(svc.list_cards_for_account(999).await?.is_empty());
        assert_eq!(svc.list_all_cards().await?.len(), 3);

        // only the alias is taken from the patch
        let patch = CardPatch { card_alias: "renamed".into(), account_id: Some(501), type_of_card: Some("Physical".into()) };
        let updated = svc.update_card(c1.card_id, patch).await?.expect("card exists");
        assert_eq!(updated.card_alias, "renamed");
        assert_eq!(updated.account_id, 500);
        assert_eq!(updated.type_of_card, "Virtual");
        assert_eq!(svc.get_card(c1.card_id).await?, Some(updated.clone()));
        assert_eq!(svc.list_cards_for_account(501).await?, vec![c3]);

        svc.delete_card(c2.card_id).await?;
        svc.delete_card(c2.card_id).await?;
        assert_eq!(svc.list_cards_for_account(500).await?, vec![updated]);
        Ok(())
    }

    async fn missing_is_absent<R: CardRepository + ?Sized>(svc: CardService<R>) -> Result<(), anyhow::Error> {
        assert!(svc.get_card(1).await?.is_none());
        assert!(svc.update_card(1, CardPatch::alias("x")).await?.is_none());
        assert!(svc.list_all_cards().await?.is_empty());
        svc.delete_card(1).await?;
        Ok(())
    }

    #[tokio::test]
    async fn card_lifecycle_file() -> Result<(), anyhow::Error> {
        let path = temp_path("svc_cards");
        lifecycle(CardService::new(Arc::new(FileCardRepository::open(&path).await?))).await?;
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn card_lifecycle_seaorm() -> Result<(), anyhow::Error> {
        lifecycle(CardService::new(Arc::new(SeaOrmCardRepository::new(get_db().await?)))).await
    }

    #[tokio::test]
    async fn card_missing_file() -> Result<(), anyhow::Error> {
        let path = temp_path("svc_cards_missing");
        missing_is_absent(CardService::new(Arc::new(FileCardRepository::open(&path).await?))).await?;
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn card_missing_seaorm() -> Result<(), anyhow::Error> {
        missing_is_absent(CardService::new(Arc::new(SeaOrmCardRepository::new(get_db().await?)))).await
    }

    #[tokio::test]
    async fn storage_failure_reaches_caller_and_keeps_card() -> Result<(), anyhow::Error> {
        let path = temp_path("svc_cards_blocked");
        let svc = CardService::new(Arc::new(FileCardRepository::open(&path).await?));
        let c = svc.create_card(draft("travel", 9, "Virtual")).await?;

        let blocker = block_writes(&path).await?;
        let res = svc.update_card(c.card_id, CardPatch::alias("renamed")).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))), "got {res:?}");
        assert_eq!(svc.get_card(c.card_id).await?, Some(c.clone()));

        let res = svc.delete_card(c.card_id).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))), "got {res:?}");
        assert_eq!(svc.get_card(c.card_id).await?, Some(c.clone()));
        assert_eq!(svc.list_cards_for_account(9).await?, vec![c]);

        tokio::fs::remove_dir(&blocker).await?;
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
