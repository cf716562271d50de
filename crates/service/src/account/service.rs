use std::sync::Arc;
use tracing::{debug, info, instrument};

use models::account::{self, AccountDraft};

use crate::account::repository::AccountRepository;
use crate::errors::ServiceError;

/// Application service encapsulating the account lifecycle.
///
/// Updates are read-modify-write without locking: concurrent updates of one
/// account race and the last write wins.
pub struct AccountService<R: AccountRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: AccountRepository + ?Sized> AccountService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// All accounts, in storage order.
    pub async fn list_accounts(&self) -> Result<Vec<account::Model>, ServiceError> {
        self.repo.list().await
    }

    pub async fn get_account(&self, account_id: i64) -> Result<Option<account::Model>, ServiceError> {
        self.repo.get(account_id).await
    }

    /// Store a new account. Field contents are not validated.
    #[instrument(skip(self, draft), fields(client_id = draft.client_id))]
    pub async fn create_account(&self, draft: AccountDraft) -> Result<account::Model, ServiceError> {
        let created = self.repo.insert(draft).await?;
        info!(account_id = created.account_id, "account_created");
        Ok(created)
    }

    /// Replace `iban`, `bic_swift` and `client_id` of an existing account with the draft's values.
    ///
    /// Fields are not merged: the caller sends current values for anything it keeps.
    /// Returns `None` and writes nothing when the account does not exist.
    #[instrument(skip(self, draft))]
    pub async fn update_account(
        &self,
        account_id: i64,
        draft: AccountDraft,
    ) -> Result<Option<account::Model>, ServiceError> {
        let Some(mut existing) = self.repo.get(account_id).await? else {
            debug!("account_update_missing");
            return Ok(None);
        };
        existing.apply_draft(draft);
        let updated = self.repo.update(existing).await?;
        if updated.is_some() {
            info!("account_updated");
        }
        Ok(updated)
    }

    /// Remove an account. Cards pointing at it are left untouched; deleting an unknown id is a no-op.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, account_id: i64) -> Result<(), ServiceError> {
        let existed = self.repo.delete(account_id).await?;
        info!(existed, "account_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::repository::{FileAccountRepository, SeaOrmAccountRepository};
    use crate::test_support::{block_writes, get_db, temp_path};
    use std::collections::HashSet;

    fn draft(iban: &str, bic: &str, client_id: i64) -> AccountDraft {
        AccountDraft { iban: iban.into(), bic_swift: bic.into(), client_id }
    }

    async fn lifecycle<R: AccountRepository + ?Sized>(svc: AccountService<R>) -> Result<(), anyhow::Error> {
        assert!(svc.list_accounts().await?.is_empty());

        let mut ids = HashSet::new();
        let mut created = Vec::new();
        for i in 0..5 {
            let a = svc.create_account(draft(&format!("DE{i}"), "X", i)).await?;
            assert!(ids.insert(a.account_id), "duplicate id {}", a.account_id);
            created.push(a);
        }

        // round-trip
        let first = created[0].clone();
        assert_eq!(svc.get_account(first.account_id).await?, Some(first.clone()));

        // full replacement of the three mutable fields
        let updated = svc
            .update_account(first.account_id, draft("GB1", "Y", 42))
            .await?
            .expect("account exists");
        assert_eq!(updated, account::Model { account_id: first.account_id, iban: "GB1".into(), bic_swift: "Y".into(), client_id: 42 });
        assert_eq!(svc.get_account(first.account_id).await?, Some(updated));

        // double delete is harmless and leaves the others alone
        svc.delete_account(first.account_id).await?;
        svc.delete_account(first.account_id).await?;
        assert!(svc.get_account(first.account_id).await?.is_none());
        let rest = svc.list_accounts().await?;
        assert_eq!(rest, created[1..].to_vec());
        Ok(())
    }

    async fn missing_is_absent<R: AccountRepository + ?Sized>(svc: AccountService<R>) -> Result<(), anyhow::Error> {
        assert!(svc.get_account(404).await?.is_none());
        // not an upsert
        assert!(svc.update_account(404, draft("DE1", "X", 1)).await?.is_none());
        assert!(svc.list_accounts().await?.is_empty());
        svc.delete_account(404).await?;
        Ok(())
    }

    #[tokio::test]
    async fn account_lifecycle_file() -> Result<(), anyhow::Error> {
        let path = temp_path("svc_accounts");
        lifecycle(AccountService::new(Arc::new(FileAccountRepository::open(&path).await?))).await?;
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn account_lifecycle_seaorm() -> Result<(), anyhow::Error> {
        let repo = SeaOrmAccountRepository::new(get_db().await?);
        lifecycle(AccountService::new(Arc::new(repo))).await
    }

    #[tokio::test]
    async fn account_missing_file() -> Result<(), anyhow::Error> {
        let path = temp_path("svc_accounts_missing");
        missing_is_absent(AccountService::new(Arc::new(FileAccountRepository::open(&path).await?))).await?;
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn account_missing_seaorm() -> Result<(), anyhow::Error> {
        let repo = SeaOrmAccountRepository::new(get_db().await?);
        missing_is_absent(AccountService::new(Arc::new(repo))).await
    }

    #[tokio::test]
    async fn service_accepts_trait_object() -> Result<(), anyhow::Error> {
        let path = temp_path("svc_accounts_dyn");
        let repo: Arc<dyn AccountRepository> = Arc::new(FileAccountRepository::open(&path).await?);
        let svc = AccountService::new(repo);
        let a = svc.create_account(draft("not-an-iban", "??", -1)).await?;
        // stored as-is, no format checks
        assert_eq!(a.iban, "not-an-iban");
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn storage_failure_reaches_caller_and_keeps_record() -> Result<(), anyhow::Error> {
        let path = temp_path("svc_accounts_blocked");
        let svc = AccountService::new(Arc::new(FileAccountRepository::open(&path).await?));
        let a = svc.create_account(draft("DE1", "X", 1)).await?;

        let blocker = block_writes(&path).await?;
        let res = svc.update_account(a.account_id, draft("DE2", "Y", 2)).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))), "got {res:?}");
        assert_eq!(svc.get_account(a.account_id).await?, Some(a.clone()));

        let res = svc.delete_account(a.account_id).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))), "got {res:?}");
        assert_eq!(svc.list_accounts().await?, vec![a]);

        tokio::fs::remove_dir(&blocker).await?;
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }
}
