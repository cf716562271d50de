use sea_orm::{entity::prelude::*, ActiveValue::NotSet, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub account_id: i64,
    pub iban: String,
    pub bic_swift: String,
    /// Owning client; not checked against any client registry.
    pub client_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Client-supplied account fields. The id is always assigned by storage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDraft {
    pub iban: String,
    pub bic_swift: String,
    pub client_id: i64,
}

impl AccountDraft {
    /// Build a record carrying `account_id`, e.g. for stores that assign ids themselves.
    pub fn into_model(self, account_id: i64) -> Model {
        Model { account_id, iban: self.iban, bic_swift: self.bic_swift, client_id: self.client_id }
    }
}

impl Model {
    /// Full replacement of every mutable field.
    pub fn apply_draft(&mut self, draft: AccountDraft) {
        self.iban = draft.iban;
        self.bic_swift = draft.bic_swift;
        self.client_id = draft.client_id;
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, draft: AccountDraft) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        account_id: NotSet,
        iban: Set(draft.iban),
        bic_swift: Set(draft.bic_swift),
        client_id: Set(draft.client_id),
    };
    Ok(am.insert(db).await?)
}

/// Write back every mutable column of `record`. `Ok(None)` when the row no longer exists.
pub async fn save<C: ConnectionTrait>(db: &C, record: Model) -> Result<Option<Model>, errors::ModelError> {
    let am = ActiveModel {
        account_id: sea_orm::ActiveValue::Unchanged(record.account_id),
        iban: Set(record.iban),
        bic_swift: Set(record.bic_swift),
        client_id: Set(record.client_id),
    };
    match am.update(db).await {
        Ok(m) => Ok(Some(m)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
