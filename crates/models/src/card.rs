use sea_orm::{entity::prelude::*, ActiveValue::NotSet, ConnectionTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "card")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub card_id: i64,
    pub card_alias: String,
    /// Advisory reference to `account.account_id`; no foreign key, no cascade.
    pub account_id: i64,
    /// Open label such as `Virtual` or `Physical`.
    pub type_of_card: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDraft {
    pub card_alias: String,
    pub account_id: i64,
    pub type_of_card: String,
}

impl CardDraft {
    pub fn into_model(self, card_id: i64) -> Model {
        Model {
            card_id,
            card_alias: self.card_alias,
            account_id: self.account_id,
            type_of_card: self.type_of_card,
        }
    }
}

/// Body of a card update. Only `card_alias` is ever applied; the other
/// fields are accepted so a client may send a whole record back.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPatch {
    pub card_alias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_of_card: Option<String>,
}

impl CardPatch {
    pub fn alias(card_alias: impl Into<String>) -> Self {
        Self { card_alias: card_alias.into(), ..Self::default() }
    }
}

impl From<CardDraft> for CardPatch {
    fn from(d: CardDraft) -> Self {
        Self { card_alias: d.card_alias, account_id: Some(d.account_id), type_of_card: Some(d.type_of_card) }
    }
}

impl Model {
    pub fn apply_patch(&mut self, patch: CardPatch) {
        self.card_alias = patch.card_alias;
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, draft: CardDraft) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        card_id: NotSet,
        card_alias: Set(draft.card_alias),
        account_id: Set(draft.account_id),
        type_of_card: Set(draft.type_of_card),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_account<C: ConnectionTrait>(db: &C, account_id: i64) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::AccountId.eq(account_id))
        .order_by_asc(Column::CardId)
        .all(db)
        .await?)
}

/// Write back every mutable column of `record`. `Ok(None)` when the row no longer exists.
pub async fn save<C: ConnectionTrait>(db: &C, record: Model) -> Result<Option<Model>, errors::ModelError> {
    let am = ActiveModel {
        card_id: sea_orm::ActiveValue::Unchanged(record.card_id),
        card_alias: Set(record.card_alias),
        account_id: Set(record.account_id),
        type_of_card: Set(record.type_of_card),
    };
    match am.update(db).await {
        Ok(m) => Ok(Some(m)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
