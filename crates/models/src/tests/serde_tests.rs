use serde_json::json;

use crate::{account, card};

#[test]
fn account_uses_camel_case_fields() {
    let a = account::Model { account_id: 3, iban: "DE1".into(), bic_swift: "X".into(), client_id: 1 };
    let v = serde_json::to_value(&a).unwrap();
    assert_eq!(v, json!({"accountId": 3, "iban": "DE1", "bicSwift": "X", "clientId": 1}));
}

#[test]
fn account_draft_ignores_client_supplied_id() {
    let d: account::AccountDraft =
        serde_json::from_value(json!({"accountId": 77, "iban": "DE1", "bicSwift": "X", "clientId": 1})).unwrap();
    assert_eq!(d.into_model(5).account_id, 5);
}

#[test]
fn account_draft_requires_every_field() {
    let r = serde_json::from_value::<account::AccountDraft>(json!({"iban": "DE1", "bicSwift": "X"}));
    assert!(r.is_err());
}

#[test]
fn card_patch_needs_only_alias() {
    let p: card::CardPatch = serde_json::from_value(json!({"cardAlias": "alias2"})).unwrap();
    assert_eq!(p, card::CardPatch::alias("alias2"));

    let full: card::CardPatch =
        serde_json::from_value(json!({"cardAlias": "a", "accountId": 4, "typeOfCard": "Physical"})).unwrap();
    assert_eq!(full.account_id, Some(4));
    assert_eq!(full.type_of_card.as_deref(), Some("Physical"));
}

#[test]
fn card_patch_only_touches_alias() {
    let mut c = card::Model { card_id: 1, card_alias: "old".into(), account_id: 2, type_of_card: "Virtual".into() };
    c.apply_patch(card::CardPatch {
        card_alias: "new".into(),
        account_id: Some(9),
        type_of_card: Some("Physical".into()),
    });
    assert_eq!(c, card::Model { card_id: 1, card_alias: "new".into(), account_id: 2, type_of_card: "Virtual".into() });
}
