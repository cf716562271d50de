//! Sample data for empty environments.
//!
//! Writes a handful of account/card pairs through the regular services.
//! Never required for correct operation; the server treats failures here as non-fatal.

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::info;

use models::account::AccountDraft;
use models::card::CardDraft;

use crate::account::{AccountRepository, AccountService};
use crate::card::{CardRepository, CardService};
use crate::errors::ServiceError;

const CARD_TYPES: [&str; 2] = ["Virtual", "Physical"];
const FIRST_NAMES: [&str; 8] = ["anna", "ben", "clara", "david", "elif", "felix", "greta", "hugo"];
const LAST_NAMES: [&str; 8] = ["bauer", "schmidt", "keller", "wagner", "yilmaz", "fischer", "weber", "koch"];
const ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// One generated account and the card that will point at it.
#[derive(Debug, Clone)]
pub struct SamplePair {
    pub account: AccountDraft,
    pub card_alias: String,
    pub type_of_card: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub accounts: usize,
    pub cards: usize,
}

/// Generate `count` pairs; client ids run 1..=count.
pub fn sample_pairs<G: Rng + ?Sized>(rng: &mut G, count: usize) -> Vec<SamplePair> {
    (0..count)
        .map(|i| SamplePair {
            account: AccountDraft {
                iban: random_german_iban(rng),
                bic_swift: random_bic(rng),
                client_id: i as i64 + 1,
            },
            card_alias: random_username(rng),
            type_of_card: CARD_TYPES.choose(rng).copied().unwrap_or("Virtual").to_string(),
        })
        .collect()
}

/// Insert sample pairs unless the account store already holds data.
/// Returns `None` when seeding was skipped.
pub async fn seed_sample_data<A, C>(
    accounts: &AccountService<A>,
    cards: &CardService<C>,
    pairs: usize,
) -> Result<Option<SeedReport>, ServiceError>
where
    A: AccountRepository + ?Sized,
    C: CardRepository + ?Sized,
{
    if !accounts.list_accounts().await?.is_empty() {
        info!(event = "seed_skipped", reason = "accounts_present", "sample data not written");
        return Ok(None);
    }

    let samples = sample_pairs(&mut StdRng::from_entropy(), pairs);
    let mut report = SeedReport { accounts: 0, cards: 0 };
    for sample in samples {
        let account = accounts.create_account(sample.account).await?;
        report.accounts += 1;
        cards
            .create_card(CardDraft {
                card_alias: sample.card_alias,
                account_id: account.account_id,
                type_of_card: sample.type_of_card,
            })
            .await?;
        report.cards += 1;
    }
    info!(event = "seed_done", accounts = report.accounts, cards = report.cards, "sample data written");
    Ok(Some(report))
}

/// `DE` + check digits + 8-digit bank code + 10-digit account number.
fn random_german_iban<G: Rng + ?Sized>(rng: &mut G) -> String {
    let bban: String = (0..18).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect();
    let check = 98 - mod97(&format!("{bban}DE00"));
    format!("DE{check:02}{bban}")
}

fn random_bic<G: Rng + ?Sized>(rng: &mut G) -> String {
    let bank: String = (0..4).map(|_| char::from(rng.gen_range(b'A'..=b'Z'))).collect();
    let location: String = (0..2)
        .map(|_| char::from(ALNUM[rng.gen_range(0..ALNUM.len())]))
        .collect();
    format!("{bank}DE{location}")
}

fn random_username<G: Rng + ?Sized>(rng: &mut G) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("user");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("sample");
    format!("{first}.{last}{}", rng.gen_range(10..100))
}

/// ISO 7064 mod 97 over an alphanumeric string (letters count as 10..=35).
fn mod97(s: &str) -> u32 {
    s.chars().fold(0u32, |acc, ch| match ch.to_digit(36) {
        Some(v) if v >= 10 => (acc * 100 + v) % 97,
        Some(v) => (acc * 10 + v) % 97,
        None => acc,
    })
}

/// IBAN checksum test: move the first four characters to the end and expect remainder 1.
pub fn iban_checksum_ok(iban: &str) -> bool {
    if iban.len() < 5 || !iban.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    let (head, tail) = iban.split_at(4);
    mod97(&format!("{tail}{head}")) == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::FileAccountRepository;
    use crate::card::FileCardRepository;
    use crate::test_support::temp_path;
    use std::sync::Arc;

    #[test]
    fn known_iban_checks_out() {
        assert!(iban_checksum_ok("DE89370400440532013000"));
        assert!(iban_checksum_ok("GB29NWBK60161331926819"));
        assert!(!iban_checksum_ok("DE88370400440532013000"));
        assert!(!iban_checksum_ok("DE1"));
    }

    #[test]
    fn generated_values_look_right() {
        let mut rng = StdRng::seed_from_u64(7);
        let pairs = sample_pairs(&mut rng, 20);
        assert_eq!(pairs.len(), 20);
        for (i, p) in pairs.iter().enumerate() {
            assert_eq!(p.account.client_id, i as i64 + 1);
            assert_eq!(p.account.iban.len(), 22);
            assert!(iban_checksum_ok(&p.account.iban), "bad iban {}", p.account.iban);
            assert_eq!(p.account.bic_swift.len(), 8);
            assert_eq!(&p.account.bic_swift[4..6], "DE");
            assert!(CARD_TYPES.contains(&p.type_of_card.as_str()));
            assert!(p.card_alias.contains('.'));
        }
    }

    #[tokio::test]
    async fn seeds_once_into_empty_store() -> Result<(), anyhow::Error> {
        let (ap, cp) = (temp_path("seed_accounts"), temp_path("seed_cards"));
        let accounts = AccountService::new(Arc::new(FileAccountRepository::open(&ap).await?));
        let cards = CardService::new(Arc::new(FileCardRepository::open(&cp).await?));

        let report = seed_sample_data(&accounts, &cards, 2).await?;
        assert_eq!(report, Some(SeedReport { accounts: 2, cards: 2 }));

        for a in accounts.list_accounts().await? {
            let owned = cards.list_cards_for_account(a.account_id).await?;
            assert_eq!(owned.len(), 1);
        }

        // a second run leaves existing data alone
        assert_eq!(seed_sample_data(&accounts, &cards, 2).await?, None);
        assert_eq!(accounts.list_accounts().await?.len(), 2);

        let _ = tokio::fs::remove_file(&ap).await;
        let _ = tokio::fs::remove_file(&cp).await;
        Ok(())
    }
}
