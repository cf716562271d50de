use std::sync::Arc;

use service::account::{AccountRepository, AccountService};
use service::card::{CardRepository, CardService};

/// Shared handler state. Services are built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<AccountService<dyn AccountRepository>>,
    pub cards: Arc<CardService<dyn CardRepository>>,
}

impl AppState {
    pub fn new(accounts: Arc<dyn AccountRepository>, cards: Arc<dyn CardRepository>) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(accounts)),
            cards: Arc::new(CardService::new(cards)),
        }
    }
}
