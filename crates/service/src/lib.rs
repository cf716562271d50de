//! Service layer owning the account and card lifecycle rules.
//! - Services depend only on their repository trait, injected at construction.
//! - Repositories come in two flavours: SeaORM and JSON file.
//! - Missing records surface as `None`, storage failures as `ServiceError`.

pub mod errors;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod account;
pub mod card;
pub mod seed;
