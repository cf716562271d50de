//! SeaORM entities for accounts and cards, their drafts, and DB connection helpers.

pub mod errors;
pub mod db;
pub mod account;
pub mod card;

#[cfg(test)]
mod tests;
