pub mod repository;
pub mod service;

pub use repository::{CardRepository, FileCardRepository, SeaOrmCardRepository};
pub use service::CardService;
