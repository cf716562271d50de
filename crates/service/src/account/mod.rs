pub mod repository;
pub mod service;

pub use repository::{AccountRepository, FileAccountRepository, SeaOrmAccountRepository};
pub use service::AccountService;
