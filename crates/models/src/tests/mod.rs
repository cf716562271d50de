
/// JSON shape of records and drafts
pub mod serde_tests;
