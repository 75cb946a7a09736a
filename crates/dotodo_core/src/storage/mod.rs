pub mod json_store;
pub mod layout;
pub mod ledger;
