pub mod collections;
pub mod ping;
pub mod query;
