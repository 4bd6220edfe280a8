pub mod kv_store;
pub mod persistence;
pub mod selection;
