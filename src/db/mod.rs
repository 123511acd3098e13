pub mod connection;
pub mod properties;
pub mod zip_cache;
