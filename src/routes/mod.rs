pub mod demographics;
pub mod docs;
pub mod properties;
