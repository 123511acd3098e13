pub mod property;
pub mod query;
pub mod search;
pub mod states;
