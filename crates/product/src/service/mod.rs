pub mod code;
pub mod command;
pub mod query;
