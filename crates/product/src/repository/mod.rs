pub mod command;
pub mod query;
pub mod sequence;
