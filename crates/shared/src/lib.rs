pub mod config;
pub mod errors;
pub mod tenant;
pub mod utils;
