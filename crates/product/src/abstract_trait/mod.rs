pub mod code;
pub mod product;
