pub mod number;
pub mod reader;
