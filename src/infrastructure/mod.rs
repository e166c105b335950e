pub mod dns;
pub mod fs;
pub mod image;
pub mod parser;
pub mod storage;
