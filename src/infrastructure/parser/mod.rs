pub mod sql_parser;

pub use sql_parser::{ParseError, ShowColumnsStatement, SqlParser};
