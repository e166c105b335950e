pub mod data_type;
pub mod value;
pub mod column;
pub mod table;
pub mod age;
pub mod request_context;
pub mod scan_options;
pub mod sql_driver;
// src/domain/entity/mod.rs

pub use data_type::{DataType, Constraint};
pub use value::Value;
pub use column::Column;
pub use table::{Table, Row, TableError};
pub use age::{Age, AgeUnit, DateComponents};
pub use request_context::RequestContext;
pub use scan_options::{ScanOptions, DEFAULT_IMAGE_EXTENSIONS};
pub use sql_driver::SqlDriver;
