pub mod string_validator;
pub mod text_cleaner;
pub mod date_time;
pub mod request_info;
pub mod random_string;
pub mod enum_introspector;

pub use enum_introspector::{ErrorKind, IntrospectionError};
