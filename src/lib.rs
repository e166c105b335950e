pub mod domain;
pub mod infrastructure;
pub mod interface;

pub use domain::service::date_time::{calculate_age, calculate_age_on};
pub use domain::service::enum_introspector::get_mysql_enum_values;
pub use domain::service::random_string::random_string;
pub use domain::service::request_info::{get_ip, get_useragent};
pub use domain::service::string_validator::{
    is_english, is_password_strong, remove_http_protocol, valid_date, valid_email, valid_timestamp,
    valid_url, valid_username,
};
pub use domain::service::text_cleaner::{clean_text, trim_extra_space};
pub use infrastructure::fs::{is_windows, remove_dir, scan_dir_for_files};
pub use infrastructure::image::img_resize;

// RustyKit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("SQL parsing error: {0}")]
    Parse(String),

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Execution error: {0}")]
    Execution(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Invalid state: {0}")]
    State(String),

    #[error("File system error: {0}")]
    FileSystem(#[from] infrastructure::fs::FileSystemError),

    #[error("Image error: {0}")]
    Image(#[from] infrastructure::image::ResizeError),

    #[error("Internal error: {0}")]
    Internal(String),
}
