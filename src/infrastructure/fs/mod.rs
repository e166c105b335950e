pub mod directory;

pub use directory::{is_windows, remove_dir, scan_dir_for_files, FileSystemError};
