pub mod extract;
pub mod handler;
pub mod server;

pub use server::{router, start_server, ServerConfig};
