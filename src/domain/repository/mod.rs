pub mod sql_connection;
pub mod dns_resolver;

pub use sql_connection::{SqlConnection, RepositoryError};
pub use dns_resolver::DnsResolver;

#[cfg(test)]
pub use sql_connection::MockSqlConnection;
#[cfg(test)]
pub use dns_resolver::MockDnsResolver;
