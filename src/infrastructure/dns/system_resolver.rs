use hickory_resolver::Resolver;
use thiserror::Error;
use tracing::debug;

use crate::domain::repository::DnsResolver;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("failed to read system DNS configuration: {0}")]
    Init(#[from] std::io::Error),
}

impl From<ResolverError> for crate::Error {
    fn from(err: ResolverError) -> Self {
        crate::Error::Internal(err.to_string())
    }
}

/// OSのDNS設定 (`/etc/resolv.conf` など) を使うリゾルバ
///
/// 同期APIなので、非同期ランタイムの中からは `spawn_blocking` 経由で呼ぶこと。
pub struct SystemResolver {
    resolver: Resolver,
}

impl SystemResolver {
    pub fn new() -> Result<Self, ResolverError> {
        Ok(Self {
            resolver: Resolver::from_system_conf()?,
        })
    }
}

// 検索ドメインを付けずに引く
fn fqdn(domain: &str) -> String {
    if domain.ends_with('.') {
        domain.to_string()
    } else {
        format!("{}.", domain)
    }
}

impl DnsResolver for SystemResolver {
    fn has_mx_record(&self, domain: &str) -> bool {
        match self.resolver.mx_lookup(fqdn(domain)) {
            Ok(lookup) => lookup.iter().next().is_some(),
            Err(e) => {
                debug!(domain, error = %e, "MXレコードがありません");
                false
            }
        }
    }

    fn has_a_record(&self, domain: &str) -> bool {
        match self.resolver.ipv4_lookup(fqdn(domain)) {
            Ok(lookup) => lookup.iter().next().is_some(),
            Err(e) => {
                debug!(domain, error = %e, "Aレコードがありません");
                false
            }
        }
    }
}
