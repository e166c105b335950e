/// DNSリゾルバ - メールアドレスのドメイン確認に使う
#[cfg_attr(test, mockall::automock)]
pub trait DnsResolver: Send + Sync {
    /// MXレコードが存在するか
    fn has_mx_record(&self, domain: &str) -> bool;

    /// Aレコードが存在するか
    fn has_a_record(&self, domain: &str) -> bool;
}
