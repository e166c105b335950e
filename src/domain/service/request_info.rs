use std::net::{IpAddr, Ipv4Addr};

use crate::domain::entity::RequestContext;

const UNKNOWN_IP: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// クライアントのIPアドレスを返す
///
/// 優先順位: `Client-IP` とピアアドレスが両方あれば `Client-IP`、次にピアアドレス、
/// `Client-IP`、最後に `X-Forwarded-For`。カンマ区切りなら最後の要素をそのまま使う。
/// IPアドレスとして解釈できなければ `0.0.0.0`。
pub fn get_ip(ctx: &RequestContext) -> IpAddr {
    let client = non_empty(&ctx.client_ip);
    let remote = non_empty(&ctx.remote_addr);
    let forward = non_empty(&ctx.forwarded_for);

    let ip = match (client, remote, forward) {
        (Some(client), Some(_), _) => client,
        (None, Some(remote), _) => remote,
        (Some(client), None, _) => client,
        (None, None, Some(forward)) => forward,
        (None, None, None) => return UNKNOWN_IP,
    };

    // 空白は取り除かない (", 2.2.2.2" は不正なアドレス)
    let last = ip.rsplit(',').next().unwrap_or(ip);
    last.parse().unwrap_or(UNKNOWN_IP)
}

/// `User-Agent` ヘッダー（なければ `None`）
pub fn get_useragent(ctx: &RequestContext) -> Option<&str> {
    ctx.user_agent.as_deref()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(ctx: RequestContext) -> String {
        get_ip(&ctx).to_string()
    }

    #[test]
    fn client_header_wins_when_remote_also_present() {
        let ctx = RequestContext::builder()
            .client_ip("10.0.0.1")
            .remote_addr("192.168.1.5")
            .forwarded_for("8.8.8.8")
            .build();
        assert_eq!(ip(ctx), "10.0.0.1");
    }

    #[test]
    fn remote_then_client_then_forwarded() {
        assert_eq!(ip(RequestContext::builder().remote_addr("192.168.1.5").build()), "192.168.1.5");
        assert_eq!(ip(RequestContext::builder().client_ip("10.0.0.1").build()), "10.0.0.1");
        assert_eq!(ip(RequestContext::builder().forwarded_for("8.8.8.8").build()), "8.8.8.8");
    }

    #[test]
    fn forwarded_chain_uses_last_entry() {
        let ctx = RequestContext::builder().forwarded_for("1.1.1.1, 2.2.2.2,3.3.3.3").build();
        assert_eq!(ip(ctx), "3.3.3.3");
    }

    #[test]
    fn forwarded_entry_with_leading_space_falls_back() {
        let ctx = RequestContext::builder().forwarded_for("1.1.1.1, 2.2.2.2").build();
        assert_eq!(ip(ctx), "0.0.0.0");

        let ctx = RequestContext::builder().remote_addr(" 10.0.0.1").build();
        assert_eq!(ip(ctx), "0.0.0.0");
    }

    #[test]
    fn empty_values_count_as_missing() {
        let ctx = RequestContext::builder().client_ip("").remote_addr("172.16.0.9").build();
        assert_eq!(ip(ctx), "172.16.0.9");
    }

    #[test]
    fn invalid_or_missing_address_falls_back() {
        assert_eq!(ip(RequestContext::default()), "0.0.0.0");
        assert_eq!(ip(RequestContext::builder().remote_addr("localhost").build()), "0.0.0.0");
        assert_eq!(ip(RequestContext::builder().remote_addr("300.1.1.1").build()), "0.0.0.0");
    }

    #[test]
    fn accepts_ipv6() {
        let ctx = RequestContext::builder().remote_addr("::1").build();
        assert_eq!(ip(ctx), "::1");
    }

    #[test]
    fn user_agent_is_passed_through() {
        let ctx = RequestContext::builder().user_agent("curl/8.0").build();
        assert_eq!(get_useragent(&ctx), Some("curl/8.0"));
        assert_eq!(get_useragent(&RequestContext::default()), None);
        assert_eq!(get_useragent(&RequestContext::builder().user_agent("").build()), Some(""));
    }
}
