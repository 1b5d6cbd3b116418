//! Network delegates: address formatting, CIDR parsing and DNS lookups.
//!
//! `lookup_host` goes through the system resolver (`getaddrinfo`, so
//! `/etc/hosts` applies). Reverse, CNAME and TXT lookups need record-level
//! access and use `hickory-resolver` configured from the system resolv.conf.

use anyhow::{Context, Result, anyhow, bail};
use hickory_resolver::TokioAsyncResolver;
use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

/// `host:port`, bracketing hosts that contain a colon (IPv6 literals).
pub fn join_host_port(host: &str, port: &str) -> String {
    if host.contains(':') {
        format!("[{host}]:{port}")
    } else {
        format!("{host}:{port}")
    }
}

/// An address together with the network its prefix length implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr {
    pub ip: IpAddr,
    pub prefix: u8,
}

impl Cidr {
    /// `ip` with all host bits cleared.
    pub fn network(&self) -> IpAddr {
        match self.ip {
            IpAddr::V4(v4) => {
                let mask = u32::MAX.checked_shl(32 - u32::from(self.prefix)).unwrap_or(0);
                IpAddr::V4(Ipv4Addr::from(u32::from(v4) & mask))
            }
            IpAddr::V6(v6) => {
                let mask = u128::MAX.checked_shl(128 - u32::from(self.prefix)).unwrap_or(0);
                IpAddr::V6(Ipv6Addr::from(u128::from(v6) & mask))
            }
        }
    }

    pub fn network_string(&self) -> String {
        format!("{}/{}", self.network(), self.prefix)
    }
}

/// Parse `192.0.2.1/24` or `2001:db8::/32` style notation.
pub fn parse_cidr(s: &str) -> Result<Cidr> {
    let invalid = || anyhow!("invalid CIDR address: {s}");

    let (addr, len) = s.split_once('/').ok_or_else(invalid)?;
    let ip: IpAddr = addr.parse().map_err(|_| invalid())?;
    if len.is_empty() || !len.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let prefix: u8 = len.parse().map_err(|_| invalid())?;
    let bits = if ip.is_ipv4() { 32 } else { 128 };
    if prefix > bits {
        return Err(invalid());
    }
    Ok(Cidr { ip, prefix })
}

/// Addresses of `host`, in resolver order without duplicates.
pub fn lookup_host(host: &str, timeout: Option<Duration>) -> Result<Vec<String>> {
    block_on(async {
        let addrs = with_timeout(timeout, tokio::net::lookup_host((host, 0)))
            .await?
            .with_context(|| format!("lookup {host}"))?;
        let mut out: Vec<String> = Vec::new();
        for addr in addrs {
            let ip = addr.ip().to_string();
            if !out.contains(&ip) {
                out.push(ip);
            }
        }
        Ok(out)
    })
}

/// Names mapping to `addr` (reverse lookup). Names are fully qualified.
pub fn lookup_addr(addr: &str, timeout: Option<Duration>) -> Result<Vec<String>> {
    let ip: IpAddr = addr
        .parse()
        .map_err(|_| anyhow!("unrecognized address: {addr}"))?;
    block_on(async {
        let resolver = system_resolver()?;
        let names = with_timeout(timeout, resolver.reverse_lookup(ip))
            .await?
            .with_context(|| format!("lookup {addr}"))?;
        Ok(names.iter().map(|ptr| ptr.to_string()).collect())
    })
}

/// Canonical name of `host` after following CNAME records. A host without
/// CNAME records is its own canonical name.
pub fn lookup_cname(host: &str, timeout: Option<Duration>) -> Result<String> {
    block_on(async {
        let resolver = system_resolver()?;
        let lookup = with_timeout(timeout, resolver.lookup_ip(host))
            .await?
            .with_context(|| format!("lookup {host}"))?;
        let records = lookup.as_lookup().records();
        let canonical = records
            .iter()
            .filter_map(|record| record.data().and_then(|data| data.as_cname()))
            .last()
            .map(|cname| cname.0.to_string())
            .unwrap_or_else(|| lookup.query().name().to_string());
        Ok(canonical)
    })
}

/// TXT records of `name`; the character-strings of one record are concatenated.
pub fn lookup_txt(name: &str, timeout: Option<Duration>) -> Result<Vec<String>> {
    block_on(async {
        let resolver = system_resolver()?;
        let txt = with_timeout(timeout, resolver.txt_lookup(name))
            .await?
            .with_context(|| format!("lookup {name}"))?;
        Ok(txt
            .iter()
            .map(|record| {
                record
                    .txt_data()
                    .iter()
                    .map(|chunk| String::from_utf8_lossy(chunk))
                    .collect::<String>()
            })
            .collect())
    })
}

/// Run a lookup to completion on a throwaway current-thread runtime.
fn block_on<T>(fut: impl Future<Output = Result<T>>) -> Result<T> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;
    rt.block_on(fut)
}

fn system_resolver() -> Result<TokioAsyncResolver> {
    TokioAsyncResolver::tokio_from_system_conf().context("failed to load resolver configuration")
}

async fn with_timeout<F: Future>(
    timeout: Option<Duration>,
    fut: F,
) -> Result<F::Output> {
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(out) => Ok(out),
            Err(_) => bail!("lookup timed out after {limit:?}"),
        },
        None => Ok(fut.await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_host_port_brackets_ipv6() {
        assert_eq!(join_host_port("example.com", "80"), "example.com:80");
        assert_eq!(join_host_port("::1", "443"), "[::1]:443");
        assert_eq!(join_host_port("", "8080"), ":8080");
    }

    #[test]
    fn parse_cidr_masks_host_bits() {
        let cidr = parse_cidr("192.0.2.1/24").unwrap();
        assert_eq!(cidr.ip.to_string(), "192.0.2.1");
        assert_eq!(cidr.network_string(), "192.0.2.0/24");

        let v6 = parse_cidr("2001:db8:a0b:12f0::1/32").unwrap();
        assert_eq!(v6.ip.to_string(), "2001:db8:a0b:12f0::1");
        assert_eq!(v6.network_string(), "2001:db8::/32");

        assert_eq!(parse_cidr("10.1.2.3/0").unwrap().network_string(), "0.0.0.0/0");
        assert_eq!(parse_cidr("10.1.2.3/32").unwrap().network_string(), "10.1.2.3/32");
    }

    #[test]
    fn parse_cidr_rejects_malformed_input() {
        for bad in ["192.0.2.1", "192.0.2.1/33", "192.0.2.1/", "192.0.2.1/+8", "nope/8", "::1/129"] {
            let err = parse_cidr(bad).unwrap_err();
            assert!(
                err.to_string().contains("invalid CIDR address"),
                "expected CIDR error for {bad:?}"
            );
        }
    }

    #[test]
    fn lookup_host_passes_literals_through() {
        let addrs = lookup_host("127.0.0.1", None).unwrap();
        assert_eq!(addrs, vec!["127.0.0.1".to_string()]);
    }

    #[test]
    fn lookup_gives_up_after_timeout() {
        let err = block_on(with_timeout(
            Some(Duration::from_millis(1)),
            std::future::pending::<()>(),
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "lookup timed out after 1ms");

        let done = block_on(with_timeout(Some(Duration::from_secs(5)), async { 7 })).unwrap();
        assert_eq!(done, 7);
        assert_eq!(block_on(with_timeout(None, async { "ok" })).unwrap(), "ok");
    }

    #[test]
    fn lookup_addr_rejects_non_addresses() {
        let err = lookup_addr("not-an-ip", None).unwrap_err();
        assert!(err.to_string().contains("unrecognized address"));
    }
}
