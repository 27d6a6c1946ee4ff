//! Platform capabilities: LAN address discovery and sharing the control URL
//!
//! Both are blocking OS calls; the engine runs them on the blocking pool.

use std::net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket};
use std::process::Command;

use prompter_core::prelude::*;
use url::Url;

/// Public resolver the route probe "connects" to. A UDP connect only selects
/// a route; no packet is sent.
const ROUTE_PROBE_TARGET: &str = "8.8.8.8:80";

/// Finds the IPv4 address other devices on the LAN can reach us at
#[cfg_attr(test, mockall::automock)]
pub trait AddressLookup: Send + Sync {
    fn local_ipv4(&self) -> Result<Ipv4Addr>;
}

/// Asks the OS which local address would route to the outside world
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteProbeLookup;

impl AddressLookup for RouteProbeLookup {
    fn local_ipv4(&self) -> Result<Ipv4Addr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))
            .map_err(|e| Error::ip_lookup(e.to_string()))?;
        socket
            .connect(ROUTE_PROBE_TARGET)
            .map_err(|e| Error::ip_lookup(format!("no route to the network ({})", e)))?;

        match socket.local_addr() {
            Ok(SocketAddr::V4(addr)) if !addr.ip().is_unspecified() => Ok(*addr.ip()),
            Ok(addr) => Err(Error::ip_lookup(format!("unusable address {}", addr.ip()))),
            Err(e) => Err(Error::ip_lookup(e.to_string())),
        }
    }
}

/// Always answers with a configured address
#[derive(Debug, Clone, Copy)]
pub struct FixedAddress(pub Ipv4Addr);

impl AddressLookup for FixedAddress {
    fn local_ipv4(&self) -> Result<Ipv4Addr> {
        Ok(self.0)
    }
}

/// Hands the control URL to something outside the application
#[cfg_attr(test, mockall::automock)]
pub trait ShareTarget: Send + Sync {
    fn share(&self, url: &str) -> Result<()>;
}

/// Opens the URL in a browser
#[derive(Debug, Clone, Default)]
pub struct BrowserShare {
    /// Browser command; empty uses the platform opener
    pub browser: String,
}

impl ShareTarget for BrowserShare {
    fn share(&self, url: &str) -> Result<()> {
        open_url_in_browser(url, &self.browser).map_err(|e| Error::share(e.to_string()))
    }
}

/// Open a URL in the system browser (fire-and-forget).
///
/// If `browser` is non-empty it is used as the command, otherwise the
/// platform default opener.
fn open_url_in_browser(url: &str, browser: &str) -> std::io::Result<()> {
    if !browser.is_empty() {
        Command::new(browser).arg(url).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "macos")]
    {
        Command::new("open").arg(url).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open").arg(url).spawn()?;
        return Ok(());
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("cmd").args(["/C", "start", "", url]).spawn()?;
        return Ok(());
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no browser opener available for this platform",
        ));
    }

    #[allow(unreachable_code)]
    Ok(())
}

/// The address to advertise for a server bound at `local_addr`.
///
/// A wildcard bind is reachable on every interface, so the LAN address comes
/// from `lookup`. A specific bind address is advertised as is.
pub fn advertised_ip(local_addr: SocketAddr, lookup: &dyn AddressLookup) -> Result<IpAddr> {
    let ip = local_addr.ip();
    if ip.is_unspecified() {
        lookup.local_ipv4().map(IpAddr::V4)
    } else {
        Ok(ip)
    }
}

/// `http://<ip>:<port>` as shown in the pairing overlay
pub fn control_url(ip: IpAddr, port: u16) -> Result<String> {
    let mut url = Url::parse("http://localhost/").map_err(|e| Error::server(e.to_string()))?;
    url.set_ip_host(ip)
        .map_err(|_| Error::server(format!("cannot use {} as host", ip)))?;
    url.set_port(Some(port))
        .map_err(|_| Error::server(format!("cannot use port {}", port)))?;

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_url_ipv4() {
        let url = control_url(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 23)), 8080).unwrap();
        assert_eq!(url, "http://192.168.1.23:8080");
    }

    #[test]
    fn test_control_url_ipv6_is_bracketed() {
        let url = control_url("fe80::1".parse().unwrap(), 9000).unwrap();
        assert_eq!(url, "http://[fe80::1]:9000");
    }

    #[test]
    fn test_wildcard_bind_uses_lookup() {
        let mut lookup = MockAddressLookup::new();
        lookup
            .expect_local_ipv4()
            .times(1)
            .returning(|| Ok(Ipv4Addr::new(10, 0, 0, 7)));

        let ip = advertised_ip("0.0.0.0:8080".parse().unwrap(), &lookup).unwrap();
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)));
    }

    #[test]
    fn test_specific_bind_skips_lookup() {
        let mut lookup = MockAddressLookup::new();
        lookup.expect_local_ipv4().never();

        let ip = advertised_ip("127.0.0.1:8080".parse().unwrap(), &lookup).unwrap();
        assert_eq!(ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }

    #[test]
    fn test_lookup_failure_propagates() {
        let mut lookup = MockAddressLookup::new();
        lookup
            .expect_local_ipv4()
            .returning(|| Err(Error::ip_lookup("network unreachable")));

        let err = advertised_ip("0.0.0.0:8080".parse().unwrap(), &lookup).unwrap_err();
        assert_eq!(err.to_string(), "Couldn't fetch local IP: network unreachable");
    }

    #[test]
    fn test_fixed_address() {
        let lookup = FixedAddress(Ipv4Addr::new(192, 168, 0, 2));
        assert_eq!(lookup.local_ipv4().unwrap(), Ipv4Addr::new(192, 168, 0, 2));
    }

    #[test]
    fn test_missing_browser_command_is_share_error() {
        let share = BrowserShare {
            browser: "/nonexistent/browser-binary".to_string(),
        };
        let err = share.share("http://127.0.0.1:8080").unwrap_err();
        assert!(matches!(err, Error::Share { .. }));
    }
}
