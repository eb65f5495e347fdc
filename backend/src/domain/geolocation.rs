//! Geolocation resolution policy.
//!
//! Turns whatever address the transport reported into a [`LocationLabel`].
//! Resolution never fails: malformed input, non-public addresses, lookup
//! errors and lookups without a city all land in the `"Unknown"` bucket.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use tracing::{debug, warn};

use super::LocationLabel;
use super::ports::GeoLocator;

/// Parse the originating client IP out of a raw address string.
///
/// Accepts a bare address, an address with a port (`1.2.3.4:5678`,
/// `[2001:db8::1]:443`), a bracketed IPv6 address, or a forwarding chain
/// (`client, proxy1, proxy2`) in which case the left-most entry is used.
/// IPv4-mapped IPv6 addresses are reduced to their IPv4 form.
///
/// # Examples
/// ```
/// use std::net::{IpAddr, Ipv4Addr};
///
/// use eduverse_backend::domain::parse_client_address;
///
/// let ip = parse_client_address("203.0.113.7, 10.0.0.1");
/// assert_eq!(ip, Some(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7))));
/// assert_eq!(parse_client_address("not an ip"), None);
/// ```
pub fn parse_client_address(raw: &str) -> Option<IpAddr> {
    let first = raw.split(',').next()?.trim();
    if first.is_empty() {
        return None;
    }

    let parsed = first
        .parse::<IpAddr>()
        .ok()
        .or_else(|| first.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
        .or_else(|| {
            first
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
                .and_then(|inner| inner.parse::<IpAddr>().ok())
        })?;

    Some(parsed.to_canonical())
}

/// Whether a geolocation database could plausibly know `ip`.
///
/// Loopback, private, link-local, shared, documentation, multicast and
/// unspecified ranges are never routed on the public internet.
pub fn is_publicly_routable(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => is_public_v4(v4),
        IpAddr::V6(v6) => is_public_v6(v6),
    }
}

fn is_public_v4(ip: Ipv4Addr) -> bool {
    let [first, second, ..] = ip.octets();
    let shared_address_space = first == 100 && (64..128).contains(&second);
    !(ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        || ip.is_documentation()
        || ip.is_multicast()
        || shared_address_space)
}

fn is_public_v6(ip: Ipv6Addr) -> bool {
    let first_segment = ip.segments()[0];
    let unique_local = (first_segment & 0xfe00) == 0xfc00;
    let link_local = (first_segment & 0xffc0) == 0xfe80;
    let documentation = first_segment == 0x2001 && ip.segments()[1] == 0x0db8;
    !(ip.is_loopback()
        || ip.is_unspecified()
        || ip.is_multicast()
        || unique_local
        || link_local
        || documentation)
}

/// Resolve the location label for a visit.
///
/// The label is the looked-up city; the region is not used as a fallback so
/// every bucket names the same kind of place.
pub async fn resolve_location<G>(locator: &G, client_address: Option<&str>) -> LocationLabel
where
    G: GeoLocator + ?Sized,
{
    let Some(raw) = client_address else {
        debug!("no client address available");
        return LocationLabel::unknown();
    };
    let Some(ip) = parse_client_address(raw) else {
        debug!(client_address = raw, "client address is not an IP address");
        return LocationLabel::unknown();
    };
    if !is_publicly_routable(ip) {
        debug!(%ip, "client address is not publicly routable");
        return LocationLabel::unknown();
    }

    match locator.locate(ip).await {
        Ok(Some(location)) => location
            .city
            .and_then(|city| LocationLabel::new(city).ok())
            .unwrap_or_else(LocationLabel::unknown),
        Ok(None) => {
            debug!(%ip, "geolocation lookup found no match");
            LocationLabel::unknown()
        }
        Err(error) => {
            warn!(%ip, %error, "geolocation lookup failed");
            LocationLabel::unknown()
        }
    }
}
