//! Extraction of the raw client address from an incoming request.

use actix_web::HttpRequest;

/// Header set by reverse proxies with the originating client chain.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Raw address the request claims to come from.
///
/// A non-blank `X-Forwarded-For` value is returned untouched (the domain picks
/// the originating hop); otherwise the socket peer address is used. Parsing
/// and validation happen in the domain, not here.
pub fn client_address(req: &HttpRequest) -> Option<String> {
    let forwarded = req
        .headers()
        .get(FORWARDED_FOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    match forwarded {
        Some(chain) => Some(chain.to_owned()),
        None => req.peer_addr().map(|addr| addr.ip().to_string()),
    }
}
