use axum::http::HeaderMap;
use regex::Regex;
use std::sync::OnceLock;

pub const UNKNOWN: &str = "unknown";

static IPV4_REGEX: OnceLock<Regex> = OnceLock::new();

/// Four dotted octets, each 0-255
fn ipv4_pattern() -> &'static Regex {
    IPV4_REGEX.get_or_init(|| {
        Regex::new(r"^((25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)\.){3}(25[0-5]|2[0-4]\d|1\d\d|[1-9]?\d)$")
            .unwrap()
    })
}

/// Client address for the stored row.
///
/// Takes the first `x-forwarded-for` entry, else `x-real-ip`. A candidate
/// that is not a strict dotted-quad IPv4 address yields "unknown"; the
/// other header is not consulted in that case.
pub fn derive_client_ip(headers: &HeaderMap) -> String {
    let candidate = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .map(str::trim);

    match candidate {
        Some(ip) if ipv4_pattern().is_match(ip) => ip.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn test_first_forwarded_entry_wins() {
        let h = headers(&[
            ("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
            ("x-real-ip", "198.51.100.2"),
        ]);
        assert_eq!(derive_client_ip(&h), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback() {
        let h = headers(&[("x-real-ip", "198.51.100.2")]);
        assert_eq!(derive_client_ip(&h), "198.51.100.2");
    }

    #[test]
    fn test_missing_headers() {
        assert_eq!(derive_client_ip(&HeaderMap::new()), UNKNOWN);
    }

    #[test]
    fn test_invalid_addresses_are_unknown() {
        for bad in ["not-an-ip", "256.1.1.1", "1.2.3", "2001:db8::1", "01.2.3.4"] {
            let h = headers(&[("x-forwarded-for", bad)]);
            assert_eq!(derive_client_ip(&h), UNKNOWN, "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_invalid_forwarded_does_not_fall_through() {
        let h = headers(&[("x-forwarded-for", "garbage"), ("x-real-ip", "198.51.100.2")]);
        assert_eq!(derive_client_ip(&h), UNKNOWN);
    }
}
