// dhcpcd-prefs - Validation Utilities
// SPDX-License-Identifier: MIT

//! Syntax checks for the free-text address fields.
//!
//! Validation failures are never surfaced as errors; the session resets
//! the offending field to empty when input focus is lost.

use std::net::Ipv4Addr;
use std::str::FromStr;

/// Check a dotted-quad IPv4 literal. The empty string is rejected.
pub fn is_valid_ipv4_literal(s: &str) -> bool {
    Ipv4Addr::from_str(s).is_ok()
}

/// Check a single address, optionally carrying a `/prefix` CIDR suffix.
///
/// With `allow_cidr`, the string is split on the first `/`; the suffix
/// must be a base-10 integer in `[0, 32]` with no trailing characters.
/// Without it, any `/` fails the dotted-quad check.
pub fn is_valid_address(s: &str, allow_cidr: bool) -> bool {
    let (addr, cidr) = if allow_cidr {
        match s.split_once('/') {
            Some((addr, cidr)) => (addr, Some(cidr)),
            None => (s, None),
        }
    } else {
        (s, None)
    };
    if let Some(cidr) = cidr {
        match cidr.parse::<i64>() {
            Ok(n) if (0..=32).contains(&n) => {}
            _ => return false,
        }
    }
    is_valid_ipv4_literal(addr)
}

/// Check a space-separated address list, CIDR not allowed per token.
///
/// Empty tokens are skipped; an all-empty list (including `""`) is valid
/// and means "no value".
pub fn is_valid_address_list(s: &str) -> bool {
    s.split(' ')
        .filter(|token| !token.is_empty())
        .all(|token| is_valid_address(token, false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipv4_literal() {
        assert!(is_valid_ipv4_literal("192.168.1.1"));
        assert!(!is_valid_ipv4_literal("256.1.1.1"));
        assert!(!is_valid_ipv4_literal("10.0.0"));
        assert!(!is_valid_ipv4_literal("not-an-ip"));
        assert!(!is_valid_ipv4_literal(""));
    }

    #[test]
    fn test_address_with_cidr() {
        assert!(is_valid_address("192.168.1.5/24", true));
        assert!(is_valid_address("192.168.1.5/0", true));
        assert!(is_valid_address("192.168.1.5/32", true));
        assert!(is_valid_address("192.168.1.5", true));
        assert!(!is_valid_address("192.168.1.5/33", true));
        assert!(!is_valid_address("192.168.1.5/-1", true));
        assert!(!is_valid_address("192.168.1.5/24x", true));
        assert!(!is_valid_address("192.168.1.5/24/8", true));
        assert!(!is_valid_address("192.168.1.5/", true));
    }

    #[test]
    fn test_address_without_cidr() {
        assert!(is_valid_address("10.0.0.1", false));
        assert!(!is_valid_address("10.0.0.1/24", false));
    }

    #[test]
    fn test_address_list() {
        assert!(is_valid_address_list(""));
        assert!(is_valid_address_list("   "));
        assert!(is_valid_address_list("8.8.8.8"));
        assert!(is_valid_address_list("8.8.8.8 8.8.4.4"));
        assert!(is_valid_address_list("8.8.8.8  8.8.4.4"));
        assert!(!is_valid_address_list("10.0.0.1 bad"));
        assert!(!is_valid_address_list("10.0.0.1/8"));
    }
}
