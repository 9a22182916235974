//! Name and property reconciliation
//!
//! Pure string helpers deciding whether a declared application already
//! matches what the gateway stores.

/// Qualify a relative record name with its zone.
///
/// Names ending in `.` or already ending with the zone are returned as-is.
pub fn fqdn(name: &str, zone: &str) -> String {
    if !name.ends_with('.') && !zone.is_empty() && !name.ends_with(zone) {
        format!("{name}.{zone}")
    } else {
        name.to_string()
    }
}

/// Everything after the first `.` of a name; empty when there is none
pub fn zone_from(name: &str) -> String {
    match name.find('.') {
        Some(index) if index > 0 => name[index + 1..].to_string(),
        _ => String::new(),
    }
}

/// Whether every `|`-separated token of `declared` appears in `remote`.
///
/// Order and extra remote tokens do not matter; empty tokens are ignored.
pub fn properties_contained(remote: &str, declared: &str) -> bool {
    let remote = format!("|{remote}|");
    declared
        .split('|')
        .filter(|token| !token.is_empty())
        .all(|token| remote.contains(&format!("|{token}|")))
}

/// Whether a stored absolute name equals the declared name once qualified
pub fn name_matches(remote: &str, declared: &str, zone: &str) -> bool {
    remote == fqdn(declared, zone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fqdn_appends_zone() {
        assert_eq!(fqdn("www", "example.com"), "www.example.com");
    }

    #[test]
    fn test_fqdn_short_circuits() {
        assert_eq!(fqdn("www.example.com.", "example.com"), "www.example.com.");
        assert_eq!(fqdn("host.example.com", "example.com"), "host.example.com");
        assert_eq!(fqdn("www", ""), "www");
    }

    #[test]
    fn test_zone_from() {
        assert_eq!(zone_from("host.example.com"), "example.com");
        assert_eq!(zone_from("nodots"), "");
        assert_eq!(zone_from(".leading"), "");
    }

    #[test]
    fn test_properties_contained() {
        assert!(properties_contained("a=1|b=2|c=3", "a=1|b=2"));
        assert!(properties_contained("a=1|b=2|", "b=2|a=1|"));
        assert!(!properties_contained("a=1|b=2", "a=1|d=4"));
        assert!(properties_contained("a=1", ""));
    }

    #[test]
    fn test_properties_match_whole_tokens() {
        assert!(!properties_contained("aa=1|b=2", "a=1"));
    }

    #[test]
    fn test_name_matches() {
        assert!(name_matches("www.example.com", "www", "example.com"));
        assert!(name_matches("www.example.com", "www.example.com", ""));
        assert!(!name_matches("www.example.com", "api", "example.com"));
    }
}
