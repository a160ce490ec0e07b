//! Case-insensitive access to API response headers.
//!
//! API-Sports responses carry account and rate-limit state in a small set of
//! well-known headers. [`Headers`] exposes a named accessor for each of them
//! plus generic case-insensitive lookup. Lookups never fail: an absent header
//! is reported as `None`.

use std::collections::HashMap;

/// A read-only, case-insensitive view over the headers of an API response.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use apisports::Headers;
///
/// let mut map = HashMap::new();
/// map.insert("Server".to_string(), "api-sports".to_string());
/// map.insert("x-ratelimit-requests-remaining".to_string(), "99".to_string());
///
/// let headers = Headers::new(&map);
/// assert_eq!(headers.server(), Some("api-sports"));
/// assert_eq!(headers.requests_remaining(), Some("99"));
/// assert_eq!(headers.rate_limit(), None);
/// assert!(headers.contains("SERVER"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Headers<'a> {
    headers: &'a HashMap<String, String>,
}

impl<'a> Headers<'a> {
    /// Wraps a header map. Lookup is case-insensitive regardless of how the
    /// map's keys are cased.
    #[must_use]
    pub const fn new(headers: &'a HashMap<String, String>) -> Self {
        Self { headers }
    }

    /// Looks up a header by name, ignoring case.
    ///
    /// Returns `None` when the header is absent instead of failing.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if the header is present, ignoring case.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The current version of the API proxy used by API-Sports/RapidAPI.
    #[must_use]
    pub fn server(&self) -> Option<&'a str> {
        self.get("server")
    }

    /// The number of requests allocated per day according to the subscription.
    #[must_use]
    pub fn requests_limit(&self) -> Option<&'a str> {
        self.get("x-ratelimit-requests-limit")
    }

    /// The number of remaining requests per day according to the subscription.
    #[must_use]
    pub fn requests_remaining(&self) -> Option<&'a str> {
        self.get("x-ratelimit-requests-remaining")
    }

    /// Maximum number of API calls per minute.
    #[must_use]
    pub fn rate_limit(&self) -> Option<&'a str> {
        self.get("x-ratelimit-limit")
    }

    /// Number of API calls remaining before reaching the per-minute limit.
    #[must_use]
    pub fn rate_limit_remaining(&self) -> Option<&'a str> {
        self.get("x-ratelimit-remaining")
    }

    /// The full header map.
    #[must_use]
    pub const fn all(&self) -> &'a HashMap<String, String> {
        self.headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("server".to_string(), "RapidAPI-1.2.8".to_string());
        map.insert("x-ratelimit-requests-limit".to_string(), "100".to_string());
        map.insert(
            "x-ratelimit-requests-remaining".to_string(),
            "73".to_string(),
        );
        map.insert("X-RateLimit-Limit".to_string(), "10".to_string());
        map.insert("X-RateLimit-Remaining".to_string(), "9".to_string());
        map
    }

    #[test]
    fn test_named_accessors_return_values() {
        let map = sample();
        let headers = Headers::new(&map);

        assert_eq!(headers.server(), Some("RapidAPI-1.2.8"));
        assert_eq!(headers.requests_limit(), Some("100"));
        assert_eq!(headers.requests_remaining(), Some("73"));
        assert_eq!(headers.rate_limit(), Some("10"));
        assert_eq!(headers.rate_limit_remaining(), Some("9"));
    }

    #[test]
    fn test_absent_header_is_none() {
        let map = HashMap::new();
        let headers = Headers::new(&map);

        assert_eq!(headers.server(), None);
        assert_eq!(headers.rate_limit(), None);
        assert_eq!(headers.get("anything"), None);
    }

    #[test]
    fn test_lookup_ignores_case_both_ways() {
        let map = sample();
        let headers = Headers::new(&map);

        assert_eq!(headers.get("SERVER"), Some("RapidAPI-1.2.8"));
        assert_eq!(headers.get("x-ratelimit-limit"), Some("10"));
        assert!(headers.contains("X-RATELIMIT-REQUESTS-LIMIT"));
        assert!(!headers.contains("x-missing"));
    }

    #[test]
    fn test_all_exposes_the_map() {
        let map = sample();
        let headers = Headers::new(&map);
        assert_eq!(headers.all().len(), 5);
    }
}
