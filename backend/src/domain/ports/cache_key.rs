//! Cache key type shared by page cache adapters.
use sha2::{Digest, Sha256};

const KEY_PREFIX: &str = "page:v1:";

/// Cache key identifying one rendered page.
///
/// Keys derived with [`PageCacheKey::for_request`] hash the request path and
/// query string, so `/?page=2` and `/?page=3` never share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageCacheKey(String);

impl PageCacheKey {
    /// Derive the key for a request path and raw query string.
    ///
    /// # Examples
    /// ```
    /// use yatube::domain::ports::PageCacheKey;
    ///
    /// let first = PageCacheKey::for_request("/", "page=1");
    /// assert_ne!(first, PageCacheKey::for_request("/", "page=2"));
    /// assert_eq!(first, PageCacheKey::for_request("/", "page=1"));
    /// assert!(first.as_str().starts_with("page:v1:"));
    /// ```
    pub fn for_request(path: &str, query: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(path.as_bytes());
        hasher.update(b"?");
        hasher.update(query.as_bytes());
        Self(format!("{KEY_PREFIX}{}", hex::encode(hasher.finalize())))
    }

    /// Borrow the underlying key as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for PageCacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for PageCacheKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Validates request-derived cache keys.
    use super::PageCacheKey;
    use rstest::rstest;

    #[rstest]
    #[case("/", "", "/group/cats/", "")]
    #[case("/", "page=2", "/", "page=3")]
    #[case("/a", "b", "/a?b", "")]
    fn distinct_requests_get_distinct_keys(
        #[case] left_path: &str,
        #[case] left_query: &str,
        #[case] right_path: &str,
        #[case] right_query: &str,
    ) {
        assert_ne!(
            PageCacheKey::for_request(left_path, left_query),
            PageCacheKey::for_request(right_path, right_query)
        );
    }

    #[rstest]
    #[case("/profile/leo/", "page=1")]
    #[case("/group/cats/", "")]
    fn derived_keys_are_prefixed_hex_digests(#[case] path: &str, #[case] query: &str) {
        let key = PageCacheKey::for_request(path, query);
        let digest = key.as_str().strip_prefix("page:v1:").expect("versioned prefix");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key.to_string(), key.as_ref());
    }
}
