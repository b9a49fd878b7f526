//! Parsing of raw `?page=` arguments.

/// Interpreted form of a raw page argument.
///
/// Parsing is total: every input maps to a variant, so callers never have to
/// reject a request because of a malformed page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// No page argument was supplied, or it was blank.
    Missing,
    /// The argument is not an integer.
    Invalid,
    /// An integer page number, possibly out of range.
    Number(i64),
    /// A positive integer too large to represent.
    Overflow,
}

impl PageRequest {
    /// Interpret a raw query-string value.
    ///
    /// Surrounding whitespace is ignored. Negative values too large to
    /// represent are treated like any other number below one.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// assert_eq!(PageRequest::parse(None), PageRequest::Missing);
    /// assert_eq!(PageRequest::parse(Some(" 2 ")), PageRequest::Number(2));
    /// assert_eq!(PageRequest::parse(Some("two")), PageRequest::Invalid);
    /// ```
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(value) = raw.map(str::trim) else {
            return Self::Missing;
        };
        if value.is_empty() {
            return Self::Missing;
        }
        if let Ok(number) = value.parse::<i64>() {
            return Self::Number(number);
        }
        let (negative, digits) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value.strip_prefix('+').unwrap_or(value)),
        };
        if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
            return Self::Invalid;
        }
        if negative {
            Self::Number(i64::MIN)
        } else {
            Self::Overflow
        }
    }

    /// Resolve the request to a 1-based page number within `1..=num_pages`.
    ///
    /// `num_pages` is clamped to at least one.
    #[must_use]
    pub fn resolve(self, num_pages: usize) -> usize {
        let last = num_pages.max(1);
        match self {
            Self::Missing | Self::Invalid => 1,
            Self::Overflow => last,
            Self::Number(number) if number < 1 => 1,
            Self::Number(number) => usize::try_from(number).map_or(last, |n| n.min(last)),
        }
    }
}
