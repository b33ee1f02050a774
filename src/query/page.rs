//! Pagination parameters
//!
//! A page/limit pair, clamped on construction so downstream code never
//! sees a zero or unbounded window.

/// Smallest allowed page size
pub const MIN_LIMIT: u32 = 1;
/// Largest allowed page size
pub const MAX_LIMIT: u32 = 1000;
/// Page size used when the request does not specify one
pub const DEFAULT_LIMIT: u32 = 200;

/// Validated pagination request: 1-based page number plus page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Page number, 1-based
    pub number: u32,
    /// Page size, within [MIN_LIMIT, MAX_LIMIT]
    pub limit: u32,
}

impl Page {
    /// Build from raw request values, clamping out-of-range inputs
    ///
    /// Page numbers below 1 floor to 1; limits clamp into
    /// [`MIN_LIMIT`]..=[`MAX_LIMIT`] and default to [`DEFAULT_LIMIT`].
    pub fn new(number: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            number: number.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(MIN_LIMIT, MAX_LIMIT),
        }
    }

    /// Number of records to skip before this page starts
    pub fn skip(&self) -> usize {
        ((self.number - 1) as usize) * (self.limit as usize)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = Page::default();
        assert_eq!(page.number, 1);
        assert_eq!(page.limit, DEFAULT_LIMIT);
        assert_eq!(page.skip(), 0);
    }

    #[test]
    fn test_clamping() {
        let page = Page::new(Some(0), Some(0));
        assert_eq!(page.number, 1);
        assert_eq!(page.limit, MIN_LIMIT);

        let page = Page::new(Some(3), Some(5000));
        assert_eq!(page.limit, MAX_LIMIT);
    }

    #[test]
    fn test_skip() {
        assert_eq!(Page::new(Some(1), Some(2)).skip(), 0);
        assert_eq!(Page::new(Some(2), Some(2)).skip(), 2);
        assert_eq!(Page::new(Some(4), Some(25)).skip(), 75);
    }
}
