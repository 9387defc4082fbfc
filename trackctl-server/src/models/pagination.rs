//! Pagination types for the track list
//!
//! Query parsing is lenient: anything that does not parse is treated as
//! absent and replaced by its default, never reported as a client error.

/// Maximum records per page
const MAX_COUNT: i64 = 10;

/// Records per page when `count` is absent or out of range
const DEFAULT_COUNT: i64 = 10;

/// Normalized page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    start: i64,
    count: i64,
}

impl Page {
    /// Create a page window with normalization.
    ///
    /// - `start` below 0 becomes 0
    /// - `count` outside 1..=10 becomes 10
    pub fn new(start: i64, count: i64) -> Self {
        Self {
            start: start.max(0),
            count: if (1..=MAX_COUNT).contains(&count) {
                count
            } else {
                DEFAULT_COUNT
            },
        }
    }

    /// SQL OFFSET value.
    pub fn offset(&self) -> i64 {
        self.start
    }

    /// SQL LIMIT value.
    pub fn limit(&self) -> i64 {
        self.count
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(0, DEFAULT_COUNT)
    }
}

/// Raw query parameters for `GET /tracks`
///
/// Kept as strings so that a malformed value never rejects the request.
#[derive(Debug, Clone, Default)]
pub struct PageParams {
    pub start: Option<String>,
    pub count: Option<String>,
}

impl PageParams {
    /// Collect `start` and `count` from decoded query pairs.
    ///
    /// The first occurrence of a repeated key wins; other keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "start" => &mut params.start,
                "count" => &mut params.count,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

fn parse_lenient(value: Option<&str>) -> i64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

impl From<PageParams> for Page {
    fn from(params: PageParams) -> Self {
        Self::new(
            parse_lenient(params.start.as_deref()),
            parse_lenient(params.count.as_deref()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(start: Option<&str>, count: Option<&str>) -> PageParams {
        PageParams {
            start: start.map(str::to_owned),
            count: count.map(str::to_owned),
        }
    }

    #[test]
    fn defaults_when_absent() {
        let page = Page::from(params(None, None));
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), 10);
        assert_eq!(page, Page::default());
    }

    #[test]
    fn keeps_in_range_values() {
        let page = Page::from(params(Some("20"), Some("5")));
        assert_eq!(page.offset(), 20);
        assert_eq!(page.limit(), 5);

        assert_eq!(Page::new(0, 1).limit(), 1);
        assert_eq!(Page::new(0, 10).limit(), 10);
    }

    #[test]
    fn out_of_range_count_resets_to_default() {
        assert_eq!(Page::from(params(None, Some("0"))).limit(), 10);
        assert_eq!(Page::from(params(None, Some("999"))).limit(), 10);
        assert_eq!(Page::from(params(None, Some("-3"))).limit(), 10);
        assert_eq!(Page::new(0, 11).limit(), 10);
    }

    #[test]
    fn negative_start_clamps_to_zero() {
        assert_eq!(Page::from(params(Some("-5"), None)).offset(), 0);
    }

    #[test]
    fn first_occurrence_wins() {
        let pairs = vec![
            ("count".to_string(), "3".to_string()),
            ("sort".to_string(), "song".to_string()),
            ("count".to_string(), "7".to_string()),
            ("start".to_string(), "4".to_string()),
        ];
        let page = Page::from(PageParams::from_pairs(pairs));
        assert_eq!(page.limit(), 3);
        assert_eq!(page.offset(), 4);
    }

    #[test]
    fn unparsable_values_are_absent() {
        let page = Page::from(params(Some("abc"), Some("ten")));
        assert_eq!(page, Page::default());

        let page = Page::from(params(Some("99999999999999999999"), Some("")));
        assert_eq!(page, Page::default());
    }
}
