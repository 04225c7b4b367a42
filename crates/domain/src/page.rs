//! Pagination primitives shared by every listing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{UnknownVariantError, ValidationError};

/// Page size used when the caller does not provide one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Sort key used when the caller does not provide one.
pub const DEFAULT_SORT_BY: &str = "name";

/// Requested sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        })
    }
}

impl FromStr for SortDirection {
    type Err = UnknownVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(UnknownVariantError::new("sort direction", s))
        }
    }
}

/// Which slice of a listing to return.
///
/// `page_size` is strictly positive once constructed. `sort_by` and
/// `sort_direction` are accepted for compatibility with existing callers but
/// listings are always returned newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
    sort_by: String,
    sort_direction: SortDirection,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_direction: SortDirection::Asc,
        }
    }
}

impl PageRequest {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] on `pageSize` when `page_size` is zero.
    pub fn new(page_number: u32, page_size: u32) -> Result<Self, ValidationError> {
        if page_size == 0 {
            return Err(ValidationError::single(
                "pageSize",
                "Page size must be greater than zero",
            ));
        }
        Ok(Self {
            page_number,
            page_size,
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_sort(mut self, sort_by: impl Into<String>, sort_direction: SortDirection) -> Self {
        self.sort_by = sort_by.into();
        self.sort_direction = sort_direction;
        self
    }

    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn sort_by(&self) -> &str {
        &self.sort_by
    }

    #[must_use]
    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Number of matching rows to skip.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number) * u64::from(self.page_size)
    }
}

/// One page of a listing together with the number of rows matching overall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page_number: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: &PageRequest) -> Self {
        Self {
            items,
            total,
            page_number: request.page_number,
            page_size: request.page_size,
        }
    }

    /// Number of pages needed to show `total` rows.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.page_size.max(1)))
    }

    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page_number: self.page_number,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_zero_page_size() {
        let err = PageRequest::new(0, 0).unwrap_err();
        assert!(err.has("pageSize"));
    }

    #[test]
    fn should_default_to_first_page_of_ten_sorted_by_name() {
        let request = PageRequest::default();
        assert_eq!(request.page_number(), 0);
        assert_eq!(request.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(request.sort_by(), "name");
        assert_eq!(request.sort_direction(), SortDirection::Asc);
    }

    #[test]
    fn should_compute_offset_from_page_number_and_size() {
        let request = PageRequest::new(3, 25).unwrap();
        assert_eq!(request.offset(), 75);
    }

    #[test]
    fn should_not_overflow_offset_on_large_pages() {
        let request = PageRequest::new(u32::MAX, u32::MAX).unwrap();
        assert_eq!(request.offset(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }

    #[test]
    fn should_round_total_pages_up() {
        let request = PageRequest::new(0, 10).unwrap();
        assert_eq!(Page::<u8>::new(vec![], 0, &request).total_pages(), 0);
        assert_eq!(Page::<u8>::new(vec![], 10, &request).total_pages(), 1);
        assert_eq!(Page::<u8>::new(vec![], 11, &request).total_pages(), 2);
    }

    #[test]
    fn should_parse_sort_direction_ignoring_case() {
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert_eq!("ASC".parse::<SortDirection>().unwrap(), SortDirection::Asc);
        assert!("sideways".parse::<SortDirection>().is_err());
    }

    #[test]
    fn should_keep_request_coordinates_when_mapping_items() {
        let request = PageRequest::new(2, 5).unwrap();
        let page = Page::new(vec![1, 2], 12, &request).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.page_number, 2);
        assert_eq!(page.total, 12);
    }
}
