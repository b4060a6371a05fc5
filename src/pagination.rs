//! Offset-based paging primitives and the JSON paging envelope.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Ordering applied to a sorted listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Only a case-insensitive `"asc"` sorts ascending; anything else,
    /// including typos, sorts descending.
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Rows to skip. An offset beyond `i64::MAX` clamps there, which still
    /// lies past the last row.
    pub fn offset(&self) -> i64 {
        i64::from(self.page)
            .checked_mul(i64::from(self.size))
            .unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One slice of a larger result set together with the total match count.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: usize, request: PageRequest) -> Self {
        Self {
            content,
            total_elements,
            request,
        }
    }

    pub fn total_pages(&self) -> usize {
        match usize::try_from(self.request.size) {
            Ok(0) => 0,
            Ok(size) => self.total_elements.div_ceil(size),
            Err(_) => usize::from(self.total_elements > 0),
        }
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            request: self.request,
        }
    }
}

/// Paging envelope returned to API clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_pages: usize,
    pub total_elements: usize,
    pub page_size: u32,
    pub page_number: u32,
    pub total_page_elements: usize,
    /// Sort column exactly as requested.
    pub sort_by: String,
    /// Sort direction exactly as requested.
    pub direction: String,
}

impl<T> PageResponse<T> {
    pub fn of(page: Page<T>, sort_by: impl Into<String>, direction: impl Into<String>) -> Self {
        let total_pages = page.total_pages();
        Self {
            total_page_elements: page.content.len(),
            total_pages,
            total_elements: page.total_elements,
            page_size: page.request.size,
            page_number: page.request.page,
            content: page.content,
            sort_by: sort_by.into(),
            direction: direction.into(),
        }
    }
}
