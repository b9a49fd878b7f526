//! Fixed-size page planning.

use std::num::NonZeroUsize;

use crate::{Page, PageRequest, PaginationError};

/// Splits ordered collections into pages of a fixed size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: NonZeroUsize,
}

impl Paginator {
    /// Create a paginator producing pages of `page_size` items.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::ZeroPageSize`] when `page_size` is zero.
    pub fn new(page_size: usize) -> Result<Self, PaginationError> {
        NonZeroUsize::new(page_size)
            .map(|size| Self { page_size: size })
            .ok_or(PaginationError::ZeroPageSize)
    }

    /// Maximum number of items on a page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// Number of pages needed for `count` items. Always at least one.
    #[must_use]
    pub fn num_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size.get()).max(1)
    }

    /// Resolve a raw page argument against `count` items.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::Paginator;
    ///
    /// let paginator = Paginator::new(10).expect("non-zero page size");
    /// let plan = paginator.plan(11, Some("7"));
    /// assert_eq!(plan.number(), 2);
    /// assert_eq!(plan.offset(), 10);
    /// assert_eq!(plan.limit(), 10);
    /// ```
    #[must_use]
    pub fn plan(&self, count: usize, requested: Option<&str>) -> PagePlan {
        let num_pages = self.num_pages(count);
        let number = PageRequest::parse(requested).resolve(num_pages);
        PagePlan {
            number,
            num_pages,
            count,
            page_size: self.page_size.get(),
        }
    }

    /// Slice a fully materialised, already ordered collection.
    #[must_use]
    pub fn page<T>(&self, items: Vec<T>, requested: Option<&str>) -> Page<T> {
        let plan = self.plan(items.len(), requested);
        let window = items
            .into_iter()
            .skip(plan.offset())
            .take(plan.limit())
            .collect();
        plan.into_page(window)
    }
}

/// A resolved page position, ready to be filled with rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    number: usize,
    num_pages: usize,
    count: usize,
    page_size: usize,
}

impl PagePlan {
    /// 1-based page number.
    #[must_use]
    pub const fn number(&self) -> usize {
        self.number
    }

    /// Total number of pages.
    #[must_use]
    pub const fn num_pages(&self) -> usize {
        self.num_pages
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Number of items preceding this page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.number
            .saturating_sub(1)
            .saturating_mul(self.page_size)
    }

    /// Number of items that belong on this page.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.count
            .saturating_sub(self.offset())
            .min(self.page_size)
    }

    /// Attach the rows fetched for this plan.
    ///
    /// Rows beyond [`PagePlan::limit`] are discarded.
    #[must_use]
    pub fn into_page<T>(self, mut items: Vec<T>) -> Page<T> {
        items.truncate(self.limit());
        Page::new(items, self.number, self.num_pages, self.count, self.page_size)
    }
}
