//! Page-number pagination primitives for feed endpoints.
//!
//! The crate splits an ordered collection into fixed-size pages. Requested
//! page numbers arrive as raw query-string values and are resolved leniently:
//! missing or malformed values select the first page, values below one select
//! the first page, and values beyond the end select the last page. Resolution
//! never fails once a [`Paginator`] exists.
//!
//! Two entry points are provided:
//!
//! - [`Paginator::page`] slices an already materialised `Vec`.
//! - [`Paginator::plan`] resolves a page against a known total so callers can
//!   fetch only the window they need (for example with `LIMIT`/`OFFSET`) and
//!   then wrap the rows with [`PagePlan::into_page`].
//!
//! # Examples
//!
//! ```
//! use pagination::Paginator;
//!
//! let paginator = Paginator::new(10).expect("non-zero page size");
//! let page = paginator.page((1..=25).collect::<Vec<_>>(), Some("3"));
//! assert_eq!(page.number(), 3);
//! assert_eq!(page.num_pages(), 3);
//! assert_eq!(page.items(), &[21, 22, 23, 24, 25]);
//! assert!(!page.has_next());
//! ```

mod page;
mod paginator;
mod request;

pub use page::Page;
pub use paginator::{PagePlan, Paginator};
pub use request::PageRequest;

/// Errors raised while configuring pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// Page size must be at least one item.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
}
