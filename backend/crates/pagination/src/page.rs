//! A single page of results plus navigation metadata.

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// One page of an ordered collection.
///
/// Serialises as an object with `items` followed by the navigation metadata a
/// listing template expects: `number`, `num_pages`, `count`, `has_next`,
/// `has_previous`, `next_page_number`, `previous_page_number`, `start_index`
/// and `end_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    number: usize,
    num_pages: usize,
    count: usize,
    page_size: usize,
}

impl<T> Page<T> {
    pub(crate) const fn new(
        items: Vec<T>,
        number: usize,
        num_pages: usize,
        count: usize,
        page_size: usize,
    ) -> Self {
        Self {
            items,
            number,
            num_pages,
            count,
            page_size,
        }
    }

    /// Items on this page, in collection order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page and return its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

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

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Number of the following page, if any.
    #[must_use]
    pub const fn next_page_number(&self) -> Option<usize> {
        if self.has_next() {
            Some(self.number + 1)
        } else {
            None
        }
    }

    /// Number of the preceding page, if any.
    #[must_use]
    pub const fn previous_page_number(&self) -> Option<usize> {
        if self.has_previous() {
            Some(self.number - 1)
        } else {
            None
        }
    }

    /// 1-based index of the first item on this page, or `0` when empty.
    #[must_use]
    pub const fn start_index(&self) -> usize {
        if self.count == 0 {
            return 0;
        }
        self.number
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .saturating_add(1)
    }

    /// 1-based index of the last item on this page, or `0` when empty.
    #[must_use]
    pub const fn end_index(&self) -> usize {
        if self.number == self.num_pages {
            return self.count;
        }
        self.number.saturating_mul(self.page_size)
    }

    /// Transform every item while keeping the page position.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
            page_size: self.page_size,
        }
    }
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Page", 10)?;
        state.serialize_field("items", &self.items)?;
        state.serialize_field("number", &self.number)?;
        state.serialize_field("num_pages", &self.num_pages)?;
        state.serialize_field("count", &self.count)?;
        state.serialize_field("has_next", &self.has_next())?;
        state.serialize_field("has_previous", &self.has_previous())?;
        state.serialize_field("next_page_number", &self.next_page_number())?;
        state.serialize_field("previous_page_number", &self.previous_page_number())?;
        state.serialize_field("start_index", &self.start_index())?;
        state.serialize_field("end_index", &self.end_index())?;
        state.end()
    }
}
