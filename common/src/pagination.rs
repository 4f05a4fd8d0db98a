//! Abstractions for page-number pagination.

use derive_more::{Display, Error};

/// A page of `T`s along with its [`Pagination`] metadata.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page<T> {
    /// Items on this [`Page`], in the order the server returned them.
    pub items: Vec<T>,

    /// [`Pagination`] metadata of this [`Page`].
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Creates a new [`Page`] out of the provided items and [`Pagination`].
    #[must_use]
    pub fn new(items: Vec<T>, pagination: Pagination) -> Self {
        Self { items, pagination }
    }

    /// Maps items of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }

    /// Indicates whether this [`Page`] contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Pagination metadata of a [`Page`].
///
/// Total number of pages is always derived from the total number of items and
/// the page size, so it cannot be set independently.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "RawPagination")
)]
pub struct Pagination {
    /// Number of the page (starting from `1`).
    page_number: u32,

    /// Maximum number of items on a page.
    page_size: u32,

    /// Total number of items across all pages.
    total_count: u64,

    /// Total number of pages.
    total_pages: u64,
}

impl Pagination {
    /// Creates a new [`Pagination`] deriving the total number of pages.
    ///
    /// # Errors
    ///
    /// If `page_number` or `page_size` is zero.
    pub fn new(
        page_number: u32,
        page_size: u32,
        total_count: u64,
    ) -> Result<Self, InvalidPagination> {
        if page_number == 0 {
            return Err(InvalidPagination::ZeroPageNumber);
        }
        if page_size == 0 {
            return Err(InvalidPagination::ZeroPageSize);
        }
        Ok(Self {
            page_number,
            page_size,
            total_count,
            total_pages: total_count.div_ceil(u64::from(page_size)),
        })
    }

    /// Creates a new [`Pagination`] checking that the provided `total_pages`
    /// matches the one derived from `total_count` and `page_size`.
    ///
    /// # Errors
    ///
    /// If the parts are inconsistent.
    pub fn from_parts(
        page_number: u32,
        page_size: u32,
        total_count: u64,
        total_pages: u64,
    ) -> Result<Self, InvalidPagination> {
        let this = Self::new(page_number, page_size, total_count)?;
        if this.total_pages != total_pages {
            return Err(InvalidPagination::TotalPagesMismatch {
                expected: this.total_pages,
                actual: total_pages,
            });
        }
        Ok(this)
    }

    /// Returns the number of the page (starting from `1`).
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Returns the maximum number of items on a page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the total number of items across all pages.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns the total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Indicates whether a page after this one exists.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        u64::from(self.page_number) < self.total_pages
    }

    /// Indicates whether a page before this one exists.
    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.page_number > 1
    }
}

/// Wire representation of [`Pagination`].
#[cfg(feature = "serde")]
#[derive(Clone, Copy, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPagination {
    page_number: u32,
    page_size: u32,
    total_count: u64,
    total_pages: u64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPagination> for Pagination {
    type Error = InvalidPagination;

    fn try_from(raw: RawPagination) -> Result<Self, Self::Error> {
        let RawPagination {
            page_number,
            page_size,
            total_count,
            total_pages,
        } = raw;
        Self::from_parts(page_number, page_size, total_count, total_pages)
    }
}

/// Error of constructing an inconsistent [`Pagination`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum InvalidPagination {
    /// Page number is zero.
    #[display("page number must be at least 1")]
    ZeroPageNumber,

    /// Page size is zero.
    #[display("page size must be at least 1")]
    ZeroPageSize,

    /// Provided total number of pages doesn't match the derived one.
    #[display("total pages is {actual}, but {expected} is expected")]
    TotalPagesMismatch {
        /// Number of pages derived from the total count and page size.
        expected: u64,

        /// Number of pages provided.
        actual: u64,
    },
}

/// Sorting order.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Order {
    /// Ascending order.
    Ascending,

    /// Descending order.
    Descending,
}

impl Order {
    /// Returns the opposite [`Order`].
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{InvalidPagination, Pagination};

    #[test]
    fn derives_total_pages() {
        let p = Pagination::new(2, 10, 25).unwrap();
        assert_eq!(p.total_pages(), 3);
        assert!(p.has_next_page());
        assert!(p.has_previous_page());

        let p = Pagination::new(1, 10, 0).unwrap();
        assert_eq!(p.total_pages(), 0);
        assert!(!p.has_next_page());
        assert!(!p.has_previous_page());

        let p = Pagination::new(3, 10, 30).unwrap();
        assert_eq!(p.total_pages(), 3);
        assert!(!p.has_next_page());
    }

    #[test]
    fn rejects_inconsistent_parts() {
        assert_eq!(
            Pagination::new(0, 10, 1),
            Err(InvalidPagination::ZeroPageNumber),
        );
        assert_eq!(
            Pagination::new(1, 0, 1),
            Err(InvalidPagination::ZeroPageSize),
        );
        assert_eq!(
            Pagination::from_parts(1, 10, 25, 2),
            Err(InvalidPagination::TotalPagesMismatch {
                expected: 3,
                actual: 2,
            }),
        );
        assert!(Pagination::from_parts(2, 10, 25, 3).is_ok());
    }
}
