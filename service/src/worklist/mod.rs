//! Worklist query state coordination.
//!
//! [`State`] holds sorting, pagination and filtering of the accession
//! worklist and derives the only [`list::Params`] ever sent for it. [`Store`]
//! makes it observable and debounces free-text input, while [`Feed`] fetches
//! the pages it describes.

pub mod debounce;
pub mod feed;
pub mod store;

use std::collections::BTreeSet;

use common::{define_kind, pagination::Order};
use derive_more::{Display, Error};
use itertools::Itertools as _;

use crate::{domain::accession, read::list};

pub use self::{debounce::Debounce, feed::Feed, store::Store};

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

define_kind! {
    #[doc = "Sortable and searchable column of the worklist."]
    enum Column {
        #[doc = "Accession number."]
        AccessionNumber = "accessionNumber",

        #[doc = "Accession status."]
        Status = "status",

        #[doc = "First name of the patient."]
        PatientFirstName = "patientFirstName",

        #[doc = "Last name of the patient."]
        PatientLastName = "patientLastName",

        #[doc = "Name of the requesting organization."]
        OrganizationName = "organizationName",
    }
}

/// Columns the free-text filter is matched against.
const SEARCHABLE: [Column; 4] = [
    Column::AccessionNumber,
    Column::PatientFirstName,
    Column::PatientLastName,
    Column::OrganizationName,
];

/// Sort descriptor of the worklist.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Sort {
    /// [`Column`] to sort by.
    pub column: Column,

    /// [`Order`] to sort in.
    pub order: Order,
}

impl Sort {
    /// Renders this [`Sort`] as a `sortOrder` expression.
    #[must_use]
    pub fn to_sort_order(self) -> String {
        match self.order {
            Order::Ascending => self.column.to_string(),
            Order::Descending => format!("-{}", self.column),
        }
    }

    /// Parses a `sortOrder` expression (`column` or `-column`).
    ///
    /// # Errors
    ///
    /// If the expression doesn't name a known [`Column`].
    pub fn parse(expr: &str) -> Result<Self, strum::ParseError> {
        let (order, column) = match expr.strip_prefix('-') {
            Some(column) => (Order::Descending, column),
            None => (Order::Ascending, expr),
        };
        Ok(Self {
            column: column.parse()?,
            order,
        })
    }
}

/// Error of setting an invalid page number or page size.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum InvalidPage {
    /// Page numbers start from `1`.
    #[display("page number must be at least 1")]
    ZeroPageNumber,

    /// Pages cannot be empty.
    #[display("page size must be at least 1")]
    ZeroPageSize,
}

/// Query state of the accession worklist.
///
/// Page number is always at least `1`, and any filter or sort change moves
/// back to the first page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct State {
    /// Number of the current page.
    page_number: u32,

    /// Size of a page.
    page_size: u32,

    /// Size of a page in the initial state.
    initial_page_size: u32,

    /// Current [`Sort`], if any.
    sort: Option<Sort>,

    /// Free-text filter as typed.
    raw_filter: String,

    /// Committed (debounced) free-text filter.
    filter: String,

    /// Selected status filters.
    statuses: BTreeSet<accession::Status>,
}

impl Default for State {
    fn default() -> Self {
        Self::initial(DEFAULT_PAGE_SIZE)
    }
}

impl State {
    /// Creates a new initial [`State`] with the provided page size.
    ///
    /// # Errors
    ///
    /// If the provided `page_size` is zero.
    pub fn new(page_size: u32) -> Result<Self, InvalidPage> {
        if page_size == 0 {
            return Err(InvalidPage::ZeroPageSize);
        }
        Ok(Self::initial(page_size))
    }

    /// Creates a new initial [`State`] with an already checked `page_size`.
    fn initial(page_size: u32) -> Self {
        Self {
            page_number: 1,
            page_size,
            initial_page_size: page_size,
            sort: None,
            raw_filter: String::new(),
            filter: String::new(),
            statuses: BTreeSet::new(),
        }
    }

    /// Returns the number of the current page.
    #[must_use]
    pub const fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Returns the page size.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the current [`Sort`], if any.
    #[must_use]
    pub const fn sort(&self) -> Option<Sort> {
        self.sort
    }

    /// Returns the free-text filter as typed.
    #[must_use]
    pub fn raw_filter(&self) -> &str {
        &self.raw_filter
    }

    /// Returns the committed free-text filter.
    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Returns the selected status filters.
    #[must_use]
    pub const fn statuses(&self) -> &BTreeSet<accession::Status> {
        &self.statuses
    }

    /// Stores the free-text filter as typed, without affecting the
    /// [`State::effective_query()`].
    pub fn set_free_text_filter(&mut self, raw: impl Into<String>) {
        self.raw_filter = raw.into();
    }

    /// Commits the (debounced) free-text filter.
    pub fn commit_free_text_filter(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.filter != value {
            self.filter = value;
            self.page_number = 1;
        }
    }

    /// Selects the provided status filter.
    pub fn add_status_filter(&mut self, status: accession::Status) {
        if self.statuses.insert(status) {
            self.page_number = 1;
        }
    }

    /// Deselects the provided status filter.
    pub fn remove_status_filter(&mut self, status: accession::Status) {
        if self.statuses.remove(&status) {
            self.page_number = 1;
        }
    }

    /// Clears free-text and status filters along with the sort, keeping the
    /// page size.
    pub fn clear_all_filters(&mut self) {
        self.raw_filter.clear();
        self.filter.clear();
        self.statuses.clear();
        self.sort = None;
        self.page_number = 1;
    }

    /// Replaces the current [`Sort`].
    pub fn set_sort(&mut self, sort: Option<Sort>) {
        self.sort = sort;
        self.page_number = 1;
    }

    /// Cycles sorting of the provided [`Column`]: ascending, descending, then
    /// unsorted.
    ///
    /// Sorting by another [`Column`] starts from ascending.
    pub fn toggle_sort(&mut self, column: Column) {
        let sort = match self.sort {
            Some(Sort {
                column: current,
                order: Order::Ascending,
            }) if current == column => Some(Sort {
                column,
                order: Order::Descending,
            }),
            Some(Sort {
                column: current,
                order: Order::Descending,
            }) if current == column => None,
            Some(_) | None => Some(Sort {
                column,
                order: Order::Ascending,
            }),
        };
        self.set_sort(sort);
    }

    /// Moves to the provided page.
    ///
    /// # Errors
    ///
    /// If the provided `page_number` is zero.
    pub fn set_page(&mut self, page_number: u32) -> Result<(), InvalidPage> {
        if page_number == 0 {
            return Err(InvalidPage::ZeroPageNumber);
        }
        self.page_number = page_number;
        Ok(())
    }

    /// Changes the page size, keeping the first visible row on the page.
    ///
    /// # Errors
    ///
    /// If the provided `page_size` is zero.
    pub fn set_page_size(&mut self, page_size: u32) -> Result<(), InvalidPage> {
        if page_size == 0 {
            return Err(InvalidPage::ZeroPageSize);
        }
        let first_row =
            u64::from(self.page_number - 1) * u64::from(self.page_size);
        let page_number = first_row / u64::from(page_size) + 1;
        // `page_number` never exceeds the current one.
        self.page_number = u32::try_from(page_number).unwrap_or(u32::MAX);
        self.page_size = page_size;
        Ok(())
    }

    /// Restores the initial [`State`].
    pub fn reset(&mut self) {
        *self = Self::initial(self.initial_page_size);
    }

    /// Indicates whether any filter or sort is applied.
    #[must_use]
    pub fn is_filtered(&self) -> bool {
        !self.filter.is_empty()
            || !self.statuses.is_empty()
            || self.sort.is_some()
    }

    /// Derives [`list::Params`] to fetch the current page with.
    #[must_use]
    pub fn effective_query(&self) -> list::Params {
        list::Params {
            page_number: Some(self.page_number),
            page_size: Some(self.page_size),
            filters: self.filters(),
            sort_order: self.sort.map(Sort::to_sort_order),
        }
    }

    /// Renders the filters in the Sieve grammar, if any is applied.
    fn filters(&self) -> Option<String> {
        let statuses = (!self.statuses.is_empty()).then(|| {
            format!(
                "{}=={}",
                Column::Status,
                self.statuses
                    .iter()
                    .map(|s| escape_sieve(s.as_str()))
                    .join("|"),
            )
        });
        let text = (!self.filter.is_empty()).then(|| {
            format!(
                "{}@=*{}",
                SEARCHABLE.iter().join("|"),
                escape_sieve(&self.filter),
            )
        });
        let filters = statuses.into_iter().chain(text).join(",");
        (!filters.is_empty()).then_some(filters)
    }
}

/// Escapes the Sieve operators in the provided filter `value`.
fn escape_sieve(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | ',' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
