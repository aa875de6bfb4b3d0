//! Generic sort/paginate engine over ordered entity collections.
//!
//! The engine is oblivious to entity semantics: any type exposing its
//! sortable attributes through [`SortKey`] can be paged. Sorting happens
//! before slicing, and the sort is stable, so rows that compare equal keep
//! the order the store returned them in.

use core::cmp::Ordering;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Sort direction for list-style queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    /// Largest first.
    #[serde(rename = "desc")]
    Descending,
}

impl FromStr for SortDirection {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            other => Err(CatalogError::InvalidArgument(format!(
                "sort direction must be 'asc' or 'desc', got '{other}'"
            ))),
        }
    }
}

/// Pagination and sorting parameters for a list-style query.
#[derive(Debug, Clone)]
pub struct PageRequest {
    /// Zero-based page index.
    pub page_number: u32,
    /// Rows per page; must be greater than zero.
    pub page_size: u32,
    /// Name of the attribute to sort by.
    pub sort_field: String,
    /// Direction the sort is applied in.
    pub direction: SortDirection,
}

impl PageRequest {
    /// Create a new page request.
    pub fn new(
        page_number: u32,
        page_size: u32,
        sort_field: impl Into<String>,
        direction: SortDirection,
    ) -> Self {
        Self {
            page_number,
            page_size,
            sort_field: sort_field.into(),
            direction,
        }
    }
}

/// One page of a sorted collection, with pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Rows on this page, in sorted order.
    pub items: Vec<T>,
    /// Zero-based index of this page.
    pub page_number: u32,
    /// Requested page size.
    pub page_size: u32,
    /// Total rows across all pages.
    pub total_elements: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether this is the last page (always `true` past the end).
    pub last: bool,
}

impl<T> Page<T> {
    /// Convert the page's items, keeping the pagination metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            last: self.last,
        }
    }
}

/// Exposes the sortable attributes of an entity to the pagination engine.
pub trait SortKey: Sized {
    /// Returns a comparator for `field`, or `None` if the entity has no
    /// sortable attribute with that name.
    fn comparator(field: &str) -> Option<fn(&Self, &Self) -> Ordering>;
}

/// Sort `rows` and slice out the requested page.
///
/// A `page_number` past the last page yields an empty item list with
/// correct totals and `last = true`. Pure read: `rows` is consumed,
/// nothing else is touched.
///
/// # Errors
///
/// Returns `CatalogError::InvalidArgument` if `page_size` is zero or
/// `sort_field` does not name a sortable attribute of `T`.
pub fn paginate<T: SortKey>(
    mut rows: Vec<T>,
    request: &PageRequest,
) -> Result<Page<T>, CatalogError> {
    if request.page_size == 0 {
        return Err(CatalogError::InvalidArgument(
            "page size must be greater than zero".to_owned(),
        ));
    }

    let compare = T::comparator(&request.sort_field).ok_or_else(|| {
        CatalogError::InvalidArgument(format!("unknown sort field: {}", request.sort_field))
    })?;

    // Stable sort: equal rows keep storage order in either direction.
    rows.sort_by(|a, b| match request.direction {
        SortDirection::Ascending => compare(a, b),
        SortDirection::Descending => compare(a, b).reverse(),
    });

    let total_elements = rows.len() as u64;
    let size = u64::from(request.page_size);
    let total_pages = total_elements.div_ceil(size);
    let last = u64::from(request.page_number) >= total_pages.saturating_sub(1);

    let start = u64::from(request.page_number) * size;
    let items: Vec<T> = rows
        .into_iter()
        .skip(usize::try_from(start).unwrap_or(usize::MAX))
        .take(request.page_size as usize)
        .collect();

    Ok(Page {
        items,
        page_number: request.page_number,
        page_size: request.page_size,
        total_elements,
        total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        last,
    })
}
