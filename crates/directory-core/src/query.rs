//! Listing query - filter, page window and pagination metadata
//!
//! Every input arrives as a raw string. Nothing here fails: values that do not
//! parse fall back to their defaults.

use crate::entities::User;

/// Default page number
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size
pub const DEFAULT_LIMIT: i64 = 10;

/// Restriction applied to a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Literal, case-insensitive substring matched against name, email or phone
    pub search: Option<String>,
    /// Exact match on the active flag
    pub active: Option<bool>,
}

impl UserFilter {
    /// Build a filter from raw query values.
    ///
    /// An empty search means no search. A present `active` always restricts:
    /// it is true only for the exact string `"true"` and false for anything
    /// else, the empty string included.
    pub fn from_raw(search: Option<&str>, active: Option<&str>) -> Self {
        let search = search.filter(|s| !s.is_empty()).map(ToString::to_string);

        let active = active.map(|a| a == "true");

        Self { search, active }
    }

    /// Whether a record passes both restrictions
    pub fn matches(&self, user: &User) -> bool {
        if let Some(active) = self.active {
            if user.is_active != active {
                return false;
            }
        }

        match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                [&user.name, &user.email, &user.phone]
                    .into_iter()
                    .any(|field| field.to_lowercase().contains(&term))
            }
        }
    }
}

/// Requested page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a page window from raw query values
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: positive(page).unwrap_or(DEFAULT_PAGE),
            limit: positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    /// Number of records before this page
    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
}

/// Pagination metadata returned with a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_users: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageMeta {
    pub fn new(request: &PageRequest, total: i64) -> Self {
        let total_pages = if total <= 0 {
            0
        } else {
            (total + request.limit - 1) / request.limit
        };

        Self {
            current_page: request.page,
            total_pages,
            total_users: total,
            has_next_page: request.page < total_pages,
            has_prev_page: request.page > 1,
        }
    }
}
