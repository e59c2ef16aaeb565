use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::period::parse_date;
use crate::core::{AppError, Cursor, Result};

/// Default upper bound for `limit` when none is configured
pub const DEFAULT_MAX_PAGE_SIZE: i64 = 500;

/// Raw listing query parameters as they arrive on the wire.
///
/// All fields are optional; [`ListQuery::into_request`] resolves them into
/// exactly one [`PaginationRequest`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Only rows on this calendar date (YYYY-MM-DD)
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    /// Opaque token from a previous page (`X-Next-Cursor`)
    #[serde(default)]
    pub cursor: Option<String>,
    #[serde(default)]
    pub cursor_date: Option<String>,
    #[serde(default)]
    pub cursor_id: Option<String>,
}

/// Tenant-independent filter applied by every pagination mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Restrict to one calendar date. Default: all dates.
    pub date: Option<NaiveDate>,
}

/// Listing strategy, resolved once at the request boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationRequest {
    /// Rows strictly below `after` in `(date, id)` order
    Keyset { limit: i64, after: Cursor },
    /// Classic window with a total count
    Offset { limit: i64, offset: i64 },
    /// Everything matching the filter
    Unbounded,
}

impl PaginationRequest {
    pub fn mode(&self) -> &'static str {
        match self {
            PaginationRequest::Keyset { .. } => "keyset",
            PaginationRequest::Offset { .. } => "offset",
            PaginationRequest::Unbounded => "unbounded",
        }
    }
}

impl ListQuery {
    /// Filter part of the query; a malformed `date` is an `InvalidPeriod`
    pub fn filter(&self) -> Result<ListFilter> {
        let date = match self.date.as_deref() {
            Some(raw) => Some(parse_date("date", Some(raw))?),
            None => None,
        };
        Ok(ListFilter { date })
    }

    /// Resolve the request shape.
    ///
    /// A cursor is never dropped silently: supplying one without `limit`, or
    /// supplying a half or doubled cursor, is an `InvalidCursor` error.
    pub fn into_request(&self, max_page_size: i64) -> Result<PaginationRequest> {
        let cursor = self.cursor()?;

        let Some(limit) = self.limit else {
            if cursor.is_some() {
                return Err(AppError::invalid_cursor("a cursor requires a limit"));
            }
            return Ok(PaginationRequest::Unbounded);
        };

        if limit < 1 || limit > max_page_size {
            return Err(AppError::validation(format!(
                "limit must be between 1 and {}, got {}",
                max_page_size, limit
            )));
        }

        match cursor {
            Some(after) => Ok(PaginationRequest::Keyset { limit, after }),
            None => {
                let offset = self.offset.unwrap_or(0);
                if offset < 0 {
                    return Err(AppError::validation(format!(
                        "offset cannot be negative, got {}",
                        offset
                    )));
                }
                Ok(PaginationRequest::Offset { limit, offset })
            }
        }
    }

    fn cursor(&self) -> Result<Option<Cursor>> {
        match (&self.cursor, &self.cursor_date, &self.cursor_id) {
            (None, None, None) => Ok(None),
            (Some(token), None, None) => Cursor::decode(token).map(Some),
            (None, Some(date), Some(id)) => Cursor::from_parts(date, id).map(Some),
            (Some(_), _, _) => Err(AppError::invalid_cursor(
                "use either cursor or cursorDate/cursorId, not both",
            )),
            (None, _, _) => Err(AppError::invalid_cursor(
                "cursorDate and cursorId must be supplied together",
            )),
        }
    }
}

/// Anything that can be listed with keyset pagination
pub trait Positioned {
    fn position(&self) -> Cursor;
}

/// Result of a listing, one variant per [`PaginationRequest`] mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Listing<R> {
    Page {
        rows: Vec<R>,
        #[serde(rename = "nextCursor")]
        next_cursor: Option<Cursor>,
    },
    Counted {
        rows: Vec<R>,
        total: i64,
    },
    All(Vec<R>),
}

impl<R: Positioned> Listing<R> {
    /// Wrap a keyset page; a short page means the listing is exhausted
    pub fn page(rows: Vec<R>, limit: i64) -> Self {
        let next_cursor = if (rows.len() as i64) < limit {
            None
        } else {
            rows.last().map(Positioned::position)
        };

        Listing::Page { rows, next_cursor }
    }
}

impl<R> Listing<R> {
    pub fn rows(&self) -> &[R] {
        match self {
            Listing::Page { rows, .. } | Listing::Counted { rows, .. } | Listing::All(rows) => rows,
        }
    }

    pub fn next_cursor(&self) -> Option<Cursor> {
        match self {
            Listing::Page { next_cursor, .. } => *next_cursor,
            _ => None,
        }
    }

    pub fn total(&self) -> Option<i64> {
        match self {
            Listing::Counted { total, .. } => Some(*total),
            _ => None,
        }
    }
}
