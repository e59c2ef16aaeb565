use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::{AppError, Result};

const DELIMITER: char = '|';
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Last-seen `(date, id)` position of a keyset page.
///
/// Rows are ordered `date DESC, id DESC`; the next page starts strictly
/// below this position. The wire form is `YYYY-MM-DD|<id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cursor {
    pub date: NaiveDate,
    pub id: i64,
}

impl Cursor {
    pub fn new(date: NaiveDate, id: i64) -> Self {
        Self { date, id }
    }

    /// Encode into the opaque token handed to clients
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.date.format(DATE_FORMAT), DELIMITER, self.id)
    }

    /// Decode a token produced by [`Cursor::encode`]
    pub fn decode(token: &str) -> Result<Self> {
        let (date, id) = token
            .split_once(DELIMITER)
            .ok_or_else(|| AppError::invalid_cursor(format!("'{}' has no delimiter", token)))?;

        Self::from_parts(date, id)
    }

    /// Build a cursor from the separate `cursorDate` / `cursorId` query values
    pub fn from_parts(date: &str, id: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|_| {
            AppError::invalid_cursor(format!("invalid cursor date '{}', expected YYYY-MM-DD", date))
        })?;

        let id: i64 = id
            .trim()
            .parse()
            .map_err(|_| AppError::invalid_cursor(format!("invalid cursor id '{}'", id)))?;

        if id < 0 {
            return Err(AppError::invalid_cursor("cursor id cannot be negative"));
        }

        Ok(Self { date, id })
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for Cursor {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}
