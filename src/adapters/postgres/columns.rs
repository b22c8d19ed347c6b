//! Column conversions shared by the repositories.

use std::fmt::Display;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode, Money};

/// Wraps a driver error with what we were doing when it happened.
pub(super) fn db_error(action: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, err))
}

/// True if `err` violated the named constraint.
pub(super) fn violates(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint() == Some(constraint),
        _ => false,
    }
}

/// Parses a TEXT enum column.
pub(super) fn parse_enum<T>(column: &str, value: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} value '{}': {}", column, value, e),
        )
    })
}

/// Reads a BIGINT kobo column.
pub(super) fn money(column: &str, kobo: i64) -> Result<Money, DomainError> {
    Money::from_minor(kobo).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} amount {}: {}", column, kobo, e),
        )
    })
}

/// Reads a non-negative count.
pub(super) fn count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or_default()
}

/// `ILIKE` pattern matching `term` anywhere, with wildcards in `term` escaped.
pub(super) fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
