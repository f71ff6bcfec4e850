//! Error taxonomy for store operations.
//!
//! Every data-access and business-rule operation returns [`StoreResult`].
//! Errors are grouped into the kinds the presentation shell reacts to
//! differently: connection failures, validation failures (re-prompt the form),
//! integrity violations (duplicate key, foreign key, open rentals) and
//! not-found lookups.
//!
//! Raw `rusqlite` errors are classified on conversion, so a UNIQUE violation
//! raised by the database itself still surfaces as [`StoreError::Duplicate`].

use crate::libs::rental::RentalStatus;
use rusqlite::ErrorCode;
use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The database could not be opened or is unreachable.
    #[error("Database connection failed: {0}")]
    Connection(String),

    /// Input rejected by a business rule.
    #[error("{0}")]
    Validation(String),

    /// A rental lifecycle transition that is not allowed.
    #[error("Rental #{rental_id} cannot go from {from} to {to}: {reason}")]
    InvalidTransition {
        rental_id: i64,
        from: RentalStatus,
        to: RentalStatus,
        reason: String,
    },

    #[error("'{title}' has no copies left in stock")]
    OutOfStock { title: String },

    #[error("{entity} already exists: {identifier}")]
    Duplicate { entity: &'static str, identifier: String },

    #[error("Referenced record is missing or still in use: {0}")]
    ForeignKey(String),

    /// Deletion blocked because the record has open rentals.
    #[error("Cannot delete {entity} #{id}: it has {open} active rental(s)")]
    InUse { entity: &'static str, id: i64, open: i64 },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: &'static str, identifier: String },

    #[error("{0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity,
            identifier: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Errors caused by user input that a form should re-prompt for.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::InvalidTransition { .. } | Self::OutOfStock { .. })
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Duplicate { .. } | Self::ForeignKey(_) | Self::InUse { .. })
    }

    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(failure, detail) = &err {
            let detail = detail.clone().unwrap_or_else(|| failure.to_string());
            match failure.code {
                ErrorCode::ConstraintViolation => match failure.extended_code {
                    rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                        return Self::Duplicate {
                            entity: "Record",
                            identifier: detail,
                        }
                    }
                    rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => return Self::ForeignKey(detail),
                    // ON DELETE RESTRICT parents fail through SQLite's internal FK trigger.
                    rusqlite::ffi::SQLITE_CONSTRAINT_TRIGGER if detail.contains("FOREIGN KEY") => {
                        return Self::ForeignKey(detail)
                    }
                    rusqlite::ffi::SQLITE_CONSTRAINT_CHECK | rusqlite::ffi::SQLITE_CONSTRAINT_NOTNULL => {
                        return Self::Validation(detail)
                    }
                    _ => {}
                },
                ErrorCode::CannotOpen
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked
                | ErrorCode::NotADatabase
                | ErrorCode::PermissionDenied
                | ErrorCode::SystemIoFailure => return Self::Connection(detail),
                _ => {}
            }
        }
        Self::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn unique_violation_maps_to_duplicate() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (name TEXT UNIQUE)", []).unwrap();
        conn.execute("INSERT INTO t (name) VALUES ('a')", []).unwrap();
        let err: StoreError = conn.execute("INSERT INTO t (name) VALUES ('a')", []).unwrap_err().into();
        assert!(matches!(err, StoreError::Duplicate { .. }));
        assert!(err.is_integrity());
    }

    #[test]
    fn foreign_key_violation_maps_to_foreign_key() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", true).unwrap();
        conn.execute("CREATE TABLE p (id INTEGER PRIMARY KEY)", []).unwrap();
        conn.execute("CREATE TABLE c (p_id INTEGER NOT NULL REFERENCES p(id))", []).unwrap();
        let err: StoreError = conn.execute("INSERT INTO c (p_id) VALUES (42)", []).unwrap_err().into();
        assert!(matches!(err, StoreError::ForeignKey(_)));
    }

    #[test]
    fn restricted_parent_delete_maps_to_foreign_key() {
        let conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "foreign_keys", true).unwrap();
        conn.execute("CREATE TABLE p (id INTEGER PRIMARY KEY)", []).unwrap();
        conn.execute("CREATE TABLE c (p_id INTEGER NOT NULL REFERENCES p(id) ON DELETE RESTRICT)", []).unwrap();
        conn.execute("INSERT INTO p (id) VALUES (1)", []).unwrap();
        conn.execute("INSERT INTO c (p_id) VALUES (1)", []).unwrap();

        let err: StoreError = conn.execute("DELETE FROM p WHERE id = 1", []).unwrap_err().into();
        assert!(matches!(err, StoreError::ForeignKey(_)), "unexpected error: {:?}", err);
        assert!(err.is_integrity());
    }

    #[test]
    fn check_violation_maps_to_validation() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (n INTEGER CHECK (n >= 0))", []).unwrap();
        let err: StoreError = conn.execute("INSERT INTO t (n) VALUES (-1)", []).unwrap_err().into();
        assert!(err.is_validation());
    }
}
