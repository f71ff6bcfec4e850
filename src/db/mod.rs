//! SQLite persistence for the store.
//!
//! [`db::Db`] opens and migrates the database; the repositories borrow its
//! connection (or an open transaction) and issue parameterized statements:
//!
//! ```rust,no_run
//! use videostore::db::{db::Db, movies::Movies};
//! use videostore::libs::movie::MovieFilter;
//!
//! let db = Db::in_memory()?;
//! let movies = Movies::new(&db.conn).search(&MovieFilter::default())?;
//! # Ok::<(), videostore::libs::error::StoreError>(())
//! ```

/// Connection setup: pragmas, busy timeout and migrations.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

pub mod customers;
pub mod employees;
pub mod movies;
pub mod rentals;
