//! Core library modules for the videostore application.
//!
//! Domain types (movies, customers, employees, rentals) live next to the
//! business rules that validate them and the [`store::Store`] service that
//! ties rules to the database layer. Reports, charts, exports and table
//! views build on top of the store.
//!
//! ```rust,no_run
//! use videostore::libs::config::Config;
//! use videostore::libs::movie::MovieFilter;
//! use videostore::libs::store::Store;
//!
//! let store = Store::open(&Config::load()?)?;
//! let movies = store.search_movies(&MovieFilter::title("alien"))?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod config;
pub mod customer;
pub mod data_storage;
pub mod employee;
pub mod error;
pub mod export;
pub mod messages;
pub mod money;
pub mod movie;
pub mod rental;
pub mod report;
pub mod rules;
pub mod sample;
pub mod security;
pub mod store;
pub mod view;
