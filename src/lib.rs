//! # Videostore
//!
//! Back office for a movie rental store: staff accounts with roles, the
//! movie catalog with stock tracking, customers, rentals with late fees, and
//! rental/revenue reports with export to Excel, CSV and JSON.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use videostore::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
