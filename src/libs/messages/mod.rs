//! User-facing text and the output macros that print it.

pub mod display;
pub mod macros;
pub mod types;

pub use types::Message;
