//! Prelude module for the calendrica crate.
//!
//! Re-exports the derive_more `Display` derive used by the field, unit and era enums.

pub use derive_more::Display;
