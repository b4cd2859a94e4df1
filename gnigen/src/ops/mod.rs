//! Core operations.
//!
//! This module contains the business logic for gnigen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod export;

pub use check::check;
pub use export::export;
