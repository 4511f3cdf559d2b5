//! Validation issue types.
//!
//! This module provides [`Issue`], a single validation failure with a message and
//! an optional path, and [`Issues`], a non-empty collection used as the failure
//! side of [`ValidationResult`](crate::ValidationResult).

mod issues;

pub use issues::{Issue, Issues};
