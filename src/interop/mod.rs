//! Interoperability with JSON.
//!
//! This module converts issues to and from `serde_json` values and renders
//! formatted trees in the `{ "_issues": [...], "<field>": { ... } }` shape form
//! libraries consume.

pub mod json;

pub use json::{escape_field_key, issues_from_json, IssueParseError, ToJson};
