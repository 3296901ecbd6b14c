//! Editor features computed from a parsed recipe.
//!
//! These functions take language types in and return language types out;
//! the backend converts results to `lsp_types`.

pub mod completion;
pub mod rename;
