//! Core library for the i18n-sheets command line application.
//!
//! The library converts nested JSON translation files into a spreadsheet with
//! one sheet per file and one column per language, and back. File adapters
//! live under [`io`], the translation tree in [`model`], the key-path
//! flattening logic in [`flatten`], argument validation in [`plan`], and the
//! two conversion pipelines under [`sync`].

pub mod batch;
pub mod error;
pub mod flatten;
pub mod format;
pub mod io;
pub mod model;
pub mod plan;
pub mod sync;

pub use error::{Result, ToolError};
