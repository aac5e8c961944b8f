//! # quill-render
//!
//! Template rendering library for quill.
//!
//! This crate handles HTML page assembly using Askama.

pub mod templates;

pub use templates::{
    ArchiveTemplate, DocumentTemplate, IndexTemplate, NotFoundTemplate, PostEntry, YearGroup,
};
