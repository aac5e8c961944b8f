//! # quill-core
//!
//! Core library for the quill static blog generator.
//!
//! This crate provides the content model, configuration, the markdown
//! transform chain, author resolution, and the artifact generators that
//! together turn a tree of Markdown sources into a publishable site.

pub mod artifacts;
pub mod authors;
pub mod builder;
pub mod config;
pub mod excerpt;
pub mod frontmatter;
pub mod markdown;
pub mod models;
pub mod slug;
pub mod transform;

pub use artifacts::{default_generators, Artifact, ArtifactGenerator};
pub use authors::{AuthorDirectory, AuthorRecord, AuthorResolver};
pub use builder::{BuildError, SiteBuilder};
pub use config::{Config, MissingAuthorPolicy, SiteMetadata};
pub use models::{Frontmatter, Post, PostKind, SiteIndex};
pub use slug::slugify;
