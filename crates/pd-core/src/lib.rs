//! Core types, configuration, and utilities for the postdeck tool.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Error types for configuration loading
//! - Configuration structures
//! - Domain types (`FeedEntry`, `PostDetails`, `CreatePost`, `Tag`)
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod types;

pub use config::{Config, OutputConfig, PostConfig};
pub use error::ConfigError;
pub use hash::{FxHashMap, FxHashSet, fx_hash_map_with_capacity, fx_hash_set_with_capacity};
pub use types::{CreatePost, FeedEntry, Flair, PostDetails, PostRequest, Tag, Tags};
