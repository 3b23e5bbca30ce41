//! Domain types for the postdeck tool.
//!
//! # Module Organization
//!
//! - [`destination`] - Feed entries and the flairs destinations offer
//! - [`post`] - Per-destination post details and the create-post batch
//! - [`tag`] - Post tags
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use pd_core::{CreatePost, FeedEntry, PostDetails, Tag};
//! ```

pub mod destination;
pub mod post;
pub mod tag;

pub use destination::{FeedEntry, Flair};
pub use post::{CreatePost, PostDetails, PostRequest, Tags};
pub use tag::Tag;
