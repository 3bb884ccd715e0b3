//! The production sentiment pipeline.
//!
//! Implements [`SentimentPipeline`](moodmap_core::pipeline::SentimentPipeline)
//! in three stages:
//!
//! 1. [`feed`] pulls per-constituent sentiment rows from an upstream HTTP
//!    feed and validates them,
//! 2. [`rank`] selects the strongest and weakest constituents of every
//!    sector,
//! 3. [`figure`] renders both selections into treemap figure documents.

mod feed;
mod figure;
mod pipeline;
mod rank;

pub mod error;

pub use error::{Error, Result};
pub use feed::{FeedClient, FeedRow};
pub use pipeline::FeedPipeline;
