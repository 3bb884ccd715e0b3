//! Core types for the moodmap sentiment dashboard.
//!
//! This crate defines the domain vocabulary shared by every other crate in
//! the workspace: sentiment modes, ranked sector rows, figure documents,
//! the [`SentimentPipeline`](pipeline::SentimentPipeline) and
//! [`UserStore`](store::UserStore) traits, and the TTL-based
//! [`PanelCache`](cache::PanelCache) that fronts the pipeline. It contains
//! no HTTP or database code; backends live in their own crates and plug in
//! through the traits defined here.

pub mod cache;
pub mod clock;
pub mod figure;
pub mod mode;
pub mod pipeline;
pub mod sector;
pub mod store;
pub mod user;
