//! The five-stage discovery-and-clone pipeline.

pub mod cloner;
pub mod fan_in;
pub mod filter;
pub mod group_expander;
pub mod materializer;
pub mod project_fetcher;

pub use cloner::clone_rate_limited;
pub use fan_in::fan_in;
pub use filter::filter_clone_needed;
pub use group_expander::expand_groups;
pub use materializer::materialize;
pub use project_fetcher::fetch_projects;
