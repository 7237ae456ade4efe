//! `gcm` — bulk GitLab repository mirroring tool.
//!
//! Given a declarative `workingCopies.yaml` describing one or more GitLab
//! hosts, each with a set of source groups and directly-named projects,
//! this crate discovers every reachable repository, decides which ones
//! need a local working copy, and clones them in parallel at a
//! per-host-controlled rate, reporting progress on the terminal as it
//! goes.

pub mod config;
pub mod counter;
pub mod error;
pub mod gitlab;
pub mod host;
pub mod logger;
pub mod metrics;
pub mod pipeline;
pub mod repository;
pub mod view;
