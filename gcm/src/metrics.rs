//! Per-host progress counters, mutated by the pipeline stages and read by
//! the renderer.

use crate::counter::Counter;

#[derive(Clone, Default)]
pub struct HostMetrics {
    /// Distinct groups discovered (root included).
    pub group_count: Counter,
    /// Projects discovered via group expansion.
    pub group_project_count: Counter,
    /// Directly-configured projects.
    pub direct_project_count: Counter,
    /// Repositories that are, or will be by the end of this run, on disk.
    pub clone_count: Counter,
    pub archived_count: Counter,
    /// Repositories successfully cloned during this run.
    pub cloned_now_count: Counter,
}

impl HostMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}
