//! Per-host body view: clone root, host name, and three progress counts.

use colored::Colorize;
use std::io::Write;

use crate::metrics::HostMetrics;
use crate::view::text_format::{collapse_home_dir, truncate_back_to_width, truncate_front_to_width};
use crate::view::View;

pub struct HostBodyView {
    pub host_name: String,
    pub clone_root: String,
    pub metrics: HostMetrics,
}

impl View for HostBodyView {
    fn render(&self, width: usize, out: &mut dyn Write) -> usize {
        let clone_root = truncate_front_to_width(width, &collapse_home_dir(&self.clone_root));
        let host_name = truncate_back_to_width(width.saturating_sub(6).max(1), &self.host_name);

        let text = format!(
            "{}\n  <- {}:\n    {} projects in {} groups\n    {} direct projects\n    {} git clones ({} archived)\n",
            clone_root.cyan(),
            host_name.cyan(),
            self.metrics.group_project_count.load().to_string().magenta(),
            self.metrics.group_count.load().to_string().magenta(),
            self.metrics.direct_project_count.load().to_string().magenta(),
            self.metrics.clone_count.load().to_string().magenta(),
            self.metrics.archived_count.load().to_string().magenta(),
        );
        let _ = write!(out, "{text}");
        text.matches('\n').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_five_lines_with_counts() {
        let metrics = HostMetrics::new();
        metrics.group_project_count.add(3);
        metrics.group_count.add(1);
        metrics.direct_project_count.add(2);
        metrics.clone_count.add(5);
        metrics.archived_count.add(1);

        let view = HostBodyView {
            host_name: "gitlab.example.com".into(),
            clone_root: "/tmp/repos".into(),
            metrics,
        };

        let mut out = Vec::new();
        let lines = view.render(80, &mut out);
        let rendered = String::from_utf8(out).unwrap();

        assert_eq!(lines, 5);
        assert!(rendered.contains("3 projects in 1 groups"));
        assert!(rendered.contains("2 direct projects"));
        assert!(rendered.contains("5 git clones (1 archived)"));
    }
}
