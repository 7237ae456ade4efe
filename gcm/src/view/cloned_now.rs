//! "Cloned now" footer.
//!
//! Sums across every host's counter at render time rather than snapshotting
//! once, so the displayed total stays live across repaints.

use colored::Colorize;
use std::io::Write;

use crate::counter::Counter;
use crate::view::View;

pub struct ClonedNowView {
    pub per_host: Vec<Counter>,
}

impl View for ClonedNowView {
    fn render(&self, _width: usize, out: &mut dyn Write) -> usize {
        let total: i64 = self.per_host.iter().map(Counter::load).sum();
        let text = format!("{} cloned now\n", total.to_string().magenta());
        let _ = write!(out, "{text}");
        1
    }
}
