//! Elapsed-time footer.

use colored::Colorize;
use std::io::Write;
use std::time::Instant;

use crate::view::View;

pub struct ElapsedView {
    pub start: Instant,
}

impl View for ElapsedView {
    fn render(&self, _width: usize, out: &mut dyn Write) -> usize {
        let seconds = self.start.elapsed().as_secs_f64();
        let text = format!("{} seconds\n", format!("{seconds:.2}").green());
        let _ = write!(out, "{text}");
        1
    }
}
