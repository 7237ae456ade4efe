//! Error summary footer. Shows a count and a pointer to the log file; the
//! latest message is retained but not necessarily displayed.

use colored::Colorize;
use std::io::Write;

use crate::counter::Counter;
use crate::view::text_format::collapse_home_dir;
use crate::view::View;

pub struct ErrorFooterView {
    pub error_count: Counter,
    pub log_file_path: String,
}

impl View for ErrorFooterView {
    fn render(&self, _width: usize, out: &mut dyn Write) -> usize {
        let count = self.error_count.load();
        if count == 0 {
            return 0;
        }
        let text = format!(
            "--- {} errors ---\nSee log file:\n{}\n",
            count.to_string().red(),
            collapse_home_dir(&self.log_file_path).magenta(),
        );
        let _ = write!(out, "{text}");
        text.matches('\n').count()
    }
}
