//! The live progress view.
//!
//! A [`View`] renders itself into a width and reports how many lines it
//! wrote; a [`CompositeView`] is a header/body/footer stack of them. The
//! render loop (TTY mode) repaints in place by emitting an ANSI
//! cursor-up escape for the previous frame's line count before rendering
//! the next one; non-TTY mode renders the composite exactly once, after
//! the pipeline has drained.

mod cloned_now;
mod error;
mod host_body;
mod render_loop;
mod text_format;
mod time_elapsed;

pub use cloned_now::ClonedNowView;
pub use error::ErrorFooterView;
pub use host_body::HostBodyView;
pub use render_loop::{run_non_tty, run_tty_loop, CancelToken};
pub use text_format::{collapse_home_dir, truncate_back_to_width, truncate_front_to_width};
pub use time_elapsed::ElapsedView;

use std::io::Write;

/// Something that can render itself at a given terminal width.
///
/// Returns the number of lines written, so the render loop knows how far
/// to move the cursor back up on the next tick.
pub trait View: Send + Sync {
    fn render(&self, width: usize, out: &mut dyn Write) -> usize;
}

/// A stack of header, body and footer views rendered top to bottom.
///
/// The split exists only for readability at the call site — `render`
/// doesn't treat the three groups differently.
#[derive(Default)]
pub struct CompositeView {
    headers: Vec<Box<dyn View>>,
    bodies: Vec<Box<dyn View>>,
    footers: Vec<Box<dyn View>>,
}

impl CompositeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_header(&mut self, view: Box<dyn View>) {
        self.headers.push(view);
    }

    pub fn push_body(&mut self, view: Box<dyn View>) {
        self.bodies.push(view);
    }

    pub fn push_footer(&mut self, view: Box<dyn View>) {
        self.footers.push(view);
    }
}

impl View for CompositeView {
    fn render(&self, width: usize, out: &mut dyn Write) -> usize {
        self.headers
            .iter()
            .chain(self.bodies.iter())
            .chain(self.footers.iter())
            .map(|view| view.render(width, out))
            .sum()
    }
}

/// The ANSI escape that moves the cursor up by `lines`, used to repaint a
/// previous frame in place. Emits nothing for zero lines.
pub fn ansi_line_offset(lines: usize) -> String {
    if lines == 0 {
        String::new()
    } else {
        format!("\x1b[{lines}A")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str, usize);

    impl View for Fixed {
        fn render(&self, _width: usize, out: &mut dyn Write) -> usize {
            write!(out, "{}", self.0).unwrap();
            self.1
        }
    }

    #[test]
    fn composite_sums_line_counts_in_order() {
        let mut composite = CompositeView::new();
        composite.push_header(Box::new(Fixed("h\n", 1)));
        composite.push_body(Box::new(Fixed("b1\nb2\n", 2)));
        composite.push_footer(Box::new(Fixed("f\n", 1)));

        let mut out = Vec::new();
        let lines = composite.render(80, &mut out);

        assert_eq!(lines, 4);
        assert_eq!(String::from_utf8(out).unwrap(), "h\nb1\nb2\nf\n");
    }

    #[test]
    fn ansi_offset_zero_lines_is_empty() {
        assert_eq!(ansi_line_offset(0), "");
    }

    #[test]
    fn ansi_offset_formats_escape() {
        assert_eq!(ansi_line_offset(3), "\x1b[3A");
    }
}
