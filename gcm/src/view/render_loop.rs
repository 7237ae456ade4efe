//! TTY and non-TTY render drivers.
//!
//! The renderer is a pure observer of the pipeline's counters: it never
//! coordinates with producers beyond the one-shot [`CancelToken`] the
//! orchestrator flips once the final stage's output has drained.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::view::{ansi_line_offset, View};

const TICK: Duration = Duration::from_millis(100);
const FALLBACK_WIDTH: usize = 80;

/// A one-shot cancellation signal for the render loop. Cheap to clone and
/// shared between the orchestrator (which cancels) and the render thread
/// (which polls).
#[derive(Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

fn terminal_width() -> usize {
    crossterm::terminal::size()
        .map(|(columns, _rows)| columns as usize)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Runs the 100ms-cadence repaint loop until `cancel` is observed, then
/// renders one final frame so the last numbers shown are up to date.
pub fn run_tty_loop(view: &dyn View, out: &mut dyn Write, cancel: &CancelToken) {
    let mut line_count = view.render(terminal_width(), out);
    loop {
        std::thread::sleep(TICK);
        let _ = write!(out, "{}", ansi_line_offset(line_count));
        line_count = view.render(terminal_width(), out);
        if cancel.is_cancelled() {
            return;
        }
    }
}

/// Renders the composite view exactly once — used on non-TTY output after
/// the pipeline has fully drained.
pub fn run_non_tty(view: &dyn View, out: &mut dyn Write) {
    view.render(terminal_width(), out);
}
