//! CLI entry point: parses flags, loads configuration, spawns one pipeline
//! per configured host, and drives the progress view to completion.

use clap::Parser;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use gcm::config::load_config;
use gcm::error::ErrorSink;
use gcm::host;
use gcm::logger::{self, FileLogger};
use gcm::view::{CancelToken, ClonedNowView, CompositeView, ElapsedView, ErrorFooterView, HostBodyView};

/// Bulk GitLab repository mirroring tool.
#[derive(Parser)]
#[command(name = "gcm", version, about = "Bulk GitLab repository mirroring tool")]
struct Args {
    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let log_path = logger::log_file_path();

    match FileLogger::open(&log_path, logger::level_for(args.verbose)) {
        Ok(file_logger) => {
            if file_logger.install().is_err() {
                eprintln!("logger already installed");
            }
        }
        Err(err) => {
            eprintln!("warning: could not open log file {}: {err}", log_path.display());
        }
    }

    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load workingCopies.yaml: {err}");
            return ExitCode::FAILURE;
        }
    };

    let error_sink = ErrorSink::new();
    let start = Instant::now();

    let mut running = Vec::new();
    for host_config in config.hosts {
        if let Some(run) = host::spawn(host_config, error_sink.sender()) {
            running.push(run);
        }
    }

    let mut composite = CompositeView::new();
    for run in &running {
        composite.push_body(Box::new(HostBodyView {
            host_name: run.host_name.clone(),
            clone_root: run.clone_root_display.clone(),
            metrics: run.metrics.clone(),
        }));
    }
    composite.push_footer(Box::new(ErrorFooterView {
        error_count: error_sink.count(),
        log_file_path: log_path.to_string_lossy().into_owned(),
    }));
    composite.push_footer(Box::new(ClonedNowView {
        per_host: running.iter().map(|run| run.metrics.cloned_now_count.clone()).collect(),
    }));
    composite.push_footer(Box::new(ElapsedView { start }));
    let composite = Arc::new(composite);

    let is_tty = std::io::stdout().is_terminal();
    let cancel = CancelToken::new();
    let render_handle = is_tty.then(|| {
        let cancel = cancel.clone();
        let composite = composite.clone();
        std::thread::spawn(move || {
            let mut out = std::io::stdout();
            gcm::view::run_tty_loop(composite.as_ref(), &mut out, &cancel);
        })
    });

    let mut any_host_ready = running.is_empty();
    for run in running {
        if run.join() {
            any_host_ready = true;
        }
    }

    cancel.cancel();
    if let Some(handle) = render_handle {
        let _ = handle.join();
    }

    error_sink.close();

    if !is_tty {
        let mut out = std::io::stdout();
        gcm::view::run_non_tty(composite.as_ref(), &mut out);
    }

    if any_host_ready {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
