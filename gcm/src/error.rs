//! Error taxonomy and the shared error sink.
//!
//! `PipelineError` covers the failures that actually propagate up through
//! `?` (configuration loading, clone-root creation). Everything else —
//! discovery, filesystem, clone and marker failures — is recoverable at the
//! stage boundary and reported as an [`ErrorRecord`] on the shared channel
//! instead of unwinding the stack.

use crossbeam_channel as chan;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::counter::Counter;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("could not read config file: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("config file not found in current directory or home directory")]
    ConfigNotFound,

    #[error("failed to create clone directory {path}: {source}")]
    CloneRootCreate {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The stage that produced an [`ErrorRecord`], used only to prefix the
/// logged message; not otherwise queryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    HostSkip,
    Discovery,
    Filesystem,
    Clone,
    Marker,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::HostSkip => "host",
            Stage::Discovery => "discovery",
            Stage::Filesystem => "filesystem",
            Stage::Clone => "clone",
            Stage::Marker => "marker",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub stage: Stage,
    pub message: String,
}

impl ErrorRecord {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

/// Shared sink for non-fatal errors produced by any pipeline stage.
///
/// Any task may clone the sender side and send. Exactly one consumer thread
/// receives, incrementing `error_count` and remembering the latest message.
/// The channel is closed exactly once, by the top-level orchestrator, after
/// every stage across every host has finished producing.
pub struct ErrorSink {
    sender: Option<chan::Sender<ErrorRecord>>,
    error_count: Counter,
    latest: Arc<Mutex<Option<String>>>,
    consumer: Option<thread::JoinHandle<()>>,
}

impl ErrorSink {
    pub fn new() -> Self {
        let (sender, receiver) = chan::unbounded();
        let error_count = Counter::new();
        let latest: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));

        let consumer = {
            let error_count = error_count.clone();
            let latest = latest.clone();
            thread::spawn(move || {
                for record in receiver {
                    error_count.increment();
                    log::error!(target: record.stage.to_string().as_str(), "{}", record.message);
                    *latest.lock().expect("error sink mutex poisoned") = Some(record.message);
                }
            })
        };

        Self {
            sender: Some(sender),
            error_count,
            latest,
            consumer: Some(consumer),
        }
    }

    pub fn sender(&self) -> chan::Sender<ErrorRecord> {
        self.sender
            .as_ref()
            .expect("error sink sender taken before close")
            .clone()
    }

    pub fn count(&self) -> Counter {
        self.error_count.clone()
    }

    pub fn latest_message(&self) -> Option<String> {
        self.latest.lock().expect("error sink mutex poisoned").clone()
    }

    /// Closes the channel and waits for the consumer to drain it. Must be
    /// called exactly once, after every producer has finished sending.
    pub fn close(mut self) {
        // Drop our own sender handle; once every producer has dropped
        // theirs too, the consumer's `for record in receiver` loop ends.
        self.sender.take();
        if let Some(handle) = self.consumer.take() {
            let _ = handle.join();
        }
    }
}
