//! Stage 4: decides, per repository, whether a clone is still needed.

use crossbeam_channel as chan;
use std::thread;

use crate::error::{ErrorRecord, Stage};
use crate::metrics::HostMetrics;
use crate::repository::Repository;

const OUTPUT_BUFFER: usize = 20;

pub fn filter_clone_needed(
    repos: chan::Receiver<Repository>,
    metrics: HostMetrics,
    errors: chan::Sender<ErrorRecord>,
) -> chan::Receiver<Repository> {
    let (tx, rx) = chan::bounded(OUTPUT_BUFFER);

    thread::spawn(move || {
        for repo in repos {
            let already_cloned = match repo.already_cloned() {
                Ok(value) => value,
                Err(err) => {
                    let _ = errors.send(ErrorRecord::new(
                        Stage::Filesystem,
                        format!(
                            "failed to stat working copy for {}: {err}",
                            repo.path_with_namespace
                        ),
                    ));
                    continue;
                }
            };

            if repo.archived && repo.clone_options.clone_archived {
                metrics.archived_count.increment();
            }

            if already_cloned {
                metrics.clone_count.increment();
                continue;
            }
            if repo.archived && !repo.clone_options.clone_archived {
                continue;
            }

            metrics.clone_count.increment();
            if tx.send(repo).is_err() {
                break;
            }
        }
    });

    rx
}
