//! Stage 1: recursively expands a root group into the stream of every
//! transitive subgroup (root included).
//!
//! The traversal itself is sequential (a single consumer drains the work
//! list), so it's expressed as a
//! plain breadth-first walk over a local queue on one dedicated thread
//! rather than over an inter-thread channel + completion latch: there is
//! only ever one reader, so the extra machinery buys nothing and only adds
//! ways to deadlock. Concurrency across *multiple* root groups (and across
//! hosts) comes from spawning one such thread per root and fanning the
//! resulting streams in downstream.

use crossbeam_channel as chan;
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread;

use crate::error::{ErrorRecord, Stage};
use crate::gitlab::{Client, RemoteGroup};

const OUTPUT_BUFFER: usize = 20;

/// Expands `root_id` into the stream of all transitive subgroups (root
/// included). No ordering guarantee beyond "a group's subgroups appear
/// eventually after it"; siblings may interleave with other branches.
pub fn expand_groups(
    client: Arc<Client>,
    root_id: String,
    errors: chan::Sender<ErrorRecord>,
) -> chan::Receiver<RemoteGroup> {
    let (out_tx, out_rx) = chan::bounded(OUTPUT_BUFFER);

    thread::spawn(move || {
        let root = match client.fetch_group(&root_id) {
            Ok(group) => group,
            Err(err) => {
                let _ = errors.send(ErrorRecord::new(
                    Stage::Discovery,
                    format!("failed to fetch root group {root_id}: {err}"),
                ));
                return;
            }
        };

        let mut queue = VecDeque::new();
        queue.push_back(root.clone());
        if out_tx.send(root).is_err() {
            return;
        }

        while let Some(group) = queue.pop_front() {
            let id = group.id.to_string();
            match client.fetch_subgroups(&id) {
                Ok(subgroups) => {
                    for subgroup in subgroups {
                        if out_tx.send(subgroup.clone()).is_err() {
                            return;
                        }
                        queue.push_back(subgroup);
                    }
                }
                Err(err) => {
                    let _ = errors.send(ErrorRecord::new(
                        Stage::Discovery,
                        format!("failed to fetch subgroups for group {id}: {err}"),
                    ));
                }
            }
        }
    });

    out_rx
}
