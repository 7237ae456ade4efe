//! Stage 3a: fetches the project list for every discovered group, in
//! parallel — one thread per group. Each resulting project is
//! enriched with the group, group policy and host it came from before being
//! handed downstream, so nothing later needs to look anything back up.

use crossbeam_channel as chan;
use std::sync::Arc;
use std::thread;

use crate::config::{GroupConfig, HostConfig};
use crate::counter::Counter;
use crate::error::{ErrorRecord, Stage};
use crate::gitlab::{Client, RemoteGroup, RemoteProject};

const OUTPUT_BUFFER: usize = 20;

/// Consumes a stream of groups (all belonging to the same configured root
/// group) and produces the enriched projects found in each of them.
/// Increments `group_count` once per group received, since this is the one
/// point downstream where every discovered group is seen exactly once.
pub fn fetch_projects(
    client: Arc<Client>,
    groups: chan::Receiver<RemoteGroup>,
    group_config: GroupConfig,
    host: HostConfig,
    group_count: Counter,
    errors: chan::Sender<ErrorRecord>,
) -> chan::Receiver<RemoteProject> {
    let (out_tx, out_rx) = chan::bounded(OUTPUT_BUFFER);

    thread::spawn(move || {
        let mut workers = Vec::new();

        for group in groups {
            group_count.increment();
            let client = client.clone();
            let out_tx = out_tx.clone();
            let errors = errors.clone();
            let group_config = group_config.clone();
            let host = host.clone();

            workers.push(thread::spawn(move || {
                let id = group.id.to_string();
                match client.fetch_projects(&id) {
                    Ok(payloads) => {
                        for payload in payloads {
                            let project = RemoteProject::from_payload(
                                payload,
                                group.clone(),
                                group_config.clone(),
                                host.clone(),
                            );
                            if out_tx.send(project).is_err() {
                                break;
                            }
                        }
                    }
                    Err(err) => {
                        let _ = errors.send(ErrorRecord::new(
                            Stage::Discovery,
                            format!("failed to fetch projects for group {id}: {err}"),
                        ));
                    }
                }
            }));
        }

        for worker in workers {
            let _ = worker.join();
        }
    });

    out_rx
}
