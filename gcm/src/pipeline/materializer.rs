//! Stage 3b: turns enriched API records and directly-configured projects
//! into `Repository` descriptors. The two sources are
//! materialized independently and merged with [`fan_in`].

use crossbeam_channel as chan;
use std::path::PathBuf;
use std::thread;

use crate::config::HostConfig;
use crate::gitlab::RemoteProject;
use crate::metrics::HostMetrics;
use crate::pipeline::fan_in::fan_in;
use crate::repository::{CloneOptions, Repository};

const OUTPUT_BUFFER: usize = 20;

/// Converts group-discovered projects into repositories, counting each one
/// as it passes through. `clone_root` is the already-resolved (absolute,
/// `~`-expanded) host clone directory — never re-derived from the raw
/// configured string here, since that string may still contain a `~` or be
/// relative.
fn materialize_group_projects(
    projects: chan::Receiver<RemoteProject>,
    metrics: HostMetrics,
    clone_root: PathBuf,
) -> chan::Receiver<Repository> {
    let (tx, rx) = chan::bounded(OUTPUT_BUFFER);
    thread::spawn(move || {
        for project in projects {
            metrics.group_project_count.increment();
            let repo = Repository {
                name: project.name,
                ssh_url: project.ssh_url_to_repo,
                path_with_namespace: project.path_with_namespace,
                archived: project.archived,
                clone_options: CloneOptions {
                    clone_archived: project.group_config.clone_archived,
                    clone_root: clone_root.clone(),
                },
            };
            if tx.send(repo).is_err() {
                break;
            }
        }
    });
    rx
}

/// Materializes a host's directly-configured projects. Their archived
/// policy is always permissive — direct inclusion overrides archival.
fn materialize_direct_projects(
    host: HostConfig,
    metrics: HostMetrics,
    clone_root: PathBuf,
) -> chan::Receiver<Repository> {
    let (tx, rx) = chan::bounded(OUTPUT_BUFFER);
    thread::spawn(move || {
        for project in host.projects {
            metrics.direct_project_count.increment();
            let repo = Repository {
                name: project.name,
                ssh_url: format!("git@{}:{}", host.host_name, project.full_path),
                path_with_namespace: project.full_path,
                archived: false,
                clone_options: CloneOptions {
                    clone_archived: true,
                    clone_root: clone_root.clone(),
                },
            };
            if tx.send(repo).is_err() {
                break;
            }
        }
    });
    rx
}

/// Merges a host's group-discovered and directly-configured repository
/// streams into one. `clone_root` must already be resolved to an absolute,
/// `~`-expanded path (see `host::resolve_clone_root`).
pub fn materialize(
    group_projects: chan::Receiver<RemoteProject>,
    host: HostConfig,
    metrics: HostMetrics,
    clone_root: PathBuf,
) -> chan::Receiver<Repository> {
    let group_repos = materialize_group_projects(group_projects, metrics.clone(), clone_root.clone());
    let direct_repos = materialize_direct_projects(host, metrics, clone_root);
    fan_in(vec![group_repos, direct_repos], OUTPUT_BUFFER)
}
