//! Wire types for the subset of the GitLab API this tool consumes.

use serde::Deserialize;

use crate::config::{GroupConfig, HostConfig};

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteGroup {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProjectPayload {
    pub name: String,
    pub ssh_url_to_repo: String,
    pub path_with_namespace: String,
    #[serde(default)]
    pub archived: bool,
}

/// A project record returned from the API, enriched with the context
/// needed to evaluate archival policy and resolve an on-disk path without
/// any further lookup (spec invariant: "every `RemoteProject` carries
/// enough context").
#[derive(Debug, Clone)]
pub struct RemoteProject {
    pub name: String,
    pub ssh_url_to_repo: String,
    pub path_with_namespace: String,
    pub archived: bool,
    pub group: RemoteGroup,
    pub group_config: GroupConfig,
    pub host: HostConfig,
}

impl RemoteProject {
    pub fn from_payload(
        payload: RemoteProjectPayload,
        group: RemoteGroup,
        group_config: GroupConfig,
        host: HostConfig,
    ) -> Self {
        Self {
            name: payload.name,
            ssh_url_to_repo: payload.ssh_url_to_repo,
            path_with_namespace: payload.path_with_namespace,
            archived: payload.archived,
            group,
            group_config,
            host,
        }
    }
}
