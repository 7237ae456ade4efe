//! Stateless, synchronous GitLab API client.
//!
//! All concurrency lives above this client: it exposes three blocking
//! operations and nothing else. Pagination is deliberately not handled —
//! each endpoint is a single request, and the tool consumes whatever the
//! server hands back in that one response.

use crate::gitlab::types::{RemoteGroup, RemoteProjectPayload};

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("GitLab API request on {url} failed with status: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("GitLab API request on {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("GitLab API response from {url} could not be decoded: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub struct Client {
    http: reqwest::blocking::Client,
    base_url: String,
    token: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, DiscoveryError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .map_err(|source| DiscoveryError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(DiscoveryError::Status {
                url,
                status: response.status(),
            });
        }

        response.json().map_err(|source| DiscoveryError::Decode { url, source })
    }

    pub fn fetch_group(&self, id_or_name: &str) -> Result<RemoteGroup, DiscoveryError> {
        self.get(&format!("/groups/{id_or_name}"))
    }

    pub fn fetch_subgroups(&self, id_or_name: &str) -> Result<Vec<RemoteGroup>, DiscoveryError> {
        self.get(&format!("/groups/{id_or_name}/subgroups"))
    }

    pub fn fetch_projects(
        &self,
        group_id: &str,
    ) -> Result<Vec<RemoteProjectPayload>, DiscoveryError> {
        self.get(&format!("/groups/{group_id}/projects"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// A minimal in-process HTTP/1.1 stub: reads one request, replies with a
    /// fixed status and body, and stops. Enough to exercise `Client` against
    /// the three response shapes without pulling in a mocking crate.
    fn serve_once(status_line: &str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let status_line = status_line.to_string();

        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                let response = format!(
                    "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        format!("http://{addr}")
    }

    #[test]
    fn fetch_group_decodes_success() {
        let base = serve_once("HTTP/1.1 200 OK", r#"{"id": 7, "name": "platform"}"#);
        let client = Client::new(base, "token");
        let group = client.fetch_group("7").unwrap();
        assert_eq!(group.id, 7);
        assert_eq!(group.name, "platform");
    }

    #[test]
    fn fetch_subgroups_decodes_list() {
        let base = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]"#,
        );
        let client = Client::new(base, "token");
        let groups = client.fetch_subgroups("7").unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].name, "b");
    }

    #[test]
    fn non_200_is_a_status_error() {
        let base = serve_once("HTTP/1.1 404 Not Found", "{}");
        let client = Client::new(base, "token");
        let err = client.fetch_group("missing").unwrap_err();
        assert!(matches!(err, DiscoveryError::Status { .. }));
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let base = serve_once("HTTP/1.1 200 OK", "not json");
        let client = Client::new(base, "token");
        let err = client.fetch_group("7").unwrap_err();
        assert!(matches!(err, DiscoveryError::Decode { .. }));
    }
}
