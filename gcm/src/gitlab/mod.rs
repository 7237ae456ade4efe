pub mod client;
pub mod types;

pub use client::{Client, DiscoveryError};
pub use types::{RemoteGroup, RemoteProject, RemoteProjectPayload};
