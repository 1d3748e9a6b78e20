//! Server-side client for the Google Identity Toolkit (Gitkit) API.
//!
//! [`GitkitClient`] is the entry point: it validates Gitkit tokens, manages
//! user accounts and builds out-of-band confirmation links. Remote calls go
//! through the [`GitkitRpc`] trait, implemented by [`RpcGateway`] on top of an
//! [`HttpTransport`].

pub mod download_iterator;
pub mod gitkit_client;
pub mod rpc;
pub mod transport;

pub use download_iterator::DownloadIterator;
pub use gitkit_client::{GitkitClient, OobParams};
pub use rpc::{GitkitRpc, RpcGateway, check_gitkit_error};
pub use transport::{HttpRequest, HttpTransport, ReqwestTransport, ServiceAccountCredentials};

pub use gitkit_core::{Account, GitkitError, OobResult, Result as GitkitResult};

#[cfg(test)]
mod tests;
