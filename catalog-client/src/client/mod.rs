//! Transport adapters.
//!
//! [`HttpClient`] is the seam the stores talk through. Two implementations:
//! - [`NetworkHttpClient`]: reqwest over the network
//! - [`OneshotHttpClient`]: an in-process axum `Router` (feature `in-process`)

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
