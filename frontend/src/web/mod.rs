//! Browser plumbing: fetch transport and history-based router.

mod http;
pub mod router;

pub use http::FetchHttpClient;
