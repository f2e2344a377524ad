//! Client core for MyTasks.
//!
//! Everything here is platform-neutral: the browser app drives it through a
//! fetch-backed [`HttpClient`], tests and native tools through
//! [`ReqwestHttpClient`].

pub mod api;
pub mod config;
pub mod error;
pub mod flows;
pub mod notify;
pub mod request;
pub mod route;
pub mod session;
pub mod validation;

#[cfg(test)]
mod testing;

pub use api::TaskApi;
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use flows::{Reaction, Submission};
pub use notify::{TOAST_LIFETIME, Toast, ToastLevel, ToastQueue};
pub use request::{HttpClient, HttpRequest, HttpResponse, TransportError};
pub use route::{AppRoute, Guard, Resolution};
pub use session::Session;
pub use validation::{FormErrors, FormSchema, FormSchemas};

#[cfg(not(target_arch = "wasm32"))]
pub use request::ReqwestHttpClient;

pub use mytasks_shared as shared;
