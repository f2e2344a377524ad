//! Authentication state for the lifetime of the page.

use crate::api::TaskApi;
use crate::error::ApiError;
use crate::request::HttpClient;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    access_token: Option<String>,
    authenticated: bool,
    loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::pending()
    }
}

impl Session {
    /// The state before the silent refresh has answered.
    pub fn pending() -> Self {
        Self {
            access_token: None,
            authenticated: false,
            loading: true,
        }
    }

    /// Resolved, signed-out session.
    pub fn anonymous() -> Self {
        Self {
            access_token: None,
            authenticated: false,
            loading: false,
        }
    }

    pub fn establish(&mut self, token: String) {
        info!("session established");
        self.access_token = Some(token);
        self.authenticated = true;
        self.loading = false;
    }

    pub fn invalidate(&mut self) {
        if self.authenticated {
            info!("session invalidated");
        }
        self.access_token = None;
        self.authenticated = false;
        self.loading = false;
    }

    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Runs the one silent refresh. Any failure, the network kind included,
    /// resolves to a signed-out session.
    pub async fn bootstrap<C: HttpClient>(api: &TaskApi<C>) -> Session {
        let mut session = Session::pending();
        match api.refresh().await {
            Ok(token) => session.establish(token),
            Err(err) => {
                match &err {
                    ApiError::Network { .. } => info!("refresh unreachable, starting signed out"),
                    _ => info!(status = ?err.status_code(), "no refreshable session"),
                }
                session.invalidate();
            }
        }
        session
    }
}
