//! One function per backend operation.
//!
//! Each call sends a single request and either returns the parsed success
//! body or an [`ApiError`] carrying the server's text (or the operation's
//! fixed default message) and the status code.

use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use mytasks_shared::protocol::{
    ApiRequest, AuthScheme, CompleteTodoRequest, DeleteTodoRequest, ListTodosRequest,
    RefreshRequest, SettingsRequest, SignoutRequest,
};
use mytasks_shared::{
    AccessToken, CONTENT_TYPE_JSON, CreateTodoRequest, HEADER_AUTHORIZATION,
    HEADER_CONTENT_TYPE, LoginRequest, RegisterRequest, RevokeSessionRequest, SettingsOverview,
    TodoList, UpdateTodoRequest, Uuid,
};
use tracing::{debug, warn};

// =========================================================
// Default messages
// =========================================================

pub const CREATE_FAILED: &str =
    "Creation failed: An unexpected error has occurred. Please try again later.";
pub const UPDATE_FAILED: &str =
    "Update failed: An unexpected error has occurred. Please try again later.";
pub const COMPLETE_FAILED: &str =
    "Completion failed: An unexpected error is occurred. Please try again later.";
pub const DELETE_FAILED: &str =
    "Deletion failed: An unexpected error occurred. Please try again later.";
pub const SIGNOUT_FAILED: &str = "Signout failed: An unexpected error occurred.";
pub const LOAD_TASKS_NETWORK: &str =
    "An unexpected error occurred while loading all tasks. Please try again later.";
pub const LOAD_TASKS_SERVER: &str = "Server error: Tasks could not be loaded.";
pub const LOGIN_FAILED: &str = "An unexpected error occurred. Please try again.";
pub const REGISTER_FAILED: &str =
    "Registration failed: An unexpected error has occurred. Please try again later.";
pub const REGISTER_SERVER_FAILED: &str =
    "Registration failed: An unknown page error occurred. You will be redirected shortly...";
pub const REVOKE_FAILED: &str = "An unexpected error is occurred. Please try again later.";
pub const SETTINGS_FAILED: &str = "Settings is not accessible. Please try again later.";
const REFRESH_FAILED: &str = "Session could not be refreshed.";

/// Typed client for the MyTasks backend.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskApi<C> {
    client: C,
    base_url: String,
}

impl<C: HttpClient> TaskApi<C> {
    pub fn new(client: C, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Builds and sends `R`; the raw response comes back whatever its status.
    async fn dispatch<R: ApiRequest>(
        &self,
        payload: &R,
        token: Option<&str>,
        default_message: &str,
    ) -> ApiResult<HttpResponse> {
        let mut req = HttpRequest::new(&self.url(R::PATH), R::METHOD)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);

        match R::AUTH {
            AuthScheme::Cookie => req = req.with_credentials(),
            AuthScheme::Bearer => {
                let bearer = format!("Bearer {}", token.unwrap_or_default());
                req = req.with_header(HEADER_AUTHORIZATION, &bearer);
            }
        }

        if R::HAS_BODY {
            let body = serde_json::to_string(payload).map_err(|e| {
                warn!(path = R::PATH, error = %e, "request body could not be encoded");
                ApiError::Network {
                    message: default_message.to_string(),
                }
            })?;
            req = req.with_body(body);
        }

        debug!(path = R::PATH, "sending request");
        self.client
            .send(req)
            .await
            .map_err(|e| ApiError::network(&e, default_message))
    }

    /// Sends `R` and decodes its success body.
    async fn call<R: ApiRequest>(
        &self,
        payload: &R,
        token: Option<&str>,
        default_message: &str,
    ) -> ApiResult<R::Response> {
        let resp = self.dispatch(payload, token, default_message).await?;

        if !resp.ok() {
            let err = ApiError::from_response(&resp, default_message);
            warn!(
                path = R::PATH,
                status = resp.status,
                kind = err.kind(),
                "request rejected"
            );
            return Err(err);
        }

        resp.json::<R::Response>().map_err(|e| {
            warn!(path = R::PATH, error = %e, "unexpected response body");
            ApiError::Domain {
                status: resp.status,
                message: default_message.to_string(),
            }
        })
    }

    // =========================================================
    // Auth
    // =========================================================

    /// Creates an account. Only `201 Created` counts as success; the server
    /// also sets the refresh cookie.
    pub async fn register(&self, payload: &RegisterRequest) -> ApiResult<()> {
        let resp = self.dispatch(payload, None, REGISTER_FAILED).await?;
        if resp.status == 201 {
            return Ok(());
        }
        let default = if resp.status == crate::error::STATUS_UNPROCESSABLE {
            REGISTER_FAILED
        } else {
            REGISTER_SERVER_FAILED
        };
        let err = ApiError::from_response(&resp, default);
        warn!(status = resp.status, kind = err.kind(), "registration rejected");
        Err(err)
    }

    pub async fn login(&self, payload: &LoginRequest) -> ApiResult<String> {
        self.call(payload, None, LOGIN_FAILED)
            .await
            .map(|token: AccessToken| token.access_token)
    }

    /// Exchanges the refresh cookie for a fresh access token.
    pub async fn refresh(&self) -> ApiResult<String> {
        self.call(&RefreshRequest, None, REFRESH_FAILED)
            .await
            .map(|token| token.access_token)
    }

    pub async fn signout(&self) -> ApiResult<()> {
        self.call(&SignoutRequest, None, SIGNOUT_FAILED)
            .await
            .map(|_| ())
    }

    // =========================================================
    // Todos
    // =========================================================

    /// Lists the user's todos. Non-401 server failures all collapse to the
    /// fixed "could not be loaded" text; the server's wording is not shown.
    pub async fn list_todos(&self, token: &str) -> ApiResult<TodoList> {
        match self.call(&ListTodosRequest, Some(token), LOAD_TASKS_SERVER).await {
            Err(ApiError::Network { .. }) => Err(ApiError::Network {
                message: LOAD_TASKS_NETWORK.to_string(),
            }),
            Err(err @ ApiError::Auth { .. }) => Err(err),
            Err(err) => Err(ApiError::Domain {
                status: err.status_code().unwrap_or_default(),
                message: LOAD_TASKS_SERVER.to_string(),
            }),
            Ok(list) => Ok(list),
        }
    }

    pub async fn create_todo(&self, token: &str, payload: &CreateTodoRequest) -> ApiResult<()> {
        self.call(payload, Some(token), CREATE_FAILED)
            .await
            .map(|_| ())
    }

    pub async fn update_todo(&self, token: &str, payload: &UpdateTodoRequest) -> ApiResult<()> {
        self.call(payload, Some(token), UPDATE_FAILED)
            .await
            .map(|_| ())
    }

    pub async fn complete_todo(&self, token: &str, todo_id: i64) -> ApiResult<()> {
        self.call(&CompleteTodoRequest::from(todo_id), Some(token), COMPLETE_FAILED)
            .await
            .map(|_| ())
    }

    pub async fn delete_todo(&self, token: &str, todo_id: i64) -> ApiResult<()> {
        self.call(&DeleteTodoRequest::from(todo_id), Some(token), DELETE_FAILED)
            .await
            .map(|_| ())
    }

    // =========================================================
    // Settings
    // =========================================================

    pub async fn settings(&self, token: &str) -> ApiResult<SettingsOverview> {
        self.call(&SettingsRequest, Some(token), SETTINGS_FAILED).await
    }

    pub async fn revoke_session(&self, token: &str, jti_id: Uuid) -> ApiResult<()> {
        self.call(&RevokeSessionRequest { jti_id }, Some(token), REVOKE_FAILED)
            .await
            .map(|_| ())
    }
}
