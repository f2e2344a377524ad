use crate::{
    AccessToken, CreateTodoRequest, LoginRequest, RegisterRequest, RevokeSessionRequest,
    SettingsOverview, TodoList, TodoTarget, UpdateTodoRequest,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// How a request proves who is calling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// Sends (and may receive) the HTTP-only refresh cookie; credentials included.
    Cookie,
    /// `Authorization: Bearer <access token>`.
    Bearer,
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The URL path (or suffix).
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Credentials attached to the call.
    const AUTH: AuthScheme;
    /// Whether the request carries a JSON body.
    const HAS_BODY: bool = true;
}

/// Placeholder response for endpoints whose body is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Ack;

impl<'de> Deserialize<'de> for Ack {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde::de::IgnoredAny::deserialize(deserializer)?;
        Ok(Ack)
    }
}

// =========================================================
// Auth
// =========================================================

impl ApiRequest for RegisterRequest {
    type Response = Ack;
    const PATH: &'static str = "/register";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::Cookie;
}

impl ApiRequest for LoginRequest {
    type Response = AccessToken;
    const PATH: &'static str = "/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::Cookie;
}

/// Silent re-authentication with the refresh cookie.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RefreshRequest;

impl ApiRequest for RefreshRequest {
    type Response = AccessToken;
    const PATH: &'static str = "/refresh";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::Cookie;
    const HAS_BODY: bool = false;
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SignoutRequest;

impl ApiRequest for SignoutRequest {
    type Response = Ack;
    const PATH: &'static str = "/signout";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::Cookie;
    const HAS_BODY: bool = false;
}

// =========================================================
// Todos
// =========================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListTodosRequest;

impl ApiRequest for ListTodosRequest {
    type Response = TodoList;
    const PATH: &'static str = "/todo/get_all";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::Bearer;
    const HAS_BODY: bool = false;
}

impl ApiRequest for CreateTodoRequest {
    type Response = Ack;
    const PATH: &'static str = "/todo/create";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::Bearer;
}

impl ApiRequest for UpdateTodoRequest {
    type Response = Ack;
    const PATH: &'static str = "/todo/update";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::Bearer;
}

/// Mark a todo as done.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CompleteTodoRequest(pub TodoTarget);

impl ApiRequest for CompleteTodoRequest {
    type Response = Ack;
    const PATH: &'static str = "/todo/complete";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::Bearer;
}

/// Remove a todo.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DeleteTodoRequest(pub TodoTarget);

impl ApiRequest for DeleteTodoRequest {
    type Response = Ack;
    const PATH: &'static str = "/todo/delete";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::Bearer;
}

impl From<i64> for CompleteTodoRequest {
    fn from(todo_id: i64) -> Self {
        Self(TodoTarget { todo_id })
    }
}

impl From<i64> for DeleteTodoRequest {
    fn from(todo_id: i64) -> Self {
        Self(TodoTarget { todo_id })
    }
}

// =========================================================
// Settings
// =========================================================

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SettingsRequest;

impl ApiRequest for SettingsRequest {
    type Response = SettingsOverview;
    const PATH: &'static str = "/settings/service";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::Bearer;
    const HAS_BODY: bool = false;
}

impl ApiRequest for RevokeSessionRequest {
    type Response = Ack;
    const PATH: &'static str = "/settings/session/revoke";
    const METHOD: HttpMethod = HttpMethod::Post;
    const AUTH: AuthScheme = AuthScheme::Bearer;
}
