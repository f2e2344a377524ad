//! Drives the client core against an in-process backend that speaks the
//! MyTasks HTTP contract: refresh cookie, bearer tokens, 401/409/422 bodies.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use mytasks::flows::auth::{self, LoginOutcome, RegisterOutcome};
use mytasks::flows::board::{self, BoardState};
use mytasks::flows::settings::{self, SettingsView};
use mytasks::shared::{CreateTodoRequest, LoginRequest, RegisterRequest, UpdateTodoRequest, Uuid};
use mytasks::validation::{FIELD_EMAIL, FIELD_USERNAME};
use mytasks::{FormErrors, FormSchema, Reaction, ReqwestHttpClient, Session, Submission, TaskApi, Toast};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const REFRESH_COOKIE: &str = "refresh_token";

// =========================================================
// Fake backend
// =========================================================

struct Account {
    username: String,
    email: String,
    password: String,
}

struct StoredTodo {
    owner: String,
    id: i64,
    title: String,
    description: String,
    completed: bool,
}

/// One signed-in device.
#[derive(Clone)]
struct Grant {
    email: String,
    jti: Uuid,
}

#[derive(Default)]
struct Backend {
    accounts: Vec<Account>,
    todos: Vec<StoredTodo>,
    refresh: HashMap<String, Grant>,
    access: HashMap<String, Grant>,
    counter: u128,
}

type Shared = Arc<Mutex<Backend>>;

impl Backend {
    fn next(&mut self) -> u128 {
        self.counter += 1;
        self.counter
    }

    /// Opens a device session and returns its refresh cookie value.
    fn open_session(&mut self, email: &str) -> String {
        let n = self.next();
        let grant = Grant {
            email: email.to_string(),
            jti: Uuid::from_u128(n),
        };
        let cookie = format!("r{n}");
        self.refresh.insert(cookie.clone(), grant);
        cookie
    }

    fn issue_access(&mut self, grant: Grant) -> String {
        let token = format!("a{}", self.next());
        self.access.insert(token.clone(), grant);
        token
    }

    fn bearer(&self, headers: &HeaderMap) -> Option<Grant> {
        let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
        let token = value.strip_prefix("Bearer ")?;
        let grant = self.access.get(token)?;
        // revoked devices lose their access tokens too
        self.refresh
            .values()
            .any(|g| g.jti == grant.jti)
            .then(|| grant.clone())
    }
}

fn refresh_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == REFRESH_COOKIE)
        .map(|(_, value)| value.to_string())
}

fn with_cookie(status: StatusCode, cookie: &str, body: Value) -> Response {
    (
        status,
        [(
            header::SET_COOKIE,
            format!("{REFRESH_COOKIE}={cookie}; Path=/; HttpOnly"),
        )],
        Json(body),
    )
        .into_response()
}

fn detail(status: StatusCode, text: &str) -> Response {
    (status, Json(json!({ "detail": text }))).into_response()
}

fn field_error(field: &str, message: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "detail": { "field": field, "message": message } })),
    )
        .into_response()
}

fn unauthorized() -> Response {
    detail(StatusCode::UNAUTHORIZED, "Invalid or expired token.")
}

fn text(body: &Value, key: &str) -> String {
    body.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = state.lock().unwrap();
    let (username, email) = (text(&body, "username"), text(&body, "email"));

    if username.chars().count() < 2 {
        return field_error("username", "Username must have at least 2 characters.");
    }
    if backend.accounts.iter().any(|a| a.email == email) {
        return detail(StatusCode::CONFLICT, "Email is already registered.");
    }

    backend.accounts.push(Account {
        username,
        email: email.clone(),
        password: text(&body, "password"),
    });
    let cookie = backend.open_session(&email);
    with_cookie(
        StatusCode::CREATED,
        &cookie,
        json!({ "message": "User registered." }),
    )
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let mut backend = state.lock().unwrap();
    let (email, password) = (text(&body, "email"), text(&body, "password"));

    if !backend
        .accounts
        .iter()
        .any(|a| a.email == email && a.password == password)
    {
        return detail(StatusCode::UNAUTHORIZED, "Invalid login credentials");
    }

    let cookie = backend.open_session(&email);
    let grant = backend.refresh[&cookie].clone();
    let token = backend.issue_access(grant);
    with_cookie(StatusCode::OK, &cookie, json!({ "access_token": token }))
}

async fn refresh(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut backend = state.lock().unwrap();
    let Some(grant) = refresh_cookie(&headers).and_then(|c| backend.refresh.get(&c).cloned())
    else {
        return detail(StatusCode::UNAUTHORIZED, "Missing refresh token.");
    };
    let token = backend.issue_access(grant);
    Json(json!({ "access_token": token })).into_response()
}

async fn signout(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut backend = state.lock().unwrap();
    match refresh_cookie(&headers).and_then(|c| backend.refresh.remove(&c)) {
        Some(_) => Json(json!({ "message": "Signed out." })).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "An unknown error has occurred." })),
        )
            .into_response(),
    }
}

async fn list_todos(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let backend = state.lock().unwrap();
    let Some(grant) = backend.bearer(&headers) else {
        return unauthorized();
    };
    let username = backend
        .accounts
        .iter()
        .find(|a| a.email == grant.email)
        .map(|a| a.username.clone());
    let todos: Vec<Value> = backend
        .todos
        .iter()
        .filter(|t| t.owner == grant.email)
        .map(|t| {
            json!({
                "id": t.id,
                "title": t.title,
                "description": t.description,
                "completed": t.completed,
            })
        })
        .collect();
    Json(json!({ "todos": todos, "username": username })).into_response()
}

async fn create_todo(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let Some(grant) = backend.bearer(&headers) else {
        return unauthorized();
    };
    let title = text(&body, "title");
    if title.chars().count() < 2 {
        return field_error("title", "Title must have at least 2 characters.");
    }
    if backend
        .todos
        .iter()
        .any(|t| t.owner == grant.email && t.title == title)
    {
        return detail(StatusCode::CONFLICT, "Todo already exists.");
    }

    let id = backend.todos.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    backend.todos.push(StoredTodo {
        owner: grant.email,
        id,
        title,
        description: text(&body, "description"),
        completed: false,
    });
    (StatusCode::CREATED, Json(json!({ "message": "Todo created." }))).into_response()
}

/// Shared by update, complete and delete: finds the caller's todo by id.
fn owned_index(backend: &Backend, grant: &Grant, body: &Value) -> Option<usize> {
    let id = body.get("todo_id").and_then(Value::as_i64)?;
    backend
        .todos
        .iter()
        .position(|t| t.owner == grant.email && t.id == id)
}

async fn update_todo(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let Some(grant) = backend.bearer(&headers) else {
        return unauthorized();
    };
    let Some(index) = owned_index(&backend, &grant, &body) else {
        return detail(StatusCode::NOT_FOUND, "Todo not found.");
    };
    let todo = &mut backend.todos[index];
    todo.title = text(&body, "title");
    todo.description = text(&body, "description");
    Json(json!({ "message": "Todo updated." })).into_response()
}

async fn complete_todo(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let Some(grant) = backend.bearer(&headers) else {
        return unauthorized();
    };
    let Some(index) = owned_index(&backend, &grant, &body) else {
        return detail(StatusCode::NOT_FOUND, "Todo not found.");
    };
    if backend.todos[index].completed {
        return detail(StatusCode::BAD_REQUEST, "Todo is already completed.");
    }
    backend.todos[index].completed = true;
    Json(json!({ "message": "Todo completed." })).into_response()
}

async fn delete_todo(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let Some(grant) = backend.bearer(&headers) else {
        return unauthorized();
    };
    let Some(index) = owned_index(&backend, &grant, &body) else {
        return detail(StatusCode::NOT_FOUND, "Todo not found.");
    };
    backend.todos.remove(index);
    Json(json!({ "message": "Todo deleted." })).into_response()
}

async fn settings_service(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let backend = state.lock().unwrap();
    let Some(grant) = backend.bearer(&headers) else {
        return unauthorized();
    };
    let Some(account) = backend.accounts.iter().find(|a| a.email == grant.email) else {
        return unauthorized();
    };

    let mut sessions: Vec<&Grant> = backend
        .refresh
        .values()
        .filter(|g| g.email == grant.email)
        .collect();
    sessions.sort_by_key(|g| g.jti);
    let sessions: Vec<Value> = sessions
        .into_iter()
        .map(|g| {
            json!({
                "jti_id": g.jti,
                "ip_address": "127.0.0.1",
                "browser": "reqwest",
                "os": "Linux",
                "current": g.jti == grant.jti,
            })
        })
        .collect();

    Json(json!({
        "informations": {
            "username": account.username,
            "email": account.email,
            "sessions": sessions,
        }
    }))
    .into_response()
}

async fn revoke_session(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut backend = state.lock().unwrap();
    let Some(grant) = backend.bearer(&headers) else {
        return unauthorized();
    };
    let Some(jti) = body
        .get("jti_id")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<Uuid>().ok())
    else {
        return field_error("jti_id", "Invalid session id.");
    };

    let before = backend.refresh.len();
    backend
        .refresh
        .retain(|_, g| !(g.email == grant.email && g.jti == jti));
    if backend.refresh.len() == before {
        return detail(StatusCode::NOT_FOUND, "Session not found.");
    }
    Json(json!({ "message": "Session revoked." })).into_response()
}

async fn spawn_backend() -> String {
    let state: Shared = Arc::default();
    let app = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/signout", post(signout))
        .route("/todo/get_all", post(list_todos))
        .route("/todo/create", post(create_todo))
        .route("/todo/update", post(update_todo))
        .route("/todo/complete", post(complete_todo))
        .route("/todo/delete", post(delete_todo))
        .route("/settings/service", post(settings_service))
        .route("/settings/session/revoke", post(revoke_session))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

// =========================================================
// Helpers
// =========================================================

fn browser(base_url: &str) -> TaskApi<ReqwestHttpClient> {
    TaskApi::new(ReqwestHttpClient::new().unwrap(), base_url)
}

fn test_user() -> RegisterRequest {
    RegisterRequest {
        username: "TestUser".into(),
        email: "test@email.com".into(),
        password: "very_secret_lol123+".into(),
    }
}

fn credentials() -> LoginRequest {
    LoginRequest {
        email: "test@email.com".into(),
        password: "very_secret_lol123+".into(),
    }
}

async fn registered_session(api: &TaskApi<ReqwestHttpClient>) -> Session {
    let outcome = auth::register(api, &FormSchema::register(), &test_user()).await;
    assert!(matches!(
        outcome,
        Submission::Sent(RegisterOutcome::Registered(_))
    ));
    Session::bootstrap(api).await
}

fn task(title: &str, description: &str) -> CreateTodoRequest {
    CreateTodoRequest {
        title: title.into(),
        description: description.into(),
    }
}

// =========================================================
// Tests
// =========================================================

#[tokio::test]
async fn fresh_visitor_starts_signed_out() {
    let api = browser(&spawn_backend().await);
    let session = Session::bootstrap(&api).await;
    assert_eq!(session, Session::anonymous());
}

#[tokio::test]
async fn unreachable_backend_starts_signed_out() {
    // nothing listens on the discard port
    let api = browser("http://127.0.0.1:9");
    assert_eq!(Session::bootstrap(&api).await, Session::anonymous());
}

#[tokio::test]
async fn registration_sets_the_refresh_cookie() {
    let api = browser(&spawn_backend().await);
    let session = registered_session(&api).await;
    assert!(session.is_authenticated());

    let board = board::load_board(&api, &session).await.unwrap();
    assert_eq!(board.greeting(), "Welcome back, TestUser!");
    assert_eq!(board.state, BoardState::Empty);
}

#[tokio::test]
async fn duplicate_email_and_server_field_errors() {
    let base = spawn_backend().await;
    let api = browser(&base);
    registered_session(&api).await;

    let outcome = auth::register(&api, &FormSchema::register(), &test_user()).await;
    assert_eq!(
        outcome,
        Submission::Sent(RegisterOutcome::Fields(FormErrors::single(
            FIELD_EMAIL,
            "Email is already registered."
        )))
    );

    // with client validation off, the server's 422 is the field error
    let short = RegisterRequest {
        username: "a".into(),
        ..test_user()
    };
    let outcome = auth::register(&browser(&base), &FormSchema::pass_through(), &short).await;
    assert_eq!(
        outcome,
        Submission::Sent(RegisterOutcome::Fields(FormErrors::single(
            FIELD_USERNAME,
            "Username must have at least 2 characters."
        )))
    );
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let base = spawn_backend().await;
    registered_session(&browser(&base)).await;

    let api = browser(&base);
    let wrong = LoginRequest {
        password: "wrong_password".into(),
        ..credentials()
    };
    let outcome = auth::login(&api, &FormSchema::login(), &wrong).await;
    assert_eq!(
        outcome,
        Submission::Sent(LoginOutcome::Rejected("Invalid login credentials".into()))
    );

    let outcome = auth::login(&api, &FormSchema::login(), &credentials()).await;
    assert!(matches!(
        outcome,
        Submission::Sent(LoginOutcome::SignedIn(_))
    ));
}

#[tokio::test]
async fn task_lifecycle_with_reloads() {
    let api = browser(&spawn_backend().await);
    let session = registered_session(&api).await;
    let token = session.token().unwrap().to_string();
    let schema = FormSchema::task();

    for (title, description) in [("Trash", "Take out the trash"), ("Learning", "Spanish")] {
        let outcome = board::create_task(&api, &schema, &token, &task(title, description)).await;
        assert_eq!(
            outcome,
            Submission::Sent(Reaction::Reload(Toast::success(board::CREATE_SUCCESS)))
        );
    }

    let first = board::load_board(&api, &session).await.unwrap();
    let second = board::load_board(&api, &session).await.unwrap();
    assert_eq!(first, second);
    let ids: Vec<i64> = first.tasks().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2]);

    // duplicate title is a domain error; the list is untouched
    let outcome = board::create_task(&api, &schema, &token, &task("Trash", "")).await;
    assert_eq!(
        outcome,
        Submission::Sent(Reaction::Notify(Toast::error("Todo already exists.")))
    );

    let edit = UpdateTodoRequest {
        todo_id: 1,
        title: "Trash".into(),
        description: "Before 8pm".into(),
    };
    assert!(board::update_task(&api, &schema, &token, &edit).await.is_sent());

    assert_eq!(
        board::complete_task(&api, &token, 1).await,
        Reaction::Reload(Toast::success(board::COMPLETE_SUCCESS))
    );
    assert_eq!(
        board::complete_task(&api, &token, 1).await,
        Reaction::Notify(Toast::error("Todo is already completed."))
    );

    let reloaded = board::load_board(&api, &session).await.unwrap();
    let trash = &reloaded.tasks()[0];
    assert_eq!(trash.description, "Before 8pm");
    assert!(trash.completed);
    assert!(!board::can_modify(trash));

    assert_eq!(
        board::delete_task(&api, &token, 1).await,
        Reaction::Reload(Toast::success(board::DELETE_SUCCESS))
    );
    assert_eq!(
        board::delete_task(&api, &token, 2).await,
        Reaction::Reload(Toast::success(board::DELETE_SUCCESS))
    );
    let empty = board::load_board(&api, &session).await.unwrap();
    assert_eq!(empty.state, BoardState::Empty);
}

#[tokio::test]
async fn bogus_token_reauthenticates() {
    let api = browser(&spawn_backend().await);
    let mut session = Session::pending();
    session.establish("not-a-token".into());

    assert_eq!(
        board::load_board(&api, &session).await,
        Err(Reaction::Reauthenticate)
    );
    assert_eq!(
        board::delete_task(&api, "not-a-token", 1).await,
        Reaction::Reauthenticate
    );
}

#[tokio::test]
async fn revoking_another_device() {
    let base = spawn_backend().await;
    let laptop = browser(&base);
    let laptop_session = registered_session(&laptop).await;

    let phone = browser(&base);
    let Submission::Sent(LoginOutcome::SignedIn(phone_token)) =
        auth::login(&phone, &FormSchema::login(), &credentials()).await
    else {
        panic!("phone login failed");
    };

    let SettingsView::Ready(info) = settings::load_settings(&laptop, &laptop_session)
        .await
        .unwrap()
    else {
        panic!("settings not ready");
    };
    assert_eq!(info.username, "TestUser");
    assert_eq!(info.sessions.len(), 2);

    let other = info
        .sessions
        .iter()
        .find(|s| settings::can_revoke(s))
        .unwrap();
    settings::revoke_session(&laptop, laptop_session.token().unwrap(), other.jti_id)
        .await
        .unwrap();

    let SettingsView::Ready(info) = settings::load_settings(&laptop, &laptop_session)
        .await
        .unwrap()
    else {
        panic!("settings not ready");
    };
    assert_eq!(info.sessions.len(), 1);
    assert!(info.sessions[0].current);

    // the revoked device is signed out on its next call
    assert_eq!(
        board::delete_task(&phone, &phone_token, 1).await,
        Reaction::Reauthenticate
    );
}

#[tokio::test]
async fn signout_drops_the_refresh_cookie() {
    let api = browser(&spawn_backend().await);
    registered_session(&api).await;

    assert_eq!(auth::signout(&api).await, Reaction::Reauthenticate);
    assert_eq!(Session::bootstrap(&api).await, Session::anonymous());

    // nothing left to sign out of
    assert_eq!(
        auth::signout(&api).await,
        Reaction::Notify(Toast::error("An unknown error has occurred."))
    );
}
