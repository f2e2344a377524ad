//! The task list on the home page.

use super::{Reaction, Submission};
use crate::api::TaskApi;
use crate::error::ApiError;
use crate::notify::Toast;
use crate::request::HttpClient;
use crate::session::Session;
use crate::validation::FormSchema;
use mytasks_shared::{CreateTodoRequest, FALLBACK_USERNAME, Todo, UpdateTodoRequest};
use tracing::debug;

pub const EMPTY_BOARD: &str = "Nice work! Currently you have no tasks to solve!";
pub const CREATE_SUCCESS: &str = "Creation successful: Todo was created successfully.";
pub const UPDATE_SUCCESS: &str = "Update successful: Todo has been successfully updated.";
pub const COMPLETE_SUCCESS: &str =
    "Completion successful: Todo has been marked as successfully completed.";
pub const DELETE_SUCCESS: &str = "Deletion successful: Todo has been successfully deleted.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardState {
    Loading,
    Empty,
    Tasks(Vec<Todo>),
    /// Fixed message; the previous list is not kept
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub username: String,
    pub state: BoardState,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            username: FALLBACK_USERNAME.to_string(),
            state: BoardState::Loading,
        }
    }
}

impl Board {
    pub fn greeting(&self) -> String {
        format!("Welcome back, {}!", self.username)
    }

    pub fn tasks(&self) -> &[Todo] {
        match &self.state {
            BoardState::Tasks(tasks) => tasks,
            _ => &[],
        }
    }
}

/// Whether a row's Complete and Edit buttons are live. Delete always is.
pub fn can_modify(todo: &Todo) -> bool {
    !todo.completed
}

/// Loads the list for the current session. `Err` only when the session has
/// to be dropped.
pub async fn load_board<C: HttpClient>(
    api: &TaskApi<C>,
    session: &Session,
) -> Result<Board, Reaction> {
    if session.is_loading() {
        return Ok(Board::default());
    }
    let Some(token) = session.token() else {
        return Err(Reaction::Reauthenticate);
    };

    match api.list_todos(token).await {
        Ok(list) => {
            debug!(count = list.todos.len(), "tasks loaded");
            let username = list.display_name().to_string();
            let state = if list.todos.is_empty() {
                BoardState::Empty
            } else {
                BoardState::Tasks(list.todos)
            };
            Ok(Board { username, state })
        }
        Err(ApiError::Auth { .. }) => Err(Reaction::Reauthenticate),
        Err(err) => Ok(Board {
            state: BoardState::Failed(err.message().to_string()),
            ..Board::default()
        }),
    }
}

pub async fn create_task<C: HttpClient>(
    api: &TaskApi<C>,
    schema: &FormSchema,
    token: &str,
    input: &CreateTodoRequest,
) -> Submission {
    if let Err(errors) = schema.validate(input) {
        return Submission::Invalid(errors);
    }
    Submission::Sent(settle(api.create_todo(token, input).await, CREATE_SUCCESS))
}

pub async fn update_task<C: HttpClient>(
    api: &TaskApi<C>,
    schema: &FormSchema,
    token: &str,
    input: &UpdateTodoRequest,
) -> Submission {
    if let Err(errors) = schema.validate(input) {
        return Submission::Invalid(errors);
    }
    Submission::Sent(settle(api.update_todo(token, input).await, UPDATE_SUCCESS))
}

pub async fn complete_task<C: HttpClient>(api: &TaskApi<C>, token: &str, todo_id: i64) -> Reaction {
    settle(api.complete_todo(token, todo_id).await, COMPLETE_SUCCESS)
}

pub async fn delete_task<C: HttpClient>(api: &TaskApi<C>, token: &str, todo_id: i64) -> Reaction {
    settle(api.delete_todo(token, todo_id).await, DELETE_SUCCESS)
}

fn settle(result: Result<(), ApiError>, success: &str) -> Reaction {
    match result {
        Ok(()) => Reaction::Reload(Toast::success(success)),
        Err(err) => Reaction::from_error(err),
    }
}
