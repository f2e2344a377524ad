//! Page logic, free of any UI framework.
//!
//! A flow validates its input, makes at most one API call and tells the page
//! what to do next. Pages apply the answer; they never look at status codes.

pub mod auth;
pub mod board;
pub mod settings;

use crate::error::ApiError;
use crate::notify::Toast;
use crate::validation::FormErrors;

/// What a page does after an API call settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    /// Success: show the toast and refetch the list
    Reload(Toast),
    /// Failure the user can retry: toast only, state untouched
    Notify(Toast),
    /// Server-side field errors, shown under the inputs
    Fields(FormErrors),
    /// The session is gone: drop it and go to `/login`
    Reauthenticate,
}

impl Reaction {
    pub fn from_error(err: ApiError) -> Self {
        match err {
            ApiError::Auth { .. } => Reaction::Reauthenticate,
            ApiError::Validation {
                field: Some(field),
                message,
            } => Reaction::Fields(FormErrors::single(&field, &message)),
            ApiError::Validation { message, .. }
            | ApiError::Domain { message, .. }
            | ApiError::Network { message } => Reaction::Notify(Toast::error(message)),
        }
    }
}

/// Result of a form submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<T = Reaction> {
    /// Rejected locally; nothing was sent
    Invalid(FormErrors),
    Sent(T),
}

impl<T> Submission<T> {
    pub fn is_sent(&self) -> bool {
        matches!(self, Submission::Sent(_))
    }
}
