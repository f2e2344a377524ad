//! Applies the outcome of a core flow to the page.

use crate::auth::{AuthContext, expire, use_auth};
use crate::components::form_state::FormState;
use crate::components::home::BoardContext;
use crate::components::toast::{ToastContext, use_toasts};
use leptos::prelude::*;
use mytasks::{Reaction, Toast};

/// Contexts captured at component setup, usable after an `.await`.
#[derive(Clone, Copy)]
pub struct Reactor {
    auth: AuthContext,
    toasts: ToastContext,
    board: Option<BoardContext>,
}

impl Reactor {
    pub fn new() -> Self {
        Self {
            auth: use_auth(),
            toasts: use_toasts(),
            board: use_context::<BoardContext>(),
        }
    }

    pub fn auth(&self) -> AuthContext {
        self.auth
    }

    pub fn toast(&self, toast: Toast) {
        self.toasts.show(toast);
    }

    /// `true` when the call succeeded.
    pub fn apply(&self, reaction: Reaction, form: Option<FormState>) -> bool {
        match reaction {
            Reaction::Reload(toast) => {
                self.toasts.show(toast);
                if let Some(board) = self.board {
                    board.reload();
                }
                true
            }
            Reaction::Notify(toast) => {
                self.toasts.show(toast);
                false
            }
            Reaction::Fields(errors) => {
                match form {
                    Some(form) => form.merge(errors),
                    None => {
                        for (_, message) in errors.iter() {
                            self.toasts.show(Toast::error(message));
                        }
                    }
                }
                false
            }
            Reaction::Reauthenticate => {
                expire(&self.auth);
                false
            }
        }
    }
}
