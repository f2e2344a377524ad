//! Session provider.
//!
//! The only module that writes the session signal. Mutation points:
//! [`init_auth`] and [`refresh`] (silent refresh), [`sign_in`] (login), [`expire`]
//! (any 401) and [`sign_out`].

use crate::web::FetchHttpClient;
use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mytasks::{ClientConfig, FormSchemas, Session, TaskApi};

/// Set when a 401 ended the session; the login page reads and clears it.
const AUTH_ERROR_KEY: &str = "authError";

pub type Api = TaskApi<FetchHttpClient>;

#[derive(Clone, Copy)]
pub struct AuthContext {
    pub session: ReadSignal<Session>,
    set_session: WriteSignal<Session>,
    api: StoredValue<Api>,
    forms: StoredValue<FormSchemas>,
}

impl AuthContext {
    pub fn new(config: &ClientConfig) -> Self {
        let (session, set_session) = signal(Session::pending());
        Self {
            session,
            set_session,
            api: StoredValue::new(TaskApi::new(FetchHttpClient, &config.api_url)),
            forms: StoredValue::new(FormSchemas::from_config(config)),
        }
    }

    pub fn session_signal(&self) -> Signal<Session> {
        self.session.into()
    }

    pub fn api(&self) -> Api {
        self.api.get_value()
    }

    pub fn forms(&self) -> FormSchemas {
        self.forms.get_value()
    }

    /// Token of the current session, read without tracking.
    pub fn token(&self) -> Option<String> {
        self.session
            .with_untracked(|s| s.token().map(str::to_string))
    }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// Runs the one silent refresh; the session stays pending until it answers.
pub fn init_auth(ctx: &AuthContext) {
    let ctx = *ctx;
    spawn_local(async move {
        refresh(&ctx).await;
    });
}

/// Exchanges the refresh cookie for a session and publishes it.
pub async fn refresh(ctx: &AuthContext) -> Session {
    let session = Session::bootstrap(&ctx.api()).await;
    ctx.set_session.set(session.clone());
    session
}

pub fn sign_in(ctx: &AuthContext, token: String) {
    LocalStorage::delete(AUTH_ERROR_KEY);
    ctx.set_session.update(|s| s.establish(token));
}

/// 401 from any call. The router's guard takes the user to `/login`.
pub fn expire(ctx: &AuthContext) {
    if let Err(err) = LocalStorage::set(AUTH_ERROR_KEY, true) {
        tracing::warn!(error = %err, "could not record the expired session");
    }
    ctx.set_session.update(Session::invalidate);
}

pub fn sign_out(ctx: &AuthContext) {
    ctx.set_session.update(Session::invalidate);
}

/// Whether the last session ended on a 401. Clears the flag.
pub fn take_auth_error() -> bool {
    let expired = LocalStorage::get::<bool>(AUTH_ERROR_KEY).unwrap_or(false);
    LocalStorage::delete(AUTH_ERROR_KEY);
    expired
}
