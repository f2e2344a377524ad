use super::{Reaction, Submission};
use crate::api::{LOGIN_FAILED, REGISTER_FAILED, TaskApi};
use crate::error::ApiError;
use crate::notify::Toast;
use crate::request::HttpClient;
use crate::route::AppRoute;
use crate::session::Session;
use crate::validation::{FIELD_EMAIL, FormErrors, FormSchema};
use mytasks_shared::{LoginRequest, RegisterRequest};
use std::time::Duration;
use tracing::info;

pub const REGISTER_SUCCESS: &str =
    "Registration successful! You will be redirected to the homepage shortly.";

/// Pause between the registration toast and the follow-up navigation.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    SignedIn(String),
    /// Shown above the form; the user stays on `/login`
    Rejected(String),
    Fields(FormErrors),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// Toast, then go home after [`REDIRECT_DELAY`]
    Registered(Toast),
    Fields(FormErrors),
    /// Toast, then reload the page after [`REDIRECT_DELAY`]
    Failed(Toast),
    /// Toast only; the form stays as typed
    Unreachable(Toast),
}

pub async fn login<C: HttpClient>(
    api: &TaskApi<C>,
    schema: &FormSchema,
    input: &LoginRequest,
) -> Submission<LoginOutcome> {
    if let Err(errors) = schema.validate(input) {
        return Submission::Invalid(errors);
    }

    Submission::Sent(match api.login(input).await {
        Ok(token) => {
            info!("signed in");
            LoginOutcome::SignedIn(token)
        }
        Err(ApiError::Validation {
            field: Some(field),
            message,
        }) => LoginOutcome::Fields(FormErrors::single(&field, &message)),
        Err(err) => LoginOutcome::Rejected(message_or(err, LOGIN_FAILED)),
    })
}

pub async fn register<C: HttpClient>(
    api: &TaskApi<C>,
    schema: &FormSchema,
    input: &RegisterRequest,
) -> Submission<RegisterOutcome> {
    if let Err(errors) = schema.validate(input) {
        return Submission::Invalid(errors);
    }

    Submission::Sent(match api.register(input).await {
        Ok(()) => {
            info!("account created");
            RegisterOutcome::Registered(Toast::success(REGISTER_SUCCESS))
        }
        // an already registered address belongs under the email input
        Err(ApiError::Domain {
            status: crate::error::STATUS_CONFLICT,
            message,
        }) => RegisterOutcome::Fields(FormErrors::single(FIELD_EMAIL, &message)),
        Err(ApiError::Validation {
            field: Some(field),
            message,
        }) => RegisterOutcome::Fields(FormErrors::single(&field, &message)),
        Err(ApiError::Validation { message, .. }) => {
            RegisterOutcome::Unreachable(Toast::error(message))
        }
        Err(ApiError::Network { .. }) => {
            RegisterOutcome::Unreachable(Toast::error(REGISTER_FAILED))
        }
        Err(err @ (ApiError::Domain { .. } | ApiError::Auth { .. })) => {
            RegisterOutcome::Failed(Toast::error(err.message()))
        }
    })
}

/// Where registration ends once the follow-up refresh has settled. A refused
/// cookie leaves the session anonymous, which lands on `/login`.
pub fn landing_after_register(session: &Session) -> AppRoute {
    if session.is_authenticated() {
        AppRoute::Home
    } else {
        AppRoute::Login
    }
}

/// Success and 401 both end the session locally.
pub async fn signout<C: HttpClient>(api: &TaskApi<C>) -> Reaction {
    match api.signout().await {
        Ok(()) => {
            info!("signed out");
            Reaction::Reauthenticate
        }
        Err(err) => Reaction::from_error(err),
    }
}

fn message_or(err: ApiError, default: &str) -> String {
    match err {
        ApiError::Network { .. } => default.to_string(),
        other => other.message().to_string(),
    }
}
