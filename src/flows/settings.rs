//! Profile and active sessions overlay.

use super::Reaction;
use crate::api::{SETTINGS_FAILED, TaskApi};
use crate::error::ApiError;
use crate::notify::Toast;
use crate::request::HttpClient;
use crate::session::Session;
use mytasks_shared::{Informations, SessionRecord, Uuid};

pub const NO_SESSIONS: &str = "No active sessions found.";
pub const CURRENT_SESSION_LABEL: &str = "This session";

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsView {
    Loading,
    Ready(Informations),
}

/// The current session is never offered for revocation.
pub fn can_revoke(record: &SessionRecord) -> bool {
    !record.current
}

/// `Err(Notify)` closes the overlay; the server's wording is not shown.
pub async fn load_settings<C: HttpClient>(
    api: &TaskApi<C>,
    session: &Session,
) -> Result<SettingsView, Reaction> {
    if session.is_loading() {
        return Ok(SettingsView::Loading);
    }
    let Some(token) = session.token() else {
        return Err(Reaction::Reauthenticate);
    };

    match api.settings(token).await {
        Ok(overview) => Ok(SettingsView::Ready(overview.informations)),
        Err(ApiError::Auth { .. }) => Err(Reaction::Reauthenticate),
        Err(_) => Err(Reaction::Notify(Toast::error(SETTINGS_FAILED))),
    }
}

/// `Ok` means refetch; no toast on success.
pub async fn revoke_session<C: HttpClient>(
    api: &TaskApi<C>,
    token: &str,
    jti_id: Uuid,
) -> Result<(), Reaction> {
    api.revoke_session(token, jti_id).await.map_err(|err| match err {
        ApiError::Auth { .. } => Reaction::Reauthenticate,
        other => Reaction::Notify(Toast::error(other.message())),
    })
}
