use crate::session::Session;
use std::fmt;

/// Client routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Home,
    Login,
    Register,
    NotFound,
}

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Signed-in users only
    Protected,
    /// Signed-out users only (login, register)
    AuthOnly,
    Public,
}

/// Outcome of checking a route against the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Session still loading; show the placeholder
    Pending,
    Render,
    Redirect(AppRoute),
}

impl AppRoute {
    pub fn from_path(path: &str) -> Self {
        // query and fragment do not take part in matching
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path.trim_end_matches('/') {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::NotFound => "/404",
        }
    }

    pub fn guard(&self) -> Guard {
        match self {
            Self::Home => Guard::Protected,
            Self::Login | Self::Register => Guard::AuthOnly,
            Self::NotFound => Guard::Public,
        }
    }

    /// Re-evaluated on every render; nothing is cached.
    pub fn resolve(&self, session: &Session) -> Resolution {
        match self.guard() {
            Guard::Public => Resolution::Render,
            _ if session.is_loading() => Resolution::Pending,
            Guard::Protected if !session.is_authenticated() => {
                Resolution::Redirect(Self::Login)
            }
            Guard::AuthOnly if session.is_authenticated() => Resolution::Redirect(Self::Home),
            _ => Resolution::Render,
        }
    }
}

impl fmt::Display for AppRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_path())
    }
}
