//! History-API router.
//!
//! All `window.history` access lives here. Navigation only records the
//! requested route; a single effect checks it against the session and
//! replaces it with the guard's redirect target when needed, so a route is
//! re-checked whenever either the route or the session changes.

use leptos::prelude::*;
use mytasks::{AppRoute, Resolution, Session};
use tracing::{debug, info};
use wasm_bindgen::prelude::*;

use crate::components::loading::LoadingScreen;

fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// Hard reload of the current page.
pub fn reload_page() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().reload();
    }
}

#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    session: Signal<Session>,
}

impl RouterService {
    fn new(session: Signal<Session>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            session,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// What the outlet should do with the current route right now.
    pub fn resolution(&self) -> Resolution {
        let route = self.current_route.get();
        self.session.with(|session| route.resolve(session))
    }

    pub fn navigate(&self, path: &str) {
        let route = AppRoute::from_path(path);
        debug!(%route, "navigate");
        push_history_state(path);
        self.set_route.set(route);
    }

    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(AppRoute::from_path(&current_path()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // the listener lives as long as the page
        closure.forget();
    }

    fn setup_guard(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let session = self.session;

        Effect::new(move |_| {
            let route = current_route.get();
            let resolution = session.with(|s| route.resolve(s));

            if let Resolution::Redirect(target) = resolution {
                info!(from = %route, to = %target, "guard redirect");
                replace_history_state(target.to_path());
                set_route.set(target);
            }
        });
    }
}

fn provide_router(session: Signal<Session>) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_guard();

    provide_context(router);
    router
}

pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// Components
// ============================================================================

#[component]
pub fn Router(session: Signal<Session>, children: Children) -> impl IntoView {
    provide_router(session);

    children()
}

/// Renders the current route once its guard lets it through; pending and
/// redirecting routes show the loading screen.
#[component]
pub fn RouterOutlet(matcher: fn(AppRoute) -> AnyView) -> impl IntoView {
    let router = use_router();

    move || match router.resolution() {
        Resolution::Render => matcher(router.current_route().get()),
        Resolution::Pending | Resolution::Redirect(_) => view! { <LoadingScreen /> }.into_any(),
    }
}

/// In-app link that goes through the router instead of reloading the page.
#[component]
pub fn Link(#[prop(into)] to: String, children: Children) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class="text-blue-500 hover:text-blue-700 font-semibold underline" on:click=on_click>
            {children()}
        </a>
    }
}
