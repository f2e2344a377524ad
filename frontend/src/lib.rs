//! MyTasks browser app.
//!
//! Context-driven layout:
//! - `auth`: session provider, the single writer of session state
//! - `web::router`: history router guarded by the core's route rules
//! - `reaction`: applies flow outcomes (toasts, reloads, field errors, 401s)
//! - `components`: pages and widgets

mod auth;
pub mod logger;
mod reaction;
mod components {
    pub mod add_task;
    pub mod edit_task;
    pub mod form_state;
    pub mod home;
    pub mod loading;
    pub mod login;
    pub mod modal;
    pub mod navigation;
    pub mod register;
    pub mod settings;
    pub mod task_list;
    pub mod toast;
}
pub(crate) mod web;

use crate::auth::{AuthContext, init_auth};
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::register::RegisterPage;
use crate::components::toast::{ToastContext, ToastHost};
use crate::web::router::{Link, Router, RouterOutlet};

use leptos::prelude::*;
use mytasks::{AppRoute, ClientConfig};

fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-gray-100">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-red-500">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <p class="mt-4"><Link to="/">"Back to MyTasks"</Link></p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = ClientConfig::from_build_env();

    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);
    provide_context(ToastContext::new());

    init_auth(&auth_ctx);

    view! {
        <Router session=auth_ctx.session_signal()>
            <RouterOutlet matcher=route_matcher />
        </Router>
        <ToastHost />
    }
}
