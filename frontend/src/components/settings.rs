use crate::auth::use_auth;
use crate::components::modal::Modal;
use crate::reaction::Reactor;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mytasks::flows::settings::{
    self, CURRENT_SESSION_LABEL, NO_SESSIONS, SettingsView, can_revoke,
};
use mytasks::shared::{Informations, SessionRecord};

#[component]
pub fn SettingsOverlay(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let reactor = Reactor::new();
    let view_state = RwSignal::new(SettingsView::Loading);
    let refetch = RwSignal::new(0u32);

    Effect::new(move |_| {
        refetch.track();
        if !open.get() {
            view_state.set(SettingsView::Loading);
            return;
        }
        let session = auth.session.get();
        spawn_local(async move {
            match settings::load_settings(&auth.api(), &session).await {
                Ok(view) => view_state.set(view),
                Err(reaction) => {
                    open.set(false);
                    reactor.apply(reaction, None);
                }
            }
        });
    });

    let on_revoke = Callback::new(move |record: SessionRecord| {
        let Some(token) = auth.token() else { return };
        spawn_local(async move {
            match settings::revoke_session(&auth.api(), &token, record.jti_id).await {
                Ok(()) => refetch.update(|n| *n += 1),
                Err(reaction) => {
                    reactor.apply(reaction, None);
                }
            }
        });
    });

    view! {
        <Modal open=open>
            <div data-testid="HomePageSettings" class="flex flex-col gap-4">
                <div class="flex justify-between items-center">
                    <h2 class="font-semibold text-xl">"Settings"</h2>
                    <button class="cursor-pointer text-gray-500" on:click=move |_| open.set(false)>"×"</button>
                </div>
                {move || match view_state.get() {
                    SettingsView::Loading => view! {
                        <div class="text-gray-500">"Loading settings..."</div>
                    }
                    .into_any(),
                    SettingsView::Ready(info) => view! { <Profile info=info on_revoke=on_revoke /> }.into_any(),
                }}
            </div>
        </Modal>
    }
}

#[component]
fn Profile(info: Informations, on_revoke: Callback<SessionRecord>) -> impl IntoView {
    let sessions = if info.sessions.is_empty() {
        view! { <p class="text-gray-500">{NO_SESSIONS}</p> }.into_any()
    } else {
        info.sessions
            .into_iter()
            .map(|record| view! { <SessionRow record=record on_revoke=on_revoke /> })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="flex flex-col gap-2">
            <label class="text-sm font-medium text-gray-700" for="settings-username">"Username"</label>
            <input id="settings-username" class="border border-gray-300 p-2 rounded-lg bg-gray-100" disabled prop:value=info.username />
            <label class="text-sm font-medium text-gray-700" for="settings-email">"E-Mail Address"</label>
            <input id="settings-email" class="border border-gray-300 p-2 rounded-lg bg-gray-100" disabled prop:value=info.email />
        </div>

        <h3 class="font-semibold text-lg mt-4">"Active sessions"</h3>
        <ul class="flex flex-col gap-2">{sessions}</ul>
    }
}

#[component]
fn SessionRow(record: SessionRecord, on_revoke: Callback<SessionRecord>) -> impl IntoView {
    let summary = format!("{} on {} ({})", record.browser, record.os, record.ip_address);
    let action = if can_revoke(&record) {
        let record = record.clone();
        view! {
            <button
                class="px-3 py-1 border border-gray-400/40 rounded-md font-semibold text-red-500 cursor-pointer"
                on:click=move |_| on_revoke.run(record.clone())
            >
                "Log out"
            </button>
        }
        .into_any()
    } else {
        view! { <span class="text-sm text-green-600 font-semibold">{CURRENT_SESSION_LABEL}</span> }.into_any()
    };

    view! {
        <li data-testid=format!("session-{}", record.jti_id) class="flex justify-between items-center p-2 border rounded">
            <span>{summary}</span>
            {action}
        </li>
    }
}
