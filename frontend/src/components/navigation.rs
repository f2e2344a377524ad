use crate::auth::sign_out;
use crate::reaction::Reactor;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mytasks::Reaction;
use mytasks::flows::auth;

#[component]
pub fn Navigation(settings_open: RwSignal<bool>) -> impl IntoView {
    let reactor = Reactor::new();

    let on_signout = move |_| {
        let ctx = reactor.auth();
        spawn_local(async move {
            match auth::signout(&ctx.api()).await {
                Reaction::Reauthenticate => sign_out(&ctx),
                other => {
                    reactor.apply(other, None);
                }
            }
        });
    };

    view! {
        <nav class="fixed top-0 left-0 w-full lg:w-80 lg:h-screen bg-white shadow-lg p-6 flex lg:flex-col gap-4 items-center lg:items-start z-40">
            <h1 class="text-2xl font-bold text-gray-800">"MyTasks"</h1>
            <button
                data-testid="HomePageNavigation-Settings-Button"
                class="font-semibold text-gray-700 hover:text-blue-600 cursor-pointer"
                on:click=move |_| settings_open.set(true)
            >
                "Settings"
            </button>
            <button
                data-testid="HomePageNavigation-Signout-Button"
                class="font-semibold text-red-500 hover:text-red-700 cursor-pointer"
                on:click=on_signout
            >
                "Sign out"
            </button>
        </nav>
    }
}
