use crate::auth::use_auth;
use crate::components::add_task::AddTask;
use crate::components::navigation::Navigation;
use crate::components::settings::SettingsOverlay;
use crate::components::task_list::TaskList;
use crate::reaction::Reactor;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mytasks::flows::board::{self, Board, BoardState, EMPTY_BOARD};

/// Shared by everything on the home page that can change the list.
#[derive(Clone, Copy)]
pub struct BoardContext {
    pub reload_trigger: ReadSignal<u32>,
    set_reload_trigger: WriteSignal<u32>,
}

impl BoardContext {
    pub fn new() -> Self {
        let (reload_trigger, set_reload_trigger) = signal(0);
        Self {
            reload_trigger,
            set_reload_trigger,
        }
    }

    /// Refetch the list from the server.
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = use_auth();
    let board_ctx = BoardContext::new();
    provide_context(board_ctx);
    let reactor = Reactor::new();

    let (board, set_board) = signal(Board::default());
    let settings_open = RwSignal::new(false);

    // mount, session change and every successful mutation
    Effect::new(move |_| {
        board_ctx.reload_trigger.track();
        let session = auth.session.get();
        if !session.is_authenticated() {
            return;
        }
        spawn_local(async move {
            match board::load_board(&auth.api(), &session).await {
                Ok(loaded) => set_board.set(loaded),
                Err(reaction) => {
                    reactor.apply(reaction, None);
                }
            }
        });
    });

    let content = move || match board.with(|b| b.state.clone()) {
        BoardState::Loading => view! {
            <div class="mt-10 text-gray-500">"Loading tasks..."</div>
        }
        .into_any(),
        BoardState::Empty => view! {
            <p data-testid="HomePage-No-Tasks" class="mt-10 text-lg text-gray-600">{EMPTY_BOARD}</p>
        }
        .into_any(),
        BoardState::Tasks(tasks) => view! { <TaskList tasks=tasks /> }.into_any(),
        BoardState::Failed(message) => view! {
            <p data-testid="HomePage-Task-Error" class="mt-10 text-lg text-red-500">{message}</p>
        }
        .into_any(),
    };

    view! {
        <Navigation settings_open=settings_open />

        <main data-testid="homepage-main-content" class="flex-1 pt-40 pl-5 sm:pl-10 lg:pt-30 lg:ml-80">
            <div>
                <h1 class="font-semibold text-2xl md:text-3xl">{move || board.with(Board::greeting)}</h1>
                <p class="md:text-lg">"Ready to do a task or add a new one?"</p>
                <div class="w-11/12 p-1 bg-black/20 rounded"></div>
            </div>

            <AddTask />

            <div class="mt-5 w-11/12 p-1 bg-black/20 rounded"></div>

            <div class="mt-10">{content}</div>
        </main>

        <SettingsOverlay open=settings_open />
    }
}
