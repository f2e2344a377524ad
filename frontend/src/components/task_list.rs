use crate::auth::use_auth;
use crate::components::edit_task::EditTask;
use crate::components::modal::Modal;
use crate::reaction::Reactor;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mytasks::flows::board;
use mytasks::shared::Todo;

#[component]
pub fn TaskList(tasks: Vec<Todo>) -> impl IntoView {
    let editing = RwSignal::new(None::<Todo>);
    let edit_open = RwSignal::new(false);

    let on_edit = Callback::new(move |todo: Todo| {
        editing.set(Some(todo));
        edit_open.set(true);
    });
    let on_close = Callback::new(move |_: ()| edit_open.set(false));

    view! {
        <div data-testid="HomePageManageAndDisplayTodos-Display-Tasks" class="grid grid-cols-1 md:grid-cols-2 xl:grid-cols-3 gap-5 max-w-[85%]">
            {tasks
                .into_iter()
                .map(|todo| view! { <TaskCard todo=todo on_edit=on_edit /> })
                .collect_view()}
        </div>

        <Modal open=edit_open>
            {move || editing.get().map(|todo| view! { <EditTask todo=todo on_close=on_close /> })}
        </Modal>
    }
}

#[component]
fn TaskCard(todo: Todo, on_edit: Callback<Todo>) -> impl IntoView {
    let auth = use_auth();
    let reactor = Reactor::new();
    let id = todo.id;
    let modifiable = board::can_modify(&todo);

    let on_complete = move |_| {
        let Some(token) = auth.token() else { return };
        spawn_local(async move {
            let reaction = board::complete_task(&auth.api(), &token, id).await;
            reactor.apply(reaction, None);
        });
    };

    let on_delete = move |_| {
        let Some(token) = auth.token() else { return };
        spawn_local(async move {
            let reaction = board::delete_task(&auth.api(), &token, id).await;
            reactor.apply(reaction, None);
        });
    };

    let card_class = if modifiable {
        "w-full flex flex-col justify-between p-5 border rounded shadow-lg border-gray-400/40"
    } else {
        "w-full flex flex-col justify-between p-5 border rounded shadow-lg bg-gray-100 text-gray-400 border-gray-300"
    };
    let editable = todo.clone();

    view! {
        <div data-testid=format!("task-{id}") class=card_class>
            <div class="flex flex-col max-w-[85%] overflow-hidden">
                <h1 class="font-semibold text-lg leading-snug break-words">{todo.title}</h1>
                <p class="text-lg leading-snug break-words">{todo.description}</p>
            </div>

            <div class="flex justify-end gap-2 mt-5">
                <button
                    data-testid=format!("HomePageManageAndDisplayTodos-Complete-Button-For-{id}")
                    class="px-3 py-1 border border-gray-400/40 rounded-md font-semibold text-green-500 disabled:cursor-not-allowed disabled:bg-gray-200"
                    disabled=!modifiable
                    on:click=on_complete
                >
                    "Completed"
                </button>
                <button
                    data-testid=format!("HomePageManageAndDisplayTodos-Edit-Button-For-{id}")
                    class="px-3 py-1 border border-gray-400/40 rounded-md font-semibold text-blue-500 disabled:cursor-not-allowed disabled:bg-gray-200"
                    disabled=!modifiable
                    on:click=move |_| on_edit.run(editable.clone())
                >
                    "Edit"
                </button>
                <button
                    data-testid=format!("HomePageManageAndDisplayTodos-Delete-Button-For-{id}")
                    class="px-3 py-1 border border-gray-400/40 rounded-md font-semibold text-red-500 cursor-pointer"
                    on:click=on_delete
                >
                    "Delete"
                </button>
            </div>
        </div>
    }
}
