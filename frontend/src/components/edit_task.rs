use crate::auth::use_auth;
use crate::components::form_state::{FormField, TaskForm};
use crate::reaction::Reactor;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mytasks::flows::board;
use mytasks::shared::Todo;
use mytasks::{Reaction, Submission};

/// Edit overlay body. Cancel closes without a request.
#[component]
pub fn EditTask(todo: Todo, on_close: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let reactor = Reactor::new();
    let schema = StoredValue::new(auth.forms().task);
    let form = TaskForm::new();
    form.fill(&todo);
    let todo_id = todo.id;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = auth.token() else {
            reactor.apply(Reaction::Reauthenticate, None);
            return;
        };

        let request = form.to_update(todo_id);
        form.state.submitting.set(true);
        spawn_local(async move {
            match board::update_task(&auth.api(), &schema.get_value(), &token, &request).await {
                Submission::Invalid(errors) => form.state.show(errors),
                Submission::Sent(reaction) => {
                    if reactor.apply(reaction, Some(form.state)) {
                        on_close.run(());
                    }
                }
            }
            form.state.submitting.set(false);
        });
    };

    view! {
        <form data-testid="HomePageEditTaskForm" class="flex flex-col gap-4" on:submit=on_submit novalidate>
            <h2 class="font-semibold text-xl">"Edit task"</h2>
            <FormField field=form.title state=form.state schema=schema label="Title" />
            <FormField field=form.description state=form.state schema=schema label="Description" multiline=true />
            <div class="flex justify-end gap-2">
                <button
                    type="button"
                    class="px-4 py-2 border border-gray-300 rounded-lg cursor-pointer"
                    on:click=move |_| on_close.run(())
                >
                    "Cancel"
                </button>
                <button
                    type="submit"
                    class="px-4 py-2 bg-blue-600 text-white font-semibold rounded-lg hover:bg-blue-700 cursor-pointer"
                >
                    "Save"
                </button>
            </div>
        </form>
    }
}
