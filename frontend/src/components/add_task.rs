use crate::auth::use_auth;
use crate::components::form_state::{FormField, TaskForm};
use crate::reaction::Reactor;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mytasks::flows::board;
use mytasks::{Reaction, Submission};

#[component]
pub fn AddTask() -> impl IntoView {
    let auth = use_auth();
    let reactor = Reactor::new();
    let schema = StoredValue::new(auth.forms().task);
    let form = TaskForm::new();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = auth.token() else {
            reactor.apply(Reaction::Reauthenticate, None);
            return;
        };

        let request = form.to_create();
        form.state.submitting.set(true);
        spawn_local(async move {
            match board::create_task(&auth.api(), &schema.get_value(), &token, &request).await {
                Submission::Invalid(errors) => form.state.show(errors),
                Submission::Sent(reaction) => {
                    if reactor.apply(reaction, Some(form.state)) {
                        form.reset();
                    }
                }
            }
            form.state.submitting.set(false);
        });
    };

    view! {
        <form data-testid="HomePageAddTodo-Form" class="mt-8 flex flex-col gap-4 w-11/12 max-w-2xl" on:submit=on_submit novalidate>
            <h2 class="font-semibold text-xl">"Add a new task"</h2>
            <FormField field=form.title state=form.state schema=schema label="Title" />
            <FormField field=form.description state=form.state schema=schema label="Description" multiline=true />
            <button
                type="submit"
                class="self-start bg-blue-600 text-white font-semibold py-2 px-6 rounded-lg hover:bg-blue-700 transition-all duration-300 cursor-pointer"
            >
                {move || if form.state.submitting.get() { "Adding..." } else { "Add task" }}
            </button>
        </form>
    }
}
