use crate::auth::{sign_in, take_auth_error, use_auth};
use crate::components::form_state::{FormField, LoginForm};
use crate::web::router::Link;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mytasks::Submission;
use mytasks::flows::auth::{self, LoginOutcome};

const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let schema = StoredValue::new(auth.forms().login);
    let form = LoginForm::new();

    let (error_msg, set_error_msg) =
        signal(take_auth_error().then(|| SESSION_EXPIRED.to_string()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error_msg.set(None);

        let request = form.to_request();
        form.state.submitting.set(true);
        spawn_local(async move {
            let outcome = auth::login(&auth.api(), &schema.get_value(), &request).await;
            match outcome {
                Submission::Invalid(errors) => form.state.show(errors),
                Submission::Sent(LoginOutcome::SignedIn(token)) => sign_in(&auth, token),
                Submission::Sent(LoginOutcome::Rejected(message)) => set_error_msg.set(Some(message)),
                Submission::Sent(LoginOutcome::Fields(errors)) => form.state.merge(errors),
            }
            form.state.submitting.set(false);
        });
    };

    view! {
        <div data-testid="Login" class="flex justify-center items-center h-screen bg-gray-100">
            <div class="w-full max-w-md bg-white p-8 rounded-2xl shadow-lg">
                <h1 class="text-center text-2xl font-bold mb-6 text-gray-800">"Login to Your Account"</h1>

                <form class="flex flex-col gap-4" on:submit=on_submit novalidate>
                    {move || {
                        error_msg
                            .get()
                            .map(|message| {
                                view! {
                                    <div role="alert" data-testid="Login-Error" class="rounded-lg bg-red-100 text-red-700 text-sm p-3">
                                        {message}
                                    </div>
                                }
                            })
                    }}

                    <FormField field=form.email state=form.state schema=schema label="E-Mail Address" input_type="email" />
                    <FormField field=form.password state=form.state schema=schema label="Password" input_type="password" />

                    <button
                        type="submit"
                        class="mt-4 bg-blue-600 text-white font-semibold py-3 rounded-lg hover:bg-blue-700 transition-all duration-300 cursor-pointer"
                    >
                        {move || if form.state.submitting.get() { "Logging in..." } else { "Login" }}
                    </button>

                    <p class="text-center text-gray-500 mt-3 text-sm">
                        "I don't have an account yet. "
                        <Link to="/register">"Register"</Link>
                        "."
                    </p>
                </form>
            </div>
        </div>
    }
}
