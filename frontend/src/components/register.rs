use crate::auth::{refresh, use_auth};
use crate::components::form_state::{FormField, RegisterForm};
use crate::components::toast::use_toasts;
use crate::web::router::{Link, reload_page, use_router};
use leptos::prelude::*;
use leptos::task::spawn_local;
use mytasks::Submission;
use mytasks::flows::auth::{self, REDIRECT_DELAY, RegisterOutcome, landing_after_register};

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();
    let router = use_router();
    let schema = StoredValue::new(auth.forms().register);
    let form = RegisterForm::new();

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let request = form.to_request();
        form.state.submitting.set(true);
        spawn_local(async move {
            let outcome = auth::register(&auth.api(), &schema.get_value(), &request).await;
            match outcome {
                Submission::Invalid(errors) => form.state.show(errors),
                Submission::Sent(RegisterOutcome::Registered(toast)) => {
                    toasts.show(toast);
                    // the refresh cookie is set; picking it up signs the user in
                    set_timeout(
                        move || {
                            spawn_local(async move {
                                let session = refresh(&auth).await;
                                router.navigate(landing_after_register(&session).to_path());
                            })
                        },
                        REDIRECT_DELAY,
                    );
                }
                Submission::Sent(RegisterOutcome::Fields(errors)) => form.state.merge(errors),
                Submission::Sent(RegisterOutcome::Failed(toast)) => {
                    toasts.show(toast);
                    set_timeout(reload_page, REDIRECT_DELAY);
                }
                Submission::Sent(RegisterOutcome::Unreachable(toast)) => toasts.show(toast),
            }
            form.state.submitting.set(false);
        });
    };

    view! {
        <div data-testid="Register" class="flex justify-center items-center h-screen bg-gray-100">
            <div class="w-full max-w-md bg-white p-8 rounded-2xl shadow-lg">
                <h1 class="text-center text-2xl font-bold mb-6 text-gray-800">"Create an Account"</h1>

                <form class="flex flex-col gap-4" on:submit=on_submit novalidate>
                    <FormField field=form.username state=form.state schema=schema label="Username" />
                    <FormField field=form.email state=form.state schema=schema label="E-Mail Address" input_type="email" />
                    <FormField field=form.password state=form.state schema=schema label="Password" input_type="password" />

                    <button
                        type="submit"
                        data-testid="Register-Submit-Button"
                        class="mt-4 bg-blue-600 text-white font-semibold py-3 rounded-lg hover:bg-blue-700 transition-all duration-300 cursor-pointer"
                    >
                        "Confirm"
                    </button>

                    <p class="text-center text-gray-500 mt-3 text-sm">
                        "I already have an account. "
                        <Link to="/login">"Login"</Link>
                        "."
                    </p>
                </form>
            </div>
        </div>
    }
}
