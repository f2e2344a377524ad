use leptos::prelude::*;

#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div data-testid="loading-screen" class="flex items-center justify-center min-h-screen bg-gray-100">
            <span class="h-10 w-10 animate-spin rounded-full border-4 border-blue-500 border-t-transparent"></span>
        </div>
    }
}
