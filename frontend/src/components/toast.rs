use leptos::prelude::*;
use mytasks::notify::ToastId;
use mytasks::{TOAST_LIFETIME, Toast, ToastQueue};

#[derive(Clone, Copy)]
pub struct ToastContext {
    queue: RwSignal<ToastQueue>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::new()),
        }
    }

    /// Shows the toast and schedules its removal.
    pub fn show(&self, toast: Toast) {
        let mut id = 0;
        self.queue.update(|q| id = q.push(toast));

        let queue = self.queue;
        set_timeout(move || queue.update(|q| q.dismiss(id)), TOAST_LIFETIME);
    }

    pub fn dismiss(&self, id: ToastId) {
        self.queue.update(|q| q.dismiss(id));
    }
}

pub fn use_toasts() -> ToastContext {
    use_context::<ToastContext>().expect("ToastContext should be provided")
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let toasts = use_toasts();
    let items = move || {
        toasts
            .queue
            .with(|q| q.iter().map(|(id, t)| (id, t.clone())).collect::<Vec<_>>())
    };

    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2">
            <For
                each=items
                key=|(id, _)| *id
                children=move |(id, toast)| {
                    view! {
                        <div role="alert" class=toast.level.css_class()>
                            <span>{toast.message}</span>
                            <button class="ml-3 font-bold" on:click=move |_| toasts.dismiss(id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
