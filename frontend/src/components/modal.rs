use leptos::prelude::*;

/// `<dialog>` overlay driven by an `open` signal. Closing through the
/// browser (Escape) writes back `false`.
#[component]
pub fn Modal(open: RwSignal<bool>, children: ChildrenFn) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        let Some(dialog) = dialog_ref.get() else {
            return;
        };
        if open.get() {
            if !dialog.open() {
                let _ = dialog.show_modal();
            }
        } else if dialog.open() {
            dialog.close();
        }
    });

    view! {
        <dialog
            node_ref=dialog_ref
            class="rounded-xl p-0 backdrop:bg-black/40"
            on:close=move |_| open.set(false)
        >
            <div class="w-[min(90vw,32rem)] p-6">
                <Show when=move || open.get()>{children()}</Show>
            </div>
        </dialog>
    }
}
