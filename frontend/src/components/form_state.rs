//! Form state shared by the auth and task forms.
//!
//! Scattered signals are grouped into one `Copy` struct per form so they
//! can be passed as props: values, field errors and the in-flight flag,
//! plus reset and conversion to the request body.

use leptos::prelude::*;
use mytasks::shared::{CreateTodoRequest, LoginRequest, RegisterRequest, Todo, UpdateTodoRequest};
use mytasks::validation::{
    FIELD_DESCRIPTION, FIELD_EMAIL, FIELD_PASSWORD, FIELD_TITLE, FIELD_USERNAME,
};
use mytasks::{FormErrors, FormSchema};

/// A text input bound to one schema field.
#[derive(Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub value: RwSignal<String>,
}

impl Field {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            value: RwSignal::new(String::new()),
        }
    }
}

#[derive(Clone, Copy)]
pub struct FormState {
    pub errors: RwSignal<FormErrors>,
    pub submitting: RwSignal<bool>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            errors: RwSignal::new(FormErrors::new()),
            submitting: RwSignal::new(false),
        }
    }

    pub fn error(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)))
    }

    /// Blur-time check: sets or clears this one field's message.
    pub fn blur(&self, schema: &FormSchema, field: Field) {
        let value = field.value.get_untracked();
        match schema.validate_field(field.name, &value) {
            Some(message) => self.errors.update(|e| e.set(field.name, message)),
            None => self.errors.update(|e| e.clear(field.name)),
        }
    }

    pub fn show(&self, errors: FormErrors) {
        self.errors.set(errors);
    }

    /// Merges server field errors into the current ones.
    pub fn merge(&self, errors: FormErrors) {
        self.errors.update(|current| {
            for (field, message) in errors.iter() {
                current.set(field, message);
            }
        });
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================
// Auth forms
// =========================================================

#[derive(Clone, Copy)]
pub struct LoginForm {
    pub email: Field,
    pub password: Field,
    pub state: FormState,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: Field::new(FIELD_EMAIL),
            password: Field::new(FIELD_PASSWORD),
            state: FormState::new(),
        }
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.value.get_untracked(),
            password: self.password.value.get_untracked(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct RegisterForm {
    pub username: Field,
    pub email: Field,
    pub password: Field,
    pub state: FormState,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self {
            username: Field::new(FIELD_USERNAME),
            email: Field::new(FIELD_EMAIL),
            password: Field::new(FIELD_PASSWORD),
            state: FormState::new(),
        }
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.value.get_untracked(),
            email: self.email.value.get_untracked(),
            password: self.password.value.get_untracked(),
        }
    }
}

// =========================================================
// Task form (add and edit)
// =========================================================

#[derive(Clone, Copy)]
pub struct TaskForm {
    pub title: Field,
    pub description: Field,
    pub state: FormState,
}

impl TaskForm {
    pub fn new() -> Self {
        Self {
            title: Field::new(FIELD_TITLE),
            description: Field::new(FIELD_DESCRIPTION),
            state: FormState::new(),
        }
    }

    /// Pre-fills from an existing task (edit overlay).
    pub fn fill(&self, todo: &Todo) {
        self.title.value.set(todo.title.clone());
        self.description.value.set(todo.description.clone());
        self.state.errors.set(FormErrors::new());
    }

    pub fn reset(&self) {
        self.title.value.set(String::new());
        self.description.value.set(String::new());
        self.state.errors.set(FormErrors::new());
    }

    pub fn to_create(&self) -> CreateTodoRequest {
        CreateTodoRequest {
            title: self.title.value.get_untracked(),
            description: self.description.value.get_untracked(),
        }
    }

    pub fn to_update(&self, todo_id: i64) -> UpdateTodoRequest {
        UpdateTodoRequest {
            todo_id,
            title: self.title.value.get_untracked(),
            description: self.description.value.get_untracked(),
        }
    }
}

// =========================================================
// Inputs
// =========================================================

/// Labelled input with its error line underneath.
#[component]
pub fn FormField(
    field: Field,
    state: FormState,
    schema: StoredValue<FormSchema>,
    #[prop(into)] label: String,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = false)] multiline: bool,
) -> impl IntoView {
    let error = state.error(field.name);
    let on_blur = move |_| schema.with_value(|s| state.blur(s, field));
    let class = "border border-gray-300 p-3 rounded-lg focus:outline-none focus:ring-2 focus:ring-blue-500 transition";

    let input = if multiline {
        view! {
            <textarea
                id=field.name
                class=class
                prop:value=field.value
                on:input=move |ev| field.value.set(event_target_value(&ev))
                on:blur=on_blur
            ></textarea>
        }
        .into_any()
    } else {
        view! {
            <input
                id=field.name
                type=input_type
                class=class
                prop:value=field.value
                on:input=move |ev| field.value.set(event_target_value(&ev))
                on:blur=on_blur
            />
        }
        .into_any()
    };

    view! {
        <div class="flex flex-col">
            <label for=field.name class="mb-1 text-sm font-medium text-gray-700">{label}</label>
            {input}
            {move || {
                error
                    .get()
                    .map(|message| view! { <span class="text-red-500 text-sm mt-1">{message}</span> })
            }}
        </div>
    }
}
