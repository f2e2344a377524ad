//! Form schemas.
//!
//! Every form is a list of fields, every field a list of rules checked in
//! declaration order. A field reports only its first violated rule, but all
//! fields are checked, so one submit surfaces every invalid input at once.

use crate::config::ClientConfig;
use lazy_static::lazy_static;
use mytasks_shared::{CreateTodoRequest, LoginRequest, RegisterRequest, UpdateTodoRequest};
use regex::Regex;

lazy_static! {
    /// Something@something.tld with a TLD of at least two characters
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").unwrap();
}

pub const FIELD_USERNAME: &str = "username";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_DESCRIPTION: &str = "description";

pub const TITLE_MAX: usize = 140;
pub const DESCRIPTION_MAX: usize = 320;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required(&'static str),
    MinLength(usize, &'static str),
    MaxLength(usize, &'static str),
    Email(&'static str),
}

impl Rule {
    fn check(&self, value: &str) -> Result<(), &'static str> {
        // lengths count characters, not bytes
        let len = value.chars().count();
        let ok = match self {
            Rule::Required(_) => !value.is_empty(),
            Rule::MinLength(min, _) => len >= *min,
            Rule::MaxLength(max, _) => len <= *max,
            Rule::Email(_) => EMAIL_REGEX.is_match(value),
        };
        if ok { Ok(()) } else { Err(self.message()) }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rule::Required(msg)
            | Rule::MinLength(_, msg)
            | Rule::MaxLength(_, msg)
            | Rule::Email(msg) => msg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub rules: Vec<Rule>,
}

impl FieldSchema {
    fn new(name: &'static str, rules: Vec<Rule>) -> Self {
        Self { name, rules }
    }

    /// First violated rule, if any.
    pub fn check(&self, value: &str) -> Option<&'static str> {
        self.rules.iter().find_map(|rule| rule.check(value).err())
    }
}

// =========================================================
// Field errors
// =========================================================

/// Field → message, in the order the fields were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<(String, String)>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.set(field, message);
        errors
    }

    pub fn set(&mut self, field: &str, message: &str) {
        match self.0.iter_mut().find(|(f, _)| f == field) {
            Some(entry) => entry.1 = message.to_string(),
            None => self.0.push((field.to_string(), message.to_string())),
        }
    }

    pub fn clear(&mut self, field: &str) {
        self.0.retain(|(f, _)| f != field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(f, m)| (f.as_str(), m.as_str()))
    }
}

// =========================================================
// Form input
// =========================================================

/// Exposes a form's raw field values by name.
pub trait FormInput {
    fn value(&self, field: &str) -> Option<&str>;
}

impl FormInput for LoginRequest {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            FIELD_EMAIL => Some(&self.email),
            FIELD_PASSWORD => Some(&self.password),
            _ => None,
        }
    }
}

impl FormInput for RegisterRequest {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            FIELD_USERNAME => Some(&self.username),
            FIELD_EMAIL => Some(&self.email),
            FIELD_PASSWORD => Some(&self.password),
            _ => None,
        }
    }
}

impl FormInput for CreateTodoRequest {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            FIELD_TITLE => Some(&self.title),
            FIELD_DESCRIPTION => Some(&self.description),
            _ => None,
        }
    }
}

impl FormInput for UpdateTodoRequest {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            FIELD_TITLE => Some(&self.title),
            FIELD_DESCRIPTION => Some(&self.description),
            _ => None,
        }
    }
}

// =========================================================
// Schemas
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSchema {
    pub fields: Vec<FieldSchema>,
}

impl FormSchema {
    /// Accepts anything; used when client-side validation is switched off.
    pub fn pass_through() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn login() -> Self {
        Self {
            fields: vec![email_field(), password_field()],
        }
    }

    pub fn register() -> Self {
        Self {
            fields: vec![
                FieldSchema::new(
                    FIELD_USERNAME,
                    vec![
                        Rule::Required("Username is required."),
                        Rule::MinLength(2, "Username must have at least 2 characters."),
                        Rule::MaxLength(16, "Username cannot have more than 16 characters."),
                    ],
                ),
                email_field(),
                password_field(),
            ],
        }
    }

    /// Shared by the add-task and edit-task forms.
    pub fn task() -> Self {
        Self {
            fields: vec![
                FieldSchema::new(
                    FIELD_TITLE,
                    vec![
                        Rule::Required("Title is required."),
                        Rule::MinLength(2, "Title must have at least 2 characters."),
                        Rule::MaxLength(TITLE_MAX, "Title cannot have more than 140 characters."),
                    ],
                ),
                FieldSchema::new(
                    FIELD_DESCRIPTION,
                    vec![Rule::MaxLength(
                        DESCRIPTION_MAX,
                        "Description cannot have more than 320 characters.",
                    )],
                ),
            ],
        }
    }

    pub fn is_pass_through(&self) -> bool {
        self.fields.is_empty()
    }

    /// Blur-time check of a single field. Unknown fields are always valid.
    pub fn validate_field(&self, field: &str, value: &str) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|f| f.name == field)
            .and_then(|f| f.check(value))
    }

    /// Submit-time check of every field.
    pub fn validate<I: FormInput + ?Sized>(&self, input: &I) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        for field in &self.fields {
            let value = input.value(field.name).unwrap_or_default();
            if let Some(message) = field.check(value) {
                errors.set(field.name, message);
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn email_field() -> FieldSchema {
    FieldSchema::new(
        FIELD_EMAIL,
        vec![
            Rule::Required("Email is required."),
            Rule::Email("Email must be a valid email address."),
        ],
    )
}

fn password_field() -> FieldSchema {
    FieldSchema::new(
        FIELD_PASSWORD,
        vec![
            Rule::Required("Password is required."),
            Rule::MinLength(8, "Password must have at least 8 characters."),
            Rule::MaxLength(32, "Password cannot have more than 32 characters."),
        ],
    )
}

/// The schemas of every form in the app, built once from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchemas {
    pub login: FormSchema,
    pub register: FormSchema,
    pub task: FormSchema,
}

impl FormSchemas {
    pub fn from_config(config: &ClientConfig) -> Self {
        if config.validation {
            Self {
                login: FormSchema::login(),
                register: FormSchema::register(),
                task: FormSchema::task(),
            }
        } else {
            Self {
                login: FormSchema::pass_through(),
                register: FormSchema::pass_through(),
                task: FormSchema::pass_through(),
            }
        }
    }
}
