use std::cell::Cell;
use std::cell::RefCell;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

mod rest;
pub use rest::*;

pub const SENT_TEXT: &str = "Message sent! I'll get back to you soon.";
pub const FAILED_TEXT: &str = "Failed to send message. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// The form control's `name` attribute, which is also the column it's stored in.
    pub fn name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Please fill in the {0} field.")]
    Blank(Field),

    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Why the remote insert didn't go through. The visitor sees the same notice for all of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("network error: {0}")]
    Network(String),

    #[error("rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("couldn't encode request: {0}")]
    Encode(String),
}

/// One row of the `contact_messages` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        for field in Field::ALL {
            if self.get(field).trim().is_empty() {
                return Err(FieldError::Blank(field));
            }
        }

        if !looks_like_email(self.email.trim()) {
            return Err(FieldError::InvalidEmail);
        }

        Ok(())
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Somewhere contact messages can be written to.
#[allow(async_fn_in_trait)]
pub trait MessageStore {
    async fn insert(&self, message: &ContactMessage) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A toast shown to the visitor after submitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Another submission was already in flight, so nothing was sent.
    Busy,
    Invalid(FieldError),
    Sent,
    Failed(StoreError),
}

impl Outcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Outcome::Busy => None,
            Outcome::Invalid(err) => Some(Notice {
                level: Level::Error,
                text: err.to_string(),
            }),
            Outcome::Sent => Some(Notice {
                level: Level::Success,
                text: SENT_TEXT.to_owned(),
            }),
            Outcome::Failed(_) => Some(Notice {
                level: Level::Error,
                text: FAILED_TEXT.to_owned(),
            }),
        }
    }
}

/// Releases the submitting flag however the submission ends, including being dropped half way.
struct InFlight<'a>(&'a Cell<bool>);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// The state behind the contact form.
#[derive(Default)]
pub struct ContactForm {
    fields: RefCell<ContactMessage>,
    submitting: Cell<bool>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> ContactMessage {
        self.fields.borrow().clone()
    }

    pub fn set_fields(&self, fields: ContactMessage) {
        *self.fields.borrow_mut() = fields;
    }

    pub fn set(&self, field: Field, value: impl Into<String>) {
        *self.fields.borrow_mut().get_mut(field) = value.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    /// Sends the current fields to `store`, once.
    ///
    /// The fields are cleared if it succeeds and left alone otherwise, so the visitor can try again.
    pub async fn submit<S: MessageStore>(&self, store: &S) -> Outcome {
        if self.submitting.replace(true) {
            return Outcome::Busy;
        }
        let _guard = InFlight(&self.submitting);

        let message = self.fields();
        if let Err(err) = message.validate() {
            return Outcome::Invalid(err);
        }

        match store.insert(&message).await {
            Ok(()) => {
                log::debug!("contact message from {} stored", message.email);
                self.set_fields(ContactMessage::default());
                Outcome::Sent
            }
            Err(err) => {
                log::error!("error submitting message: {}", err);
                Outcome::Failed(err)
            }
        }
    }
}
