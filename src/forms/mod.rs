//! Form layer: field validation and save semantics for both entities.
//!
//! A save attempt resolves to exactly one of three outcomes: a success
//! message, a map of field-level validation errors, or a propagated
//! store error. Validation failures list every failing field.

mod customer;
mod ticket;
pub mod validate;

pub use customer::{CustomerForm, save_customer};
pub use ticket::{TicketForm, save_ticket};

use std::collections::BTreeMap;

/// Validation errors keyed by field name. Ordered so output is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        FieldErrors::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| (field.as_str(), m.as_str())))
    }
}

/// The result of a validated save attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { id: u32, message: String },
    Invalid(FieldErrors),
}
