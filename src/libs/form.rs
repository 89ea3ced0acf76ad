//! State and submission logic of the contact form.
//!
//! [`FormController`] owns one [`FormState`] and the [`ErrorMap`] produced by the last
//! submit attempt. Errors are only recomputed on submit, a corrected field keeps its
//! message until the next attempt.

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info};

use super::validation;

pub const CONFIRMATION_NOTICE: &str =
    "Message Sent! Thanks for completing the form. We'll be in touch soon!";

/// A validated field, in check order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Message,
    Consent,
    QueryType,
}

impl Field {
    pub const fn key(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::Email => "email",
            Field::Message => "message",
            Field::Consent => "consent",
            Field::QueryType => "queryType",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fields edited as free text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextField {
    FirstName,
    LastName,
    Email,
    Message,
}

impl TextField {
    pub const ALL: [TextField; 4] = [
        TextField::FirstName,
        TextField::LastName,
        TextField::Email,
        TextField::Message,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            TextField::FirstName => "First Name",
            TextField::LastName => "Last Name",
            TextField::Email => "Email Address",
            TextField::Message => "Message",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }
}

impl From<TextField> for Field {
    fn from(value: TextField) -> Self {
        match value {
            TextField::FirstName => Field::FirstName,
            TextField::LastName => Field::LastName,
            TextField::Email => Field::Email,
            TextField::Message => Field::Message,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryType {
    Enquiry,
    Support,
}

impl QueryType {
    pub const ALL: [QueryType; 2] = [QueryType::Enquiry, QueryType::Support];

    pub const fn key(self) -> &'static str {
        match self {
            QueryType::Enquiry => "enquiry",
            QueryType::Support => "support",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            QueryType::Enquiry => "General Enquiry",
            QueryType::Support => "Support Request",
        }
    }

    pub const fn other(self) -> Self {
        match self {
            QueryType::Enquiry => QueryType::Support,
            QueryType::Support => QueryType::Enquiry,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
    pub consent: bool,
    pub query_type: Option<QueryType>,
}

impl FormState {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::FirstName => &self.first_name,
            TextField::LastName => &self.last_name,
            TextField::Email => &self.email,
            TextField::Message => &self.message,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::FirstName => &mut self.first_name,
            TextField::LastName => &mut self.last_name,
            TextField::Email => &mut self.email,
            TextField::Message => &mut self.message,
        }
    }
}

/// Messages of the failing checks, keyed by field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorMap(BTreeMap<Field, &'static str>);

impl ErrorMap {
    pub(crate) fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

impl fmt::Display for ErrorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, message) in self.iter() {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form passed validation. Holds the state as it was submitted.
    Accepted(FormState),
    Rejected,
}

impl SubmitOutcome {
    #[cfg(test)]
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }

    pub fn notice(&self) -> Option<&'static str> {
        match self {
            SubmitOutcome::Accepted(_) => Some(CONFIRMATION_NOTICE),
            SubmitOutcome::Rejected => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FormController {
    state: FormState,
    errors: ErrorMap,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn set_text<T: Into<String>>(&mut self, field: TextField, value: T) {
        *self.state.text_mut(field) = value.into();
    }

    #[cfg(test)]
    pub fn set_consent(&mut self, consent: bool) {
        self.state.consent = consent;
    }

    pub fn toggle_consent(&mut self) {
        self.state.consent = !self.state.consent;
    }

    pub fn select_query_type(&mut self, query_type: QueryType) {
        self.state.query_type = Some(query_type);
    }

    /// Replace the stored errors with a fresh validation pass.
    ///
    /// Returns `true` if every check passed.
    pub fn validate(&mut self) -> bool {
        self.errors = validation::validate(&self.state);
        self.errors.is_empty()
    }

    /// Handle a submit attempt.
    ///
    /// On success the state is reset and the submitted state is returned. On failure the
    /// state is kept so the user can correct it.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.validate() {
            let submitted = std::mem::take(&mut self.state);
            info!(
                query_type = submitted.query_type.map(QueryType::key),
                "Contact form submitted"
            );
            SubmitOutcome::Accepted(submitted)
        } else {
            debug!(
                failing = ?self.errors.iter().map(|(field, _)| field.key()).collect::<Vec<_>>(),
                "Contact form rejected"
            );
            SubmitOutcome::Rejected
        }
    }
}
