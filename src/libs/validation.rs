use lazy_static::lazy_static;
use regex::Regex;

use super::form::{ErrorMap, Field, FormState, TextField};

pub const FIRST_NAME_REQUIRED: &str = "First Name is required.";
pub const LAST_NAME_REQUIRED: &str = "Last Name is required.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Email is not valid.";
pub const MESSAGE_REQUIRED: &str = "Message is required.";
pub const CONSENT_REQUIRED: &str = "To Submit this form, please consent to being contacted";
pub const QUERY_TYPE_REQUIRED: &str = "Please select a query type.";

/// Whitespace as ECMAScript `\s` defines it. Unlike the Unicode `\s` of `regex` it covers
/// U+FEFF and leaves out U+0085.
const JS_WHITESPACE: &str = concat!(
    r"\t\n\x0B\x0C\r ",
    r"\x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}",
);

lazy_static! {
    static ref EMAIL_PATTERN: Regex = {
        let part = format!("[^@{JS_WHITESPACE}]+");
        Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("email pattern is a valid regex")
    };
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

fn required_message(field: TextField) -> &'static str {
    match field {
        TextField::FirstName => FIRST_NAME_REQUIRED,
        TextField::LastName => LAST_NAME_REQUIRED,
        TextField::Email => EMAIL_REQUIRED,
        TextField::Message => MESSAGE_REQUIRED,
    }
}

/// Run every check against `state` and collect all failures.
///
/// Checks never short-circuit, so the returned map holds one entry per failing field.
/// The email field reports at most one message: "required" wins over "not valid".
pub fn validate(state: &FormState) -> ErrorMap {
    let mut errors = ErrorMap::default();

    for field in TextField::ALL {
        let value = state.text(field);
        if value.is_empty() {
            errors.insert(field.into(), required_message(field));
        } else if field == TextField::Email && !is_valid_email(value) {
            errors.insert(Field::Email, EMAIL_INVALID);
        }
    }
    if !state.consent {
        errors.insert(Field::Consent, CONSENT_REQUIRED);
    }
    if state.query_type.is_none() {
        errors.insert(Field::QueryType, QUERY_TYPE_REQUIRED);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::form::QueryType;

    fn valid_state() -> FormState {
        FormState {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@doe.com".into(),
            message: "Hi".into(),
            consent: true,
            query_type: Some(QueryType::Enquiry),
        }
    }

    fn email_error(email: &str) -> Option<&'static str> {
        let state = FormState {
            email: email.into(),
            ..valid_state()
        };
        validate(&state).get(Field::Email)
    }

    #[test]
    fn test_valid_state_has_no_errors() {
        assert!(validate(&valid_state()).is_empty());
    }

    #[test]
    fn test_email_boundaries() {
        assert_eq!(email_error("a@b.c"), None);
        assert_eq!(email_error(""), Some(EMAIL_REQUIRED));
        assert_eq!(email_error("a@b"), Some(EMAIL_INVALID));
        assert_eq!(email_error("ab.com"), Some(EMAIL_INVALID));
    }

    #[test]
    fn test_email_rejects_whitespace_and_extra_at() {
        assert_eq!(email_error("   "), Some(EMAIL_INVALID));
        assert_eq!(email_error("a b@c.d"), Some(EMAIL_INVALID));
        assert_eq!(email_error("a@@b.c"), Some(EMAIL_INVALID));
        assert_eq!(email_error("a@b.c "), Some(EMAIL_INVALID));
        assert_eq!(email_error("first.last@sub.example.org"), None);
    }

    #[test]
    fn test_email_whitespace_follows_ecmascript() {
        for space in ['\u{feff}', '\u{a0}', '\u{2009}', '\u{3000}', '\u{b}', '\u{2028}'] {
            assert!(!is_valid_email(&format!("a@b.c{space}")), "{space:?} was accepted");
            assert!(!is_valid_email(&format!("a{space}b@c.d")), "{space:?} was accepted");
        }
        // NEL is not whitespace for ECMAScript
        assert!(is_valid_email("a\u{85}b@c.d"));
        assert!(is_valid_email("jöhn@exämple.de"));
    }

    #[test]
    fn test_whitespace_counts_as_non_empty() {
        let state = FormState {
            first_name: " ".into(),
            message: "\t".into(),
            ..valid_state()
        };
        assert!(validate(&state).is_empty());
    }

    #[test]
    fn test_all_empty_reports_every_check() {
        let errors = validate(&FormState::default());
        assert_eq!(errors.len(), 6);
        insta::assert_snapshot!(errors.to_string(), @r"
        firstName: First Name is required.
        lastName: Last Name is required.
        email: Email is required.
        message: Message is required.
        consent: To Submit this form, please consent to being contacted
        queryType: Please select a query type.
        ");
    }

    #[test]
    fn test_only_consent_missing() {
        let state = FormState {
            consent: false,
            ..valid_state()
        };
        let errors = validate(&state);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Consent), Some(CONSENT_REQUIRED));
    }

    #[test]
    fn test_failures_match_checks_exactly() {
        let state = FormState {
            last_name: String::new(),
            email: "nope".into(),
            query_type: None,
            ..valid_state()
        };
        let errors = validate(&state);
        let fields: Vec<Field> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(fields, vec![Field::LastName, Field::Email, Field::QueryType]);
        assert_eq!(errors.get(Field::Email), Some(EMAIL_INVALID));
        assert!(!errors.contains(Field::FirstName));
        assert!(!errors.contains(Field::Consent));
    }
}
