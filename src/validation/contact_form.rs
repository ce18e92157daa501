//! Validation of submitted contact edit forms.
//!
//! An edit must carry a usable avatar URL and at least two characters of
//! first name, last name and twitter handle. Notes and the favorite flag
//! pass through unchecked.

use std::collections::BTreeMap;
use std::fmt;

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::contacts::ContactMutation;

/// Summary message returned alongside field errors.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill out all missing fields.";

/// Minimum length, in characters, of every checked text field.
pub const MIN_FIELD_LENGTH: usize = 2;

/// Raw values submitted by an edit form. Every field may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub favorite: Option<bool>,
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormErrors {
    pub message: String,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    fn new() -> Self {
        Self {
            message: MISSING_FIELDS_MESSAGE.to_string(),
            field_errors: BTreeMap::new(),
        }
    }

    fn add(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Messages recorded for `field`.
    pub fn for_field(&self, field: &str) -> &[String] {
        self.field_errors
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for (field, messages) in &self.field_errors {
            write!(f, "\n  {}: {}", field, messages.join("; "))?;
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}

/// Validates an edit form and converts it into a mutation.
///
/// All failing fields are reported together rather than stopping at the
/// first one.
pub fn validate_contact_form(form: &ContactForm) -> Result<ContactMutation, FormErrors> {
    let mut errors = FormErrors::new();

    check_text("first", form.first.as_deref(), &mut errors);
    check_text("last", form.last.as_deref(), &mut errors);
    check_text("twitter", form.twitter.as_deref(), &mut errors);
    if check_text("avatar", form.avatar.as_deref(), &mut errors) {
        if let Some(avatar) = form.avatar.as_deref() {
            if !is_valid_url(avatar) {
                errors.add("avatar", "Invalid url");
            }
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactMutation {
        id: None,
        first: form.first.clone(),
        last: form.last.clone(),
        avatar: form.avatar.clone(),
        twitter: form.twitter.clone(),
        notes: form.notes.clone(),
        favorite: form.favorite,
    })
}

/// Returns whether `value` parses as an absolute URL.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

fn check_text(field: &str, value: Option<&str>, errors: &mut FormErrors) -> bool {
    match value {
        None => {
            errors.add(field, "Required");
            false
        }
        Some(text) if text.chars().count() < MIN_FIELD_LENGTH => {
            errors.add(
                field,
                format!(
                    "String must contain at least {} character(s)",
                    MIN_FIELD_LENGTH
                ),
            );
            false
        }
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            first: Some("Ada".to_string()),
            last: Some("Lovelace".to_string()),
            avatar: Some("https://example.com/ada.jpg".to_string()),
            twitter: Some("@ada".to_string()),
            notes: Some("First programmer".to_string()),
            favorite: Some(true),
        }
    }

    #[test]
    fn test_valid_form_becomes_mutation() {
        let mutation = validate_contact_form(&valid_form()).expect("form is valid");
        assert_eq!(mutation.first.as_deref(), Some("Ada"));
        assert_eq!(mutation.notes.as_deref(), Some("First programmer"));
        assert_eq!(mutation.favorite, Some(true));
        assert!(mutation.id.is_none());
    }

    #[test]
    fn test_notes_are_optional() {
        let form = ContactForm {
            notes: None,
            favorite: None,
            ..valid_form()
        };
        assert!(validate_contact_form(&form).is_ok());
    }

    #[test]
    fn test_short_fields_rejected() {
        let form = ContactForm {
            first: Some("A".to_string()),
            twitter: Some(String::new()),
            ..valid_form()
        };
        let errors = validate_contact_form(&form).expect_err("form is invalid");
        assert_eq!(errors.message, MISSING_FIELDS_MESSAGE);
        assert_eq!(errors.for_field("first").len(), 1);
        assert_eq!(errors.for_field("twitter").len(), 1);
        assert!(errors.for_field("last").is_empty());
    }

    #[test]
    fn test_missing_fields_are_required() {
        let errors = validate_contact_form(&ContactForm::default()).expect_err("form is invalid");
        for field in ["first", "last", "avatar", "twitter"] {
            assert_eq!(errors.for_field(field), ["Required".to_string()]);
        }
        assert!(errors.for_field("notes").is_empty());
    }

    #[test]
    fn test_avatar_must_be_url() {
        let form = ContactForm {
            avatar: Some("not a url".to_string()),
            ..valid_form()
        };
        let errors = validate_contact_form(&form).expect_err("form is invalid");
        assert_eq!(errors.for_field("avatar"), ["Invalid url".to_string()]);
    }

    #[test]
    fn test_length_counts_characters() {
        let form = ContactForm {
            first: Some("Łó".to_string()),
            ..valid_form()
        };
        assert!(validate_contact_form(&form).is_ok());
    }

    #[test]
    fn test_display_lists_fields() {
        let errors = validate_contact_form(&ContactForm {
            last: None,
            ..valid_form()
        })
        .expect_err("form is invalid");
        assert_eq!(
            errors.to_string(),
            "Please fill out all missing fields.\n  last: Required"
        );
    }
}
