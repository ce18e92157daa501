//! Input validation for contact edits.

pub mod contact_form;

pub use contact_form::{
    is_valid_url, validate_contact_form, ContactForm, FormErrors, MISSING_FIELDS_MESSAGE,
    MIN_FIELD_LENGTH,
};
