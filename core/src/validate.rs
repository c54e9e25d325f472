//! Client-side form validation.
//!
//! Mirrors the server's field rules so obviously invalid input fails before
//! any network call, with messages suitable for display next to the
//! offending field.

use crate::types::{NoteDraft, Registration};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid email regex")
});

/// Field-level validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// Promote to an error result when any message was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<BTreeMap<String, Vec<String>>> for FieldErrors {
    fn from(map: BTreeMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Validate a note draft for create/update.
pub fn validate_note(draft: &NoteDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    let title = draft.title.trim();
    if title.is_empty() {
        errors.push("title", "Title is required");
    } else if title.chars().count() < 3 {
        errors.push("title", "Title must be at least 3 characters");
    } else if title.chars().count() > 100 {
        errors.push("title", "Title must be less than 100 characters");
    }

    let content = draft.content.trim();
    if content.is_empty() {
        errors.push("content", "Content is required");
    } else if content.chars().count() < 10 {
        errors.push("content", "Content must be at least 10 characters");
    }
    errors.into_result()
}

/// Validate signup input.
pub fn validate_registration(reg: &Registration) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = reg.name.trim();
    if name.is_empty() {
        errors.push("name", "Full name is required");
    } else if name.chars().count() < 2 {
        errors.push("name", "Name must be at least 2 characters");
    } else if name.chars().count() > 50 {
        errors.push("name", "Name must be less than 50 characters");
    }

    let email = reg.email.trim();
    if email.is_empty() {
        errors.push("email", "Email is required");
    } else if !EMAIL_RE.is_match(email) {
        errors.push("email", "Please enter a valid email address");
    }

    validate_password_into(&reg.password, &mut errors);
    errors.into_result()
}

fn validate_password_into(password: &str, errors: &mut FieldErrors) {
    if password.is_empty() {
        errors.push("password", "Password is required");
        return;
    }
    if password.chars().count() < 6 {
        errors.push("password", "Password must be at least 6 characters");
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        errors.push(
            "password",
            "Password must contain at least one uppercase letter, one lowercase letter, and one number",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NoteDraft;

    #[test]
    fn short_title_reports_exact_message() {
        let draft = NoteDraft::new("ab", "long enough content");
        let errors = validate_note(&draft).unwrap_err();
        assert_eq!(
            errors.get("title").unwrap(),
            &["Title must be at least 3 characters".to_string()]
        );
    }

    #[test]
    fn short_content_reports_exact_message() {
        let draft = NoteDraft::new("Groceries", "too short");
        let errors = validate_note(&draft).unwrap_err();
        assert_eq!(
            errors.get("content").unwrap(),
            &["Content must be at least 10 characters".to_string()]
        );
    }

    #[test]
    fn empty_draft_reports_required_fields() {
        let errors = validate_note(&NoteDraft::default()).unwrap_err();
        assert_eq!(errors.get("title").unwrap(), &["Title is required".to_string()]);
        assert_eq!(
            errors.get("content").unwrap(),
            &["Content is required".to_string()]
        );
    }

    #[test]
    fn valid_draft_passes() {
        let draft = NoteDraft::new("Groceries", "milk, eggs, flour");
        assert!(validate_note(&draft).is_ok());
    }

    #[test]
    fn title_longer_than_100_chars_rejected() {
        let draft = NoteDraft::new("x".repeat(101), "long enough content");
        let errors = validate_note(&draft).unwrap_err();
        assert_eq!(
            errors.get("title").unwrap(),
            &["Title must be less than 100 characters".to_string()]
        );
    }

    fn registration() -> Registration {
        Registration {
            name: "Ada Lovelace".to_string(),
            username: Some("ada".to_string()),
            email: "ada@example.com".to_string(),
            password: "Secret1".to_string(),
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert!(validate_registration(&registration()).is_ok());
    }

    #[test]
    fn invalid_email_rejected() {
        let reg = Registration {
            email: "not-an-email".to_string(),
            ..registration()
        };
        let errors = validate_registration(&reg).unwrap_err();
        assert_eq!(
            errors.get("email").unwrap(),
            &["Please enter a valid email address".to_string()]
        );
    }

    #[test]
    fn weak_password_rejected() {
        let reg = Registration {
            password: "alllowercase".to_string(),
            ..registration()
        };
        let errors = validate_registration(&reg).unwrap_err();
        let messages = errors.get("password").unwrap();
        assert!(messages[0].contains("one uppercase letter"));
    }

    #[test]
    fn short_password_rejected() {
        let reg = Registration {
            password: "Ab1".to_string(),
            ..registration()
        };
        let errors = validate_registration(&reg).unwrap_err();
        assert!(
            errors
                .get("password")
                .unwrap()
                .contains(&"Password must be at least 6 characters".to_string())
        );
    }

    #[test]
    fn field_errors_display_joins_messages() {
        let mut errors = FieldErrors::new();
        errors.push("title", "Title is required");
        errors.push("content", "Content is required");
        let rendered = errors.to_string();
        assert!(rendered.contains("title: Title is required"));
        assert!(rendered.contains("content: Content is required"));
    }
}
