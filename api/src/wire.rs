//! Request/response payload shapes for the notes API.

use ink_core::{Credentials, LoginId, Note, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<&'a str>,
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginRequest<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        let (email, username) = match &credentials.id {
            LoginId::Email(email) => (Some(email.as_str()), None),
            LoginId::Username(username) => (None, Some(username.as_str())),
        };
        Self {
            email,
            username,
            password: &credentials.password,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub access: String,
    pub refresh: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub user: Option<User>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VerifyResponse {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefreshResponse {
    pub access: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct LogoutRequest<'a> {
    pub refresh: &'a str,
}

/// The list endpoint returns either a DRF-paginated envelope or a bare
/// array depending on server pagination settings; accept both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum NoteListResponse {
    Paginated { results: Vec<Note>, count: u64 },
    Plain(Vec<Note>),
}

impl NoteListResponse {
    pub fn into_parts(self) -> (Vec<Note>, u64) {
        match self {
            Self::Paginated { results, count } => (results, count),
            Self::Plain(notes) => {
                let count = notes.len() as u64;
                (notes, count)
            }
        }
    }
}
