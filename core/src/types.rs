use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User as returned by the verify/login endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    /// Hex color like `#3B82F6`.
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A note as returned by the notes endpoints. Timestamps are server-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// The owner; only the owner may edit or delete the note.
    #[serde(default)]
    pub user: Option<User>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn owner_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }
}

/// Access/refresh token pair with partial-update semantics: storing a pair
/// only overwrites the slots that are populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: Option<String>,
    pub refresh: Option<String>,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: Some(access.into()),
            refresh: Some(refresh.into()),
        }
    }

    pub fn access_only(access: impl Into<String>) -> Self {
        Self {
            access: Some(access.into()),
            refresh: None,
        }
    }
}

/// Identifier accepted by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginId {
    Email(String),
    Username(String),
}

impl LoginId {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Email(s) | Self::Username(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub id: LoginId,
    pub password: String,
}

impl Credentials {
    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: LoginId::Email(email.into()),
            password: password.into(),
        }
    }

    pub fn with_username(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            id: LoginId::Username(username.into()),
            password: password.into(),
        }
    }
}

/// Signup form input. `name` maps to the account's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    pub password: String,
}

impl Registration {
    /// Identifier the auto-login after signup should use.
    pub fn login_id(&self) -> LoginId {
        match &self.username {
            Some(u) if !u.is_empty() => LoginId::Username(u.clone()),
            _ => LoginId::Email(self.email.clone()),
        }
    }
}

/// Note create/update input (full replace of title/content).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Title,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    /// Wire name used by the list endpoint's `ordering` parameter.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "created" | "created_at" => Ok(Self::CreatedAt),
            "updated" | "updated_at" => Ok(Self::UpdatedAt),
            other => Err(format!("unknown sort field: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Query state driving the server-side note list. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub author_id: Option<i64>,
    pub sort_field: SortField,
    pub sort_order: SortOrder,
    pub page: u32,
    pub page_size: u32,
}

impl Default for NoteQuery {
    fn default() -> Self {
        Self {
            search: None,
            tag: None,
            author_id: None,
            sort_field: SortField::UpdatedAt,
            sort_order: SortOrder::Desc,
            page: 1,
            page_size: 20,
        }
    }
}

impl NoteQuery {
    /// The Django-style `ordering` value: field name, `-`-prefixed when
    /// descending.
    pub fn ordering_param(&self) -> String {
        let field = self.sort_field.wire_name();
        match self.sort_order {
            SortOrder::Asc => field.to_string(),
            SortOrder::Desc => format!("-{field}"),
        }
    }

    /// Query parameters for the list endpoint. Empty filters are omitted.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(q) = self.search.as_deref().filter(|q| !q.is_empty()) {
            params.push(("q".to_string(), q.to_string()));
        }
        if let Some(tag) = self.tag.as_deref().filter(|t| !t.is_empty()) {
            params.push(("tags__name".to_string(), tag.to_string()));
        }
        if let Some(author) = self.author_id {
            params.push(("user__id".to_string(), author.to_string()));
        }
        params.push(("ordering".to_string(), self.ordering_param()));
        params.push(("page".to_string(), self.page.to_string()));
        params.push(("page_size".to_string(), self.page_size.to_string()));
        params
    }
}

/// Session lifecycle state: `Unknown` while the stored token is being
/// verified, then `Authenticated` or `Anonymous`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Unknown,
    Anonymous,
    Authenticated(User),
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_param_descending_is_prefixed() {
        let query = NoteQuery::default();
        assert_eq!(query.ordering_param(), "-updated_at");

        let query = NoteQuery {
            sort_field: SortField::Title,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        assert_eq!(query.ordering_param(), "title");
    }

    #[test]
    fn to_params_omits_empty_filters() {
        let query = NoteQuery::default();
        let params = query.to_params();
        assert!(params.iter().all(|(k, _)| k != "q" && k != "tags__name"));
        assert!(params.contains(&("page".to_string(), "1".to_string())));
        assert!(params.contains(&("page_size".to_string(), "20".to_string())));
    }

    #[test]
    fn to_params_includes_search_and_tag() {
        let query = NoteQuery {
            search: Some("meeting".to_string()),
            tag: Some("work".to_string()),
            author_id: Some(7),
            ..Default::default()
        };
        let params = query.to_params();
        assert!(params.contains(&("q".to_string(), "meeting".to_string())));
        assert!(params.contains(&("tags__name".to_string(), "work".to_string())));
        assert!(params.contains(&("user__id".to_string(), "7".to_string())));
    }

    #[test]
    fn registration_prefers_username_for_auto_login() {
        let reg = Registration {
            name: "Ada Lovelace".to_string(),
            username: Some("ada".to_string()),
            email: "ada@example.com".to_string(),
            password: "Secret1".to_string(),
        };
        assert_eq!(reg.login_id(), LoginId::Username("ada".to_string()));

        let reg = Registration {
            username: None,
            ..reg
        };
        assert_eq!(
            reg.login_id(),
            LoginId::Email("ada@example.com".to_string())
        );
    }

    #[test]
    fn session_state_accessors() {
        assert!(!SessionState::Unknown.is_authenticated());
        assert!(!SessionState::Anonymous.is_authenticated());
        let user = User {
            id: 1,
            email: "a@b.co".to_string(),
            username: "a".to_string(),
        };
        let state = SessionState::Authenticated(user.clone());
        assert!(state.is_authenticated());
        assert_eq!(state.user(), Some(&user));
    }

    #[test]
    fn note_deserializes_paginated_shape_fields() {
        let json = serde_json::json!({
            "id": 3,
            "title": "Standup",
            "content": "notes",
            "tags": [{"id": 1, "name": "work", "color": "#3B82F6", "created_at": null}],
            "user": {"id": 9, "email": "o@x.co", "username": "owner"},
            "created_at": "2025-01-02T03:04:05Z",
            "updated_at": "2025-01-03T03:04:05Z"
        });
        let note: Note = serde_json::from_value(json).unwrap();
        assert_eq!(note.owner_id(), Some(9));
        assert_eq!(note.tags[0].name, "work");
    }
}
