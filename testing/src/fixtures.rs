use serde_json::{Value, json};
use std::sync::atomic::{AtomicU32, Ordering};

static TEST_COUNTER: AtomicU32 = AtomicU32::new(0);

pub fn unique_id(prefix: &str) -> String {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}-{}", prefix, id)
}

pub fn unique_username() -> String {
    unique_id("test-user")
}

/// User payload as the verify/login endpoints emit it.
pub fn user_json(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
    })
}

/// Note payload as the notes endpoints emit it.
pub fn note_json(id: i64, title: &str, content: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": content,
        "tags": [],
        "user": user_json(1, "alice"),
        "created_at": "2026-01-10T09:00:00Z",
        "updated_at": "2026-01-12T14:30:00Z",
    })
}

pub fn note_json_with_tags(id: i64, title: &str, tags: &[&str]) -> Value {
    let tags: Vec<Value> = tags
        .iter()
        .enumerate()
        .map(|(i, name)| json!({ "id": i as i64 + 1, "name": name }))
        .collect();
    let mut note = note_json(id, title, "tagged note content");
    note["tags"] = Value::Array(tags);
    note
}

/// Paginated list body in the `{results, count}` envelope.
pub fn paginated_notes(notes: Vec<Value>, count: u64) -> Value {
    json!({ "results": notes, "count": count })
}

/// Login success body with both tokens and the user record.
pub fn login_json(access: &str, refresh: &str, username: &str) -> Value {
    json!({
        "access": access,
        "refresh": refresh,
        "user": user_json(1, username),
    })
}

pub fn verify_json(username: &str) -> Value {
    json!({
        "detail": "Token is valid",
        "user": user_json(1, username),
    })
}

pub fn refresh_json(access: &str) -> Value {
    json!({ "access": access })
}

pub fn detail_json(detail: &str) -> Value {
    json!({ "detail": detail })
}
