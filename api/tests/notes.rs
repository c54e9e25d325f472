//! Notes controller: query forwarding, CRUD, cached-list maintenance.

use api::{ApiClient, ApiError, NotesController};
use config::ClientConfig;
use ink_core::{MemoryTokenStore, NoteDraft, NoteQuery, SortField, SortOrder};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn controller(server: &MockServer) -> NotesController {
    let config = ClientConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    let store = Arc::new(MemoryTokenStore::with_tokens("acc", "ref"));
    let api = Arc::new(ApiClient::new(&config, store).unwrap());
    NotesController::new(api)
}

#[tokio::test]
async fn list_forwards_query_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes/"))
        .and(query_param("q", "meeting"))
        .and(query_param("tags__name", "work"))
        .and(query_param("ordering", "-updated_at"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(testing::paginated_notes(
            vec![testing::note_json(1, "Meeting notes", "Agenda for Monday")],
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let controller = NotesController::with_query(
        {
            let config = ClientConfig {
                base_url: server.uri(),
                ..Default::default()
            };
            let store = Arc::new(MemoryTokenStore::with_tokens("acc", "ref"));
            Arc::new(ApiClient::new(&config, store).unwrap())
        },
        NoteQuery {
            search: Some("meeting".to_string()),
            tag: Some("work".to_string()),
            ..Default::default()
        },
    );

    let notes = controller.reload().await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(controller.total_count().await, 1);
}

#[tokio::test]
async fn sort_change_reloads_with_new_ordering() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes/"))
        .and(query_param("ordering", "title"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller(&server);
    controller
        .set_sort(SortField::Title, SortOrder::Asc)
        .await
        .unwrap();
    let query = controller.snapshot().await.query;
    assert_eq!(query.sort_field, SortField::Title);
    assert_eq!(query.sort_order, SortOrder::Asc);
}

#[tokio::test]
async fn bare_array_response_counts_its_own_length() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            testing::note_json(2, "Beta", "content long enough"),
            testing::note_json(1, "Alpha", "content long enough"),
        ])))
        .mount(&server)
        .await;

    let controller = controller(&server);
    let notes = controller.reload().await.unwrap();
    assert_eq!(controller.total_count().await, 2);

    // The server decides the order; the list is adopted verbatim.
    let titles: Vec<&str> = notes.iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, ["Beta", "Alpha"]);
}

#[tokio::test]
async fn create_validates_before_any_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/notes/"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let controller = controller(&server);
    let err = controller
        .create(&NoteDraft::new("ab", "too short"))
        .await
        .unwrap_err();
    let ApiError::Validation(fields) = err else {
        panic!("expected validation error");
    };
    assert_eq!(
        fields.get("title").unwrap(),
        &["Title must be at least 3 characters".to_string()]
    );
    assert_eq!(
        fields.get("content").unwrap(),
        &["Content must be at least 10 characters".to_string()]
    );
}

#[tokio::test]
async fn create_appends_to_the_cached_list() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/notes/"))
        .and(body_json(
            json!({ "title": "Fresh note", "content": "Something worth keeping" }),
        ))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(testing::note_json(7, "Fresh note", "Something worth keeping")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller(&server);
    let note = controller
        .create(&NoteDraft::new("Fresh note", "Something worth keeping"))
        .await
        .unwrap();
    assert_eq!(note.id, 7);
    assert_eq!(controller.notes().await.len(), 1);
    assert_eq!(controller.total_count().await, 1);
}

#[tokio::test]
async fn update_replaces_entry_and_sets_current() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            testing::note_json(3, "Old title", "content long enough"),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/notes/3/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(testing::note_json(3, "New title", "content long enough")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller(&server);
    controller.reload().await.unwrap();
    controller
        .update(3, &NoteDraft::new("New title", "content long enough"))
        .await
        .unwrap();

    let snapshot = controller.snapshot().await;
    assert_eq!(snapshot.notes[0].title, "New title");
    assert_eq!(snapshot.current.unwrap().title, "New title");
}

#[tokio::test]
async fn delete_drops_entry_and_clears_current() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes/5/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(testing::note_json(5, "Doomed", "content long enough")),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/notes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(testing::paginated_notes(
            vec![testing::note_json(5, "Doomed", "content long enough")],
            1,
        )))
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/api/notes/5/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller(&server);
    controller.reload().await.unwrap();
    controller.get(5).await.unwrap();
    assert!(controller.current().await.is_some());

    controller.delete(5).await.unwrap();
    let snapshot = controller.snapshot().await;
    assert!(snapshot.notes.is_empty());
    assert_eq!(snapshot.total_count, 0);
    assert!(snapshot.current.is_none());
}

#[tokio::test]
async fn missing_note_maps_to_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes/99/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(testing::detail_json("Not found.")),
        )
        .mount(&server)
        .await;

    let controller = controller(&server);
    let err = controller.get(99).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn reset_filters_returns_to_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/notes/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let controller = controller(&server);
    controller.set_search(Some("term".to_string())).await.unwrap();
    controller.set_page(3).await.unwrap();
    controller.reset_filters().await.unwrap();

    let query = controller.snapshot().await.query;
    assert_eq!(query.search, None);
    assert_eq!(query.page, 1);
}
