//! End-to-end panel tests against a mock users API.
//!
//! The panel drives a real `UsersClient`; request counts are verified by the
//! mock server when it is dropped.

use roster_client::{ClientConfig, UsersClient};
use roster_panel::render::{DETAIL_CONTENT_ID, EMPTY_STATE_ID, META_ID, TABLE_BODY_ID};
use roster_panel::{
    ClientSync, DetailState, Element, Node, PanelConfig, Severity, CREATED, DELETED,
    DELETE_FAILED, FIELDS_REQUIRED, SUBMIT_LABEL,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_panel() -> (MockServer, ClientSync<UsersClient>) {
    let mock_server = MockServer::start().await;
    let client = UsersClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    let config = PanelConfig {
        confirm_deletes: false,
        ..PanelConfig::default()
    };
    (mock_server, ClientSync::new(client, config))
}

fn list_body(users: serde_json::Value, total: u64) -> serde_json::Value {
    json!({
        "success": true,
        "data": users,
        "metadata": {"page": 1, "per_page": 100, "total": total, "pages": 1,
                     "has_next": false, "has_prev": false}
    })
}

fn messages(panel: &ClientSync<UsersClient>, severity: Severity) -> Vec<String> {
    panel
        .messages()
        .visible()
        .filter(|m| m.severity == severity)
        .map(|m| m.text.clone())
        .collect()
}

fn table_body(node: &Node) -> &Element {
    node.find_by_id(TABLE_BODY_ID).unwrap()
}

#[tokio::test]
async fn test_load_renders_escaped_names() {
    let (mock_server, mut panel) = setup_panel().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(
            json!([
                {"id": 1, "name": "<script>alert(1)</script>", "email": "x@example.com"},
                {"id": 2, "name": "Bob", "email": "bob@example.com"}
            ]),
            2,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    panel.load_users().await;
    let node = panel.render();

    let tbody = table_body(&node);
    assert_eq!(tbody.children.len(), 2);

    let first_row = Node::Element(tbody.children[0].as_element().unwrap().clone());
    let name_cell = first_row
        .find(&|el: &Element| el.has_class("user-name"))
        .unwrap();
    assert_eq!(name_cell.text_content(), "<script>alert(1)</script>");

    let html = node.to_html();
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!html.contains("<script>"));
    assert_eq!(node.find_by_id(META_ID).unwrap().text_content(), "2 users");
}

#[tokio::test]
async fn test_empty_list_shows_empty_state() {
    let (mock_server, mut panel) = setup_panel().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(json!([]), 0)))
        .mount(&mock_server)
        .await;

    panel.load_users().await;
    let node = panel.render();

    assert!(table_body(&node).children.is_empty());
    assert!(!node.find_by_id(EMPTY_STATE_ID).unwrap().is_hidden());
}

#[tokio::test]
async fn test_create_then_exactly_one_reload() {
    let (mock_server, mut panel) = setup_panel().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({"name": "Ann", "email": "ann@example.com"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "User created",
            "data": {"id": 11, "name": "Ann", "email": "ann@example.com", "is_active": true}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(
            json!([{"id": 11, "name": "Ann", "email": "ann@example.com"}]),
            1,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    panel.form_mut().name = " Ann ".to_string();
    panel.form_mut().email = "ann@example.com".to_string();
    let created = panel.submit_form().await.unwrap();

    assert_eq!(created.id, 11);
    assert_eq!(messages(&panel, Severity::Success), vec![CREATED.to_string()]);
    assert_eq!(panel.users().len(), 1);
    assert!(panel.form().name.is_empty());
}

#[tokio::test]
async fn test_blank_create_makes_no_request() {
    let (mock_server, mut panel) = setup_panel().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    assert!(panel.create_user("", "e@x.com").await.is_none());
    assert!(panel.create_user("Bob", "").await.is_none());
    assert_eq!(messages(&panel, Severity::Warning).len(), 2);
    assert_eq!(messages(&panel, Severity::Warning)[0], FIELDS_REQUIRED);
}

#[tokio::test]
async fn test_create_validation_details_surface() {
    let (mock_server, mut panel) = setup_panel().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error": "Validation error",
            "details": {"email": ["Not a valid email address."]}
        })))
        .mount(&mock_server)
        .await;

    assert!(panel.create_user("Ann", "not-an-email").await.is_none());
    assert_eq!(
        messages(&panel, Severity::Danger),
        vec!["Validation error".to_string()]
    );
    assert_eq!(panel.form().email, "not-an-email");
}

#[tokio::test]
async fn test_detail_404_renders_inline() {
    let (mock_server, mut panel) = setup_panel().await;

    Mock::given(method("GET"))
        .and(path("/api/users/77"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "User with ID 77 not found"
        })))
        .mount(&mock_server)
        .await;

    panel.view_detail(77).await;
    let node = panel.render();

    let content = node.find_by_id(DETAIL_CONTENT_ID).unwrap();
    assert!(content.text_content().contains("not found"));
    assert!(panel.messages().is_empty());
}

#[tokio::test]
async fn test_delete_success_soft_deletes_and_reloads() {
    let (mock_server, mut panel) = setup_panel().await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/3"))
        .and(query_param("soft", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "User deleted"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body(json!([]), 0)))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(panel.delete_user(3).await);
    assert_eq!(messages(&panel, Severity::Success), vec![DELETED.to_string()]);
    assert_eq!(panel.messages().len(), 1);
}

#[tokio::test]
async fn test_delete_failure_skips_reload() {
    let (mock_server, mut panel) = setup_panel().await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/3"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    assert!(!panel.delete_user(3).await);
    assert_eq!(
        messages(&panel, Severity::Danger),
        vec![DELETE_FAILED.to_string()]
    );
}

#[tokio::test]
async fn test_cancelled_create_re_enables_submit() {
    let (mock_server, mut panel) = setup_panel().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let outcome = tokio::time::timeout(
        Duration::from_millis(200),
        panel.create_user("Ann", "ann@example.com"),
    )
    .await;
    assert!(outcome.is_err());

    assert!(!panel.form().is_submitting());
    let node = panel.render();
    let submit = node
        .find(&|el: &Element| el.get_attr("data-action") == Some("submit"))
        .unwrap();
    assert!(submit.get_attr("disabled").is_none());
    assert_eq!(submit.text_content(), SUBMIT_LABEL);
    assert_eq!(panel.form().name, "Ann");
}

#[tokio::test]
async fn test_cancelled_detail_closes_surface() {
    let (mock_server, mut panel) = setup_panel().await;

    Mock::given(method("GET"))
        .and(path("/api/users/5"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let outcome = tokio::time::timeout(Duration::from_millis(200), panel.view_detail(5)).await;
    assert!(outcome.is_err());
    assert_eq!(panel.detail(), &DetailState::Closed);
}

#[tokio::test]
async fn test_cancelled_load_clears_loading_state() {
    let (mock_server, mut panel) = setup_panel().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let outcome = tokio::time::timeout(Duration::from_millis(200), panel.load_users()).await;
    assert!(outcome.is_err());
    assert!(!panel.list().is_loading());
    assert!(panel.messages().is_empty());
}
