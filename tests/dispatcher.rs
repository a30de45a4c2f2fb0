//! Request dispatch tests.
//!
//! Uses wiremock to check what goes over the wire: URL layout, the token
//! query parameter, exact request bodies, and status code mapping.

use clubhouse::{
    Category, ClientConfig, ClubhouseClient, ClubhouseError, Delete, Epic, ErrorKind, Get,
    Nullable, Update, UpdateCategoryParams, UpdateEpicParams,
};
use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ClubhouseClient {
    let config = ClientConfig::default()
        .with_root_url(server.uri())
        .with_requests_per_second(0);
    ClubhouseClient::with_config("test-token", config).unwrap()
}

fn category_json(color: Option<&str>) -> serde_json::Value {
    serde_json::json!({
        "id": 17,
        "name": "Infrastructure",
        "color": color,
        "archived": false,
        "entity_type": "category",
        "type": "milestone"
    })
}

// =============================================================================
// URL and headers
// =============================================================================

#[tokio::test]
async fn test_get_sends_versioned_path_and_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/categories/17"))
        .and(query_param("token", "test-token"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_json(None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let category = Category::get(&client, 17).await.unwrap();

    assert_eq!(category.name, "Infrastructure");
    assert!(category.color.is_none());
}

#[tokio::test]
async fn test_custom_version_in_path() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/beta/categories/17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_json(None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = ClientConfig {
        version: "beta".to_string(),
        ..ClientConfig::default()
    }
    .with_root_url(mock_server.uri())
    .with_requests_per_second(0);
    let client = ClubhouseClient::with_config("test-token", config).unwrap();

    Category::get(&client, 17).await.unwrap();
}

// =============================================================================
// Request bodies
// =============================================================================

#[tokio::test]
async fn test_reset_color_sends_explicit_null() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/categories/17"))
        .and(body_string(r#"{"color":null}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_json(None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = UpdateCategoryParams {
        color: Nullable::Reset,
        ..Default::default()
    };

    let category = Category::update(&client, 17, params).await.unwrap();
    assert!(category.color.is_none());
}

#[tokio::test]
async fn test_update_sends_only_set_fields_in_key_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/categories/17"))
        .and(body_string(r##"{"archived":true,"color":"#00ff00"}"##))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_json(Some("#00ff00"))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = UpdateCategoryParams {
        archived: Some(true),
        color: "#00ff00".into(),
        ..Default::default()
    };

    let category = Category::update(&client, 17, params).await.unwrap();
    assert_eq!(category.color.as_deref(), Some("#00ff00"));
}

#[tokio::test]
async fn test_empty_update_sends_empty_object() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/epics/5"))
        .and(body_string("{}"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 5, "name": "e"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    Epic::update(&client, 5, UpdateEpicParams::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_epic_milestone_reset_and_value() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/epics/5"))
        .and(body_string(r#"{"milestone_id":null}"#))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 5, "name": "e", "milestone_id": null})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v2/epics/5"))
        .and(body_string(r#"{"milestone_id":124}"#))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": 5, "name": "e", "milestone_id": 124})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let cleared = Epic::update(
        &client,
        5,
        UpdateEpicParams {
            milestone_id: Nullable::Reset,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(cleared.milestone_id.is_none());

    let moved = Epic::update(
        &client,
        5,
        UpdateEpicParams {
            milestone_id: Nullable::Value(124),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(moved.milestone_id, Some(124));
}

struct Unencodable;

impl serde::Serialize for Unencodable {
    fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("value has no JSON form"))
    }
}

#[tokio::test]
async fn test_unencodable_params_fail_before_sending() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_json(None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = client
        .request_resource::<_, Category>(reqwest::Method::PUT, "categories/17", &Unencodable)
        .await
        .unwrap_err();
    assert!(matches!(err, ClubhouseError::Marshal(_)), "got {err:?}");

    let err = client
        .request_empty(reqwest::Method::DELETE, "stories/bulk", &Unencodable)
        .await
        .unwrap_err();
    assert!(matches!(err, ClubhouseError::Marshal(_)), "got {err:?}");
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

// =============================================================================
// Status mapping
// =============================================================================

async fn get_with_status(status: u16, body: serde_json::Value) -> ClubhouseError {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/categories/17"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    Category::get(&client, 17).await.unwrap_err()
}

#[tokio::test]
async fn test_status_codes_map_to_kinds() {
    let cases = [
        (400, ErrorKind::SchemaMismatch),
        (401, ErrorKind::Unauthorized),
        (404, ErrorKind::ResourceNotFound),
        (422, ErrorKind::Unprocessable),
        (500, ErrorKind::ServerError),
    ];

    for (status, kind) in cases {
        let err = get_with_status(status, serde_json::json!({})).await;
        assert_eq!(err.kind(), Some(kind), "status {status}");
    }
}

#[tokio::test]
async fn test_unprocessable_carries_server_message() {
    let err = get_with_status(422, serde_json::json!({"message": "name already taken"})).await;

    let ClubhouseError::Request(request) = &err else {
        panic!("expected a request error, got {err:?}");
    };
    assert_eq!(request.message.as_deref(), Some("name already taken"));
    assert_eq!(request.method, "GET");
    assert!(err.to_string().ends_with("Unprocessable (422): name already taken"));
}

#[tokio::test]
async fn test_error_url_hides_token() {
    let err = get_with_status(404, serde_json::json!({})).await;

    assert!(err.is_not_found());
    let message = err.to_string();
    assert!(message.contains("/v2/categories/17"));
    assert!(!message.contains("test-token"));
}

#[tokio::test]
async fn test_error_keeps_request_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/categories/17"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad schema"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = UpdateCategoryParams {
        name: Some("x".to_string()),
        ..Default::default()
    };
    let err = Category::update(&client, 17, params).await.unwrap_err();

    let ClubhouseError::Request(request) = err else {
        panic!("expected a request error");
    };
    assert_eq!(request.kind, ErrorKind::SchemaMismatch);
    assert_eq!(request.request_body, br#"{"name":"x"}"#.to_vec());
    assert_eq!(request.response_body, b"bad schema".to_vec());
    assert!(request.message.is_none());
}

#[tokio::test]
async fn test_unmapped_status_is_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/categories/17"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert!(Category::delete(&client, 17).await.is_ok());
}

#[tokio::test]
async fn test_undecodable_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/categories/17"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = Category::get(&client, 17).await.unwrap_err();
    assert!(matches!(err, ClubhouseError::Parse(_)));
}

// =============================================================================
// Rate limiting
// =============================================================================

#[tokio::test]
async fn test_rate_limiter_spaces_requests() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/categories/17"))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_json(None)))
        .expect(3)
        .mount(&mock_server)
        .await;

    let config = ClientConfig::default()
        .with_root_url(mock_server.uri())
        .with_requests_per_second(10);
    let client = ClubhouseClient::with_config("test-token", config).unwrap();

    let start = std::time::Instant::now();
    for _ in 0..3 {
        Category::get(&client, 17).await.unwrap();
    }

    // The first request passes at once; the next two wait ~100ms each
    assert!(start.elapsed() >= std::time::Duration::from_millis(150));
}
