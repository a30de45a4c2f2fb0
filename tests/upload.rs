//! Multipart file upload tests.

use clubhouse::{upload_files, ClientConfig, ClubhouseClient, ClubhouseError, ErrorKind, FileUpload};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_for(server: &MockServer) -> ClubhouseClient {
    let config = ClientConfig::default()
        .with_root_url(server.uri())
        .with_requests_per_second(0);
    ClubhouseClient::with_config("test-token", config).unwrap()
}

#[tokio::test]
async fn test_upload_sends_one_part_per_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/files"))
        .and(query_param("token", "test-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {"id": 1, "name": "notes.txt", "filename": "notes.txt", "size": 5},
            {"id": 2, "name": "trace.log", "filename": "trace.log", "size": 9}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let uploads = vec![
        FileUpload::new("notes.txt", "hello"),
        FileUpload::new("trace.log", b"panicked!".to_vec()),
    ];

    let files = upload_files(&client, uploads).await.unwrap();
    assert_eq!(files.len(), 2);
    assert_eq!(files[1].size, 9);

    let received: Vec<Request> = mock_server.received_requests().await.unwrap();
    let request = &received[0];

    let content_type = request
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains(r#"name="file0"; filename="notes.txt""#));
    assert!(body.contains(r#"name="file1"; filename="trace.log""#));
    assert!(body.contains("hello"));
    assert!(body.contains("panicked!"));
}

#[tokio::test]
async fn test_upload_error_is_mapped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/files"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({"message": "file too large"})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = upload_files(&client, vec![FileUpload::new("big.bin", vec![0u8; 16])])
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(ErrorKind::Unprocessable));
    assert!(err.to_string().contains("file too large"));
}

#[tokio::test]
async fn test_upload_error_keeps_response_body_only() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/files"))
        .respond_with(ResponseTemplate::new(400).set_body_string("missing file part"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = upload_files(&client, vec![FileUpload::new("notes.txt", "hello")])
        .await
        .unwrap_err();

    let ClubhouseError::Request(request) = err else {
        panic!("expected a request error");
    };
    assert_eq!(request.kind, ErrorKind::SchemaMismatch);
    assert_eq!(request.method, "POST");
    assert!(request.request_body.is_empty());
    assert_eq!(request.response_body, b"missing file part".to_vec());
}
