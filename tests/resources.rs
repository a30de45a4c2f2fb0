//! Resource endpoint tests against a wiremock server.

use clubhouse::{
    create_epic_comment, create_epic_comment_reply, create_stories, delete_epic_comment,
    delete_stories, list_epic_comments, update_epic_comment, update_stories, ClientConfig,
    ClubhouseClient, Create, CreateCommentParams, CreateLabelParams, CreateStoryLinkParams,
    CreateStoryParams, Delete, Epic, Get, Label, List, Member, Nullable, Story, StoryLink,
    StoryType, StoryVerb, Team, Update, UpdateCommentParams, UpdateStoriesParams,
    UpdateStoryParams,
};
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, body_string, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ClubhouseClient {
    let config = ClientConfig::default()
        .with_root_url(server.uri())
        .with_requests_per_second(0);
    ClubhouseClient::with_config("test-token", config).unwrap()
}

// =============================================================================
// Simple resources
// =============================================================================

#[tokio::test]
async fn test_list_labels() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/labels"))
        .and(query_param("token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "bug", "color": "#ff0000"},
            {"id": 2, "name": "frontend", "color": null}
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let labels = Label::list(&client).await.unwrap();

    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].color.as_deref(), Some("#ff0000"));
    assert!(labels[1].color.is_none());
}

#[tokio::test]
async fn test_create_label_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/labels"))
        .and(body_string(r#"{"name":"backend"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 3, "name": "backend"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let label = Label::create(&client, CreateLabelParams::named("backend"))
        .await
        .unwrap();
    assert_eq!(label.id, 3);
}

#[tokio::test]
async fn test_delete_epic() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/epics/10"))
        .and(query_param("token", "test-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert_ok!(Epic::delete(&client, 10).await);
}

#[tokio::test]
async fn test_get_member_by_uuid() {
    let mock_server = MockServer::start().await;
    let uuid = "5a0e0000-0000-0000-0000-000000000001";

    Mock::given(method("GET"))
        .and(path(format!("/v2/members/{uuid}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": uuid,
            "role": "admin",
            "profile": {"id": uuid, "mention_name": "ada", "name": "Ada"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let member = Member::get(&client, uuid.to_string()).await.unwrap();

    assert_eq!(member.id, uuid);
    assert_eq!(member.profile.mention_name, "ada");
}

#[tokio::test]
async fn test_list_teams_with_workflow() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/teams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "name": "Platform",
            "workflow": {
                "id": 500,
                "default_state_id": 501,
                "states": [
                    {"id": 501, "name": "Unstarted", "type": "unstarted"},
                    {"id": 502, "name": "In Progress", "type": "started"}
                ]
            }
        }])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let teams = Team::list(&client).await.unwrap();

    let state = teams[0].workflow.state_named("in progress").unwrap();
    assert_eq!(state.id, 502);
    assert_eq!(state.state_type, "started");
}

// =============================================================================
// Stories
// =============================================================================

#[tokio::test]
async fn test_create_story_sends_required_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/stories"))
        .and(body_string(
            r#"{"name":"Fix login","project_id":7,"story_type":"bug"}"#,
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 100, "name": "Fix login", "project_id": 7, "story_type": "bug"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = CreateStoryParams {
        name: "Fix login".to_string(),
        project_id: 7,
        story_type: Some(StoryType::Bug),
        ..Default::default()
    };

    let story = Story::create(&client, params).await.unwrap();
    assert_eq!(story.story_type, StoryType::Bug);
}

#[tokio::test]
async fn test_update_story_clears_estimate_and_epic() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/stories/100"))
        .and(body_string(r#"{"epic_id":null,"estimate":null,"name":"Renamed"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 100, "name": "Renamed", "epic_id": null, "estimate": null
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = UpdateStoryParams {
        epic_id: Nullable::Reset,
        estimate: Nullable::Reset,
        name: Some("Renamed".to_string()),
        ..Default::default()
    };

    let story = Story::update(&client, 100, params).await.unwrap();
    assert!(story.estimate.is_none());
    assert!(story.epic_id.is_none());
}

#[tokio::test]
async fn test_bulk_create_wraps_stories() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/stories/bulk"))
        .and(body_json(json!({
            "stories": [
                {"name": "One", "project_id": 1},
                {"name": "Two", "project_id": 1}
            ]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            {"id": 1, "name": "One"},
            {"id": 2, "name": "Two"}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let stories: Vec<CreateStoryParams> = ["One", "Two"]
        .into_iter()
        .map(|name| CreateStoryParams {
            name: name.to_string(),
            project_id: 1,
            ..Default::default()
        })
        .collect();

    let created = create_stories(&client, &stories).await.unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[1].name, "Two");
}

#[tokio::test]
async fn test_bulk_update_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/v2/stories/bulk"))
        .and(body_string(
            r#"{"epic_id":null,"owner_ids_add":["u1"],"story_ids":[1,2]}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "One", "owner_ids": ["u1"]},
            {"id": 2, "name": "Two", "owner_ids": ["u1"]}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let params = UpdateStoriesParams {
        epic_id: Nullable::Reset,
        owner_ids_add: vec!["u1".to_string()],
        story_ids: vec![1, 2],
        ..Default::default()
    };

    let updated = update_stories(&client, &params).await.unwrap();
    assert!(updated.iter().all(|s| s.owner_ids == ["u1"]));
}

#[tokio::test]
async fn test_bulk_delete_sends_ids_in_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v2/stories/bulk"))
        .and(body_string(r#"{"story_ids":[1,2,3]}"#))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    assert_ok!(delete_stories(&client, &[1, 2, 3]).await);
}

#[tokio::test]
async fn test_story_link_lifecycle() {
    let mock_server = MockServer::start().await;
    let link = json!({"id": 9, "subject_id": 1, "object_id": 2, "verb": "blocks"});

    Mock::given(method("POST"))
        .and(path("/v2/story-links"))
        .and(body_string(r#"{"object_id":2,"subject_id":1,"verb":"blocks"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_json(link.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/story-links/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(link))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v2/story-links/9"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let created = StoryLink::create(&client, CreateStoryLinkParams::new(1, StoryVerb::Blocks, 2))
        .await
        .unwrap();
    let fetched = StoryLink::get(&client, created.id).await.unwrap();
    assert_eq!(fetched.verb, StoryVerb::Blocks);

    assert_ok!(StoryLink::delete(&client, created.id).await);
}

// =============================================================================
// Epic comments
// =============================================================================

#[tokio::test]
async fn test_epic_comment_endpoints() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/epics/10/comments"))
        .and(body_string(r#"{"text":"First"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 30, "text": "First"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v2/epics/10/comments/30"))
        .and(body_string(r#"{"text":"Reply"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 31, "text": "Reply"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/epics/10/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 30,
            "text": "First",
            "comments": [{"id": 31, "text": "Reply"}]
        }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v2/epics/10/comments/31"))
        .and(body_string(r#"{"text":"Edited"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 31, "text": "Edited"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/v2/epics/10/comments/30"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);

    let thread = create_epic_comment(&client, 10, &CreateCommentParams::text("First"))
        .await
        .unwrap();
    let reply = create_epic_comment_reply(&client, 10, thread.id, &CreateCommentParams::text("Reply"))
        .await
        .unwrap();
    assert_eq!(reply.id, 31);

    let comments = list_epic_comments(&client, 10).await.unwrap();
    assert_eq!(comments[0].comments[0].text, "Reply");

    let edited = update_epic_comment(
        &client,
        10,
        reply.id,
        &UpdateCommentParams {
            text: "Edited".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(edited.text, "Edited");

    assert_ok!(delete_epic_comment(&client, 10, thread.id).await);
}
