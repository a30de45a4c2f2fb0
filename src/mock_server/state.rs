//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Clubhouse API server.
//! Updates are applied the way the real API applies them: a missing key
//! keeps the stored value and an explicit `null` clears it.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tokio::sync::RwLock;

use crate::{
    Category, CreateCategoryParams, CreateCommentParams, CreateEpicParams, CreateLabelParams,
    CreateStoryParams, Epic, Label, Story, StoryType, Task, ThreadedComment,
    UpdateCategoryParams, UpdateEpicParams, UpdateLabelParams, UpdateStoriesParams,
    UpdateStoryParams,
};

/// State shared between the server task and the test.
pub type SharedState = Arc<RwLock<MockState>>;

/// Ids handed out by the server start here, clear of fixture ids.
const FIRST_GENERATED_ID: i64 = 1000;

/// Shared state for the mock server.
///
/// Resources are kept in ordered maps so list and search output is stable.
#[derive(Debug)]
pub struct MockState {
    pub categories: BTreeMap<i64, Category>,

    pub labels: BTreeMap<i64, Label>,

    pub epics: BTreeMap<i64, Epic>,

    /// Top-level discussion threads, by epic id.
    pub epic_comments: BTreeMap<i64, Vec<ThreadedComment>>,

    pub stories: BTreeMap<i64, Story>,

    /// Default search page size when the request does not give one.
    pub search_page_size: usize,

    /// Optional authentication token. If set, requests must carry it.
    pub required_token: Option<String>,

    next_id: i64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            categories: BTreeMap::new(),
            labels: BTreeMap::new(),
            epics: BTreeMap::new(),
            epic_comments: BTreeMap::new(),
            stories: BTreeMap::new(),
            search_page_size: 25,
            required_token: None,
            next_id: FIRST_GENERATED_ID,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.reserve_id(category.id);
        self.categories.insert(category.id, category);
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.reserve_id(label.id);
        self.labels.insert(label.id, label);
        self
    }

    pub fn with_epic(mut self, epic: Epic) -> Self {
        self.reserve_id(epic.id);
        self.epics.insert(epic.id, epic);
        self
    }

    pub fn with_epic_comment(mut self, epic_id: i64, comment: ThreadedComment) -> Self {
        self.reserve_id(comment.id);
        self.epic_comments.entry(epic_id).or_default().push(comment);
        self
    }

    pub fn with_story(mut self, story: Story) -> Self {
        self.reserve_id(story.id);
        self.stories.insert(story.id, story);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    pub fn with_search_page_size(mut self, page_size: usize) -> Self {
        self.search_page_size = page_size;
        self
    }

    /// Returns true if `token` may call the API.
    pub fn accepts_token(&self, token: Option<&str>) -> bool {
        match &self.required_token {
            Some(required) => token == Some(required.as_str()),
            None => true,
        }
    }

    fn reserve_id(&mut self, id: i64) {
        self.next_id = self.next_id.max(id + 1);
    }

    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub fn create_category(&mut self, params: CreateCategoryParams) -> Category {
        let now = Utc::now();
        let category = Category {
            archived: false,
            color: params.color,
            created_at: Some(now),
            entity_type: "category".to_string(),
            external_id: params.external_id,
            id: self.allocate_id(),
            name: params.name,
            category_type: "milestone".to_string(),
            updated_at: Some(now),
        };
        self.categories.insert(category.id, category.clone());
        category
    }

    pub fn update_category(&mut self, id: i64, params: UpdateCategoryParams) -> Option<&Category> {
        let category = self.categories.get_mut(&id)?;
        if let Some(archived) = params.archived {
            category.archived = archived;
        }
        params.color.map(String::from).apply_to(&mut category.color);
        if let Some(name) = params.name {
            category.name = name;
        }
        category.updated_at = Some(Utc::now());
        Some(category)
    }

    // =========================================================================
    // Labels
    // =========================================================================

    pub fn create_label(&mut self, params: CreateLabelParams) -> Label {
        let now = Utc::now();
        let label = Label {
            archived: false,
            color: params.color,
            created_at: Some(now),
            entity_type: "label".to_string(),
            external_id: params.external_id,
            id: self.allocate_id(),
            name: params.name,
            stats: None,
            updated_at: Some(now),
        };
        self.labels.insert(label.id, label.clone());
        label
    }

    /// Resolve label params to stored labels, creating unknown names.
    fn resolve_labels(&mut self, params: Vec<CreateLabelParams>) -> Vec<Label> {
        params
            .into_iter()
            .map(|p| {
                let existing = self.labels.values().find(|l| l.name == p.name).cloned();
                existing.unwrap_or_else(|| self.create_label(p))
            })
            .collect()
    }

    pub fn update_label(&mut self, id: i64, params: UpdateLabelParams) -> Option<&Label> {
        let label = self.labels.get_mut(&id)?;
        if let Some(archived) = params.archived {
            label.archived = archived;
        }
        params.color.map(String::from).apply_to(&mut label.color);
        if let Some(name) = params.name {
            label.name = name;
        }
        label.updated_at = Some(Utc::now());
        Some(label)
    }

    // =========================================================================
    // Epics
    // =========================================================================

    pub fn create_epic(&mut self, params: CreateEpicParams) -> Epic {
        let now = Utc::now();
        let labels = self.resolve_labels(params.labels);
        let epic = Epic {
            completed_at_override: params.completed_at_override.map(to_utc),
            created_at: Some(params.created_at.map_or(now, to_utc)),
            deadline: params.deadline.map(to_utc),
            description: params.description.unwrap_or_default(),
            entity_type: "epic".to_string(),
            external_id: params.external_id,
            follower_ids: params.follower_ids,
            id: self.allocate_id(),
            labels,
            milestone_id: params.milestone_id,
            name: params.name,
            owner_ids: params.owner_ids,
            started_at_override: params.started_at_override.map(to_utc),
            state: params.state.unwrap_or_default(),
            updated_at: Some(now),
            ..Default::default()
        };
        self.epics.insert(epic.id, epic.clone());
        epic
    }

    pub fn update_epic(&mut self, id: i64, params: UpdateEpicParams) -> Option<&Epic> {
        if !self.epics.contains_key(&id) {
            return None;
        }
        let labels = self.resolve_labels(params.labels);
        let epic = self.epics.get_mut(&id)?;

        if let Some(archived) = params.archived {
            epic.archived = archived;
        }
        params
            .completed_at_override
            .map(to_utc)
            .apply_to(&mut epic.completed_at_override);
        params.deadline.map(to_utc).apply_to(&mut epic.deadline);
        if let Some(description) = params.description {
            epic.description = description;
        }
        if !params.follower_ids.is_empty() {
            epic.follower_ids = params.follower_ids;
        }
        if !labels.is_empty() {
            epic.labels = labels;
        }
        params.milestone_id.apply_to(&mut epic.milestone_id);
        if let Some(name) = params.name {
            epic.name = name;
        }
        if !params.owner_ids.is_empty() {
            epic.owner_ids = params.owner_ids;
        }
        params
            .started_at_override
            .map(to_utc)
            .apply_to(&mut epic.started_at_override);
        if let Some(state) = params.state {
            epic.state = state;
        }
        epic.updated_at = Some(Utc::now());
        Some(epic)
    }

    /// Remove an epic along with its discussion.
    pub fn delete_epic(&mut self, id: i64) -> Option<Epic> {
        self.epic_comments.remove(&id);
        self.epics.remove(&id)
    }

    // =========================================================================
    // Epic comments
    // =========================================================================

    fn new_comment(&mut self, params: CreateCommentParams) -> ThreadedComment {
        let now = Utc::now();
        ThreadedComment {
            author_id: params.author_id,
            created_at: Some(params.created_at.map_or(now, to_utc)),
            entity_type: "threaded-comment".to_string(),
            external_id: params.external_id,
            id: self.allocate_id(),
            text: params.text,
            updated_at: Some(params.updated_at.map_or(now, to_utc)),
            ..Default::default()
        }
    }

    /// Start a thread on an epic. `None` if the epic does not exist.
    pub fn create_epic_comment(
        &mut self,
        epic_id: i64,
        params: CreateCommentParams,
    ) -> Option<ThreadedComment> {
        if !self.epics.contains_key(&epic_id) {
            return None;
        }
        let comment = self.new_comment(params);
        self.epic_comments
            .entry(epic_id)
            .or_default()
            .push(comment.clone());
        Some(comment)
    }

    /// Reply to a comment anywhere in an epic's threads.
    pub fn reply_to_epic_comment(
        &mut self,
        epic_id: i64,
        comment_id: i64,
        params: CreateCommentParams,
    ) -> Option<ThreadedComment> {
        self.get_epic_comment(epic_id, comment_id)?;
        let reply = self.new_comment(params);
        let threads = self.epic_comments.get_mut(&epic_id)?;
        find_comment_mut(threads, comment_id)?
            .comments
            .push(reply.clone());
        Some(reply)
    }

    pub fn get_epic_comment(&self, epic_id: i64, comment_id: i64) -> Option<&ThreadedComment> {
        find_comment(self.epic_comments.get(&epic_id)?, comment_id)
    }

    pub fn update_epic_comment(
        &mut self,
        epic_id: i64,
        comment_id: i64,
        text: String,
    ) -> Option<&ThreadedComment> {
        let threads = self.epic_comments.get_mut(&epic_id)?;
        let comment = find_comment_mut(threads, comment_id)?;
        comment.text = text;
        comment.updated_at = Some(Utc::now());
        Some(comment)
    }

    /// Delete a comment and its replies.
    pub fn delete_epic_comment(&mut self, epic_id: i64, comment_id: i64) -> bool {
        self.epic_comments
            .get_mut(&epic_id)
            .map(|threads| remove_comment(threads, comment_id))
            .unwrap_or(false)
    }

    // =========================================================================
    // Stories
    // =========================================================================

    pub fn create_story(&mut self, params: CreateStoryParams) -> Story {
        let now = Utc::now();
        let id = self.allocate_id();
        let labels = self.resolve_labels(params.labels);
        let tasks = params
            .tasks
            .into_iter()
            .enumerate()
            .map(|(i, t)| Task {
                complete: t.complete,
                created_at: Some(t.created_at.map_or(now, to_utc)),
                description: t.description,
                entity_type: "task".to_string(),
                external_id: t.external_id,
                id: self.allocate_id(),
                owner_ids: t.owner_ids,
                position: i as i64 + 1,
                story_id: id,
                ..Default::default()
            })
            .collect();

        let story = Story {
            app_url: format!("https://app.clubhouse.io/mock/story/{id}"),
            completed_at_override: params.completed_at_override.map(to_utc),
            created_at: Some(params.created_at.map_or(now, to_utc)),
            deadline: params.deadline.map(to_utc),
            description: params.description.unwrap_or_default(),
            entity_type: "story".to_string(),
            epic_id: params.epic_id,
            estimate: params.estimate,
            external_id: params.external_id,
            follower_ids: params.follower_ids,
            id,
            labels,
            name: params.name,
            owner_ids: params.owner_ids,
            project_id: Some(params.project_id),
            requested_by_id: params.requested_by_id,
            started_at_override: params.started_at_override.map(to_utc),
            story_type: params.story_type.unwrap_or(StoryType::Feature),
            tasks,
            updated_at: Some(now),
            workflow_state_id: params.workflow_state_id,
            ..Default::default()
        };
        self.stories.insert(id, story.clone());
        story
    }

    pub fn update_story(&mut self, id: i64, params: UpdateStoryParams) -> Option<&Story> {
        if !self.stories.contains_key(&id) {
            return None;
        }
        let labels = self.resolve_labels(params.labels);
        let story = self.stories.get_mut(&id)?;

        if let Some(archived) = params.archived {
            story.archived = archived;
        }
        params
            .completed_at_override
            .map(to_utc)
            .apply_to(&mut story.completed_at_override);
        params.deadline.map(to_utc).apply_to(&mut story.deadline);
        if let Some(description) = params.description {
            story.description = description;
        }
        params.epic_id.apply_to(&mut story.epic_id);
        params.estimate.apply_to(&mut story.estimate);
        if !params.follower_ids.is_empty() {
            story.follower_ids = params.follower_ids;
        }
        if !labels.is_empty() {
            story.labels = labels;
        }
        if let Some(name) = params.name {
            story.name = name;
        }
        if !params.owner_ids.is_empty() {
            story.owner_ids = params.owner_ids;
        }
        if let Some(project_id) = params.project_id {
            story.project_id = Some(project_id);
        }
        if let Some(requested_by_id) = params.requested_by_id {
            story.requested_by_id = Some(requested_by_id);
        }
        params
            .started_at_override
            .map(to_utc)
            .apply_to(&mut story.started_at_override);
        if let Some(story_type) = params.story_type {
            story.story_type = story_type;
        }
        if let Some(workflow_state_id) = params.workflow_state_id {
            story.workflow_state_id = Some(workflow_state_id);
        }
        story.updated_at = Some(Utc::now());
        Some(story)
    }

    /// Apply one bulk update to every listed story.
    ///
    /// Unknown ids fail the whole update and leave every story untouched.
    pub fn update_stories(&mut self, params: UpdateStoriesParams) -> Option<Vec<Story>> {
        if !params.story_ids.iter().all(|id| self.stories.contains_key(id)) {
            return None;
        }
        let labels_add = self.resolve_labels(params.labels_add);
        let now = Utc::now();

        let mut updated = Vec::with_capacity(params.story_ids.len());
        for id in &params.story_ids {
            let story = self.stories.get_mut(id)?;

            if let Some(archived) = params.archived {
                story.archived = archived;
            }
            params.deadline.map(to_utc).apply_to(&mut story.deadline);
            params.epic_id.apply_to(&mut story.epic_id);
            params.estimate.apply_to(&mut story.estimate);

            add_remove(
                &mut story.follower_ids,
                &params.follower_ids_add,
                &params.follower_ids_remove,
            );
            add_remove(
                &mut story.owner_ids,
                &params.owner_ids_add,
                &params.owner_ids_remove,
            );

            story
                .labels
                .retain(|l| !params.labels_remove.iter().any(|r| r.name == l.name));
            for label in &labels_add {
                if !story.labels.iter().any(|l| l.id == label.id) {
                    story.labels.push(label.clone());
                }
            }

            if let Some(project_id) = params.project_id {
                story.project_id = Some(project_id);
            }
            if let Some(ref requested_by_id) = params.requested_by_id {
                story.requested_by_id = Some(requested_by_id.clone());
            }
            if let Some(story_type) = params.story_type {
                story.story_type = story_type;
            }
            if let Some(workflow_state_id) = params.workflow_state_id {
                story.workflow_state_id = Some(workflow_state_id);
            }
            story.updated_at = Some(now);
            updated.push(story.clone());
        }
        Some(updated)
    }

    /// Stories whose name or description contains `query`, ignoring case.
    pub fn search_stories(&self, query: &str) -> Vec<&Story> {
        let needle = query.to_lowercase();
        self.stories
            .values()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle)
                    || s.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

fn find_comment(threads: &[ThreadedComment], id: i64) -> Option<&ThreadedComment> {
    threads.iter().find_map(|c| {
        if c.id == id {
            Some(c)
        } else {
            find_comment(&c.comments, id)
        }
    })
}

fn find_comment_mut(threads: &mut [ThreadedComment], id: i64) -> Option<&mut ThreadedComment> {
    for comment in threads.iter_mut() {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find_comment_mut(&mut comment.comments, id) {
            return Some(found);
        }
    }
    None
}

fn remove_comment(threads: &mut Vec<ThreadedComment>, id: i64) -> bool {
    if let Some(pos) = threads.iter().position(|c| c.id == id) {
        threads.remove(pos);
        return true;
    }
    threads
        .iter_mut()
        .any(|c| remove_comment(&mut c.comments, id))
}

/// Stored timestamps are kept in UTC whatever offset the request used.
fn to_utc(at: DateTime<FixedOffset>) -> DateTime<Utc> {
    at.with_timezone(&Utc)
}

fn add_remove(ids: &mut Vec<String>, add: &[String], remove: &[String]) {
    ids.retain(|id| !remove.contains(id));
    for id in add {
        if !ids.contains(id) {
            ids.push(id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock_server::Fixtures;
    use crate::{Color, Nullable};

    #[test]
    fn test_update_category_keeps_unset_fields() {
        let mut state = MockState::new().with_category(Fixtures::category(1, "Infra", Some("#3366cc")));

        let updated = state
            .update_category(
                1,
                UpdateCategoryParams {
                    name: Some("Platform".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Platform");
        assert_eq!(updated.color.as_deref(), Some("#3366cc"));
    }

    #[test]
    fn test_update_category_reset_clears_color() {
        let mut state = MockState::new().with_category(Fixtures::category(1, "Infra", Some("#3366cc")));

        let updated = state
            .update_category(
                1,
                UpdateCategoryParams {
                    color: Nullable::Reset,
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(updated.color.is_none());

        let updated = state
            .update_category(
                1,
                UpdateCategoryParams {
                    color: Nullable::Value(Color::new("#00ff00")),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.color.as_deref(), Some("#00ff00"));
    }

    #[test]
    fn test_allocated_ids_skip_fixtures() {
        let mut state = MockState::new().with_category(Fixtures::category(5000, "Infra", None));
        let created = state.create_category(CreateCategoryParams {
            name: "New".to_string(),
            ..Default::default()
        });
        assert_eq!(created.id, 5001);
    }

    #[test]
    fn test_comment_replies_nest() {
        let mut state = MockState::new().with_epic(Fixtures::epic(10, "Checkout"));

        let root = state
            .create_epic_comment(10, CreateCommentParams::text("first"))
            .unwrap();
        let reply = state
            .reply_to_epic_comment(10, root.id, CreateCommentParams::text("second"))
            .unwrap();

        let thread = state.get_epic_comment(10, root.id).unwrap();
        assert_eq!(thread.comments.len(), 1);
        assert_eq!(state.get_epic_comment(10, reply.id).unwrap().text, "second");

        assert!(state.delete_epic_comment(10, reply.id));
        assert!(state.get_epic_comment(10, reply.id).is_none());
        assert!(!state.delete_epic_comment(10, reply.id));
    }

    #[test]
    fn test_bulk_update_unknown_id_changes_nothing() {
        let mut state = MockState::new().with_story(Fixtures::story(1, "a", 4));

        let result = state.update_stories(UpdateStoriesParams {
            story_ids: vec![1, 2],
            estimate: Nullable::Value(3),
            ..Default::default()
        });

        assert!(result.is_none());
        assert!(state.stories[&1].estimate.is_none());
    }

    #[test]
    fn test_add_remove() {
        let mut ids = vec!["a".to_string(), "b".to_string()];
        add_remove(&mut ids, &["c".to_string(), "a".to_string()], &["b".to_string()]);
        assert_eq!(ids, vec!["a".to_string(), "c".to_string()]);
    }
}
