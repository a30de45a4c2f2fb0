//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use chrono::{TimeZone, Utc};

use crate::{Category, Epic, EpicState, Label, Story, StoryType, ThreadedComment};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// The data a default mock server starts with.
pub struct DefaultScenario {
    pub categories: Vec<Category>,
    pub labels: Vec<Label>,
    pub epics: Vec<Epic>,
    /// Threads keyed by epic id.
    pub epic_comments: Vec<(i64, ThreadedComment)>,
    pub stories: Vec<Story>,
}

impl Fixtures {
    // =========================================================================
    // Category and label fixtures
    // =========================================================================

    pub fn category(id: i64, name: &str, color: Option<&str>) -> Category {
        Category {
            color: color.map(str::to_string),
            entity_type: "category".to_string(),
            id,
            name: name.to_string(),
            category_type: "milestone".to_string(),
            ..Default::default()
        }
    }

    pub fn label(id: i64, name: &str, color: Option<&str>) -> Label {
        Label {
            color: color.map(str::to_string),
            entity_type: "label".to_string(),
            id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    // =========================================================================
    // Epic fixtures
    // =========================================================================

    /// An epic in "to do" with nothing optional set.
    pub fn epic(id: i64, name: &str) -> Epic {
        Epic {
            entity_type: "epic".to_string(),
            id,
            name: name.to_string(),
            state: EpicState::ToDo,
            ..Default::default()
        }
    }

    /// An epic in a milestone, with a deadline and both override timestamps.
    pub fn scheduled_epic(id: i64, name: &str, milestone_id: i64) -> Epic {
        let mut epic = Self::epic(id, name);
        epic.milestone_id = Some(milestone_id);
        epic.deadline = Utc.with_ymd_and_hms(2018, 6, 1, 0, 0, 0).single();
        epic.started_at_override = Utc.with_ymd_and_hms(2018, 4, 20, 12, 20, 0).single();
        epic.completed_at_override = Utc.with_ymd_and_hms(2018, 5, 20, 12, 20, 0).single();
        epic.state = EpicState::InProgress;
        epic
    }

    pub fn comment(id: i64, text: &str) -> ThreadedComment {
        ThreadedComment {
            entity_type: "threaded-comment".to_string(),
            id,
            text: text.to_string(),
            ..Default::default()
        }
    }

    // =========================================================================
    // Story fixtures
    // =========================================================================

    pub fn story(id: i64, name: &str, project_id: i64) -> Story {
        Story {
            app_url: format!("https://app.clubhouse.io/mock/story/{id}"),
            entity_type: "story".to_string(),
            id,
            name: name.to_string(),
            project_id: Some(project_id),
            story_type: StoryType::Feature,
            ..Default::default()
        }
    }

    /// `count` stories named "`prefix` 1" through "`prefix` N", ids from `first_id`.
    pub fn stories(first_id: i64, count: usize, prefix: &str) -> Vec<Story> {
        (0..count as i64)
            .map(|i| Self::story(first_id + i, &format!("{prefix} {}", i + 1), 1))
            .collect()
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// A small workspace: two categories, two labels, two epics with a
    /// discussion, and a handful of stories.
    pub fn default_scenario() -> DefaultScenario {
        let mut bug = Self::story(100, "Login button unresponsive", 1);
        bug.story_type = StoryType::Bug;
        bug.epic_id = Some(10);
        bug.estimate = Some(2);

        let mut chore = Self::story(101, "Upgrade payment SDK", 1);
        chore.story_type = StoryType::Chore;
        chore.epic_id = Some(10);

        let mut reply = Self::comment(31, "Agreed, shipping it behind a flag");
        reply.author_id = Some("5a0e0000-0000-0000-0000-000000000002".to_string());
        let mut thread = Self::comment(30, "Should we split the payment work?");
        thread.author_id = Some("5a0e0000-0000-0000-0000-000000000001".to_string());
        thread.comments.push(reply);

        DefaultScenario {
            categories: vec![
                Self::category(1, "Infrastructure", Some("#3366cc")),
                Self::category(2, "Growth", None),
            ],
            labels: vec![
                Self::label(20, "bug", Some("#ff0000")),
                Self::label(21, "frontend", None),
            ],
            epics: vec![
                Self::scheduled_epic(10, "Checkout v2", 5),
                Self::epic(11, "Onboarding"),
            ],
            epic_comments: vec![(10, thread)],
            stories: vec![
                bug,
                chore,
                Self::story(102, "Checkout copy review", 2),
            ],
        }
    }
}
