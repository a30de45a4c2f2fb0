//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use chrono::{DateTime, Utc};

use crate::{Category, Epic, File, Label, Member, Milestone, Project, Repository, Story, Team};

/// Trait for human-readable key-value output.
///
/// Implemented by resource types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn color_line(color: &Option<String>) -> String {
    format!("Color:          {}", color.as_deref().unwrap_or("none"))
}

impl PrettyPrint for Category {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Category #{}", self.id));
        lines.push(format!("Name:           {}", self.name));
        lines.push(color_line(&self.color));
        if self.archived {
            lines.push("Archived:       yes".to_string());
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Label {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Label #{}", self.id));
        lines.push(format!("Name:           {}", self.name));
        lines.push(color_line(&self.color));

        if let Some(ref stats) = self.stats {
            lines.push(format!(
                "Stories:        {} ({} completed, {} in progress)",
                stats.num_stories_total, stats.num_stories_completed, stats.num_stories_in_progress
            ));
            lines.push(format!("Epics:          {}", stats.num_epics));
        }

        if self.archived {
            lines.push("Archived:       yes".to_string());
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Epic {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Epic #{}", self.id));
        lines.push(format!("Name:           {}", self.name));
        lines.push(format!("State:          {}", self.state.as_str()));

        match self.milestone_id {
            Some(id) => lines.push(format!("Milestone:      #{id}")),
            None => lines.push("Milestone:      none".to_string()),
        }

        if let Some(ref deadline) = self.deadline {
            lines.push(format!("Deadline:       {}", timestamp(deadline)));
        }

        lines.push(format!(
            "Stories:        {} done, {} started, {} unstarted",
            self.stats.num_stories_done,
            self.stats.num_stories_started,
            self.stats.num_stories_unstarted
        ));

        if !self.labels.is_empty() {
            let names: Vec<&str> = self.labels.iter().map(|l| l.name.as_str()).collect();
            lines.push(format!("Labels:         {}", names.join(", ")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Milestone {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Milestone #{}", self.id));
        lines.push(format!("Name:           {}", self.name));
        lines.push(format!("State:          {}", self.state));
        if !self.categories.is_empty() {
            let names: Vec<&str> = self.categories.iter().map(|c| c.name.as_str()).collect();
            lines.push(format!("Categories:     {}", names.join(", ")));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Project {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Project #{}", self.id));
        lines.push(format!("Name:           {}", self.name));

        if let Some(ref abbreviation) = self.abbreviation {
            lines.push(format!("Abbreviation:   {}", abbreviation));
        }

        lines.push(color_line(&self.color));
        lines.push(format!(
            "Stories:        {} ({} points)",
            self.stats.num_stories, self.stats.num_points
        ));

        if let Some(team_id) = self.team_id {
            lines.push(format!("Team:           #{team_id}"));
        }

        if self.archived {
            lines.push("Archived:       yes".to_string());
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Story {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Story #{}", self.id));
        lines.push(format!("Name:           {}", self.name));
        lines.push(format!("Type:           {}", self.story_type.as_str()));

        match self.estimate {
            Some(points) => lines.push(format!("Estimate:       {points}")),
            None => lines.push("Estimate:       unestimated".to_string()),
        }

        if let Some(epic_id) = self.epic_id {
            lines.push(format!("Epic:           #{epic_id}"));
        }

        if let Some(ref deadline) = self.deadline {
            lines.push(format!("Deadline:       {}", timestamp(deadline)));
        }

        if !self.tasks.is_empty() {
            let done = self.tasks.iter().filter(|t| t.complete).count();
            lines.push(format!("Tasks:          {}/{} complete", done, self.tasks.len()));
        }

        if !self.app_url.is_empty() {
            lines.push(format!("URL:            {}", self.app_url));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Member {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Member {}", self.id));
        lines.push(format!("Mention:        @{}", self.profile.mention_name));
        if let Some(ref name) = self.profile.name {
            lines.push(format!("Name:           {}", name));
        }
        lines.push(format!("Role:           {}", self.role));
        if self.disabled {
            lines.push("Disabled:       yes".to_string());
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Team {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Team #{}", self.id));
        lines.push(format!("Name:           {}", self.name));
        lines.push(format!("Projects:       {}", self.project_ids.len()));

        let states: Vec<&str> = self
            .workflow
            .states
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        if !states.is_empty() {
            lines.push(format!("Workflow:       {}", states.join(" → ")));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for File {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("File #{}", self.id));
        lines.push(format!("Name:           {}", self.name));
        lines.push(format!("Size:           {} bytes", self.size));
        if !self.content_type.is_empty() {
            lines.push(format!("Content Type:   {}", self.content_type));
        }
        lines.push(format!("URL:            {}", self.url));
        lines.join("\n")
    }
}

impl PrettyPrint for Repository {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Repository #{}", self.id));
        lines.push(format!("Name:           {}", self.full_name));
        lines.push(format!("URL:            {}", self.url));
        lines.join("\n")
    }
}
