//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! clubhouse binary.

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{ClubhouseError, Color, Nullable, Result};

/// Clubhouse API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "clubhouse", about = "Clubhouse API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// Numeric ID, or UUID for members.
        id: String,
    },

    /// List every entity of a type.
    List {
        /// The type of entity to list.
        entity: Entity,
    },

    /// Search stories.
    Search {
        /// Query in the web app's search syntax.
        query: String,

        /// Follow `next` links and fetch every page.
        #[arg(long)]
        all: bool,

        /// Number of results per page.
        #[arg(long)]
        page_size: Option<u32>,
    },

    /// Update an entity. Only the given flags are sent.
    Update(UpdateArgs),

    /// Delete an entity.
    Delete {
        /// The type of entity to delete.
        entity: Entity,

        /// Numeric ID.
        id: String,
    },
}

/// Flags for `update`.
#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// The type of entity to update.
    pub entity: Entity,

    /// Numeric ID.
    pub id: String,

    /// New name.
    #[arg(long)]
    pub name: Option<String>,

    /// New hex color (categories, labels, projects).
    #[arg(long, conflicts_with = "clear_color")]
    pub color: Option<String>,

    /// Remove the color.
    #[arg(long)]
    pub clear_color: bool,

    /// Archive or unarchive.
    #[arg(long)]
    pub archived: Option<bool>,

    /// Move an epic into a milestone.
    #[arg(long, conflicts_with = "clear_milestone")]
    pub milestone: Option<i64>,

    /// Take an epic out of its milestone.
    #[arg(long)]
    pub clear_milestone: bool,

    /// Remove an epic's deadline.
    #[arg(long)]
    pub clear_deadline: bool,
}

impl UpdateArgs {
    /// The color field as sent: absent, a new color, or `null`.
    pub fn color_field(&self) -> Nullable<Color> {
        match (&self.color, self.clear_color) {
            (_, true) => Nullable::Reset,
            (Some(color), false) => Nullable::Value(Color::new(color.clone())),
            (None, false) => Nullable::Unset,
        }
    }

    /// The epic milestone field as sent.
    pub fn milestone_field(&self) -> Nullable<i64> {
        match (self.milestone, self.clear_milestone) {
            (_, true) => Nullable::Reset,
            (Some(id), false) => Nullable::Value(id),
            (None, false) => Nullable::Unset,
        }
    }

    /// Whether any epic-only flag was passed.
    pub fn has_epic_flags(&self) -> bool {
        self.milestone.is_some() || self.clear_milestone || self.clear_deadline
    }

    /// Whether any color flag was passed.
    pub fn has_color_flags(&self) -> bool {
        self.color.is_some() || self.clear_color
    }
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    #[value(alias = "categories")]
    Category,
    #[value(alias = "epics")]
    Epic,
    #[value(alias = "files")]
    File,
    #[value(alias = "labels")]
    Label,
    /// A workspace member, addressed by UUID.
    #[value(alias = "members")]
    Member,
    #[value(alias = "milestones")]
    Milestone,
    #[value(alias = "projects")]
    Project,
    #[value(alias = "repositories")]
    Repository,
    #[value(alias = "stories")]
    Story,
    #[value(alias = "teams")]
    Team,
}

/// Parse a numeric entity ID.
pub fn parse_id(id: &str) -> Result<i64> {
    id.parse()
        .map_err(|_| ClubhouseError::InvalidArgument(format!("expected a numeric ID, got {id:?}")))
}
