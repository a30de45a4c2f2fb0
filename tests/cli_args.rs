//! CLI argument parsing tests.

use clap::Parser;
use clubhouse::cli::{parse_id, Cli, Command, Entity};
use clubhouse::{Color, Nullable};

fn update_args(args: &[&str]) -> clubhouse::cli::UpdateArgs {
    let argv = ["clubhouse", "update"].iter().chain(args).copied();
    match Cli::parse_from(argv).command {
        Command::Update(update) => update,
        other => panic!("Expected Update command, got {other:?}"),
    }
}

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["clubhouse", "get", "epic", "10"]);

    assert!(!cli.json);
    match cli.command {
        Command::Get { entity, id } => {
            assert_eq!(entity, Entity::Epic);
            assert_eq!(id, "10");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_with_plural_alias() {
    let cli = Cli::parse_from(["clubhouse", "list", "categories"]);
    assert!(matches!(
        cli.command,
        Command::List {
            entity: Entity::Category
        }
    ));

    let cli = Cli::parse_from(["clubhouse", "list", "stories"]);
    assert!(matches!(cli.command, Command::List { entity: Entity::Story }));
}

#[test]
fn test_global_json_flag() {
    let cli = Cli::parse_from(["clubhouse", "--json", "list", "labels"]);
    assert!(cli.json);

    let cli = Cli::parse_from(["clubhouse", "list", "labels", "--json"]);
    assert!(cli.json);
}

#[test]
fn test_search_args() {
    let cli = Cli::parse_from([
        "clubhouse",
        "search",
        "state:started",
        "--all",
        "--page-size",
        "10",
    ]);

    match cli.command {
        Command::Search {
            query,
            all,
            page_size,
        } => {
            assert_eq!(query, "state:started");
            assert!(all);
            assert_eq!(page_size, Some(10));
        }
        _ => panic!("Expected Search command"),
    }
}

#[test]
fn test_member_get_keeps_uuid() {
    let cli = Cli::parse_from([
        "clubhouse",
        "get",
        "member",
        "5a0e0000-0000-0000-0000-000000000001",
    ]);
    match cli.command {
        Command::Get { entity, id } => {
            assert_eq!(entity, Entity::Member);
            assert_eq!(id, "5a0e0000-0000-0000-0000-000000000001");
        }
        _ => panic!("Expected Get command"),
    }
}

// =============================================================================
// Update flags map onto the three field states
// =============================================================================

#[test]
fn test_update_without_color_flags_leaves_color_unset() {
    let args = update_args(&["category", "1", "--name", "Platform"]);

    assert_eq!(args.name.as_deref(), Some("Platform"));
    assert!(args.color_field().is_unset());
    assert!(!args.has_color_flags());
}

#[test]
fn test_update_color_value() {
    let args = update_args(&["label", "20", "--color", "#00ff00"]);
    assert_eq!(args.color_field(), Nullable::Value(Color::new("#00ff00")));
}

#[test]
fn test_update_clear_color_is_reset() {
    let args = update_args(&["category", "1", "--clear-color"]);
    assert!(args.color_field().is_reset());
    assert!(args.has_color_flags());
}

#[test]
fn test_color_and_clear_color_conflict() {
    let result = Cli::try_parse_from([
        "clubhouse",
        "update",
        "category",
        "1",
        "--color",
        "#fff",
        "--clear-color",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_epic_milestone_flags() {
    let moved = update_args(&["epic", "10", "--milestone", "124"]);
    assert_eq!(moved.milestone_field(), Nullable::Value(124));
    assert!(moved.has_epic_flags());

    let cleared = update_args(&["epic", "10", "--clear-milestone", "--clear-deadline"]);
    assert!(cleared.milestone_field().is_reset());
    assert!(cleared.clear_deadline);

    let untouched = update_args(&["epic", "10", "--archived", "true"]);
    assert!(untouched.milestone_field().is_unset());
    assert!(!untouched.has_epic_flags());
    assert_eq!(untouched.archived, Some(true));
}

#[test]
fn test_milestone_and_clear_milestone_conflict() {
    let result = Cli::try_parse_from([
        "clubhouse",
        "update",
        "epic",
        "10",
        "--milestone",
        "5",
        "--clear-milestone",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_parse_id() {
    assert_eq!(parse_id("42").unwrap(), 42);

    let err = parse_id("abc").unwrap_err();
    assert!(err.to_string().contains("expected a numeric ID"));
}
