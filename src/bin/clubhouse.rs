//! Clubhouse API CLI binary.
//!
//! A command-line interface for interacting with the Clubhouse API.

use clap::Parser;
use clubhouse::cli::{parse_id, Cli, Command, Entity, UpdateArgs};
use clubhouse::{
    search_stories, search_stories_all, Category, ClubhouseClient, ClubhouseError, Delete, Epic,
    File, Get, Label, List, Member, Milestone, Nullable, PrettyPrint, Project, Repository,
    SearchParams, Story, StorySearch, Team, Update, UpdateCategoryParams, UpdateEpicParams,
    UpdateLabelParams, UpdateProjectParams,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let client = match ClubhouseClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set CLUBHOUSE_API_TOKEN environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &ClubhouseClient, cli: Cli) -> clubhouse::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, &id, cli.json).await,
        Command::List { entity } => handle_list(client, entity, cli.json).await,
        Command::Search {
            query,
            all,
            page_size,
        } => handle_search(client, query, all, page_size, cli.json).await,
        Command::Update(args) => handle_update(client, args, cli.json).await,
        Command::Delete { entity, id } => handle_delete(client, entity, &id).await,
    }
}

async fn handle_get(
    client: &ClubhouseClient,
    entity: Entity,
    id: &str,
    json: bool,
) -> clubhouse::Result<()> {
    match entity {
        Entity::Member => {
            let member = Member::get(client, id.to_string()).await?;
            output_single(&member, json)
        }
        Entity::Category => output_single(&Category::get(client, parse_id(id)?).await?, json),
        Entity::Epic => output_single(&Epic::get(client, parse_id(id)?).await?, json),
        Entity::File => output_single(&File::get(client, parse_id(id)?).await?, json),
        Entity::Label => output_single(&Label::get(client, parse_id(id)?).await?, json),
        Entity::Milestone => output_single(&Milestone::get(client, parse_id(id)?).await?, json),
        Entity::Project => output_single(&Project::get(client, parse_id(id)?).await?, json),
        Entity::Repository => output_single(&Repository::get(client, parse_id(id)?).await?, json),
        Entity::Story => output_single(&Story::get(client, parse_id(id)?).await?, json),
        Entity::Team => output_single(&Team::get(client, parse_id(id)?).await?, json),
    }
}

async fn handle_list(client: &ClubhouseClient, entity: Entity, json: bool) -> clubhouse::Result<()> {
    match entity {
        Entity::Category => output_list(&Category::list(client).await?, json, |c| NamedRow {
            id: c.id.to_string(),
            name: c.name.clone(),
            detail: c.color.clone().unwrap_or_default(),
        }),
        Entity::Epic => output_list(&Epic::list(client).await?, json, |e| EpicRow::from(e)),
        Entity::File => output_list(&File::list(client).await?, json, |f| NamedRow {
            id: f.id.to_string(),
            name: f.name.clone(),
            detail: format!("{} bytes", f.size),
        }),
        Entity::Label => output_list(&Label::list(client).await?, json, |l| NamedRow {
            id: l.id.to_string(),
            name: l.name.clone(),
            detail: l.color.clone().unwrap_or_default(),
        }),
        Entity::Member => output_list(&Member::list(client).await?, json, |m| NamedRow {
            id: m.id.clone(),
            name: format!("@{}", m.profile.mention_name),
            detail: m.role.clone(),
        }),
        Entity::Milestone => output_list(&Milestone::list(client).await?, json, |m| NamedRow {
            id: m.id.to_string(),
            name: m.name.clone(),
            detail: m.state.clone(),
        }),
        Entity::Project => output_list(&Project::list(client).await?, json, |p| NamedRow {
            id: p.id.to_string(),
            name: p.name.clone(),
            detail: format!("{} stories", p.stats.num_stories),
        }),
        Entity::Repository => output_list(&Repository::list(client).await?, json, |r| NamedRow {
            id: r.id.to_string(),
            name: r.full_name.clone(),
            detail: r.url.clone(),
        }),
        Entity::Team => output_list(&Team::list(client).await?, json, |t| NamedRow {
            id: t.id.to_string(),
            name: t.name.clone(),
            detail: format!("{} projects", t.project_ids.len()),
        }),
        Entity::Story => {
            eprintln!("Error: Stories cannot be listed directly");
            eprintln!("Hint: Use 'clubhouse search <query>'");
            Err(ClubhouseError::InvalidArgument(
                "list story not supported".to_string(),
            ))
        }
    }
}

async fn handle_search(
    client: &ClubhouseClient,
    query: String,
    all: bool,
    page_size: Option<u32>,
    json: bool,
) -> clubhouse::Result<()> {
    let params = SearchParams {
        page_size,
        ..SearchParams::new(query)
    };

    if all {
        let stories = search_stories_all(client, &params).await?;
        return output_list(&stories, json, |s| StoryRow::from(s));
    }

    let page = search_stories(client, &params).await?;
    output_list(&page.data, json, |s| StoryRow::from(s))?;
    if !json {
        let more = if page.next.is_some() { ", more available" } else { "" };
        println!("\n{} of {} results{}", page.data.len(), page.total, more);
    }
    Ok(())
}

async fn handle_update(
    client: &ClubhouseClient,
    args: UpdateArgs,
    json: bool,
) -> clubhouse::Result<()> {
    let id = parse_id(&args.id)?;

    if args.entity != Entity::Epic && args.has_epic_flags() {
        return Err(ClubhouseError::InvalidArgument(
            "--milestone, --clear-milestone and --clear-deadline apply to epics only".to_string(),
        ));
    }

    match args.entity {
        Entity::Category => {
            let params = UpdateCategoryParams {
                archived: args.archived,
                color: args.color_field(),
                name: args.name.clone(),
            };
            output_single(&Category::update(client, id, params).await?, json)
        }
        Entity::Label => {
            let params = UpdateLabelParams {
                archived: args.archived,
                color: args.color_field(),
                name: args.name.clone(),
            };
            output_single(&Label::update(client, id, params).await?, json)
        }
        Entity::Project => {
            let params = UpdateProjectParams {
                archived: args.archived,
                color: args.color_field(),
                name: args.name.clone(),
                ..Default::default()
            };
            output_single(&Project::update(client, id, params).await?, json)
        }
        Entity::Epic => {
            if args.has_color_flags() {
                return Err(ClubhouseError::InvalidArgument(
                    "epics have no color".to_string(),
                ));
            }
            let params = UpdateEpicParams {
                archived: args.archived,
                deadline: if args.clear_deadline {
                    Nullable::Reset
                } else {
                    Nullable::Unset
                },
                milestone_id: args.milestone_field(),
                name: args.name.clone(),
                ..Default::default()
            };
            output_single(&Epic::update(client, id, params).await?, json)
        }
        _ => {
            eprintln!("Error: Only categories, labels, projects and epics can be updated via CLI");
            Err(ClubhouseError::InvalidArgument(
                "entity does not support update".to_string(),
            ))
        }
    }
}

async fn handle_delete(client: &ClubhouseClient, entity: Entity, id: &str) -> clubhouse::Result<()> {
    let id = parse_id(id)?;
    match entity {
        Entity::Category => Category::delete(client, id).await?,
        Entity::Epic => Epic::delete(client, id).await?,
        Entity::File => File::delete(client, id).await?,
        Entity::Label => Label::delete(client, id).await?,
        Entity::Milestone => Milestone::delete(client, id).await?,
        Entity::Project => Project::delete(client, id).await?,
        Entity::Story => Story::delete(client, id).await?,
        Entity::Member | Entity::Repository | Entity::Team => {
            return Err(ClubhouseError::InvalidArgument(
                "entity cannot be deleted through the API".to_string(),
            ));
        }
    }
    eprintln!("Deleted {entity:?} #{id}");
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> clubhouse::Result<()> {
    if json {
        println!("{}", to_json(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> clubhouse::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", to_json(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> clubhouse::Result<String> {
    serde_json::to_string_pretty(value).map_err(ClubhouseError::Marshal)
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct NamedRow {
    id: String,
    name: String,
    detail: String,
}

#[derive(Tabled)]
struct EpicRow {
    id: i64,
    name: String,
    state: String,
    milestone: String,
}

impl From<&Epic> for EpicRow {
    fn from(e: &Epic) -> Self {
        Self {
            id: e.id,
            name: e.name.clone(),
            state: e.state.as_str().to_string(),
            milestone: e.milestone_id.map(|m| m.to_string()).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct StoryRow {
    id: i64,
    #[tabled(rename = "type")]
    story_type: &'static str,
    name: String,
    estimate: String,
}

impl From<&StorySearch> for StoryRow {
    fn from(s: &StorySearch) -> Self {
        Self {
            id: s.id,
            story_type: s.story_type.as_str(),
            name: s.name.clone(),
            estimate: s.estimate.map(|e| e.to_string()).unwrap_or_default(),
        }
    }
}
