//! Basic example demonstrating the Clubhouse API client.
//!
//! Run with:
//! ```
//! CLUBHOUSE_API_TOKEN=your-token cargo run --example basic
//! ```

use clubhouse::{
    list_epic_comments, search_stories, ClubhouseClient, Epic, Get, List, Nullable, SearchParams,
    Team, Update, UpdateEpicParams,
};

#[tokio::main]
async fn main() -> clubhouse::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    println!("Creating Clubhouse client...");
    let client = ClubhouseClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    println!("\n--- Teams ---");
    for team in Team::list(&client).await? {
        let states: Vec<&str> = team.workflow.states.iter().map(|s| s.name.as_str()).collect();
        println!("  - {} ({})", team.name, states.join(" / "));
    }

    println!("\n--- Epics ---");
    let epics = Epic::list(&client).await?;
    println!("Found {} epics", epics.len());
    for epic in epics.iter().take(5) {
        println!("  - #{} {} [{}]", epic.id, epic.name, epic.state.as_str());
    }

    if let Some(first) = epics.first() {
        println!("\n--- Epic Details ---");
        let epic = Epic::get(&client, first.id).await?;
        println!("Epic: {}", epic.name);
        println!("  Milestone: {:?}", epic.milestone_id);
        println!("  Deadline: {:?}", epic.deadline);

        let comments = list_epic_comments(&client, epic.id).await?;
        println!("  Comments: {}", comments.len());

        // Touch only the description; every other field stays as it is
        println!("\n--- Partial Update ---");
        let params = UpdateEpicParams {
            description: Some(epic.description.clone()),
            ..Default::default()
        };
        let updated = Epic::update(&client, epic.id, params).await?;
        println!("Updated #{} without touching its milestone", updated.id);

        if std::env::var("CLUBHOUSE_DEMO_CLEAR_DEADLINE").is_ok() {
            let params = UpdateEpicParams {
                deadline: Nullable::Reset,
                ..Default::default()
            };
            let cleared = Epic::update(&client, epic.id, params).await?;
            println!("Deadline cleared: {}", cleared.deadline.is_none());
        }
    }

    println!("\n--- Search ---");
    let page = search_stories(&client, &SearchParams::new("is:started").with_page_size(5)).await?;
    println!("{} started stories", page.total);
    for story in &page.data {
        println!("  - #{} {}", story.id, story.name);
    }

    println!("\nDone!");
    Ok(())
}
