//! Interactive account console shell.
//!
//! The terminal counterpart of the web form: prompts for credentials,
//! connects (token upgrade + profile fetch), then loops over an action
//! menu for keyword management, post browsing, and the keyword scan.
//! The agent already logs every failure; this shell only decides how to
//! render the sentinel results it gets back.

use std::time::Duration;

use anyhow::Result;
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::style;
use dialoguer::{Confirm, Input, Password, Select};
use indicatif::ProgressBar;
use secrecy::SecretString;

use postwarden_core::agent::DEFAULT_POST_LIMIT;
use postwarden_core::AccountAgent;
use postwarden_infra::GraphHttpClient;
use postwarden_types::post::Post;

use crate::state::AppState;

const ACTIONS: &[&str] = &[
    "Add keyword",
    "Remove keyword",
    "List keywords",
    "Show recent posts",
    "Create post",
    "Analyze engagement",
    "Scan and delete posts",
    "Quit",
];

/// Run the console shell until the user quits.
pub async fn run(state: &AppState) -> Result<()> {
    println!();
    println!(
        "  {} {}",
        style("●").cyan().bold(),
        style("Postwarden account console").bold()
    );
    println!();

    let access_token = Password::new()
        .with_prompt("Access token")
        .allow_empty_password(true)
        .interact()?;
    let app_id: String = Input::new()
        .with_prompt("App ID")
        .allow_empty(true)
        .interact_text()?;
    let app_secret = Password::new()
        .with_prompt("App secret")
        .allow_empty_password(true)
        .interact()?;

    if access_token.trim().is_empty() || app_id.trim().is_empty() || app_secret.trim().is_empty() {
        println!(
            "  {} Please enter access token, app ID, and app secret",
            style("✗").red().bold()
        );
        return Ok(());
    }

    let mut agent = AccountAgent::new(state.graph_client(), SecretString::from(access_token));

    // Connect: upgrade the token, then prove it with a profile fetch.
    // A failed upgrade leaves the short-lived token in place, which may
    // still work for the session.
    if agent
        .exchange_for_long_lived_token(app_id.trim(), app_secret.trim())
        .await
    {
        match agent.profile_info().await {
            Some(profile) => println!(
                "  {} Connected as: {}",
                style("✓").green().bold(),
                style(profile.name).cyan()
            ),
            None => println!("  {} Connection failed!", style("✗").red().bold()),
        }
    } else {
        println!("  {} Token exchange failed!", style("✗").red().bold());
    }
    println!();

    loop {
        let choice = Select::new()
            .with_prompt("Action")
            .items(ACTIONS)
            .default(0)
            .interact()?;
        println!();

        match choice {
            0 => add_keyword(&mut agent)?,
            1 => remove_keyword(&mut agent)?,
            2 => list_keywords(&agent),
            3 => show_recent_posts(&agent).await,
            4 => create_post(&agent).await?,
            5 => analyze_engagement(&agent).await?,
            6 => scan_and_delete(&agent).await?,
            _ => break,
        }
        println!();
    }

    Ok(())
}

fn add_keyword(agent: &mut AccountAgent<GraphHttpClient>) -> Result<()> {
    let keyword: String = Input::new()
        .with_prompt("Keyword")
        .allow_empty(true)
        .interact_text()?;
    if keyword.trim().is_empty() {
        return Ok(());
    }
    agent.add_keyword(keyword.trim());
    list_keywords(agent);
    Ok(())
}

fn remove_keyword(agent: &mut AccountAgent<GraphHttpClient>) -> Result<()> {
    let keywords: Vec<String> = agent.keywords().map(str::to_string).collect();
    if keywords.is_empty() {
        println!("  {} No keywords tracked", style("i").blue().bold());
        return Ok(());
    }
    let choice = Select::new()
        .with_prompt("Remove which keyword?")
        .items(&keywords)
        .default(0)
        .interact()?;
    agent.remove_keyword(&keywords[choice]);
    list_keywords(agent);
    Ok(())
}

fn list_keywords(agent: &AccountAgent<GraphHttpClient>) {
    let keywords: Vec<&str> = agent.keywords().collect();
    if keywords.is_empty() {
        println!("  {} No keywords tracked", style("i").blue().bold());
    } else {
        println!("  Current keywords: {}", style(keywords.join(", ")).yellow());
    }
}

async fn show_recent_posts(agent: &AccountAgent<GraphHttpClient>) {
    let posts = agent.recent_posts(DEFAULT_POST_LIMIT).await;
    if posts.is_empty() {
        println!("  {} No posts fetched", style("i").blue().bold());
        return;
    }
    println!("{}", posts_table(&posts));
}

fn posts_table(posts: &[Post]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Id").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("Message").fg(Color::White),
    ]);

    for post in posts {
        table.add_row(vec![
            Cell::new(&post.id).fg(Color::Cyan),
            Cell::new(post.created_time.format("%Y-%m-%d %H:%M").to_string())
                .fg(Color::DarkGrey),
            Cell::new(truncate(post.message.as_deref().unwrap_or("(no text)"), 60)),
        ]);
    }
    table
}

async fn create_post(agent: &AccountAgent<GraphHttpClient>) -> Result<()> {
    let message: String = Input::new()
        .with_prompt("Message")
        .allow_empty(true)
        .interact_text()?;
    if message.trim().is_empty() {
        println!("  {} Post message cannot be empty", style("✗").red().bold());
        return Ok(());
    }
    if agent.create_post(message.trim()).await {
        println!("  {} Post created", style("✓").green().bold());
    } else {
        println!("  {} Failed to create post", style("✗").red().bold());
    }
    Ok(())
}

async fn analyze_engagement(agent: &AccountAgent<GraphHttpClient>) -> Result<()> {
    let post_id: String = Input::new().with_prompt("Post ID").interact_text()?;
    match agent.analyze_engagement(post_id.trim()).await {
        Some(summary) => println!(
            "  {} {} reactions, {} comments",
            style("✓").green().bold(),
            style(summary.reactions_count).bold(),
            style(summary.comments_count).bold()
        ),
        None => println!("  {} Failed to analyze engagement", style("✗").red().bold()),
    }
    Ok(())
}

async fn scan_and_delete(agent: &AccountAgent<GraphHttpClient>) -> Result<()> {
    if agent.keywords().next().is_none() {
        println!("  {} No keywords tracked -- nothing to scan for", style("i").blue().bold());
        return Ok(());
    }
    let confirmed = Confirm::new()
        .with_prompt("Delete every recent post matching a tracked keyword?")
        .default(false)
        .interact()?;
    if !confirmed {
        return Ok(());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message("Scanning recent posts...");
    let deleted = agent.scan_and_delete_posts().await;
    spinner.finish_and_clear();

    println!(
        "  {} Deleted {} post{}",
        style("✓").green().bold(),
        style(deleted).bold(),
        if deleted == 1 { "" } else { "s" }
    );
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
