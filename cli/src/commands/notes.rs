use clap::Args;
use ink_core::{Note, NoteDraft, SortField, SortOrder};
use serde_json::json;

use crate::app::App;
use crate::commands::report;
use crate::output;

#[derive(Args)]
pub struct ListArgs {
    /// Full-text search over titles and content
    #[arg(short = 'q', long)]
    pub search: Option<String>,

    /// Only notes carrying this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Only notes owned by this user id
    #[arg(long)]
    pub author: Option<i64>,

    /// Sort field: title, created, updated
    #[arg(long, default_value = "updated")]
    pub sort: SortField,

    /// Sort order: asc, desc
    #[arg(long, default_value = "desc")]
    pub order: SortOrder,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Notes per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Note id
    pub id: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Note title
    #[arg(long)]
    pub title: String,

    /// Note content
    #[arg(long)]
    pub content: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct EditArgs {
    /// Note id
    pub id: i64,

    /// New title
    #[arg(long)]
    pub title: String,

    /// New content
    #[arg(long)]
    pub content: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Note id
    pub id: i64,
}

pub async fn run_list(app: &App, args: ListArgs) -> anyhow::Result<()> {
    let controller = app.notes_with(ink_core::NoteQuery {
        search: args.search,
        tag: args.tag,
        author_id: args.author,
        sort_field: args.sort,
        sort_order: args.order,
        page: args.page.max(1),
        page_size: args.page_size.unwrap_or(app.config.page_size),
    });

    let notes = controller.reload().await.map_err(report)?;
    let total = controller.total_count().await;

    if args.json {
        let body = json!({
            "count": total,
            "results": notes,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if notes.is_empty() {
        output::info("No notes matched.");
        return Ok(());
    }

    output::header(&format!("Notes ({total} total)"));
    for note in &notes {
        let tags = if note.tags.is_empty() {
            String::new()
        } else {
            let names: Vec<&str> = note.tags.iter().map(|t| t.name.as_str()).collect();
            format!("  [{}]", names.join(", "))
        };
        println!(
            "  {:>5}  {}  ({}){tags}",
            note.id,
            note.title,
            note.updated_at.format("%Y-%m-%d %H:%M")
        );
    }
    Ok(())
}

pub async fn run_show(app: &App, args: ShowArgs) -> anyhow::Result<()> {
    let controller = app.notes();
    let note = controller.get(args.id).await.map_err(report)?;
    print_note(&note, args.json)
}

pub async fn run_create(app: &App, args: CreateArgs) -> anyhow::Result<()> {
    let controller = app.notes();
    let note = controller
        .create(&NoteDraft::new(args.title, args.content))
        .await
        .map_err(report)?;
    if args.json {
        return print_note(&note, true);
    }
    output::success(&format!("Created note {} '{}'", note.id, note.title));
    Ok(())
}

pub async fn run_edit(app: &App, args: EditArgs) -> anyhow::Result<()> {
    let controller = app.notes();
    let note = controller
        .update(args.id, &NoteDraft::new(args.title, args.content))
        .await
        .map_err(report)?;
    if args.json {
        return print_note(&note, true);
    }
    output::success(&format!("Updated note {} '{}'", note.id, note.title));
    Ok(())
}

pub async fn run_delete(app: &App, args: DeleteArgs) -> anyhow::Result<()> {
    let controller = app.notes();
    controller.delete(args.id).await.map_err(report)?;
    output::success(&format!("Deleted note {}", args.id));
    Ok(())
}

fn print_note(note: &Note, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(note)?);
        return Ok(());
    }

    output::header(&note.title);
    if !note.tags.is_empty() {
        let names: Vec<&str> = note.tags.iter().map(|t| t.name.as_str()).collect();
        println!("  tags: {}", names.join(", "));
    }
    if let Some(user) = &note.user {
        println!("  by: {} <{}>", user.username, user.email);
    }
    println!(
        "  updated: {}",
        note.updated_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!();
    println!("{}", note.content);
    Ok(())
}
