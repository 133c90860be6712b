use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use shortlist::api::ShortlistApi;
use shortlist::config::ShortlistConfig;
use shortlist::error::{Result, ShortlistError};
use shortlist::model::{AppState, InputList, MainListItem, ProjectArchive, ProjectSummary};
use shortlist::reducer::{CmdMessage, MessageLevel};
use shortlist::store::fs::FileStore;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;
use uuid::Uuid;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    api: ShortlistApi<FileStore>,
    config: ShortlistConfig,
    data_dir: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut ctx = init_context()?;

    match cli.command {
        Commands::New { name } => handle_new(&mut ctx, name),
        Commands::Projects => handle_projects(&mut ctx),
        Commands::Use { name } => handle_use(&mut ctx, name),
        Commands::DeleteProject { name } => handle_delete_project(&mut ctx, name),
        Commands::Lists => handle_lists(&ctx),
        Commands::AddList { name } => handle_add_list(&mut ctx, name),
        Commands::RmList { name } => handle_rm_list(&mut ctx, name),
        Commands::Add { list, items } => handle_add(&mut ctx, list, items),
        Commands::Rm { list, index } => handle_rm(&mut ctx, list, index),
        Commands::Pick { list, index, at } => handle_pick(&mut ctx, list, index, at),
        Commands::Drop { rank } => handle_drop(&mut ctx, rank),
        Commands::Show => handle_show(&ctx),
        Commands::Reorder { from, to } => handle_reorder(&mut ctx, from, to),
        Commands::Tags => handle_tags(&ctx),
        Commands::TagNew { name, color } => handle_tag_new(&mut ctx, name, color),
        Commands::TagEdit {
            name,
            new_name,
            color,
        } => handle_tag_edit(&mut ctx, name, new_name, color),
        Commands::TagRm { name } => handle_tag_rm(&mut ctx, name),
        Commands::Tag { tag, ranks } => handle_tag(&mut ctx, tag, ranks, true),
        Commands::Untag { tag, ranks } => handle_tag(&mut ctx, tag, ranks, false),
        Commands::Export { path } => handle_export(&ctx, path),
        Commands::Import { path } => handle_import(&mut ctx, path),
    }
}

fn init_context() -> Result<AppContext> {
    let data_dir = match std::env::var_os("SHORTLIST_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("com", "shortlist", "shortlist")
            .ok_or_else(|| ShortlistError::Store("Could not determine data dir".to_string()))?
            .data_dir()
            .to_path_buf(),
    };

    let config = ShortlistConfig::load(&data_dir).unwrap_or_default();
    let store = FileStore::new(data_dir.clone());
    let mut api = ShortlistApi::new(store);
    api.load_tag_pool()?;

    if let Some(id) = config.active_project {
        // A vanished active project is not fatal; commands that need one
        // will say so.
        let _ = api.open_project(id);
    }

    Ok(AppContext {
        api,
        config,
        data_dir,
    })
}

// --- Handlers ---

fn handle_new(ctx: &mut AppContext, name: String) -> Result<()> {
    let result = ctx.api.create_project(&name)?;
    print_messages(&result.messages);
    finish(ctx)
}

fn handle_projects(ctx: &mut AppContext) -> Result<()> {
    let summaries = ctx.api.list_saved()?;
    print_projects(&summaries, ctx.config.active_project);
    Ok(())
}

fn handle_use(ctx: &mut AppContext, name: String) -> Result<()> {
    let id = resolve_saved(ctx, &name)?;
    let result = ctx.api.open_project(id)?;
    ctx.config.active_project = Some(id);
    ctx.config.save(&ctx.data_dir)?;
    // Opening recounts tag usage; keep the pool on disk in step.
    ctx.api.persist_tag_pool()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete_project(ctx: &mut AppContext, name: String) -> Result<()> {
    let id = resolve_saved(ctx, &name)?;
    let result = ctx.api.delete_saved(id)?;
    if ctx.config.active_project == Some(id) {
        ctx.config.active_project = None;
        ctx.config.save(&ctx.data_dir)?;
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_lists(ctx: &AppContext) -> Result<()> {
    let project = require_project(ctx.api.state())?;
    if project.input_lists.is_empty() {
        println!("No input lists yet. Add one with `shortlist add-list <name>`.");
        return Ok(());
    }
    for list in &project.input_lists {
        print_input_list(list);
    }
    Ok(())
}

fn handle_add_list(ctx: &mut AppContext, name: String) -> Result<()> {
    require_project(ctx.api.state())?;
    let result = ctx.api.add_input_list(&name)?;
    print_messages(&result.messages);
    finish(ctx)
}

fn handle_rm_list(ctx: &mut AppContext, name: String) -> Result<()> {
    let list_id = resolve_list(ctx.api.state(), &name)?;
    let result = ctx.api.delete_input_list(list_id)?;
    print_messages(&result.messages);
    finish(ctx)
}

fn handle_add(ctx: &mut AppContext, list: String, items: Vec<String>) -> Result<()> {
    let list_id = resolve_list(ctx.api.state(), &list)?;
    let result = ctx.api.add_items(list_id, &items)?;
    print_messages(&result.messages);
    finish(ctx)
}

fn handle_rm(ctx: &mut AppContext, list: String, index: usize) -> Result<()> {
    let list_id = resolve_list(ctx.api.state(), &list)?;
    let item_id = resolve_item(ctx.api.state(), list_id, index)?;
    let result = ctx.api.delete_item(list_id, item_id)?;
    if result.committed {
        println!("{}", "Item removed".green());
    }
    finish(ctx)
}

fn handle_pick(ctx: &mut AppContext, list: String, index: usize, at: Option<u32>) -> Result<()> {
    let list_id = resolve_list(ctx.api.state(), &list)?;
    let item_id = resolve_item(ctx.api.state(), list_id, index)?;
    let result = ctx.api.pick_item(list_id, item_id, at)?;
    if !result.committed {
        println!("{}", "Already picked, nothing to do.".yellow());
        return Ok(());
    }
    print_messages(&result.messages);
    finish(ctx)
}

fn handle_drop(ctx: &mut AppContext, rank: u32) -> Result<()> {
    let item_id = resolve_rank(ctx.api.state(), rank)?;
    let result = ctx.api.drop_item(item_id)?;
    print_messages(&result.messages);
    finish(ctx)
}

fn handle_show(ctx: &AppContext) -> Result<()> {
    let project = require_project(ctx.api.state())?;
    print_main_list(ctx.api.state(), project.name.as_str());
    Ok(())
}

fn handle_reorder(ctx: &mut AppContext, from: u32, to: u32) -> Result<()> {
    let item_id = resolve_rank(ctx.api.state(), from)?;
    let len = require_project(ctx.api.state())?.main_list.len() as u32;
    let to = to.min(len).max(1);
    let result = ctx.api.reorder_single(item_id, to)?;
    if result.committed {
        println!("{}", format!("Moved #{} to #{}", from, to).green());
    } else {
        println!("Nothing to move.");
    }
    finish(ctx)
}

fn handle_tags(ctx: &AppContext) -> Result<()> {
    let state = ctx.api.state();
    if state.tag_pool.is_empty() {
        println!("No tags yet. Create one with `shortlist tag-new <name>`.");
        return Ok(());
    }
    for tag in &state.tag_pool {
        println!(
            "{}  {} {}",
            tag.name.bold(),
            tag.color.dimmed(),
            format!("({} uses)", tag.usage_count).dimmed()
        );
    }
    Ok(())
}

fn handle_tag_new(ctx: &mut AppContext, name: String, color: String) -> Result<()> {
    let result = ctx.api.create_tag(&name, &color)?;
    print_messages(&result.messages);
    finish(ctx)
}

fn handle_tag_edit(
    ctx: &mut AppContext,
    name: String,
    new_name: String,
    color: Option<String>,
) -> Result<()> {
    let (tag_id, current_color) = resolve_tag(ctx.api.state(), &name)?;
    let color = color.unwrap_or(current_color);
    let result = ctx.api.edit_tag(tag_id, &new_name, &color)?;
    print_messages(&result.messages);
    finish(ctx)
}

fn handle_tag_rm(ctx: &mut AppContext, name: String) -> Result<()> {
    let (tag_id, _) = resolve_tag(ctx.api.state(), &name)?;
    let result = ctx.api.delete_tag(tag_id)?;
    print_messages(&result.messages);
    finish(ctx)
}

fn handle_tag(ctx: &mut AppContext, tag: String, ranks: Vec<u32>, adding: bool) -> Result<()> {
    let (tag_id, _) = resolve_tag(ctx.api.state(), &tag)?;
    let item_ids: Vec<Uuid> = ranks
        .iter()
        .map(|&rank| resolve_rank(ctx.api.state(), rank))
        .collect::<Result<_>>()?;

    let result = if adding {
        ctx.api.tag_items(&item_ids, tag_id)?
    } else {
        ctx.api.untag_items(&item_ids, tag_id)?
    };
    if result.committed {
        let verb = if adding { "Tagged" } else { "Untagged" };
        let noun = if ranks.len() == 1 { "entry" } else { "entries" };
        println!("{}", format!("{} {} {}", verb, ranks.len(), noun).green());
    } else {
        println!("Nothing changed.");
    }
    finish(ctx)
}

fn handle_export(ctx: &AppContext, path: PathBuf) -> Result<()> {
    let archive = ctx.api.export_archive()?;
    let content = serde_json::to_string_pretty(&archive).map_err(ShortlistError::Serialization)?;
    std::fs::write(&path, content).map_err(ShortlistError::Io)?;
    println!("{}", format!("Exported to {}", path.display()).green());
    Ok(())
}

fn handle_import(ctx: &mut AppContext, path: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&path).map_err(ShortlistError::Io)?;
    let archive: ProjectArchive =
        serde_json::from_str(&content).map_err(ShortlistError::Serialization)?;
    let result = ctx.api.import_archive(&archive)?;
    print_messages(&result.messages);
    finish(ctx)
}

/// Persists after a mutating command: project archive, summaries, tag
/// pool, and the active-project pointer.
fn finish(ctx: &mut AppContext) -> Result<()> {
    if ctx.api.state().current_project.is_some() {
        ctx.api.save_current()?;
        let id = ctx.api.state().current_project.as_ref().map(|p| p.id);
        if ctx.config.active_project != id {
            ctx.config.active_project = id;
            ctx.config.save(&ctx.data_dir)?;
        }
    }
    ctx.api.persist_tag_pool()?;
    Ok(())
}

// --- Resolvers ---

fn require_project(state: &AppState) -> Result<&shortlist::model::Project> {
    state.current_project.as_ref().ok_or_else(|| {
        ShortlistError::Api(
            "No active project. Run `shortlist new <name>` or `shortlist use <name>`.".to_string(),
        )
    })
}

fn resolve_saved(ctx: &mut AppContext, name: &str) -> Result<Uuid> {
    let summaries = ctx.api.list_saved()?;
    if let Ok(id) = name.parse::<Uuid>() {
        if summaries.iter().any(|s| s.id == id) {
            return Ok(id);
        }
    }
    summaries
        .iter()
        .find(|s| s.name.eq_ignore_ascii_case(name))
        .map(|s| s.id)
        .ok_or_else(|| ShortlistError::Api(format!("No saved project named \"{}\"", name)))
}

fn resolve_list(state: &AppState, name: &str) -> Result<Uuid> {
    let project = require_project(state)?;
    project
        .input_lists
        .iter()
        .find(|l| l.name.eq_ignore_ascii_case(name))
        .map(|l| l.id)
        .ok_or_else(|| ShortlistError::Api(format!("No input list named \"{}\"", name)))
}

fn resolve_item(state: &AppState, list_id: Uuid, index: usize) -> Result<Uuid> {
    let project = require_project(state)?;
    project
        .input_lists
        .iter()
        .find(|l| l.id == list_id)
        .and_then(|l| l.items.get(index.wrapping_sub(1)))
        .map(|i| i.id)
        .ok_or_else(|| ShortlistError::Api(format!("No item at index {}", index)))
}

fn resolve_tag(state: &AppState, name: &str) -> Result<(Uuid, String)> {
    state
        .tag_pool
        .iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .map(|t| (t.id, t.color.clone()))
        .ok_or_else(|| ShortlistError::Api(format!("No tag named \"{}\"", name)))
}

fn resolve_rank(state: &AppState, rank: u32) -> Result<Uuid> {
    let project = require_project(state)?;
    project
        .main_list
        .iter()
        .find(|i| i.order == rank)
        .map(|i| i.id)
        .ok_or_else(|| ShortlistError::Api(format!("No main-list entry at rank {}", rank)))
}

// --- Printing ---

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const PICKED_MARKER: &str = "✓";

fn print_projects(summaries: &[ProjectSummary], active: Option<Uuid>) {
    if summaries.is_empty() {
        println!("No saved projects.");
        return;
    }
    for summary in summaries {
        let marker = if active == Some(summary.id) { "* " } else { "  " };
        let counts = format!("({} ranked)", summary.main_count);
        let time_ago = format_time_ago(summary.updated_at);
        println!(
            "{}{} {} {}",
            marker,
            summary.name.bold(),
            counts.dimmed(),
            time_ago.dimmed()
        );
    }
}

fn print_input_list(list: &InputList) {
    let picked = list.items.iter().filter(|i| i.is_used).count();
    println!(
        "{} {}",
        list.name.bold(),
        format!("({}/{} picked)", picked, list.items.len()).dimmed()
    );
    for (i, item) in list.items.iter().enumerate() {
        let marker = if item.is_used {
            PICKED_MARKER.green()
        } else {
            " ".normal()
        };
        println!("  {:>3}. {} {}", i + 1, marker, item.content);
    }
}

fn print_main_list(state: &AppState, project_name: &str) {
    let Some(project) = state.current_project.as_ref() else {
        return;
    };
    if project.main_list.is_empty() {
        println!("The main list is empty. Pick something with `shortlist pick`.");
        return;
    }

    println!(
        "{} {}",
        project_name.bold(),
        format!("({} ranked)", project.main_list.len()).dimmed()
    );

    let mut entries: Vec<&MainListItem> = project.main_list.iter().collect();
    entries.sort_by_key(|item| item.order);

    for item in entries {
        let tag_names: Vec<String> = item
            .tags
            .iter()
            .filter_map(|id| state.tag_pool.iter().find(|t| t.id == *id))
            .map(|t| format!("#{}", t.name))
            .collect();
        let tags = tag_names.join(" ");

        let rank = format!("{:>3}. ", item.order);
        let fixed = rank.width() + tags.width() + 2;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let content = truncate_to_width(&item.content, available);
        let padding = available.saturating_sub(content.width());

        println!(
            "{}{}{} {}",
            rank.yellow(),
            content,
            " ".repeat(padding),
            tags.cyan()
        );
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
