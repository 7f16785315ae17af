mod loader;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use shelfscope_core::{
    AchievementMode, AppConfig, Book, Session, SortDirection, SortField, ViewMode,
};

// ─── CLI Definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "shelfscope",
    about = "Terminal viewer for Goodreads challenge seasons",
    version,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Season JSON file to load.
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Season JSON URL to fetch.
    #[arg(long, global = true)]
    url: Option<String>,

    /// Challenge year, combined with --season and the config URL template.
    #[arg(long, global = true)]
    year: Option<String>,

    /// Season name (e.g. "summer").
    #[arg(long, global = true)]
    season: Option<String>,

    /// Output in JSON format (for scripts).
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the season in the TUI (default).
    Tui,

    /// List books with filters applied.
    List {
        /// Free-text search over title, author and achievement names.
        #[arg(long)]
        search: Option<String>,

        /// Show only cross-achievement duplicates.
        #[arg(long)]
        dupes_only: bool,

        /// Filter by achievement name (repeatable).
        #[arg(long, action = clap::ArgAction::Append)]
        achievement: Vec<String>,

        /// Achievement match mode: any | all.
        #[arg(long, default_value = "any")]
        mode: String,

        /// Sort field: title | author | achievements.
        #[arg(long, default_value = "title")]
        sort: String,

        /// Sort direction: asc | desc.
        #[arg(long, default_value = "asc")]
        direction: String,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// Search books by free text (shorthand for `list --search`).
    Search {
        query: String,

        #[arg(long)]
        limit: Option<usize>,
    },

    /// List only cross-achievement duplicates.
    Dupes,

    /// List achievements with listed and visible book counts.
    Achievements,

    /// Show season summary statistics.
    Stats,
}

// ─── Entry point ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("ignoring invalid config: {e}");
            AppConfig::default()
        }
    };

    let source = loader::resolve_source(cli.file, cli.url, cli.year, cli.season, &config)?;
    let artifact = loader::load_artifact(&source).await?;

    let mut session = Session::new(artifact);
    session.sort.field = SortField::parse(&config.ui.default_sort);
    session.sort.direction = SortDirection::parse(&config.ui.default_direction);
    session.view = ViewMode::parse(&config.ui.view_mode);
    session.filter.duplicates_only = config.ui.duplicates_only;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_tui(session),
        Commands::List {
            search,
            dupes_only,
            achievement,
            mode,
            sort,
            direction,
            limit,
        } => {
            session.filter.search = search.unwrap_or_default();
            session.filter.duplicates_only = dupes_only;
            session.filter.selected_achievements = achievement.into_iter().collect();
            session.filter.achievement_mode = AchievementMode::parse(&mode);
            session.sort.field = SortField::parse(&sort);
            session.sort.direction = SortDirection::parse(&direction);
            print_books(&session, limit, cli.json)
        }
        Commands::Search { query, limit } => {
            session.filter.search = query;
            print_books(&session, limit, cli.json)
        }
        Commands::Dupes => {
            session.filter.duplicates_only = true;
            print_books(&session, None, cli.json)
        }
        Commands::Achievements => print_achievements(&session, cli.json),
        Commands::Stats => print_stats(&session, cli.json),
    }
}

fn run_tui(session: Session) -> Result<()> {
    let mut app = shelfscope_tui::app::App::new(session);
    shelfscope_tui::run_tui(&mut app)
}

// ─── Output ─────────────────────────────────────────────────────────────────

fn print_books(session: &Session, limit: Option<usize>, json: bool) -> Result<()> {
    let output = session.query();
    let rows: Vec<&Book> = output
        .rows
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for book in &rows {
        let mut line = book.title.clone();
        if !book.author.is_empty() {
            line.push_str(&format!(" — {}", book.author));
        }
        line.push_str(&format!("  [{}]", book.achievements.join(", ")));
        if book.is_duplicate {
            line.push_str("  (duplicate)");
        }
        println!("{line}");
    }
    println!(
        "{} books, {} duplicates",
        output.rows.len(),
        output.duplicate_count
    );
    Ok(())
}

fn print_achievements(session: &Session, json: bool) -> Result<()> {
    let output = session.query();
    let achievements = &session.artifact().achievements;

    if json {
        let entries: Vec<serde_json::Value> = achievements
            .iter()
            .map(|a| {
                serde_json::json!({
                    "name": a.name,
                    "listed": a.listed_count(),
                    "visible": output.visible_in(&a.name),
                    "source_url": a.source_url,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for a in achievements {
        let mut line = format!(
            "{} — {} listed, {} visible",
            a.name,
            a.listed_count(),
            output.visible_in(&a.name)
        );
        if !a.source_url.is_empty() {
            line.push_str(&format!("  <{}>", a.source_url));
        }
        println!("{line}");
    }
    Ok(())
}

fn print_stats(session: &Session, json: bool) -> Result<()> {
    let artifact = session.artifact();
    let index = session.index();
    let listed_total: usize = artifact.achievements.iter().map(|a| a.listed_count()).sum();
    let generated_at = format_generated_at(&artifact.generated_at);

    if json {
        let stats = serde_json::json!({
            "season": artifact.season.name,
            "year": artifact.season.year,
            "generated_at": artifact.generated_at,
            "achievements": artifact.achievements.len(),
            "listed_books": listed_total,
            "unique_books": index.len(),
            "duplicates": index.duplicate_count(),
        });
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Season:        {}", artifact.season.label());
    println!("Generated:     {generated_at}");
    println!("Achievements:  {}", artifact.achievements.len());
    println!("Listed books:  {listed_total}");
    println!("Unique books:  {}", index.len());
    println!("Duplicates:    {}", index.duplicate_count());
    Ok(())
}

fn format_generated_at(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| {
            dt.with_timezone(&chrono::Utc)
                .format("%Y-%m-%d %H:%M UTC")
                .to_string()
        })
        .unwrap_or_else(|_| raw.to_string())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
