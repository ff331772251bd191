mod app;
mod domain;
mod export;
mod input;
mod logging;
mod persistence;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use chrono::{DateTime, Local, NaiveDate};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{filter_tasks, weekly_dashboard, Priority, TaskDraft, TaskStore, ViewMode};
use log::{error, info};
use logging::LogLevel;
use persistence::{
    ensure_data_dir, init_local_data_dir, load_metadata, meta_file, save_metadata, tasks_file,
    AppMetadata, JsonStore,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "tasktrack")]
#[command(about = "A terminal task tracker with per-task timers, calendar views and CSV export", long_about = None)]
struct Cli {
    /// View to start in. Defaults to the one saved in meta.json (daily).
    #[arg(long, value_enum, ignore_case = true, global = true)]
    view: Option<ViewMode>,

    /// Log level for <data dir>/tasktrack.log. RUST_LOG takes precedence.
    #[arg(short, long, value_enum, global = true)]
    verbosity: Option<LogLevel>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .tasktrack directory in the current directory
    Init,
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Due date (YYYY-MM-DD format)
        #[arg(short, long)]
        due: Option<String>,
        #[arg(short, long, value_enum, ignore_case = true, default_value_t = Priority::Medium)]
        priority: Priority,
        #[arg(short, long, default_value = "")]
        category: String,
    },
    /// Print the tasks in a view
    List,
    /// Export all tasks to CSV
    Export {
        /// Output file path. Defaults to the export file from meta.json (tasks.csv).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print time spent per day for the current week
    Dashboard,
    /// Show or change preferences stored in meta.json
    Config {
        /// View the UI starts in
        #[arg(long, value_enum, ignore_case = true)]
        default_view: Option<ViewMode>,
        /// File name used by export when no output is given
        #[arg(long)]
        export_file: Option<String>,
    },
}

/// Poll timeout for the event loop, so running timers visibly advance while idle
const TICK_RATE: Duration = Duration::from_millis(250);

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let current_dir = std::env::current_dir().context("Could not determine current directory")?;
        let data_dir = init_local_data_dir(&current_dir)?;
        println!("Initialized tasktrack directory: {}", data_dir.display());
        println!();
        println!("Tasks will now be stored in this local directory.");
        println!("Run 'tasktrack' to start tracking tasks.");
        return Ok(());
    }

    let data_dir = ensure_data_dir()?;
    logging::configure_logging(&data_dir, cli.verbosity)?;

    if let Some(Commands::Config {
        default_view,
        export_file,
    }) = cli.command
    {
        println!("{}", configure(&data_dir, default_view, export_file)?);
        return Ok(());
    }

    let metadata = load_metadata(meta_file(&data_dir)).unwrap_or_else(|e| {
        error!("Ignoring unreadable preferences: {}", e);
        AppMetadata::default()
    });
    let view = cli.view.unwrap_or(metadata.default_view);
    let mut store = open_store(&data_dir)?;

    match cli.command {
        Some(Commands::Add {
            title,
            due,
            priority,
            category,
        }) => {
            if let Some(id) = add_task(&mut store, title, due, priority, category, Local::now())? {
                println!("Added task {}", id);
            }
            Ok(())
        }
        Some(Commands::List) => {
            print_list(&store, view);
            Ok(())
        }
        Some(Commands::Export { output }) => {
            let path = export_tasks(&store, output, &metadata)?;
            println!("Exported {} tasks to {}", store.len(), path.display());
            Ok(())
        }
        Some(Commands::Dashboard) => {
            print_dashboard(&store);
            Ok(())
        }
        Some(Commands::Init) | Some(Commands::Config { .. }) => Ok(()),
        None => {
            eprintln!("Using tasktrack directory: {}", data_dir.display());
            let app = AppState::new(store, view, PathBuf::from(&metadata.export_file), Local::now());
            run_tui(app)
        }
    }
}

/// Load the task list and mirror every change back to tasks.json.
/// Malformed stored data aborts startup.
fn open_store(data_dir: &Path) -> Result<TaskStore> {
    let json_store = JsonStore::new(tasks_file(data_dir));
    let tasks = json_store
        .load()
        .with_context(|| format!("Failed to load tasks from {}", json_store.path().display()))?;

    let mut store = TaskStore::new(tasks);
    store.subscribe(Box::new(json_store));
    Ok(store)
}

/// Print or update meta.json. An unreadable file is an error so it is never overwritten.
fn configure(data_dir: &Path, default_view: Option<ViewMode>, export_file: Option<String>) -> Result<String> {
    let path = meta_file(data_dir);
    let mut metadata =
        load_metadata(&path).with_context(|| format!("Failed to read preferences from {}", path.display()))?;

    if default_view.is_none() && export_file.is_none() {
        return Ok(format!(
            "default_view = {}\nexport_file = {}",
            metadata.default_view.name(),
            metadata.export_file
        ));
    }

    if let Some(view) = default_view {
        metadata.default_view = view;
    }
    if let Some(file) = export_file {
        metadata.export_file = file;
    }

    save_metadata(&path, &metadata)?;
    info!("Saved preferences to {}", path.display());
    Ok(format!("Saved preferences to {}", path.display()))
}

/// Add a task from the command line. Returns None when the title is blank.
fn add_task(
    store: &mut TaskStore,
    title: String,
    due: Option<String>,
    priority: Priority,
    category: String,
    now: DateTime<Local>,
) -> Result<Option<i64>> {
    let due_date = match due {
        Some(date_str) => NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map(domain::iso_date)
            .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))?,
        None => String::new(),
    };

    let draft = TaskDraft {
        title,
        due_date,
        priority,
        category,
        time_spent: 0,
    };

    let id = store.add(&draft, now)?;
    if let Some(id) = id {
        info!("Added task {}", id);
    }
    Ok(id)
}

/// Write the CSV to `output`, or to the export file from meta.json
fn export_tasks(store: &TaskStore, output: Option<PathBuf>, metadata: &AppMetadata) -> Result<PathBuf> {
    let path = output.unwrap_or_else(|| PathBuf::from(&metadata.export_file));
    export::export_csv(store.tasks(), &path)?;
    Ok(path)
}

fn print_list(store: &TaskStore, view: ViewMode) {
    let today = Local::now().date_naive();
    println!("{}", view.title());
    if store.is_empty() {
        println!("No tasks yet. Add one with 'tasktrack add <title>'.");
        return;
    }
    for task in filter_tasks(store.tasks(), view, today) {
        println!(
            "{}{}  Due: {}  Priority: {}  Category: {}  Status: {}  Time Spent: {}",
            domain::timer_badge(task),
            task.title,
            task.due_date,
            task.priority.label(),
            task.category,
            task.status.label(),
            task.time_spent_formatted(),
        );
    }
}

fn print_dashboard(store: &TaskStore) {
    let today = Local::now().date_naive();
    for column in weekly_dashboard(store.tasks(), today) {
        let marker = if column.is_today { "*" } else { " " };
        println!(
            "{}{} {}  Total: {}",
            marker,
            column.day_name(),
            domain::iso_date(column.date),
            column.total_formatted()
        );
        for task in &column.tasks {
            println!("      {}  {}", task.title, task.time_spent_formatted());
        }
    }
}

fn run_tui(mut app: AppState) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        error!("UI loop failed: {:#}", err);
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Poll with a timeout so running timers keep refreshing on screen
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Local::now());
    }
}
