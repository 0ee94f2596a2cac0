use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::logging;
use crate::io::source::{self, TaskQuery, TaskSource};
use crate::model::config::Config;
use crate::model::task::Task;
use crate::model::view::{SortField, SortOrder, Tab, ViewState};
use crate::ops::filter;
use crate::ops::store::TaskStore;
use crate::tui::RunOptions;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = resolve_config(&cli)?;
    let json = cli.json;

    match cli.command {
        None => cmd_tui(config, cli.offline),
        Some(cmd) => {
            logging::init_stderr_logging(config.log.level.as_deref());
            match cmd {
                Commands::List(args) => cmd_list(&config, args, json),
                Commands::Show(args) => cmd_show(&config, args, json),
            }
        }
    }
}

/// Load the config file and apply command-line overrides
pub fn resolve_config(cli: &Cli) -> Result<Config, Box<dyn Error>> {
    let cwd = std::env::current_dir()?;
    let mut config = config_io::load_config(cli.config.as_deref().map(Path::new), &cwd)?;
    if let Some(url) = &cli.url {
        config.source.url = Some(url.clone());
        // An explicit URL beats a file named only in the config
        if cli.file.is_none() {
            config.source.file = None;
        }
    }
    if let Some(file) = &cli.file {
        config.source.file = Some(PathBuf::from(file));
    }
    if let Some(dir) = &cli.state_dir {
        config.state.dir = Some(PathBuf::from(dir));
    }
    Ok(config)
}

fn open_source(config: &Config) -> Result<Box<dyn TaskSource>, Box<dyn Error>> {
    Ok(source::open_source(
        config.source.file.as_deref(),
        config.source.url.as_deref(),
        Duration::from_secs(config.source.timeout_secs),
    )?)
}

fn initial_query(config: &Config) -> TaskQuery {
    TaskQuery {
        limit: config.source.limit,
        ..TaskQuery::default()
    }
}

/// Fetch the initial batch. Fetch failures come back as no tasks.
fn fetch_tasks(config: &Config) -> Result<Vec<Task>, Box<dyn Error>> {
    let source = open_source(config)?;
    Ok(source::fetch_or_empty(source.as_ref(), &initial_query(config)).tasks)
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

fn cmd_tui(config: Config, offline: bool) -> Result<(), Box<dyn Error>> {
    logging::init_file_logging(&config.log_file(), config.log.level.as_deref())?;
    let tasks = if offline {
        None
    } else {
        Some(fetch_tasks(&config)?)
    };
    crate::tui::run(RunOptions { config, tasks })
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_list(config: &Config, args: ListArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let tab = Tab::parse(&args.tab).ok_or_else(|| format!("unknown tab: {}", args.tab))?;
    let view = ViewState {
        tab,
        search_query: args.search.unwrap_or_default(),
        sort_field: SortField::parse(&args.sort),
        sort_order: if args.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        },
    };

    let mut store = TaskStore::new(config.store.page_size);
    store.load(fetch_tasks(config)?);
    let mut revealed = 1;
    while args.pages.is_none_or(|max| revealed < max) && store.load_more_now() {
        revealed += 1;
    }

    let tasks = filter::derive_view(store.visible(), &view);
    if json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        println!("{}", format_view_header(&view, tasks.len()));
        for task in &tasks {
            println!("{}", format_task_line(task));
        }
    }
    Ok(())
}

fn cmd_show(config: &Config, args: ShowArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let tasks = fetch_tasks(config)?;
    let task = tasks
        .iter()
        .find(|t| t.id == args.id)
        .ok_or_else(|| format!("task not found: {}", args.id))?;
    if json {
        println!("{}", serde_json::to_string_pretty(task)?);
    } else {
        for line in format_task_detail(task) {
            println!("{}", line);
        }
    }
    Ok(())
}
