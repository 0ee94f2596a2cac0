use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "td", about = concat!("taskdash v", env!("CARGO_PKG_VERSION"), " - tasks by status, from the keyboard"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./taskdash.toml if present)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<String>,

    /// Task listing endpoint (overrides source.url)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Read tasks from a saved listing response (overrides source.file)
    #[arg(long, global = true)]
    pub file: Option<String>,

    /// Directory for persisted state and logs (overrides state.dir)
    #[arg(long = "state-dir", global = true)]
    pub state_dir: Option<String>,

    /// Start from the cached tasks instead of fetching
    #[arg(long)]
    pub offline: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List tasks for one status tab
    List(ListArgs),
    /// Show one task
    Show(ShowArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Status tab: open, in_progress, closed (default: open)
    #[arg(long, default_value = "open")]
    pub tab: String,
    /// Case-insensitive substring to match against task names
    #[arg(long, short = 's')]
    pub search: Option<String>,
    /// Sort field: created_at or priority
    #[arg(long, default_value = "created_at")]
    pub sort: String,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
    /// Only reveal this many pages (default: all)
    #[arg(long)]
    pub pages: Option<usize>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task ID
    pub id: u64,
}
