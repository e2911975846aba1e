use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "gamideck", version, about = "GamiDeck flashcards: CLI/TUI/API")]
pub struct Cli {
    /// Data directory holding the deck library (defaults to the app data dir)
    #[arg(long, env = "GAMIDECK_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Timestamped backups kept next to the library file
    #[arg(long, default_value_t = 10, global = true)]
    pub max_backups: usize,

    /// Start with sound cues muted
    #[arg(long, global = true)]
    pub muted: bool,

    /// Log filter, e.g. `info` or `gamideck_core=debug`
    #[arg(long, env = "GAMIDECK_LOG", default_value = "warn", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Deck operations
    #[command(subcommand)]
    Deck(DeckCmd),
    /// Card operations
    #[command(subcommand)]
    Card(CardCmd),
    /// Review a deck in the terminal
    Review(ReviewCmd),
    /// Show the friends leaderboard
    Leaderboard,
    /// Study reminder settings
    #[command(subcommand)]
    Reminder(ReminderCmd),
    /// Export data
    #[command(subcommand)]
    Export(ExportCmd),
    /// Import data
    #[command(subcommand)]
    Import(ImportCmd),
    /// Launch Terminal UI
    Tui,
    /// Launch Axum HTTP API
    Api(ApiCmd),
}

#[derive(Debug, Subcommand, Clone)]
pub enum DeckCmd {
    Add { name: String },
    List,
    Rm { deck: String },
}

#[derive(Debug, Subcommand, Clone)]
pub enum CardCmd {
    Add(CardAdd),
    List {
        #[arg(long)]
        deck: Option<String>,
        /// Only cards whose front or back contains this text
        #[arg(long)]
        query: Option<String>,
    },
    Rm { card_id: String },
}

#[derive(Debug, Args, Clone)]
pub struct CardAdd {
    #[arg(long)]
    pub deck: String,
    #[arg(long)]
    pub front: String,
    #[arg(long)]
    pub back: String,
}

#[derive(Debug, Args, Clone)]
pub struct ReviewCmd {
    /// Deck id or name
    #[arg(long)]
    pub deck: String,
    /// Spin the reward wheel before starting
    #[arg(long)]
    pub spin: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ReminderCmd {
    Show { deck: String },
    Set(ReminderSet),
}

#[derive(Debug, Args, Clone)]
pub struct ReminderSet {
    pub deck: String,
    #[arg(long, conflicts_with = "off")]
    pub on: bool,
    #[arg(long)]
    pub off: bool,
    #[arg(long, conflicts_with = "no_vacation")]
    pub vacation: bool,
    #[arg(long)]
    pub no_vacation: bool,
    /// Exam or study deadline (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_deadline")]
    pub deadline: Option<chrono::NaiveDate>,
    #[arg(long)]
    pub clear_deadline: bool,
    /// 1, 2, 3, 5, 7 (days) or custom:N
    #[arg(long)]
    pub frequency: Option<String>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ExportCmd {
    Json { path: PathBuf },
    Csv { path: PathBuf, #[arg(long)] deck: Option<String> },
}

#[derive(Debug, Subcommand, Clone)]
pub enum ImportCmd {
    Json { path: PathBuf },
    Csv { path: PathBuf, #[arg(long)] deck: Option<String> },
}

#[derive(Debug, Args, Clone)]
pub struct ApiCmd {
    /// Bind address (host:port)
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub addr: String,
}
