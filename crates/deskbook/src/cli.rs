//! Clap derive structures for the `deskbook` CLI.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use deskbook_config::Defaults;
use deskbook_core::ReservationStatus;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// deskbook -- browse office areas and book desks
#[derive(Debug, Parser)]
#[command(
    name = "deskbook",
    version,
    about = "Browse office areas and book desks in the corporate workspace",
    long_about = "Browse office areas, rooms and desks and manage desk reservations\n\
        against the workspace booking backend.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation and retry prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

impl GlobalOpts {
    /// Fill output and color from the config file where no flag was given.
    /// Unrecognized config values are left for the built-in default.
    pub fn apply_defaults(&mut self, defaults: &Defaults) {
        if self.output.is_none() {
            self.output = OutputFormat::from_str(&defaults.output, true).ok();
        }
        if self.color.is_none() {
            self.color = ColorMode::from_str(&defaults.color, true).ok();
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.unwrap_or(OutputFormat::Table)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List office areas with room and desk totals
    #[command(alias = "a")]
    Areas,

    /// List the rooms of an area
    #[command(alias = "r")]
    Rooms(RoomsArgs),

    /// List the desks of a room
    #[command(alias = "d")]
    Desks(DesksArgs),

    /// Navigate to an application path and show its view
    Open(OpenArgs),

    /// Reserve a desk for a day
    #[command(alias = "b")]
    Book(BookArgs),

    /// List and manage reservations
    #[command(alias = "res")]
    Reservations(ReservationsArgs),

    /// List users
    Users,

    /// Show the navigation route table
    Routes,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Browsing ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RoomsArgs {
    /// Area ID
    pub area_id: String,
}

#[derive(Debug, Args)]
pub struct DesksArgs {
    /// Area ID
    pub area_id: String,

    /// Room ID
    pub room_id: String,
}

#[derive(Debug, Args)]
pub struct OpenArgs {
    /// Application path, e.g. "/areas/1/rooms/3" or "/desks/4/book"
    pub path: String,
}

// ── Booking ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BookArgs {
    /// Desk ID
    pub desk_id: String,

    /// Day to book (YYYY-MM-DD)
    #[arg(long, short = 'd')]
    pub date: NaiveDate,

    /// User to book for [default: booking.user_id from config]
    #[arg(long, short = 'u')]
    pub user: Option<i64>,

    /// Reservation notes [default: booking.notes from config]
    #[arg(long, short = 'n')]
    pub notes: Option<String>,

    /// Use the backend's one-click booking (backend picks the user)
    #[arg(long)]
    pub quick: bool,
}

#[derive(Debug, Args)]
pub struct ReservationsArgs {
    #[command(subcommand)]
    pub command: ReservationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReservationsCommand {
    /// List reservations
    #[command(alias = "ls")]
    List {
        /// Only reservations of this desk
        #[arg(long)]
        desk: Option<i64>,

        /// Only reservations on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Check in to a reservation now
    CheckIn {
        /// Reservation ID
        id: i64,
    },

    /// Change a reservation
    Update {
        /// Reservation ID
        id: i64,

        /// New status
        #[arg(long)]
        status: Option<StatusArg>,

        /// New notes
        #[arg(long)]
        notes: Option<String>,

        /// Move to another day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Cancel (delete) a reservation
    Cancel {
        /// Reservation ID
        id: i64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Confirmed,
    PendingApproval,
    CheckedIn,
    Cancelled,
}

impl From<StatusArg> for ReservationStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Confirmed => Self::Confirmed,
            StatusArg::PendingApproval => Self::PendingApproval,
            StatusArg::CheckedIn => Self::CheckedIn,
            StatusArg::Cancelled => Self::Cancelled,
        }
    }
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display the resolved configuration
    Show,

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
