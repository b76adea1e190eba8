use crate::core::settings::parse_key_value;
use crate::export::ExportFormat;
use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for rTimeline
/// Chronological event timelines with spreadsheet import/export and save points
#[derive(Parser)]
#[command(
    name = "rtimeline",
    version = env!("CARGO_PKG_VERSION"),
    about = "Build event timelines: add, import, export and snapshot dated events",
    long_about = None
)]
pub struct Cli {
    /// Override the local storage database path
    #[arg(global = true, long = "db", value_name = "FILE")]
    pub db: Option<String>,

    /// Override the save-point directory
    #[arg(global = true, long = "save-dir", value_name = "DIR")]
    pub save_dir: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration and the local storage database
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the effective configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Editor to use with --edit")]
        editor: Option<String>,
    },

    /// Show the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Add an event
    Add {
        /// Event title
        title: String,

        /// Event date (YYYY-MM-DD)
        date: String,

        #[arg(long = "image", value_name = "FILE", help = "Picture attached to the event")]
        image: Option<String>,
    },

    /// Edit an existing event (unspecified fields keep their value)
    #[command(group(ArgGroup::new("img").args(["image", "no_image"])))]
    Edit {
        /// Event id (or a unique prefix of at least 4 characters)
        id: String,

        #[arg(long = "title", help = "New title")]
        title: Option<String>,

        #[arg(long = "date", help = "New date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long = "image", value_name = "FILE", help = "Replace the picture")]
        image: Option<String>,

        #[arg(long = "no-image", help = "Remove the picture")]
        no_image: bool,
    },

    /// Delete an event
    Del {
        /// Event id (or a unique prefix of at least 4 characters)
        id: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// List events in chronological order
    List {
        #[arg(long = "ids", help = "Show full event ids")]
        ids: bool,
    },

    /// Import events from a spreadsheet or CSV file
    Import {
        /// File with `eventname` and `eventdate` columns
        file: String,
    },

    /// Export events to xlsx, csv, json or pdf
    Export {
        /// Output format (guessed from the file extension when omitted)
        #[arg(long, value_enum)]
        format: Option<ExportFormat>,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f', help = "Overwrite an existing file without asking")]
        force: bool,
    },

    /// Show or change the view settings
    Settings {
        #[arg(long = "print", help = "Print the current settings")]
        print: bool,

        #[arg(
            long = "set",
            value_name = "KEY=VALUE",
            value_parser = parse_key_value,
            help = "Change one setting (repeatable)"
        )]
        set: Vec<(String, String)>,

        #[arg(long = "reset", conflicts_with = "set", help = "Restore default settings")]
        reset: bool,
    },

    /// Maintain the local storage snapshot
    #[command(group(ArgGroup::new("action").required(true).args(["save", "restore", "clear"])))]
    Storage {
        #[arg(long = "save", help = "Write the current session to local storage")]
        save: bool,

        #[arg(long = "restore", help = "Show what local storage holds")]
        restore: bool,

        #[arg(long = "clear", help = "Remove the stored session")]
        clear: bool,
    },

    /// Create, list, load or delete named save points
    Savepoint {
        #[command(subcommand)]
        action: SavePointAction,
    },
}

#[derive(Subcommand)]
pub enum SavePointAction {
    /// Save the current session under a name
    Create { name: String },

    /// List save points, newest first
    List,

    /// Replace the current session with a save point
    Load { name: String },

    /// Delete a save point and its images
    Delete {
        name: String,

        #[arg(long = "yes", short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
}
