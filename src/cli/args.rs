use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::DATA_DIR_ENV;
use crate::models::{DurationBucket, Mode, Ordering, SessionOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "quickstart",
    version,
    about = "Pick the next thing to do, decide, or drift into"
)]
/// Command-line arguments accepted by the `quickstart` binary.
pub struct CliArgs {
    #[arg(
        long,
        value_name = "DIR",
        global = true,
        env = DATA_DIR_ENV,
        help = "Directory holding the snapshot (default: the platform data dir)"
    )]
    pub data_dir: Option<PathBuf>,
    #[arg(short, long, global = true, help = "Log at debug level")]
    pub verbose: bool,
    #[arg(long, global = true, help = "Print machine-readable JSON")]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the menu for a mode
    Menu {
        #[arg(value_enum, default_value_t = ModeArg::Do)]
        mode: ModeArg,
    },
    /// Manage menu items
    #[command(subcommand)]
    Items(ItemsCommand),
    /// Start a menu item and record a session
    Start {
        item_id: String,
    },
    /// Finish a running session
    Finish {
        session_id: String,
        #[arg(long, value_enum, default_value_t = OutcomeArg::Done)]
        outcome: OutcomeArg,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List recorded sessions, newest first
    Sessions {
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
    /// Show or change selection preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),
    /// Manage item categories
    #[command(subcommand)]
    Categories(CategoriesCommand),
    /// Publish the widget snapshot
    Widget,
    /// Write the snapshot as JSON to a file or stdout
    Export {
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        #[arg(long, help = "Only export {\"items\": [...]}")]
        items_only: bool,
    },
    /// Load a JSON export, replacing the current snapshot
    Import {
        file: PathBuf,
        #[arg(long, help = "Replace only the items; the file must hold nothing else")]
        items_only: bool,
    },
    /// Replace everything with the built-in defaults
    Reset {
        #[arg(long, help = "Confirm discarding the current snapshot")]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemsCommand {
    /// List items, optionally for a single mode
    List {
        #[arg(short, long, value_enum)]
        mode: Option<ModeArg>,
    },
    /// Create a new item
    Add(NewItemArgs),
    /// Change fields of an existing item
    Edit {
        id: String,
        #[command(flatten)]
        fields: EditItemArgs,
    },
    /// Delete an item
    Remove { id: String },
    /// Make an item selectable again
    Enable { id: String },
    /// Hide an item from every menu
    Disable { id: String },
}

#[derive(Args, Debug)]
pub struct NewItemArgs {
    #[arg(short, long, value_enum)]
    pub mode: ModeArg,
    #[arg(short, long)]
    pub title: String,
    #[arg(short = 's', long = "start-step", default_value = "")]
    pub start_step: String,
    #[arg(short, long, value_enum, default_value_t = BucketArg::TwoMinutes)]
    pub duration: BucketArg,
    #[arg(short, long)]
    pub category: Option<String>,
    #[arg(long, value_name = "TAGS", help = "Comma-separated tags")]
    pub tags: Option<String>,
    #[arg(long, default_value_t = 1.0)]
    pub friction: f64,
}

#[derive(Args, Debug)]
pub struct EditItemArgs {
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,
    #[arg(short, long)]
    pub title: Option<String>,
    #[arg(short = 's', long = "start-step")]
    pub start_step: Option<String>,
    #[arg(short, long, value_enum)]
    pub duration: Option<BucketArg>,
    #[arg(short, long, conflicts_with = "clear_category")]
    pub category: Option<String>,
    #[arg(long)]
    pub clear_category: bool,
    #[arg(long, value_name = "TAGS", help = "Comma-separated tags; empty clears them")]
    pub tags: Option<String>,
    #[arg(long)]
    pub friction: Option<f64>,
}

#[derive(Subcommand, Debug)]
pub enum PrefsCommand {
    /// Print the current preferences
    Show,
    /// Set per-mode caps
    Caps {
        #[arg(long, allow_negative_numbers = true)]
        do_max: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        decide_max: Option<i64>,
        #[arg(long, allow_negative_numbers = true)]
        drift_max: Option<i64>,
    },
    /// Choose how menus are sorted
    Ordering {
        #[arg(value_enum)]
        ordering: OrderingArg,
    },
    /// Choose which modes the widgets show
    Widget {
        #[arg(long, value_enum)]
        small: Option<ModeArg>,
        #[arg(long, value_enum, value_delimiter = ',')]
        medium: Option<Vec<ModeArg>>,
    },
    /// Hide items carrying a tag
    BlockTag { tag: String },
    /// Stop hiding items carrying a tag
    UnblockTag { tag: String },
    /// Hide items whose title or first step mention a keyword
    BlockKeyword { keyword: String },
    /// Stop hiding items for a keyword
    UnblockKeyword { keyword: String },
}

#[derive(Subcommand, Debug)]
pub enum CategoriesCommand {
    /// List known categories
    List,
    /// Add a category
    Add { name: String },
    /// Remove a category and clear it from items
    Remove { name: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Do,
    Decide,
    Drift,
}

impl From<ModeArg> for Mode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Do => Mode::Do,
            ModeArg::Decide => Mode::Decide,
            ModeArg::Drift => Mode::Drift,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BucketArg {
    #[value(name = "2m")]
    TwoMinutes,
    #[value(name = "10m")]
    TenMinutes,
    #[value(name = "25m")]
    TwentyFiveMinutes,
}

impl From<BucketArg> for DurationBucket {
    fn from(value: BucketArg) -> Self {
        match value {
            BucketArg::TwoMinutes => DurationBucket::TwoMinutes,
            BucketArg::TenMinutes => DurationBucket::TenMinutes,
            BucketArg::TwentyFiveMinutes => DurationBucket::TwentyFiveMinutes,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OrderingArg {
    Duration,
    Recent,
}

impl From<OrderingArg> for Ordering {
    fn from(value: OrderingArg) -> Self {
        match value {
            OrderingArg::Duration => Ordering::Duration,
            OrderingArg::Recent => Ordering::Recent,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutcomeArg {
    Done,
    Partial,
    Aborted,
}

impl From<OutcomeArg> for SessionOutcome {
    fn from(value: OutcomeArg) -> Self {
        match value {
            OutcomeArg::Done => SessionOutcome::Done,
            OutcomeArg::Partial => SessionOutcome::Partial,
            OutcomeArg::Aborted => SessionOutcome::Aborted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_item_add_with_bucket_labels() {
        let args = CliArgs::try_parse_from([
            "quickstart", "items", "add", "--mode", "drift", "--title", "Walk", "--duration", "10m",
            "--tags", "outside, legs",
        ])
        .unwrap();

        match args.command {
            Command::Items(ItemsCommand::Add(new)) => {
                assert_eq!(Mode::from(new.mode), Mode::Drift);
                assert_eq!(DurationBucket::from(new.duration), DurationBucket::TenMinutes);
                assert_eq!(new.tags.as_deref(), Some("outside, legs"));
                assert_eq!(new.friction, 1.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn menu_defaults_to_do_mode() {
        let args = CliArgs::try_parse_from(["quickstart", "menu"]).unwrap();
        assert!(matches!(args.command, Command::Menu { mode: ModeArg::Do }));
    }

    #[test]
    fn caps_accept_negative_values() {
        let args =
            CliArgs::try_parse_from(["quickstart", "prefs", "caps", "--drift-max", "-1"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Prefs(PrefsCommand::Caps { drift_max: Some(-1), .. })
        ));
    }

    #[test]
    fn data_dir_reads_environment_unless_given() {
        std::env::set_var(DATA_DIR_ENV, "/tmp/quickstart-env");

        let from_env = CliArgs::try_parse_from(["quickstart", "menu"]).unwrap();
        let explicit =
            CliArgs::try_parse_from(["quickstart", "--data-dir", "/tmp/explicit", "menu"]).unwrap();

        std::env::remove_var(DATA_DIR_ENV);
        assert_eq!(from_env.data_dir, Some(PathBuf::from("/tmp/quickstart-env")));
        assert_eq!(explicit.data_dir, Some(PathBuf::from("/tmp/explicit")));
    }

    #[test]
    fn parses_import_and_export() {
        let args =
            CliArgs::try_parse_from(["quickstart", "import", "items.json", "--items-only"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Import { ref file, items_only: true } if file == &PathBuf::from("items.json")
        ));

        let args = CliArgs::try_parse_from(["quickstart", "export"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Export { out: None, items_only: false }
        ));
    }

    #[test]
    fn rejects_unknown_bucket() {
        let parsed = CliArgs::try_parse_from([
            "quickstart", "items", "add", "--mode", "do", "--title", "x", "--duration", "1h",
        ]);
        assert!(parsed.is_err());
    }
}
