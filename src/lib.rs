pub mod cli;
pub mod commands;
pub mod config;
pub mod defaults;
pub mod models;
pub mod selector;
pub mod snapshot;
pub mod utils;
pub mod widget;

use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::Parser;
use serde::Serialize;

use cli::{
    args::{EditItemArgs, NewItemArgs},
    output, CategoriesCommand, CliArgs, Command, ItemsCommand, PrefsCommand,
};
use commands::{
    categories, items,
    items::ItemInput,
    menu, preferences,
    preferences::BlocklistKind,
    sessions,
    transfer::{self, TransferScope},
    widget as widget_commands,
};
use config::AppConfig;
use models::{parse_tags, Device, MenuItemPatch, Mode};
use snapshot::{JsonFileBackend, SnapshotStore};
use utils::init_logging;

pub use models::{MenuItem, Preference};
pub use selector::select_menu_items;

pub struct AppState {
    pub(crate) config: AppConfig,
    pub(crate) store: SnapshotStore,
}

impl AppState {
    pub fn new(config: AppConfig, store: SnapshotStore) -> Self {
        Self { config, store }
    }

    /// Open the JSON snapshot under the configured data directory.
    pub fn open(config: AppConfig) -> Self {
        let backend = JsonFileBackend::new(config.snapshot_path());
        let store = SnapshotStore::open(Box::new(backend));
        Self::new(config, store)
    }
}

pub fn run() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match execute(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(args: CliArgs) -> Result<()> {
    let config = AppConfig::resolve(args.data_dir)?;
    log::debug!("Using data directory {}", config.data_dir().display());

    let state = AppState::open(config);
    let json = args.json;

    match args.command {
        Command::Menu { mode } => {
            let mode = Mode::from(mode);
            let menu = menu::get_menu(&state, mode)?;
            emit(json, &menu, |items| output::format_menu(mode, items))
        }
        Command::Items(command) => run_items(&state, json, command),
        Command::Start { item_id } => {
            let session = sessions::start_item(&state, &item_id, Device::Cli)?;
            emit(json, &session, |session| {
                format!("Started session {}", session.id)
            })
        }
        Command::Finish {
            session_id,
            outcome,
            notes,
        } => {
            let session = sessions::finish_session(&state, &session_id, outcome.into(), notes)?;
            emit(json, &session, |session| output::format_session(session, None))
        }
        Command::Sessions { limit } => {
            let listed = sessions::list_sessions(&state, limit)?;
            if json {
                let sessions: Vec<_> = listed.iter().map(|(session, _)| session).collect();
                return print_json(&sessions);
            }
            if listed.is_empty() {
                println!("No sessions yet.");
            }
            for (session, title) in &listed {
                println!("{}", output::format_session(session, title.as_deref()));
            }
            Ok(())
        }
        Command::Prefs(command) => run_prefs(&state, json, command),
        Command::Categories(command) => run_categories(&state, json, command),
        Command::Widget => {
            let widget = widget_commands::publish_widget(&state)?;
            emit(json, &widget, |widget| {
                Mode::ALL
                    .iter()
                    .map(|mode| match widget.top(*mode) {
                        Some(item) => format!("{mode}: {}", item.title),
                        None => format!("{mode}: -"),
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Command::Export { out, items_only } => {
            let scope = transfer_scope(items_only);
            match out {
                Some(path) => {
                    transfer::export_to_file(&state, scope, &path)?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{}", transfer::export_snapshot(&state, scope)?),
            }
            Ok(())
        }
        Command::Import { file, items_only } => {
            let summary = transfer::import_from_file(&state, &file, transfer_scope(items_only))?;
            emit(json, &summary, |summary| {
                format!(
                    "Imported {} item(s) from {}",
                    summary.items,
                    file.display()
                )
            })
        }
        Command::Reset { yes } => {
            if !yes {
                bail!("Reset discards every item, session and preference; pass --yes to confirm");
            }
            let fresh = commands::reset_snapshot(&state)?;
            emit(json, &fresh, |fresh| {
                format!("Reset to {} default items", fresh.items.len())
            })
        }
    }
}

fn run_items(state: &AppState, json: bool, command: ItemsCommand) -> Result<()> {
    match command {
        ItemsCommand::List { mode } => {
            let listed = items::list_items(state, mode.map(Mode::from))?;
            emit(json, &listed, |listed| output::format_items(listed))
        }
        ItemsCommand::Add(args) => {
            let created = items::create_item(state, item_input(args))?;
            emit(json, &created, output::format_item)
        }
        ItemsCommand::Edit { id, fields } => {
            let updated = items::update_item(state, &id, item_patch(fields))?;
            emit(json, &updated, output::format_item)
        }
        ItemsCommand::Remove { id } => {
            let removed = items::delete_item(state, &id)?;
            emit(json, &removed, |item| format!("Removed {}", output::format_item(item)))
        }
        ItemsCommand::Enable { id } => {
            let item = items::set_item_enabled(state, &id, true)?;
            emit(json, &item, output::format_item)
        }
        ItemsCommand::Disable { id } => {
            let item = items::set_item_enabled(state, &id, false)?;
            emit(json, &item, output::format_item)
        }
    }
}

fn transfer_scope(items_only: bool) -> TransferScope {
    if items_only {
        TransferScope::Items
    } else {
        TransferScope::Snapshot
    }
}

fn item_input(args: NewItemArgs) -> ItemInput {
    ItemInput {
        mode: args.mode.into(),
        title: args.title,
        start_step: args.start_step,
        duration_bucket: args.duration.into(),
        category: args.category,
        tags: args.tags.unwrap_or_default(),
        friction_score: args.friction,
    }
}

fn item_patch(fields: EditItemArgs) -> MenuItemPatch {
    let category = if fields.clear_category {
        Some(None)
    } else {
        fields
            .category
            .map(|category| category.trim().to_string())
            .map(|category| (!category.is_empty()).then_some(category))
    };

    MenuItemPatch {
        mode: fields.mode.map(Mode::from),
        title: fields.title.map(|title| title.trim().to_string()),
        start_step: fields.start_step.map(|step| step.trim().to_string()),
        duration_bucket: fields.duration.map(Into::into),
        category,
        tags: fields.tags.as_deref().map(parse_tags),
        friction_score: fields.friction,
        enabled: None,
    }
}

fn run_prefs(state: &AppState, json: bool, command: PrefsCommand) -> Result<()> {
    let updated = match command {
        PrefsCommand::Show => preferences::get_preferences(state)?,
        PrefsCommand::Caps {
            do_max,
            decide_max,
            drift_max,
        } => preferences::set_caps(state, do_max, decide_max, drift_max)?,
        PrefsCommand::Ordering { ordering } => {
            preferences::set_ordering(state, ordering.into())?
        }
        PrefsCommand::Widget { small, medium } => preferences::set_widget_modes(
            state,
            small.map(Mode::from),
            medium.map(|modes| modes.into_iter().map(Mode::from).collect()),
        )?,
        PrefsCommand::BlockTag { tag } => preferences::block(state, BlocklistKind::Tag, &tag)?,
        PrefsCommand::UnblockTag { tag } => {
            preferences::unblock(state, BlocklistKind::Tag, &tag)?
        }
        PrefsCommand::BlockKeyword { keyword } => {
            preferences::block(state, BlocklistKind::Keyword, &keyword)?
        }
        PrefsCommand::UnblockKeyword { keyword } => {
            preferences::unblock(state, BlocklistKind::Keyword, &keyword)?
        }
    };
    emit(json, &updated, output::format_preferences)
}

fn run_categories(state: &AppState, json: bool, command: CategoriesCommand) -> Result<()> {
    match command {
        CategoriesCommand::List => {
            let listed = categories::list_categories(state)?;
            emit(json, &listed, |listed| {
                if listed.is_empty() {
                    "No categories.".to_string()
                } else {
                    listed.join("\n")
                }
            })
        }
        CategoriesCommand::Add { name } => {
            let listed = categories::add_category(state, &name)?;
            emit(json, &listed, |listed| listed.join("\n"))
        }
        CategoriesCommand::Remove { name } => {
            let cleared = categories::delete_category(state, &name)?;
            emit(json, &cleared, |cleared| {
                format!("Removed category '{name}' (cleared from {cleared} item(s))")
            })
        }
    }
}

fn emit<T, F>(json: bool, value: &T, text: F) -> Result<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    if json {
        print_json(value)
    } else {
        println!("{}", text(value));
        Ok(())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
