pub mod args;
pub mod output;

pub use args::{CategoriesCommand, CliArgs, Command, ItemsCommand, PrefsCommand};
