pub mod algorithm;
pub mod filter;
pub mod ordering;

pub use algorithm::{select_menu_items, select_menu_refs};
pub use filter::FilterStats;
