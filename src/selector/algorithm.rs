use crate::log_debug;
use crate::models::{MenuItem, Mode, Preference};
use crate::selector::{filter::apply_filters, ordering::order_items};

const ENABLE_LOGS: bool = true;

/// Select the menu for `mode`: filter, order, then cap.
///
/// Stages run in a fixed order:
/// 1. keep items of `mode`
/// 2. drop disabled items
/// 3. drop items carrying a blocklisted tag
/// 4. drop items whose lowercased `"<title> <startStep>"` contains a blocklisted keyword
/// 5. stable sort by `preference.ordering`
/// 6. keep the first `caps` entries for `mode`
///
/// Pure and infallible; the inputs are never mutated.
pub fn select_menu_items(items: &[MenuItem], mode: Mode, preference: &Preference) -> Vec<MenuItem> {
    select_menu_refs(items, mode, preference)
        .into_iter()
        .cloned()
        .collect()
}

/// Borrowing variant of [`select_menu_items`].
pub fn select_menu_refs<'a>(
    items: &'a [MenuItem],
    mode: Mode,
    preference: &Preference,
) -> Vec<&'a MenuItem> {
    let (mut selected, stats) = apply_filters(items, mode, &preference.blocklists);

    order_items(&mut selected, preference.ordering);

    let cap = preference.caps.for_mode(mode);
    let eligible = selected.len();
    selected.truncate(cap);

    log_debug!(
        "menu {mode}: {} items, {eligible} eligible, {} shown (cap {cap}, ordering {}); removed {stats:?}",
        items.len(),
        selected.len(),
        preference.ordering,
    );

    selected
}
