use anyhow::Result;

use crate::{
    models::{MenuItem, Mode},
    AppState,
};

pub fn get_menu(state: &AppState, mode: Mode) -> Result<Vec<MenuItem>> {
    Ok(state.store.snapshot()?.menu(mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{memory_state, seed};
    use crate::models::DurationBucket;

    #[test]
    fn menu_reflects_current_snapshot() {
        let (state, _dir) = memory_state();
        seed(&state, Mode::Do, "Long", DurationBucket::TwentyFiveMinutes);
        seed(&state, Mode::Do, "Short", DurationBucket::TwoMinutes);
        seed(&state, Mode::Decide, "Choose", DurationBucket::TwoMinutes);

        let menu = get_menu(&state, Mode::Do).unwrap();
        let titles: Vec<_> = menu.iter().map(|item| item.title.as_str()).collect();
        assert_eq!(titles, vec!["Short", "Long"]);
    }
}
