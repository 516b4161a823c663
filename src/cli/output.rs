//! Plain-text rendering for the command-line front end.

use std::fmt::Write;

use crate::models::{MenuItem, Mode, Preference, Session};

pub fn format_menu(mode: Mode, items: &[MenuItem]) -> String {
    if items.is_empty() {
        return format!("Nothing to {mode} right now. Add items with `quickstart items add`.");
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} menu", mode_heading(mode));
    for (index, item) in items.iter().enumerate() {
        let _ = writeln!(out, "{:>2}. [{:>3}] {}", index + 1, item.duration_bucket, item.title);
        if !item.start_step.is_empty() {
            let _ = writeln!(out, "         start: {}", item.start_step);
        }
        let _ = writeln!(out, "         id: {}", item.id);
    }
    out.trim_end().to_string()
}

fn mode_heading(mode: Mode) -> &'static str {
    match mode {
        Mode::Do => "Do",
        Mode::Decide => "Decide",
        Mode::Drift => "Drift",
    }
}

pub fn format_item(item: &MenuItem) -> String {
    let mut line = format!(
        "{} [{}/{}] {}",
        item.id, item.mode, item.duration_bucket, item.title
    );
    if let Some(category) = &item.category {
        let _ = write!(line, " ({category})");
    }
    if !item.tags.is_empty() {
        let _ = write!(line, " #{}", item.tags.join(" #"));
    }
    if !item.enabled {
        line.push_str(" [disabled]");
    }
    line
}

pub fn format_items(items: &[MenuItem]) -> String {
    if items.is_empty() {
        return "No items.".to_string();
    }
    items.iter().map(format_item).collect::<Vec<_>>().join("\n")
}

pub fn format_session(session: &Session, title: Option<&str>) -> String {
    let ended = session
        .ended_at
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| "running".to_string());
    format!(
        "{} {} {} -> {} [{}] {}",
        session.id,
        session.device.as_str(),
        session.started_at.to_rfc3339(),
        ended,
        session.outcome.as_str(),
        title.unwrap_or(session.item_id.as_str()),
    )
}

pub fn format_preferences(pref: &Preference) -> String {
    let medium: Vec<&str> = pref
        .widget_config
        .medium_widget_modes
        .iter()
        .map(Mode::as_str)
        .collect();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "caps: do={} decide={} drift={}",
        pref.caps.do_max, pref.caps.decide_max, pref.caps.drift_max
    );
    let _ = writeln!(out, "ordering: {}", pref.ordering);
    let _ = writeln!(
        out,
        "widget: small={} medium={}",
        pref.widget_config.small_widget_mode,
        medium.join(",")
    );
    let _ = writeln!(out, "blocked tags: {}", list_or_none(&pref.blocklists.tags));
    let _ = write!(out, "blocked keywords: {}", list_or_none(&pref.blocklists.keywords));
    out
}

fn list_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}
