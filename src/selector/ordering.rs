use std::cmp::Reverse;

use crate::models::{MenuItem, Ordering};

/// Sort in place with the chosen strategy. Both sorts are stable, so items
/// with equal keys keep their input order.
pub fn order_items(items: &mut [&MenuItem], ordering: Ordering) {
    match ordering {
        Ordering::Duration => items.sort_by_key(|item| item.duration_bucket.rank()),
        Ordering::Recent => items.sort_by_key(|item| Reverse(item.updated_at)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DurationBucket, Mode};
    use chrono::{DateTime, Duration, Utc};

    fn item(title: &str, bucket: DurationBucket, updated_at: DateTime<Utc>) -> MenuItem {
        let mut item = MenuItem::new(Mode::Do, title, "", bucket, updated_at);
        item.updated_at = updated_at;
        item
    }

    fn titles(items: &[&MenuItem]) -> Vec<String> {
        items.iter().map(|item| item.title.clone()).collect()
    }

    #[test]
    fn duration_sorts_shortest_first_and_keeps_ties_in_order() {
        let now = Utc::now();
        let a = item("a", DurationBucket::TwentyFiveMinutes, now);
        let b = item("b", DurationBucket::TwoMinutes, now);
        let c = item("c", DurationBucket::TenMinutes, now);
        let d = item("d", DurationBucket::TwoMinutes, now);

        let mut refs = vec![&a, &b, &c, &d];
        order_items(&mut refs, Ordering::Duration);

        assert_eq!(titles(&refs), vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn recent_sorts_newest_first_and_keeps_ties_in_order() {
        let now = Utc::now();
        let old = item("old", DurationBucket::TwoMinutes, now - Duration::days(2));
        let tie_a = item("tie_a", DurationBucket::TwoMinutes, now);
        let mid = item("mid", DurationBucket::TwoMinutes, now - Duration::hours(3));
        let tie_b = item("tie_b", DurationBucket::TwoMinutes, now);

        let mut refs = vec![&old, &tie_a, &mid, &tie_b];
        order_items(&mut refs, Ordering::Recent);

        assert_eq!(titles(&refs), vec!["tie_a", "tie_b", "mid", "old"]);
    }
}
