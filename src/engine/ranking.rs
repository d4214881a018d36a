use std::cmp::Reverse;

/// Sorts `items` by percentage, highest first, and keeps at most `limit`.
///
/// The sort is stable: equal scores keep their input order.
pub fn rank_by_percent<T, F>(mut items: Vec<T>, percent: F, limit: usize) -> Vec<T>
where
    F: Fn(&T) -> u8,
{
    items.sort_by_key(|item| Reverse(percent(item)));
    items.truncate(limit);
    items
}
