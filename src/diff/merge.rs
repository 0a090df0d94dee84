use super::{Change, DiffEntry};
use crate::model::ElementId;
use std::collections::BTreeMap;

/// Combines partial entries from the comparators into one record per
/// element.
///
/// Grouping key is `previous_id` when set, else `current_id`, so an added
/// and a deleted element that happen to share a raw id never collide.
/// Existence dominates: a deleted element reports only `element deleted`,
/// an added one only `element added`, regardless of what the positional or
/// parameter comparators saw. Otherwise phrases concatenate in the order
/// the partials were fed (position, then instance parameters, then type
/// parameters). Every surviving field takes the first non-empty value
/// seen, so previous-side labels win when both sides are populated.
pub fn merge_partials(partials: Vec<DiffEntry>, compare_date: &str) -> Vec<DiffEntry> {
    let mut groups: BTreeMap<ElementId, Vec<DiffEntry>> = BTreeMap::new();
    for partial in partials {
        let Some(key) = partial.previous_id.or(partial.current_id) else {
            continue; // invalid partial, nothing to key on
        };
        groups.entry(key).or_default().push(partial);
    }

    groups
        .into_values()
        .map(|group| merge_group(group, compare_date))
        .collect()
}

fn merge_group(group: Vec<DiffEntry>, compare_date: &str) -> DiffEntry {
    let mut merged = DiffEntry {
        compare_date: compare_date.to_string(),
        ..DiffEntry::default()
    };

    let mut changes = Vec::new();
    for partial in group {
        merged.previous_id = merged.previous_id.or(partial.previous_id);
        merged.current_id = merged.current_id.or(partial.current_id);
        take_first(&mut merged.previous_family_and_type, partial.previous_family_and_type);
        take_first(&mut merged.current_family_and_type, partial.current_family_and_type);
        take_first(&mut merged.previous_category, partial.previous_category);
        take_first(&mut merged.current_category, partial.current_category);
        changes.extend(partial.changes);
    }

    merged.changes = if changes.contains(&Change::ElementDeleted) {
        vec![Change::ElementDeleted]
    } else if changes.contains(&Change::ElementAdded) {
        vec![Change::ElementAdded]
    } else {
        changes
    };
    merged
}

fn take_first(slot: &mut String, value: String) {
    if slot.is_empty() && !value.is_empty() {
        *slot = value;
    }
}
