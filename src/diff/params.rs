use super::{Change, DiffEntry};
use crate::model::{ElementRecord, ParamValue, Snapshot};
use std::collections::{BTreeMap, BTreeSet};

/// Compares instance and type parameter maps between two snapshots.
///
/// Runs over the union of element ids; an id missing on one side diffs
/// against empty maps, so an element that only exists in the current
/// snapshot reports all of its parameters as added (the merger later
/// collapses that to `element added` when the existence comparator runs).
/// All parameter changes for one element land in a single entry.
pub fn compare(previous: &Snapshot, current: &Snapshot) -> Vec<DiffEntry> {
    let ids: BTreeSet<_> = previous
        .elements
        .keys()
        .chain(current.elements.keys())
        .copied()
        .collect();

    let mut entries = Vec::new();
    for id in ids {
        let prev_record = previous.get(id);
        let curr_record = current.get(id);

        let mut changes = diff_maps(
            param_map(prev_record, false),
            param_map(curr_record, false),
            false,
        );
        changes.extend(diff_maps(
            param_map(prev_record, true),
            param_map(curr_record, true),
            true,
        ));
        if changes.is_empty() {
            continue;
        }

        entries.push(DiffEntry {
            previous_id: prev_record.map(|_| id),
            current_id: curr_record.map(|_| id),
            previous_family_and_type: field(prev_record, |r| &r.family_and_type),
            current_family_and_type: field(curr_record, |r| &r.family_and_type),
            previous_category: field(prev_record, |r| &r.category),
            current_category: field(curr_record, |r| &r.category),
            changes,
            compare_date: String::new(),
        });
    }

    entries
}

fn param_map(record: Option<&ElementRecord>, type_params: bool) -> &BTreeMap<String, ParamValue> {
    static EMPTY: BTreeMap<String, ParamValue> = BTreeMap::new();
    match record {
        Some(r) if type_params => &r.type_parameters,
        Some(r) => &r.parameters,
        None => &EMPTY,
    }
}

fn field(record: Option<&ElementRecord>, get: impl Fn(&ElementRecord) -> &String) -> String {
    record.map(get).cloned().unwrap_or_default()
}

/// Name-sorted adds, then deletes, then value changes for one map pair.
fn diff_maps(
    previous: &BTreeMap<String, ParamValue>,
    current: &BTreeMap<String, ParamValue>,
    type_params: bool,
) -> Vec<Change> {
    let mut changes = Vec::new();

    for name in current.keys().filter(|name| !previous.contains_key(*name)) {
        changes.push(if type_params {
            Change::TypeParamAdded(name.clone())
        } else {
            Change::ParamAdded(name.clone())
        });
    }

    for name in previous.keys().filter(|name| !current.contains_key(*name)) {
        changes.push(if type_params {
            Change::TypeParamDeleted(name.clone())
        } else {
            Change::ParamDeleted(name.clone())
        });
    }

    for (name, prev_value) in previous {
        let Some(curr_value) = current.get(name) else {
            continue;
        };
        if prev_value.same_as(curr_value) {
            continue;
        }
        let (name, previous, current) = (
            name.clone(),
            prev_value.normalized(),
            curr_value.normalized(),
        );
        changes.push(if type_params {
            Change::TypeParamChanged {
                name,
                previous,
                current,
            }
        } else {
            Change::ParamChanged {
                name,
                previous,
                current,
            }
        });
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ElementId;
    use pretty_assertions::assert_eq;

    fn record(params: &[(&str, &str)], type_params: &[(&str, &str)]) -> ElementRecord {
        let to_map = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|&(k, v)| (k.to_string(), ParamValue::Text(v.to_string())))
                .collect()
        };
        ElementRecord {
            category: "Doors".to_string(),
            family_and_type: "Single-Flush: 0915 x 2134mm".to_string(),
            parameters: to_map(params),
            type_parameters: to_map(type_params),
            ..ElementRecord::default()
        }
    }

    fn snapshot(records: Vec<(i64, ElementRecord)>) -> Snapshot {
        Snapshot {
            document: String::new(),
            elements: records
                .into_iter()
                .map(|(id, r)| (ElementId(id), r))
                .collect(),
        }
    }

    #[test]
    fn value_change_reports_old_and_new() {
        let prev = snapshot(vec![(2, record(&[("Mark", "A")], &[]))]);
        let curr = snapshot(vec![(2, record(&[("Mark", "B")], &[]))]);
        let entries = compare(&prev, &curr);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description(), "parameter value changed: Mark (A → B)");
        assert_eq!(entries[0].previous_id, Some(ElementId(2)));
        assert_eq!(entries[0].current_id, Some(ElementId(2)));
    }

    #[test]
    fn identical_maps_produce_no_entry() {
        let prev = snapshot(vec![(2, record(&[("Mark", "A")], &[("Width", "900")]))]);
        let curr = snapshot(vec![(2, record(&[("Mark", "A")], &[("Width", "900")]))]);
        assert_eq!(compare(&prev, &curr), Vec::new());
    }

    #[test]
    fn one_entry_aggregates_instance_and_type_changes() {
        let prev = snapshot(vec![(
            5,
            record(&[("Mark", "A"), ("Phase", "New")], &[("Width", "900")]),
        )]);
        let curr = snapshot(vec![(
            5,
            record(&[("Mark", "B"), ("Rating", "60")], &[("Height", "2100")]),
        )]);
        let entries = compare(&prev, &curr);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].description(),
            "new parameter added: Rating, \
             parameter deleted: Phase, \
             parameter value changed: Mark (A → B), \
             new type parameter added: Height, \
             type parameter deleted: Width"
        );
    }

    #[test]
    fn one_sided_element_diffs_against_empty_maps() {
        let prev = snapshot(vec![]);
        let curr = snapshot(vec![(7, record(&[("Mark", "C")], &[]))]);
        let entries = compare(&prev, &curr);
        assert_eq!(entries[0].previous_id, None);
        assert_eq!(entries[0].current_id, Some(ElementId(7)));
        assert_eq!(entries[0].description(), "new parameter added: Mark");
        assert_eq!(entries[0].previous_category, "");
        assert_eq!(entries[0].current_category, "Doors");
    }

    #[test]
    fn normalized_equality_ignores_value_representation() {
        let mut prev_record = record(&[], &[]);
        prev_record
            .parameters
            .insert("Count".to_string(), ParamValue::Integer(3));
        let mut curr_record = record(&[], &[]);
        curr_record
            .parameters
            .insert("Count".to_string(), ParamValue::Real(3.0));
        let prev = snapshot(vec![(9, prev_record)]);
        let curr = snapshot(vec![(9, curr_record)]);
        assert_eq!(compare(&prev, &curr), Vec::new());
    }
}
