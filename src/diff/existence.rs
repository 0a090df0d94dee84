use super::{Change, DiffEntry};
use crate::model::Snapshot;

/// Classifies elements present in only one snapshot as added or deleted.
///
/// The classifications are exclusive per id: an id is either in the
/// previous universe, the current one, or both (and then produces
/// nothing here).
pub fn compare(previous: &Snapshot, current: &Snapshot) -> Vec<DiffEntry> {
    let mut entries = Vec::new();

    for (&id, record) in &previous.elements {
        if current.get(id).is_none() {
            entries.push(DiffEntry {
                previous_id: Some(id),
                previous_family_and_type: record.family_and_type.clone(),
                previous_category: record.category.clone(),
                changes: vec![Change::ElementDeleted],
                ..DiffEntry::default()
            });
        }
    }

    for (&id, record) in &current.elements {
        if previous.get(id).is_none() {
            entries.push(DiffEntry {
                current_id: Some(id),
                current_family_and_type: record.family_and_type.clone(),
                current_category: record.category.clone(),
                changes: vec![Change::ElementAdded],
                ..DiffEntry::default()
            });
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementId, ElementRecord};
    use pretty_assertions::assert_eq;

    fn snapshot(ids: &[i64]) -> Snapshot {
        Snapshot {
            document: String::new(),
            elements: ids
                .iter()
                .map(|&id| {
                    let record = ElementRecord {
                        category: "Floors".to_string(),
                        family_and_type: "Floor: Generic 300mm".to_string(),
                        ..ElementRecord::default()
                    };
                    (ElementId(id), record)
                })
                .collect(),
        }
    }

    #[test]
    fn one_sided_ids_classify_exclusively() {
        let prev = snapshot(&[1, 2, 3]);
        let curr = snapshot(&[2, 3, 4]);
        let entries = compare(&prev, &curr);
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].previous_id, Some(ElementId(1)));
        assert_eq!(entries[0].current_id, None);
        assert_eq!(entries[0].description(), "element deleted");

        assert_eq!(entries[1].previous_id, None);
        assert_eq!(entries[1].current_id, Some(ElementId(4)));
        assert_eq!(entries[1].description(), "element added");
    }

    #[test]
    fn matching_universes_produce_no_entries() {
        let prev = snapshot(&[1, 2]);
        let curr = snapshot(&[1, 2]);
        assert_eq!(compare(&prev, &curr), Vec::new());
    }
}
