use super::{ElementId, ElementRecord};
use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Source-chain walks give up after this many hops.
///
/// Real part hierarchies are two or three levels deep; anything longer is
/// a cycle or corrupt data and resolves to `None`.
const MAX_SOURCE_DEPTH: usize = 32;

/// The full set of element records extracted from one document at one
/// point in time.
///
/// Snapshots are produced by an external extractor and loaded from JSON;
/// after loading they are only ever narrowed with
/// [`Snapshot::retain_categories`], never mutated element by element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Display name of the originating document.
    #[serde(default)]
    pub document: String,
    pub elements: BTreeMap<ElementId, ElementRecord>,
}

impl Snapshot {
    /// Loads a snapshot from a JSON file produced by the extractor.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::FileRead`] if the file cannot be read and
    /// [`LoadError::InvalidSnapshot`] if the JSON is malformed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bim_diff::model::Snapshot;
    ///
    /// let snapshot = Snapshot::load("previous.json")?;
    /// println!("{}: {} elements", snapshot.document, snapshot.elements.len());
    /// # Ok::<(), bim_diff::error::LoadError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(&path).map_err(|source| LoadError::FileRead {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let snapshot = serde_json::from_str(&content)?;
        Ok(snapshot)
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&ElementRecord> {
        self.elements.get(&id)
    }

    /// Distinct category names present in this snapshot.
    #[must_use]
    pub fn categories(&self) -> BTreeSet<String> {
        self.elements
            .values()
            .filter(|record| !record.category.is_empty())
            .map(|record| record.category.clone())
            .collect()
    }

    /// Drops every element whose category is not in `categories`.
    pub fn retain_categories(&mut self, categories: &BTreeSet<String>) {
        self.elements
            .retain(|_, record| categories.contains(&record.category));
    }

    /// Resolves an intermediate element to its terminal source element by
    /// walking `source_id` links.
    ///
    /// Returns `None` for unknown ids, for terminal elements themselves,
    /// and whenever the chain is broken: a link to a missing element, a
    /// cycle, or a chain longer than the depth cap.
    #[must_use]
    pub fn resolve_source(&self, id: ElementId) -> Option<ElementId> {
        let mut visited: BTreeSet<ElementId> = BTreeSet::new();
        let mut current = id;
        self.get(current)?.source_id?;

        for _ in 0..MAX_SOURCE_DEPTH {
            if !visited.insert(current) {
                return None; // cycle
            }
            let next = self.get(current)?.source_id;
            match next {
                Some(parent) => {
                    // Dangling link: the parent was not captured.
                    self.get(parent)?;
                    current = parent;
                }
                None => return Some(current),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot(links: &[(i64, Option<i64>)]) -> Snapshot {
        let elements = links
            .iter()
            .map(|&(id, source)| {
                let record = ElementRecord {
                    category: "Parts".to_string(),
                    source_id: source.map(ElementId),
                    ..ElementRecord::default()
                };
                (ElementId(id), record)
            })
            .collect();
        Snapshot {
            document: "test.rvt".to_string(),
            elements,
        }
    }

    #[test]
    fn resolves_chain_to_terminal_element() {
        // part 3 -> part 2 -> wall 1
        let snap = snapshot(&[(1, None), (2, Some(1)), (3, Some(2))]);
        assert_eq!(snap.resolve_source(ElementId(3)), Some(ElementId(1)));
        assert_eq!(snap.resolve_source(ElementId(2)), Some(ElementId(1)));
    }

    #[test]
    fn terminal_and_unknown_elements_resolve_to_none() {
        let snap = snapshot(&[(1, None)]);
        assert_eq!(snap.resolve_source(ElementId(1)), None);
        assert_eq!(snap.resolve_source(ElementId(99)), None);
    }

    #[test]
    fn cycle_resolves_to_none() {
        let snap = snapshot(&[(1, Some(2)), (2, Some(1))]);
        assert_eq!(snap.resolve_source(ElementId(1)), None);
    }

    #[test]
    fn dangling_link_resolves_to_none() {
        let snap = snapshot(&[(1, Some(99))]);
        assert_eq!(snap.resolve_source(ElementId(1)), None);
    }

    #[test]
    fn retain_categories_filters_elements() {
        let mut snap = snapshot(&[(1, None), (2, None)]);
        snap.elements.get_mut(&ElementId(2)).unwrap().category = "Walls".to_string();
        snap.retain_categories(&BTreeSet::from(["Walls".to_string()]));
        assert_eq!(snap.elements.len(), 1);
        assert!(snap.get(ElementId(2)).is_some());
    }

    #[test]
    fn loads_snapshot_json() {
        let json = r#"{
            "document": "tower.rvt",
            "elements": {
                "311042": {
                    "category": "Walls",
                    "family_and_type": "Basic Wall: Generic 200mm",
                    "position": { "x": 12.5, "y": -3.25, "z": 0.0 },
                    "parameters": { "Mark": "W-12" }
                }
            }
        }"#;
        let snap: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.document, "tower.rvt");
        let record = snap.get(ElementId(311_042)).unwrap();
        assert_eq!(record.category, "Walls");
        assert_eq!(record.position.unwrap().x, 12.5);
    }
}
