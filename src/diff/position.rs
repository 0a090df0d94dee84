use super::{Change, DiffEntry, Vertical};
use crate::model::Snapshot;

/// Per-axis movement below this many internal units counts as no movement.
const MOVE_TOLERANCE: f64 = 0.001;

/// Internal length units (feet) to millimetres.
const UNITS_TO_MM: f64 = 304.8;

fn to_mm(units: f64) -> i64 {
    (units * UNITS_TO_MM).round() as i64
}

/// Compares element locations between two snapshots.
///
/// Only elements present in both snapshots with a captured position are
/// considered; everything else is the existence comparator's business.
/// Pairs within tolerance on all axes produce no entry.
pub fn compare(previous: &Snapshot, current: &Snapshot) -> Vec<DiffEntry> {
    let mut entries = Vec::new();

    for (&id, prev_record) in &previous.elements {
        let Some(curr_record) = current.get(id) else {
            continue;
        };
        let (Some(prev_pos), Some(curr_pos)) = (prev_record.position, curr_record.position) else {
            continue;
        };

        let dx = curr_pos.x - prev_pos.x;
        let dy = curr_pos.y - prev_pos.y;
        let dz = curr_pos.z - prev_pos.z;
        let xy_moved = dx.abs() > MOVE_TOLERANCE || dy.abs() > MOVE_TOLERANCE;
        let z_moved = dz.abs() > MOVE_TOLERANCE;

        let mut changes = Vec::new();
        if xy_moved {
            changes.push(Change::XyMove {
                mm: to_mm(dx.hypot(dy)),
            });
        }
        if z_moved {
            let direction = if dz > 0.0 {
                Vertical::Upward
            } else {
                Vertical::Downward
            };
            changes.push(Change::ZMove {
                mm: to_mm(dz.abs()),
                direction,
            });
        }
        if changes.is_empty() {
            continue;
        }

        entries.push(DiffEntry {
            previous_id: Some(id),
            current_id: Some(id),
            previous_family_and_type: prev_record.family_and_type.clone(),
            current_family_and_type: curr_record.family_and_type.clone(),
            previous_category: prev_record.category.clone(),
            current_category: curr_record.category.clone(),
            changes,
            compare_date: String::new(),
        });
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementId, ElementRecord, Position};
    use pretty_assertions::assert_eq;

    fn snapshot(positions: &[(i64, f64, f64, f64)]) -> Snapshot {
        let elements = positions
            .iter()
            .map(|&(id, x, y, z)| {
                let record = ElementRecord {
                    category: "Walls".to_string(),
                    family_and_type: "Basic Wall: Generic 200mm".to_string(),
                    position: Some(Position { x, y, z }),
                    ..ElementRecord::default()
                };
                (ElementId(id), record)
            })
            .collect();
        Snapshot {
            document: String::new(),
            elements,
        }
    }

    #[test]
    fn movement_within_tolerance_produces_no_entry() {
        let prev = snapshot(&[(1, 0.0, 0.0, 0.0)]);
        let curr = snapshot(&[(1, 0.0005, -0.0005, 0.001)]);
        assert_eq!(compare(&prev, &curr), Vec::new());
    }

    #[test]
    fn vertical_move_reports_direction_and_millimetres() {
        // 0.01 ft × 304.8 ≈ 3.05mm, rounded to 3.
        let prev = snapshot(&[(1, 0.0, 0.0, 0.0)]);
        let curr = snapshot(&[(1, 0.0, 0.0, 0.01)]);
        let entries = compare(&prev, &curr);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].description(), "Z coordination move upward + 3mm");

        let dropped = compare(&curr, &prev);
        assert_eq!(
            dropped[0].description(),
            "Z coordination move downward + 3mm"
        );
    }

    #[test]
    fn planar_move_reports_hypotenuse() {
        // 3-4-5 triangle: 5 ft × 304.8 = 1524mm.
        let prev = snapshot(&[(1, 0.0, 0.0, 0.0)]);
        let curr = snapshot(&[(1, 3.0, 4.0, 0.0)]);
        let entries = compare(&prev, &curr);
        assert_eq!(entries[0].description(), "XY coordination move + 1524mm");
    }

    #[test]
    fn combined_move_reports_both_phrases() {
        let prev = snapshot(&[(1, 0.0, 0.0, 0.0)]);
        let curr = snapshot(&[(1, 1.0, 0.0, -1.0)]);
        let entries = compare(&prev, &curr);
        assert_eq!(
            entries[0].description(),
            "XY coordination move + 305mm, Z coordination move downward + 305mm"
        );
    }

    #[test]
    fn unmatched_or_positionless_elements_are_skipped() {
        let prev = snapshot(&[(1, 0.0, 0.0, 0.0), (2, 0.0, 0.0, 0.0)]);
        let mut curr = snapshot(&[(2, 5.0, 0.0, 0.0), (3, 1.0, 1.0, 1.0)]);
        curr.elements
            .get_mut(&ElementId(2))
            .unwrap()
            .position
            .take();
        assert_eq!(compare(&prev, &curr), Vec::new());
    }
}
