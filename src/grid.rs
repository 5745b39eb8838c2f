use crate::catalog::Catalog;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Logical key of a grid cell. At most one routine occupies a key at any
/// time; the assign path enforces this, not an id constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub class_id: String,
    pub day: String,
    pub time_slot: String,
}

impl SlotKey {
    pub fn new(class_id: &str, day: &str, time_slot: &str) -> Self {
        SlotKey {
            class_id: class_id.to_string(),
            day: day.to_string(),
            time_slot: time_slot.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    pub id: String,
    pub class_id: String,
    pub day: String,
    pub time_slot: String,
    pub subject_id: String,
    /// Absent means the slot applies to the whole class; present means a
    /// single-student overlay at the same coordinate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
}

/// Everything a class-deletion cascade removed, so the caller can mirror the
/// same deletions into durable storage in one transaction.
#[derive(Debug, Clone)]
pub struct CascadeRemoval {
    pub subject_ids: Vec<String>,
    pub routine_ids: Vec<String>,
}

/// Sparse weekly grid: absent key = empty cell. All operations are total
/// over valid inputs; the engine has no failure modes of its own.
#[derive(Default)]
pub struct RoutineGrid {
    cells: HashMap<SlotKey, Routine>,
}

impl RoutineGrid {
    pub fn new() -> Self {
        RoutineGrid::default()
    }

    /// Assign a subject (by name) to a slot, materializing the subject record
    /// on first use. Any prior occupant of the exact key is replaced without
    /// confirmation; its subject record is left alone. Returns `None` only
    /// for a blank subject name, which is a silent rejection.
    pub fn assign(
        &mut self,
        catalog: &mut Catalog,
        class_id: &str,
        day: &str,
        time_slot: &str,
        subject_name: &str,
        student_id: Option<&str>,
    ) -> Option<Routine> {
        let subject_id = catalog.resolve_subject(class_id, subject_name)?;
        let routine = Routine {
            id: Uuid::new_v4().to_string(),
            class_id: class_id.to_string(),
            day: day.to_string(),
            time_slot: time_slot.to_string(),
            subject_id,
            student_id: student_id.map(|s| s.to_string()),
        };
        // Keyed insert drops the previous occupant, which is exactly the
        // last-write-wins policy.
        self.cells
            .insert(SlotKey::new(class_id, day, time_slot), routine.clone());
        Some(routine)
    }

    /// Remove the routine at a key if present. Idempotent: erasing an empty
    /// slot is a no-op, not an error. The subject record is not deleted.
    pub fn erase(&mut self, class_id: &str, day: &str, time_slot: &str) -> Option<Routine> {
        self.cells.remove(&SlotKey::new(class_id, day, time_slot))
    }

    pub fn routine_at(&self, class_id: &str, day: &str, time_slot: &str) -> Option<&Routine> {
        self.cells.get(&SlotKey::new(class_id, day, time_slot))
    }

    /// Drop every routine of a class, returning the removed ids for
    /// mirroring. Subject cleanup lives in the catalog; `on_class_deleted`
    /// ties both together.
    pub fn remove_class_routines(&mut self, class_id: &str) -> Vec<String> {
        let keys: Vec<SlotKey> = self
            .cells
            .keys()
            .filter(|k| k.class_id == class_id)
            .cloned()
            .collect();
        let mut removed = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(routine) = self.cells.remove(&key) {
                removed.push(routine.id);
            }
        }
        removed
    }

    /// Full-snapshot read for a persistence layer to pull. Ordered by key so
    /// mirrors and tests see a stable sequence.
    pub fn snapshot(&self) -> Vec<&Routine> {
        let mut out: Vec<&Routine> = self.cells.values().collect();
        out.sort_by(|a, b| {
            (a.class_id.as_str(), a.day.as_str(), a.time_slot.as_str()).cmp(&(
                b.class_id.as_str(),
                b.day.as_str(),
                b.time_slot.as_str(),
            ))
        });
        out
    }

    /// Used when reloading a mirrored workspace. Keyed insert keeps the
    /// single-occupancy invariant even over a corrupt mirror.
    pub fn insert_routine(&mut self, routine: Routine) {
        self.cells.insert(
            SlotKey::new(&routine.class_id, &routine.day, &routine.time_slot),
            routine,
        );
    }
}

/// Class-deletion cascade: removes the class record, every subject scoped to
/// it and every routine at its coordinates as one logical step, so the grid
/// is never observed with routines pointing at a deleted class. Returns
/// `None` when the class does not exist.
pub fn on_class_deleted(
    catalog: &mut Catalog,
    grid: &mut RoutineGrid,
    class_id: &str,
) -> Option<CascadeRemoval> {
    let subject_ids = catalog.remove_class(class_id)?;
    let routine_ids = grid.remove_class_routines(class_id);
    Some(CascadeRemoval {
        subject_ids,
        routine_ids,
    })
}
