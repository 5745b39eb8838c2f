use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: String,
    pub name: String,
    pub capacity: i64,
    pub status: RoomStatus,
}

/// Read-only reference record supplied by the external teacher directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub specialty: String,
}

/// Read-only reference record supplied by the external student directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Day,
    Evening,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: String,
    pub name: String,
    pub section_id: String,
    pub teacher_id: String,
    pub room_id: String,
    pub shift: Shift,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub class_id: String,
    /// Empty when no teacher has been assigned yet. Auto-materialized
    /// subjects always start unassigned.
    pub teacher_id: String,
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Natural key for subject lookups: the name is trimmed but kept
/// case-sensitive, so "Flute" and "flute" stay distinct subjects.
fn subject_key(class_id: &str, name: &str) -> (String, String) {
    (class_id.to_string(), name.trim().to_string())
}

/// In-memory registries for one session. Sections, classrooms, classes and
/// subjects are owned here; teachers and students are reference directories
/// loaded wholesale from outside and never mutated record-by-record.
#[derive(Default)]
pub struct Catalog {
    sections: HashMap<String, Section>,
    classrooms: HashMap<String, Classroom>,
    teachers: HashMap<String, Teacher>,
    students: HashMap<String, Student>,
    classes: HashMap<String, Class>,
    subjects: HashMap<String, Subject>,
    // (class_id, trimmed name) -> subject id. Enforces one subject per name
    // within a class no matter which path created it.
    subject_index: HashMap<(String, String), String>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    // ---- sections ----

    pub fn create_section(&mut self, name: &str) -> Section {
        let section = Section {
            id: fresh_id(),
            name: name.trim().to_string(),
        };
        self.sections.insert(section.id.clone(), section.clone());
        section
    }

    /// No cascade: classes referencing the section keep their stale id and
    /// render as unsectioned.
    pub fn delete_section(&mut self, section_id: &str) -> bool {
        self.sections.remove(section_id).is_some()
    }

    pub fn section(&self, section_id: &str) -> Option<&Section> {
        self.sections.get(section_id)
    }

    pub fn sections(&self) -> Vec<&Section> {
        let mut out: Vec<&Section> = self.sections.values().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    // ---- classrooms ----

    pub fn create_classroom(&mut self, name: &str, capacity: i64, status: RoomStatus) -> Classroom {
        let room = Classroom {
            id: fresh_id(),
            name: name.trim().to_string(),
            capacity,
            status,
        };
        self.classrooms.insert(room.id.clone(), room.clone());
        room
    }

    pub fn set_room_status(&mut self, room_id: &str, status: RoomStatus) -> bool {
        match self.classrooms.get_mut(room_id) {
            Some(room) => {
                room.status = status;
                true
            }
            None => false,
        }
    }

    /// No cascade: dangling class references render as "No Room".
    pub fn delete_classroom(&mut self, room_id: &str) -> bool {
        self.classrooms.remove(room_id).is_some()
    }

    pub fn classroom(&self, room_id: &str) -> Option<&Classroom> {
        self.classrooms.get(room_id)
    }

    pub fn classrooms(&self) -> Vec<&Classroom> {
        let mut out: Vec<&Classroom> = self.classrooms.values().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    // ---- reference directories ----

    pub fn load_teachers(&mut self, teachers: Vec<Teacher>) {
        self.teachers = teachers.into_iter().map(|t| (t.id.clone(), t)).collect();
    }

    pub fn teacher(&self, teacher_id: &str) -> Option<&Teacher> {
        self.teachers.get(teacher_id)
    }

    pub fn teachers(&self) -> Vec<&Teacher> {
        let mut out: Vec<&Teacher> = self.teachers.values().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    pub fn load_students(&mut self, students: Vec<Student>) {
        self.students = students.into_iter().map(|s| (s.id.clone(), s)).collect();
    }

    pub fn student(&self, student_id: &str) -> Option<&Student> {
        self.students.get(student_id)
    }

    pub fn students(&self) -> Vec<&Student> {
        let mut out: Vec<&Student> = self.students.values().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    // ---- classes ----

    pub fn create_class(
        &mut self,
        name: &str,
        section_id: &str,
        teacher_id: &str,
        room_id: &str,
        shift: Shift,
    ) -> Class {
        let class = Class {
            id: fresh_id(),
            name: name.trim().to_string(),
            section_id: section_id.to_string(),
            teacher_id: teacher_id.to_string(),
            room_id: room_id.to_string(),
            shift,
        };
        self.classes.insert(class.id.clone(), class.clone());
        class
    }

    pub fn class(&self, class_id: &str) -> Option<&Class> {
        self.classes.get(class_id)
    }

    pub fn classes(&self) -> Vec<&Class> {
        let mut out: Vec<&Class> = self.classes.values().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    /// Removes the class record and every subject scoped to it, returning
    /// the removed subject ids so the caller can mirror the cascade. Routine
    /// cleanup belongs to the grid; see `grid::on_class_deleted`.
    pub fn remove_class(&mut self, class_id: &str) -> Option<Vec<String>> {
        self.classes.remove(class_id)?;
        let removed: Vec<String> = self
            .subjects
            .values()
            .filter(|s| s.class_id == class_id)
            .map(|s| s.id.clone())
            .collect();
        for id in &removed {
            if let Some(subject) = self.subjects.remove(id) {
                self.subject_index
                    .remove(&subject_key(&subject.class_id, &subject.name));
            }
        }
        Some(removed)
    }

    // ---- subjects ----

    /// Subject materializer. Looks up the (class, name) natural key and
    /// creates the subject on a miss, teacher left unassigned. Insertion
    /// only; existing subjects are never updated here. Returns `None` for a
    /// blank name, which callers treat as a silent rejection.
    pub fn resolve_subject(&mut self, class_id: &str, subject_name: &str) -> Option<String> {
        let trimmed = subject_name.trim();
        if trimmed.is_empty() {
            return None;
        }
        let key = subject_key(class_id, trimmed);
        if let Some(id) = self.subject_index.get(&key) {
            return Some(id.clone());
        }
        let subject = Subject {
            id: fresh_id(),
            name: trimmed.to_string(),
            class_id: class_id.to_string(),
            teacher_id: String::new(),
        };
        let id = subject.id.clone();
        self.subject_index.insert(key, id.clone());
        self.subjects.insert(id.clone(), subject);
        Some(id)
    }

    pub fn assign_subject_teacher(&mut self, subject_id: &str, teacher_id: &str) -> bool {
        match self.subjects.get_mut(subject_id) {
            Some(subject) => {
                subject.teacher_id = teacher_id.to_string();
                true
            }
            None => false,
        }
    }

    pub fn subject(&self, subject_id: &str) -> Option<&Subject> {
        self.subjects.get(subject_id)
    }

    pub fn subjects_for_class(&self, class_id: &str) -> Vec<&Subject> {
        let mut out: Vec<&Subject> = self
            .subjects
            .values()
            .filter(|s| s.class_id == class_id)
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    pub fn subjects(&self) -> Vec<&Subject> {
        let mut out: Vec<&Subject> = self.subjects.values().collect();
        out.sort_by(|a, b| (a.class_id.as_str(), a.name.as_str()).cmp(&(b.class_id.as_str(), b.name.as_str())));
        out
    }

    /// Used when reloading a mirrored workspace; bypasses id generation but
    /// still maintains the natural-key index.
    pub fn insert_subject(&mut self, subject: Subject) {
        self.subject_index.insert(
            subject_key(&subject.class_id, &subject.name),
            subject.id.clone(),
        );
        self.subjects.insert(subject.id.clone(), subject);
    }
}
