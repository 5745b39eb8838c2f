use crate::catalog::Subject;
use crate::grid::Routine;
use chrono::Utc;
use rusqlite::Connection;
use std::path::Path;

/// Durable mirror of the session's subjects and routines. The in-memory
/// session stays the source of truth; the mirror receives record-level
/// upserts/deletes keyed by id and is read back once when a workspace is
/// selected.
pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join("routine.sqlite3");
    let conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS subjects(
            id TEXT PRIMARY KEY,
            class_id TEXT NOT NULL,
            name TEXT NOT NULL,
            teacher_id TEXT NOT NULL DEFAULT '',
            updated_at TEXT,
            UNIQUE(class_id, name)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_subjects_class ON subjects(class_id)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS routines(
            id TEXT PRIMARY KEY,
            class_id TEXT NOT NULL,
            day TEXT NOT NULL,
            time_slot TEXT NOT NULL,
            subject_id TEXT NOT NULL,
            student_id TEXT,
            updated_at TEXT,
            UNIQUE(class_id, day, time_slot)
        )",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_routines_class ON routines(class_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_routines_subject ON routines(subject_id)",
        [],
    )?;

    Ok(conn)
}

fn now_iso() -> String {
    Utc::now().to_rfc3339()
}

pub fn upsert_subject(conn: &Connection, subject: &Subject) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO subjects(id, class_id, name, teacher_id, updated_at)
         VALUES(?, ?, ?, ?, ?)
         ON CONFLICT(id) DO UPDATE SET
           class_id = excluded.class_id,
           name = excluded.name,
           teacher_id = excluded.teacher_id,
           updated_at = excluded.updated_at",
        (
            &subject.id,
            &subject.class_id,
            &subject.name,
            &subject.teacher_id,
            now_iso(),
        ),
    )?;
    Ok(())
}

pub fn upsert_routine(conn: &Connection, routine: &Routine) -> anyhow::Result<()> {
    // The slot key carries a uniqueness constraint, so a last-write-wins
    // replacement must clear the old occupant's row first (its id differs).
    conn.execute(
        "DELETE FROM routines
         WHERE class_id = ? AND day = ? AND time_slot = ? AND id != ?",
        (
            &routine.class_id,
            &routine.day,
            &routine.time_slot,
            &routine.id,
        ),
    )?;
    conn.execute(
        "INSERT INTO routines(id, class_id, day, time_slot, subject_id, student_id, updated_at)
         VALUES(?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT(id) DO UPDATE SET
           subject_id = excluded.subject_id,
           student_id = excluded.student_id,
           updated_at = excluded.updated_at",
        (
            &routine.id,
            &routine.class_id,
            &routine.day,
            &routine.time_slot,
            &routine.subject_id,
            &routine.student_id,
            now_iso(),
        ),
    )?;
    Ok(())
}

pub fn delete_routine(conn: &Connection, routine_id: &str) -> anyhow::Result<()> {
    conn.execute("DELETE FROM routines WHERE id = ?", [routine_id])?;
    Ok(())
}

/// Mirror of the class-deletion cascade: routines first, then subjects, in
/// one transaction so the mirror never holds orphans.
pub fn delete_class_records(conn: &Connection, class_id: &str) -> anyhow::Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM routines WHERE class_id = ?", [class_id])?;
    tx.execute("DELETE FROM subjects WHERE class_id = ?", [class_id])?;
    tx.commit()?;
    Ok(())
}

pub fn load_subjects(conn: &Connection) -> anyhow::Result<Vec<Subject>> {
    let mut stmt =
        conn.prepare("SELECT id, class_id, name, teacher_id FROM subjects ORDER BY class_id, name")?;
    let rows = stmt
        .query_map([], |r| {
            Ok(Subject {
                id: r.get(0)?,
                class_id: r.get(1)?,
                name: r.get(2)?,
                teacher_id: r.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn load_routines(conn: &Connection) -> anyhow::Result<Vec<Routine>> {
    let mut stmt = conn.prepare(
        "SELECT id, class_id, day, time_slot, subject_id, student_id
         FROM routines
         ORDER BY class_id, day, time_slot",
    )?;
    let rows = stmt
        .query_map([], |r| {
            Ok(Routine {
                id: r.get(0)?,
                class_id: r.get(1)?,
                day: r.get(2)?,
                time_slot: r.get(3)?,
                subject_id: r.get(4)?,
                student_id: r.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}
