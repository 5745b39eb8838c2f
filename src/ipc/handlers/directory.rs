use crate::catalog::{Student, Teacher};
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

// Teachers and students are reference data owned by external directories.
// They arrive wholesale and are never edited record-by-record here.

fn handle_teachers_load(state: &mut AppState, req: &Request) -> serde_json::Value {
    let teachers: Vec<Teacher> = match req
        .params
        .get("teachers")
        .cloned()
        .map(serde_json::from_value)
    {
        Some(Ok(v)) => v,
        Some(Err(e)) => return err(&req.id, "bad_params", format!("teachers: {}", e), None),
        None => return err(&req.id, "bad_params", "missing teachers", None),
    };
    let count = teachers.len();
    state.session.catalog.load_teachers(teachers);
    ok(&req.id, json!({ "loaded": count }))
}

fn handle_teachers_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let teachers: Vec<_> = state
        .session
        .catalog
        .teachers()
        .into_iter()
        .map(|t| json!({ "id": t.id, "name": t.name, "specialty": t.specialty }))
        .collect();
    ok(&req.id, json!({ "teachers": teachers }))
}

fn handle_students_load(state: &mut AppState, req: &Request) -> serde_json::Value {
    let students: Vec<Student> = match req
        .params
        .get("students")
        .cloned()
        .map(serde_json::from_value)
    {
        Some(Ok(v)) => v,
        Some(Err(e)) => return err(&req.id, "bad_params", format!("students: {}", e), None),
        None => return err(&req.id, "bad_params", "missing students", None),
    };
    let count = students.len();
    state.session.catalog.load_students(students);
    ok(&req.id, json!({ "loaded": count }))
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let students: Vec<_> = state
        .session
        .catalog
        .students()
        .into_iter()
        .map(|s| json!({ "id": s.id, "name": s.name }))
        .collect();
    ok(&req.id, json!({ "students": students }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "teachers.load" => Some(handle_teachers_load(state, req)),
        "teachers.list" => Some(handle_teachers_list(state, req)),
        "students.load" => Some(handle_students_load(state, req)),
        "students.list" => Some(handle_students_list(state, req)),
        _ => None,
    }
}
