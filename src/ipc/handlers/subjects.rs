use crate::ipc::error::{err, ok};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use crate::persist;
use serde_json::json;

fn handle_subjects_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match required_str(req, "classId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let catalog = &state.session.catalog;
    if catalog.class(&class_id).is_none() {
        return err(&req.id, "not_found", "class not found", None);
    }
    let subjects: Vec<_> = catalog
        .subjects_for_class(&class_id)
        .into_iter()
        .map(|s| {
            let teacher_name = if s.teacher_id.is_empty() {
                "Unassigned".to_string()
            } else {
                catalog
                    .teacher(&s.teacher_id)
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| "Unassigned".to_string())
            };
            json!({
                "id": s.id,
                "name": s.name,
                "classId": s.class_id,
                "teacherId": s.teacher_id,
                "teacherName": teacher_name
            })
        })
        .collect();
    ok(&req.id, json!({ "subjects": subjects }))
}

/// Auto-materialized subjects start with no teacher; wiring one up is this
/// separate, later edit.
fn handle_subjects_assign_teacher(state: &mut AppState, req: &Request) -> serde_json::Value {
    let subject_id = match required_str(req, "subjectId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let teacher_id = match required_str(req, "teacherId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    if state.session.catalog.teacher(&teacher_id).is_none() {
        return err(&req.id, "not_found", "teacher not found", None);
    }
    if !state
        .session
        .catalog
        .assign_subject_teacher(&subject_id, &teacher_id)
    {
        return err(&req.id, "not_found", "subject not found", None);
    }

    if let Some(conn) = state.db.as_ref() {
        if let Some(subject) = state.session.catalog.subject(&subject_id) {
            if let Err(e) = persist::upsert_subject(conn, subject) {
                return err(&req.id, "db_upsert_failed", format!("{e:?}"), None);
            }
        }
    }

    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "subjects.list" => Some(handle_subjects_list(state, req)),
        "subjects.assignTeacher" => Some(handle_subjects_assign_teacher(state, req)),
        _ => None,
    }
}
