use crate::catalog::Shift;
use crate::grid;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{optional_str, required_str};
use crate::ipc::types::{AppState, Request};
use crate::persist;
use serde_json::json;

fn parse_shift(req: &Request) -> Result<Shift, serde_json::Value> {
    match req.params.get("shift").and_then(|v| v.as_str()) {
        None => Ok(Shift::Morning),
        Some("Morning") => Ok(Shift::Morning),
        Some("Day") => Ok(Shift::Day),
        Some("Evening") => Ok(Shift::Evening),
        Some(other) => Err(err(
            &req.id,
            "bad_params",
            format!("unknown shift: {}", other),
            None,
        )),
    }
}

fn handle_classes_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let catalog = &state.session.catalog;
    // Resolve display names here; dangling references get placeholders
    // rather than failing the whole listing.
    let classes: Vec<_> = catalog
        .classes()
        .into_iter()
        .map(|c| {
            let section_name = catalog
                .section(&c.section_id)
                .map(|s| s.name.clone())
                .unwrap_or_else(|| "Unsectioned".to_string());
            let teacher_name = catalog
                .teacher(&c.teacher_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| "Unassigned".to_string());
            let room_name = catalog
                .classroom(&c.room_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "No Room".to_string());
            json!({
                "id": c.id,
                "name": c.name,
                "sectionId": c.section_id,
                "sectionName": section_name,
                "teacherId": c.teacher_id,
                "teacherName": teacher_name,
                "roomId": c.room_id,
                "roomName": room_name,
                "shift": c.shift,
                "subjectCount": catalog.subjects_for_class(&c.id).len()
            })
        })
        .collect();
    ok(&req.id, json!({ "classes": classes }))
}

fn handle_classes_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let section_id = match optional_str(req, "sectionId") {
        Ok(v) => v.unwrap_or_default(),
        Err(resp) => return resp,
    };
    let teacher_id = match optional_str(req, "teacherId") {
        Ok(v) => v.unwrap_or_default(),
        Err(resp) => return resp,
    };
    let room_id = match optional_str(req, "roomId") {
        Ok(v) => v.unwrap_or_default(),
        Err(resp) => return resp,
    };
    let shift = match parse_shift(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let class = state
        .session
        .catalog
        .create_class(&name, &section_id, &teacher_id, &room_id, shift);
    ok(
        &req.id,
        json!({ "classId": class.id, "name": class.name, "shift": class.shift }),
    )
}

fn handle_classes_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match required_str(req, "classId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let session = &mut state.session;
    let Some(removal) = grid::on_class_deleted(&mut session.catalog, &mut session.grid, &class_id)
    else {
        return err(&req.id, "not_found", "class not found", None);
    };

    // Mirror the cascade as one transaction so the durable copy never holds
    // orphaned subjects or routines.
    if let Some(conn) = state.db.as_ref() {
        if let Err(e) = persist::delete_class_records(conn, &class_id) {
            return err(
                &req.id,
                "db_delete_failed",
                format!("{e:?}"),
                Some(json!({ "classId": class_id })),
            );
        }
    }

    ok(
        &req.id,
        json!({
            "ok": true,
            "removedSubjects": removal.subject_ids.len(),
            "removedRoutines": removal.routine_ids.len()
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(handle_classes_list(state, req)),
        "classes.create" => Some(handle_classes_create(state, req)),
        "classes.delete" => Some(handle_classes_delete(state, req)),
        _ => None,
    }
}
