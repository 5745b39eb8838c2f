use crate::catalog::RoomStatus;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn parse_status(req: &Request, key: &str, default: RoomStatus) -> Result<RoomStatus, serde_json::Value> {
    match req.params.get(key).and_then(|v| v.as_str()) {
        None => Ok(default),
        Some("Active") => Ok(RoomStatus::Active),
        Some("Inactive") => Ok(RoomStatus::Inactive),
        Some(other) => Err(err(
            &req.id,
            "bad_params",
            format!("unknown status: {}", other),
            None,
        )),
    }
}

fn handle_sections_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let sections: Vec<_> = state
        .session
        .catalog
        .sections()
        .into_iter()
        .map(|s| json!({ "id": s.id, "name": s.name }))
        .collect();
    ok(&req.id, json!({ "sections": sections }))
}

fn handle_sections_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let section = state.session.catalog.create_section(&name);
    ok(&req.id, json!({ "sectionId": section.id, "name": section.name }))
}

fn handle_sections_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let section_id = match required_str(req, "sectionId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if !state.session.catalog.delete_section(&section_id) {
        return err(&req.id, "not_found", "section not found", None);
    }
    ok(&req.id, json!({ "ok": true }))
}

fn handle_classrooms_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let classrooms: Vec<_> = state
        .session
        .catalog
        .classrooms()
        .into_iter()
        .map(|r| {
            json!({
                "id": r.id,
                "name": r.name,
                "capacity": r.capacity,
                "status": r.status
            })
        })
        .collect();
    ok(&req.id, json!({ "classrooms": classrooms }))
}

fn handle_classrooms_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    let name = match required_str(req, "name") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let capacity = req
        .params
        .get("capacity")
        .and_then(|v| v.as_i64())
        .unwrap_or(0);
    let status = match parse_status(req, "status", RoomStatus::Active) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let room = state.session.catalog.create_classroom(&name, capacity, status);
    ok(
        &req.id,
        json!({
            "roomId": room.id,
            "name": room.name,
            "capacity": room.capacity,
            "status": room.status
        }),
    )
}

fn handle_classrooms_set_status(state: &mut AppState, req: &Request) -> serde_json::Value {
    let room_id = match required_str(req, "roomId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let status = match req.params.get("status").and_then(|v| v.as_str()) {
        Some("Active") => RoomStatus::Active,
        Some("Inactive") => RoomStatus::Inactive,
        _ => return err(&req.id, "bad_params", "status must be Active or Inactive", None),
    };
    if !state.session.catalog.set_room_status(&room_id, status) {
        return err(&req.id, "not_found", "classroom not found", None);
    }
    ok(&req.id, json!({ "ok": true }))
}

fn handle_classrooms_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let room_id = match required_str(req, "roomId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    // No cascade: classes keep their room reference and render "No Room".
    if !state.session.catalog.delete_classroom(&room_id) {
        return err(&req.id, "not_found", "classroom not found", None);
    }
    ok(&req.id, json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "sections.list" => Some(handle_sections_list(state, req)),
        "sections.create" => Some(handle_sections_create(state, req)),
        "sections.delete" => Some(handle_sections_delete(state, req)),
        "classrooms.list" => Some(handle_classrooms_list(state, req)),
        "classrooms.create" => Some(handle_classrooms_create(state, req)),
        "classrooms.setStatus" => Some(handle_classrooms_set_status(state, req)),
        "classrooms.delete" => Some(handle_classrooms_delete(state, req)),
        _ => None,
    }
}
