use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{optional_str, required_str};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_palette_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let tool = match required_str(req, "tool") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match tool.as_str() {
        "eraser" => state.session.palette.select_eraser(),
        "subject" => {
            let name = match required_str(req, "subjectName") {
                Ok(v) => v,
                Err(resp) => return resp,
            };
            state.session.palette.select_subject(&name);
        }
        other => {
            return err(
                &req.id,
                "bad_params",
                format!("tool must be eraser or subject, got {}", other),
                None,
            )
        }
    }
    ok(&req.id, json!({ "tool": state.session.palette.tool() }))
}

fn handle_palette_clear_tool(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.session.palette.clear_tool();
    ok(&req.id, json!({ "tool": state.session.palette.tool() }))
}

fn handle_palette_set_student_filter(state: &mut AppState, req: &Request) -> serde_json::Value {
    let student_id = match optional_str(req, "studentId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if let Some(id) = student_id.as_deref() {
        if state.session.catalog.student(id).is_none() {
            return err(&req.id, "not_found", "student not found", None);
        }
    }
    state.session.palette.set_student_filter(student_id);
    ok(
        &req.id,
        json!({ "studentFilter": state.session.palette.student_filter() }),
    )
}

fn handle_palette_state(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "tool": state.session.palette.tool(),
            "studentFilter": state.session.palette.student_filter()
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "palette.select" => Some(handle_palette_select(state, req)),
        "palette.clearTool" => Some(handle_palette_clear_tool(state, req)),
        "palette.setStudentFilter" => Some(handle_palette_set_student_filter(state, req)),
        "palette.state" => Some(handle_palette_state(state, req)),
        _ => None,
    }
}
