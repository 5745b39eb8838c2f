use crate::catalog::Catalog;
use crate::grid::Routine;
use crate::ipc::error::{err, ok};
use crate::ipc::helpers::required_str;
use crate::ipc::types::{AppState, Request};
use crate::palette::ToolAction;
use crate::persist;
use serde_json::json;

/// Renderer cell contract: subject and student names are joined against the
/// catalog at read time, never stored on the routine. Dangling references
/// resolve to the "Unassigned" placeholder.
fn resolve_cell(catalog: &Catalog, routine: &Routine) -> serde_json::Value {
    let subject_name = catalog
        .subject(&routine.subject_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| "Unassigned".to_string());
    let mut cell = json!({
        "routineId": routine.id,
        "subjectId": routine.subject_id,
        "subjectName": subject_name,
    });
    if let Some(student_id) = routine.student_id.as_deref() {
        let student_name = catalog
            .student(student_id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "Unassigned".to_string());
        cell["studentId"] = json!(student_id);
        cell["studentName"] = json!(student_name);
    }
    cell
}

fn slot_params(req: &Request) -> Result<(String, String, String), serde_json::Value> {
    let class_id = required_str(req, "classId")?;
    let day = required_str(req, "day")?;
    let time_slot = required_str(req, "timeSlot")?;
    Ok((class_id, day, time_slot))
}

fn handle_apply_tool(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (class_id, day, time_slot) = match slot_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let session = &mut state.session;
    if session.catalog.class(&class_id).is_none() {
        return err(&req.id, "not_found", "class not found", None);
    }
    if !session.config.has_day(&day) {
        return err(&req.id, "bad_params", format!("unknown day: {}", day), None);
    }
    if !session.config.has_time_slot(&time_slot) {
        return err(
            &req.id,
            "bad_params",
            format!("unknown time slot: {}", time_slot),
            None,
        );
    }

    match session.palette.action() {
        ToolAction::Rejected => err(&req.id, "no_tool_selected", "select a tool first", None),
        ToolAction::Erase => {
            let removed = session.grid.erase(&class_id, &day, &time_slot);
            if let (Some(conn), Some(routine)) = (state.db.as_ref(), removed.as_ref()) {
                if let Err(e) = persist::delete_routine(conn, &routine.id) {
                    return err(&req.id, "db_delete_failed", format!("{e:?}"), None);
                }
            }
            ok(
                &req.id,
                json!({ "action": "erased", "removed": removed.is_some() }),
            )
        }
        ToolAction::Assign {
            subject_name,
            student_id,
        } => {
            let Some(routine) = session.grid.assign(
                &mut session.catalog,
                &class_id,
                &day,
                &time_slot,
                &subject_name,
                student_id.as_deref(),
            ) else {
                return err(&req.id, "bad_params", "subject name must not be empty", None);
            };
            if let Some(conn) = state.db.as_ref() {
                if let Some(subject) = session.catalog.subject(&routine.subject_id) {
                    if let Err(e) = persist::upsert_subject(conn, subject) {
                        return err(&req.id, "db_upsert_failed", format!("{e:?}"), None);
                    }
                }
                if let Err(e) = persist::upsert_routine(conn, &routine) {
                    return err(&req.id, "db_upsert_failed", format!("{e:?}"), None);
                }
            }
            let cell = resolve_cell(&session.catalog, &routine);
            ok(
                &req.id,
                json!({ "action": "assigned", "routine": routine, "cell": cell }),
            )
        }
    }
}

fn handle_cell(state: &mut AppState, req: &Request) -> serde_json::Value {
    let (class_id, day, time_slot) = match slot_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let session = &state.session;
    let cell = session
        .grid
        .routine_at(&class_id, &day, &time_slot)
        .map(|r| resolve_cell(&session.catalog, r));
    ok(&req.id, json!({ "cell": cell }))
}

/// Day rows by time-slot columns, the shape the grid view binds to.
fn handle_grid(state: &mut AppState, req: &Request) -> serde_json::Value {
    let class_id = match required_str(req, "classId") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let session = &state.session;
    let rows: Vec<_> = session
        .config
        .days
        .iter()
        .map(|day| {
            let cells: Vec<_> = session
                .config
                .time_slots
                .iter()
                .map(|slot| {
                    session
                        .grid
                        .routine_at(&class_id, day, slot)
                        .map(|r| resolve_cell(&session.catalog, r))
                        .unwrap_or(serde_json::Value::Null)
                })
                .collect();
            json!({ "day": day, "cells": cells })
        })
        .collect();
    ok(
        &req.id,
        json!({
            "classId": class_id,
            "timeSlots": session.config.time_slots,
            "rows": rows
        }),
    )
}

/// Full-snapshot read for a persistence layer to pull.
fn handle_snapshot(state: &mut AppState, req: &Request) -> serde_json::Value {
    let session = &state.session;
    ok(
        &req.id,
        json!({
            "subjects": session.catalog.subjects(),
            "routines": session.grid.snapshot()
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "routine.applyTool" => Some(handle_apply_tool(state, req)),
        "routine.cell" => Some(handle_cell(state, req)),
        "routine.grid" => Some(handle_grid(state, req)),
        "routine.snapshot" => Some(handle_snapshot(state, req)),
        _ => None,
    }
}
