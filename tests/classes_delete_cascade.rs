use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_routined");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn routined");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({ "id": id, "method": method, "params": params });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert!(
        value.get("ok").and_then(|v| v.as_bool()).unwrap_or(false),
        "{} failed: {}",
        method,
        value
    );
    value.get("result").cloned().unwrap_or_else(|| json!({}))
}

#[test]
fn deleting_a_class_removes_its_subjects_and_routines_only() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let doomed = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "classes.create",
        json!({ "name": "Doomed", "shift": "Evening" }),
    );
    let doomed_id = doomed.get("classId").and_then(|v| v.as_str()).expect("classId");
    let survivor = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "classes.create",
        json!({ "name": "Survivor" }),
    );
    let survivor_id = survivor.get("classId").and_then(|v| v.as_str()).expect("classId");

    request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "palette.select",
        json!({ "tool": "subject", "subjectName": "Piano" }),
    );
    for (i, (class_id, slot)) in [
        (doomed_id, "09:00 AM"),
        (doomed_id, "10:00 AM"),
        (survivor_id, "09:00 AM"),
    ]
    .into_iter()
    .enumerate()
    {
        request_ok(
            &mut stdin,
            &mut reader,
            &format!("apply-{}", i),
            "routine.applyTool",
            json!({ "classId": class_id, "day": "Saturday", "timeSlot": slot }),
        );
    }

    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "classes.delete",
        json!({ "classId": doomed_id }),
    );
    assert_eq!(deleted.get("removedSubjects").and_then(|v| v.as_i64()), Some(1));
    assert_eq!(deleted.get("removedRoutines").and_then(|v| v.as_i64()), Some(2));

    // Every cell of the deleted class reads empty afterwards.
    let config = request_ok(&mut stdin, &mut reader, "5", "config.get", json!({}));
    let slots: Vec<String> = config
        .get("timeSlots")
        .and_then(|v| v.as_array())
        .expect("timeSlots")
        .iter()
        .filter_map(|v| v.as_str().map(|s| s.to_string()))
        .collect();
    for (i, slot) in slots.iter().enumerate() {
        let cell = request_ok(
            &mut stdin,
            &mut reader,
            &format!("cell-{}", i),
            "routine.cell",
            json!({ "classId": doomed_id, "day": "Saturday", "timeSlot": slot }),
        );
        assert!(
            cell.get("cell").map(|v| v.is_null()).unwrap_or(false),
            "slot {} should be empty",
            slot
        );
    }

    // No subject of the deleted class remains in the snapshot; the
    // survivor's schedule is untouched.
    let snapshot = request_ok(&mut stdin, &mut reader, "6", "routine.snapshot", json!({}));
    let subjects = snapshot.get("subjects").and_then(|v| v.as_array()).expect("subjects");
    assert!(subjects
        .iter()
        .all(|s| s.get("classId").and_then(|v| v.as_str()) != Some(doomed_id)));
    let routines = snapshot.get("routines").and_then(|v| v.as_array()).expect("routines");
    assert_eq!(routines.len(), 1);
    assert_eq!(
        routines[0].get("classId").and_then(|v| v.as_str()),
        Some(survivor_id)
    );

    let again = request(
        &mut stdin,
        &mut reader,
        "7",
        "classes.delete",
        json!({ "classId": doomed_id }),
    );
    assert_eq!(
        again.pointer("/error/code").and_then(|v| v.as_str()),
        Some("not_found")
    );
}

#[test]
fn class_listing_substitutes_placeholders_for_dangling_references() {
    let (_child, mut stdin, mut reader) = spawn_sidecar();

    let section = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "sections.create",
        json!({ "name": "Juniors" }),
    );
    let section_id = section.get("sectionId").and_then(|v| v.as_str()).expect("sectionId");
    let room = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "classrooms.create",
        json!({ "name": "Room A", "capacity": 18 }),
    );
    let room_id = room.get("roomId").and_then(|v| v.as_str()).expect("roomId");

    request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "classes.create",
        json!({ "name": "Grade 1", "sectionId": section_id, "roomId": room_id }),
    );

    request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "sections.delete",
        json!({ "sectionId": section_id }),
    );
    request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "classrooms.delete",
        json!({ "roomId": room_id }),
    );

    let classes = request_ok(&mut stdin, &mut reader, "6", "classes.list", json!({}));
    let class = &classes.get("classes").and_then(|v| v.as_array()).expect("classes")[0];
    assert_eq!(class.get("sectionName").and_then(|v| v.as_str()), Some("Unsectioned"));
    assert_eq!(class.get("roomName").and_then(|v| v.as_str()), Some("No Room"));
    assert_eq!(class.get("teacherName").and_then(|v| v.as_str()), Some("Unassigned"));
}
