use std::fs;
use std::sync::Arc;

use dayPlanner::handlers::planner::PlannerEngine;
use dayPlanner::service::notification_service::LogSink;
use dayPlanner::storage::{load_schedule, FileBlobStore};
use serde::Deserialize;

#[derive(Deserialize)]
struct ScriptLine {
    text: String,
    expect: String,
}

const SCRIPT: &str = r#"{"text":"schedule meeting at 3pm","expect":"scheduled"}
{"text":"add lunch at 12:30pm","expect":"scheduled"}
{"text":"meeting at 2pm","expect":"scheduled"}
{"text":"3pm team call","expect":"conflict_at_slot"}
{"text":"dinner at 7 o'clock","expect":"scheduled"}
{"text":"15:30 workout","expect":"scheduled"}
{"text":"book appointment at 10am","expect":"scheduled"}
{"text":"meeting for 4pm","expect":"scheduled"}
{"text":"9pm movie","expect":"scheduled"}
{"text":"workout at 6:30pm","expect":"scheduled"}
{"text":"reschedule meeting to 4pm","expect":"conflict_at_slot"}
{"text":"move lunch to 1pm","expect":"rescheduled"}
{"text":"cancel meeting at 3pm","expect":"cancelled"}
{"text":"delete lunch","expect":"cancelled"}
{"text":"remove 2pm meeting","expect":"cancelled"}
{"text":"party at 99:99","expect":"time_unparseable"}
{"text":"sleep at 2am","expect":"no_slot_within_range"}
{"text":"xyz abc 99:99","expect":"command_unrecognized"}"#;

#[test]
fn voice_command_script_builds_expected_day() {
    let temp_dir = tempfile::tempdir().unwrap();
    let script_path = temp_dir.path().join("script.jsonl");
    fs::write(&script_path, SCRIPT).unwrap();

    let store = Arc::new(FileBlobStore::new(temp_dir.path().join("data")));
    let mut engine = PlannerEngine::load(store.clone(), Arc::new(LogSink));

    let content = fs::read_to_string(&script_path).unwrap();
    for line in content.lines() {
        let step: ScriptLine = serde_json::from_str(line).unwrap();
        let outcome = engine.process_command(&step.text);
        let tagged = serde_json::to_value(&outcome).unwrap();
        assert_eq!(tagged["outcome"], step.expect.as_str(), "{}", step.text);
    }

    let day: Vec<(String, String)> = load_schedule(store.as_ref())
        .iter()
        .map(|(slot, label)| (slot.canonical(), label.to_string()))
        .collect();
    let expected = [
        ("10:00", "appointment"),
        ("15:30", "workout"),
        ("16:00", "meeting"),
        ("18:30", "workout"),
        ("19:00", "dinner"),
        ("21:00", "movie"),
    ]
    .map(|(slot, label)| (slot.to_string(), label.to_string()));
    assert_eq!(day, expected);
}
