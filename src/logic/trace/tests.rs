use std::fs;

use tempfile::tempdir;
use uuid::Uuid;

use super::record::TraceRecord;
use super::writer::TraceWriter;
use crate::logic::agent::BlueAction;
use crate::logic::comms::CommMessage;
use crate::logic::config::EncoderConfig;
use crate::logic::features::{AgentObservationVector, ObservationSchema};

fn record(step: u64) -> TraceRecord {
    let schema = ObservationSchema::for_agent(1, &EncoderConfig::default());
    let mut values = vec![0; schema.width()];
    values[1] = 1;
    let vector = AgentObservationVector::from_values(1, schema, values).unwrap();

    TraceRecord::new(Uuid::new_v4(), step, &vector, CommMessage::from_byte(0b1000_0001))
}

#[test]
fn test_trace_append_and_read() {
    let dir = tempdir().unwrap();
    let mut writer = TraceWriter::from_path(dir.path()).unwrap();

    let original = record(7).with_action(Some(BlueAction::Monitor), false);
    writer.append(&original).unwrap();
    writer.flush().unwrap();

    // Should be 1 file ending in jsonl
    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(entries.len(), 1);
    let name = entries[0].file_name().unwrap().to_str().unwrap().to_string();
    assert!(name.starts_with("trace-") && name.ends_with("-0000.jsonl"));

    let content = fs::read_to_string(&entries[0]).unwrap();
    let deserialized: TraceRecord = serde_json::from_str(content.trim()).unwrap();

    assert_eq!(deserialized, original);
    assert_eq!(deserialized.observation[1], 1);
    assert!(deserialized.message.waiting());
    assert_eq!(writer.records(), 1);
}

#[test]
fn test_message_stored_as_bits() {
    let line = serde_json::to_value(record(0)).unwrap();
    assert_eq!(line["message"], serde_json::json!([1, 0, 0, 0, 0, 0, 0, 1]));
    assert_eq!(line["schema"], "Short");
}

#[test]
fn test_rotation_creates_new_file() {
    let dir = tempdir().unwrap();
    let mut writer = TraceWriter::from_path(dir.path()).unwrap().with_max_file_size(1);

    writer.append(&record(0)).unwrap();
    writer.append(&record(1)).unwrap();

    let stats = writer.get_stats().unwrap();
    assert_eq!(stats.total_files, 2);
    assert!(stats.current_file.ends_with("-0001.jsonl"));
}

#[test]
fn test_reopen_appends_to_latest() {
    let dir = tempdir().unwrap();
    {
        let mut writer = TraceWriter::from_path(dir.path()).unwrap();
        writer.append(&record(0)).unwrap();
    }

    let mut writer = TraceWriter::from_path(dir.path()).unwrap();
    writer.append(&record(1)).unwrap();
    writer.flush().unwrap();

    let stats = writer.get_stats().unwrap();
    assert_eq!(stats.total_files, 1);

    let path = dir.path().join(&stats.current_file);
    let lines = fs::read_to_string(path).unwrap();
    assert_eq!(lines.lines().count(), 2);
}

#[test]
fn test_empty_dir_stats() {
    let dir = tempdir().unwrap();
    let writer = TraceWriter::from_path(dir.path().join("nested")).unwrap();

    let stats = writer.get_stats().unwrap();
    assert_eq!(stats.total_files, 0);
    assert_eq!(stats.current_file, "None");
}
