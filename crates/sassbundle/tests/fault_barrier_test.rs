//! Integration tests for the fault barrier and event contract, including:
//! - Construction-time validation failures
//! - Error reporting without raising from `run`
//! - Start/end event ordering and pairing across sequential runs

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use sassbundle::{BuildEvent, EventKind, EventSink, TaskError, TaskOptions, create_sass_task};
use tempfile::TempDir;

#[derive(Clone)]
struct Recorded {
    kind: EventKind,
    message: String,
    timestamp: Instant,
    start_time: Option<Instant>,
    error: Option<String>,
}

/// Event sink that records everything it sees.
#[derive(Clone, Default)]
struct Recorder {
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl Recorder {
    fn sink(&self) -> Arc<dyn EventSink> {
        let events = Arc::clone(&self.events);
        Arc::new(move |event: &BuildEvent| {
            events.lock().unwrap().push(Recorded {
                kind: event.kind,
                message: event.message.clone(),
                timestamp: event.timestamp,
                start_time: event.start_time,
                error: event.error.as_ref().map(|e| e.to_string()),
            });
        })
    }

    fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    fn count(&self, kind: EventKind) -> usize {
        self.events().iter().filter(|e| e.kind == kind).count()
    }
}

fn recording_options(recorder: &Recorder) -> TaskOptions {
    TaskOptions {
        log: Some(recorder.sink()),
        log_error: Some(recorder.sink()),
        ..TaskOptions::default()
    }
}

fn write_scss(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_empty_arguments_fail_before_any_run() {
    assert_eq!(
        create_sass_task("", "dist", TaskOptions::default()).unwrap_err(),
        TaskError::MissingInputPath
    );
    assert_eq!(
        create_sass_task("main.scss", "", TaskOptions::default()).unwrap_err(),
        TaskError::MissingOutputPath
    );
}

#[test]
fn test_compile_error_reports_once_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dist");
    // Unmatched brace
    let input = write_scss(dir.path(), "broken.scss", ".btn { color: red;\n");

    let recorder = Recorder::default();
    let task = create_sass_task(
        input.to_str().unwrap(),
        &out,
        recording_options(&recorder),
    )
    .unwrap();

    // Must not panic or raise
    let outcome = task.run();
    assert!(!outcome.is_completed());

    assert_eq!(recorder.count(EventKind::Start), 1);
    assert_eq!(recorder.count(EventKind::Error), 1);
    assert_eq!(recorder.count(EventKind::End), 0);

    let events = recorder.events();
    let error = events.iter().find(|e| e.kind == EventKind::Error).unwrap();
    assert_eq!(error.message, "Sass: error");
    assert!(error.error.as_deref().is_some_and(|m| m.contains("compile")));

    // A failed run produces no output file.
    assert!(!out.join("bundle.css").exists());
}

#[test]
fn test_missing_input_file_is_a_runtime_error() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dist");
    let missing = dir.path().join("missing.scss");

    let recorder = Recorder::default();
    // Construction succeeds: the path is non-empty, just absent on disk.
    let task = create_sass_task(
        missing.to_str().unwrap(),
        &out,
        recording_options(&recorder),
    )
    .unwrap();

    let outcome = task.run();
    assert!(!outcome.is_completed());

    assert_eq!(recorder.count(EventKind::Error), 1);
    let events = recorder.events();
    let error = events.iter().find(|e| e.kind == EventKind::Error).unwrap();
    assert!(
        error
            .error
            .as_deref()
            .is_some_and(|m| m.contains("file not found"))
    );
}

#[test]
fn test_missing_resource_aborts_run() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dist");
    let absent = dir.path().join("nope.png");
    let input = write_scss(
        dir.path(),
        "main.scss",
        &format!(".a {{ background: url(\"{}\"); }}\n", absent.display()),
    );

    let recorder = Recorder::default();
    let task = create_sass_task(
        input.to_str().unwrap(),
        &out,
        recording_options(&recorder),
    )
    .unwrap();

    let outcome = task.run();
    assert!(!outcome.is_completed());
    assert_eq!(recorder.count(EventKind::Error), 1);
    assert!(!out.join("bundle.css").exists());
}

#[test]
fn test_sequential_runs_pair_start_and_end_events() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dist");
    let input = write_scss(dir.path(), "main.scss", ".a { color: red; }\n");

    let recorder = Recorder::default();
    let task = create_sass_task(
        input.to_str().unwrap(),
        &out,
        recording_options(&recorder),
    )
    .unwrap();

    assert!(task.run().is_completed());
    assert!(task.run().is_completed());

    let events = recorder.events();
    assert_eq!(events.len(), 4);

    let kinds: Vec<_> = events.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::Start,
            EventKind::End,
            EventKind::Start,
            EventKind::End
        ]
    );

    assert_eq!(events[0].message, "Sass: starting");
    assert_eq!(events[1].message, "Sass: finished");

    // Each end event carries the start marker of its own run.
    assert_eq!(events[1].start_time, Some(events[0].timestamp));
    assert_eq!(events[3].start_time, Some(events[2].timestamp));
    assert_ne!(events[0].timestamp, events[2].timestamp);
}

#[test]
fn test_error_after_recovery_keeps_task_usable() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("dist");
    let input = write_scss(dir.path(), "main.scss", ".a { color: red;\n");

    let recorder = Recorder::default();
    let task = create_sass_task(
        input.to_str().unwrap(),
        &out,
        recording_options(&recorder),
    )
    .unwrap();

    // First run fails at the fault barrier.
    assert!(!task.run().is_completed());

    // Fix the input; the same task runs clean (watch-mode usage).
    write_scss(dir.path(), "main.scss", ".a { color: red; }\n");
    assert!(task.run().is_completed());

    assert_eq!(recorder.count(EventKind::Start), 2);
    assert_eq!(recorder.count(EventKind::Error), 1);
    assert_eq!(recorder.count(EventKind::End), 1);
    assert!(out.join("bundle.css").is_file());
}
