use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use adl_roundtrip_cli::producer::Producer;
use adl_roundtrip_cli::{Batch, BatchError, BatchSummary};
use adl_roundtrip_engine::{DiffError, DiffOutput, DiffPrimitive, Normalizer};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const RECTANGLE: &str = "rectangle {\n\t\"basic attribute\" {\n\t\tclr=14\n\t\twidth=1\n\t}\n}\n";

/// Saves each input with an optional per-file rewrite into `output`.
struct FakeProducer {
    output: PathBuf,
    rewrites: HashMap<String, (String, String)>,
    fail_on: Option<(String, i32)>,
    calls: Cell<usize>,
}

impl FakeProducer {
    fn new(dir: &Path) -> Self {
        Self {
            output: dir.join("saved.adl"),
            rewrites: HashMap::new(),
            fail_on: None,
            calls: Cell::new(0),
        }
    }

    fn rewrite(mut self, file: &str, from: &str, to: &str) -> Self {
        self.rewrites
            .insert(file.to_string(), (from.to_string(), to.to_string()));
        self
    }

    fn failing_on(mut self, file: &str, status: i32) -> Self {
        self.fail_on = Some((file.to_string(), status));
        self
    }
}

impl Producer for FakeProducer {
    fn regenerate(&self, input: &Path) -> Result<PathBuf, BatchError> {
        self.calls.set(self.calls.get() + 1);
        let name = input.file_name().unwrap().to_string_lossy().into_owned();
        if let Some((file, status)) = &self.fail_on {
            if *file == name {
                return Err(BatchError::ProducerFailed {
                    program: PathBuf::from("qtedm"),
                    input: input.to_path_buf(),
                    status: Some(*status),
                    stdout: String::new(),
                    stderr: "cannot open display".into(),
                });
            }
        }
        let mut text = std::fs::read_to_string(input).unwrap();
        if let Some((from, to)) = self.rewrites.get(&name) {
            text = text.replace(from.as_str(), to);
        }
        std::fs::write(&self.output, text).unwrap();
        Ok(self.output.clone())
    }
}

/// Answers with a canned diff per original file name, `Identical` otherwise.
#[derive(Default)]
struct FakeDiff {
    outputs: HashMap<String, String>,
    fail_status: Option<i32>,
    seen: RefCell<Vec<(PathBuf, PathBuf)>>,
}

impl FakeDiff {
    fn with(mut self, file: &str, diff: &str) -> Self {
        self.outputs.insert(file.to_string(), diff.to_string());
        self
    }

    fn failing(status: i32) -> Self {
        Self {
            fail_status: Some(status),
            ..Self::default()
        }
    }
}

impl DiffPrimitive for FakeDiff {
    fn diff(&self, saved: &Path, original: &Path) -> Result<DiffOutput, DiffError> {
        self.seen
            .borrow_mut()
            .push((saved.to_path_buf(), original.to_path_buf()));
        if let Some(status) = self.fail_status {
            return Err(DiffError::ToolFailed {
                program: "diff".into(),
                saved: saved.to_path_buf(),
                original: original.to_path_buf(),
                status: Some(status),
                stderr: "diff: memory exhausted".into(),
            });
        }
        let name = original.file_name().unwrap().to_string_lossy().into_owned();
        Ok(match self.outputs.get(&name) {
            Some(text) => DiffOutput::Differences(text.clone()),
            None => DiffOutput::Identical,
        })
    }
}

fn displays(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        std::fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

fn run(
    dir: &Path,
    producer: &FakeProducer,
    differ: &FakeDiff,
    keep_going: bool,
) -> (Result<BatchSummary, BatchError>, String) {
    let batch = Batch::new(dir.to_path_buf(), "adl", producer, differ, Normalizer::default())
        .keep_going(keep_going);
    let mut out = Vec::new();
    let result = batch.run(&mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn empty_directory_succeeds_with_message() {
    let dir = displays(&[("notes.txt", "")]);
    let work = TempDir::new().unwrap();
    let producer = FakeProducer::new(work.path());

    let (result, out) = run(dir.path(), &producer, &FakeDiff::default(), false);

    assert_eq!(result.unwrap(), BatchSummary::default());
    assert!(out.starts_with("No ADL files found in "));
    assert_eq!(producer.calls.get(), 0);
}

#[test]
fn identical_files_pass() {
    let dir = displays(&[("a.adl", RECTANGLE), ("b.adl", RECTANGLE)]);
    let work = TempDir::new().unwrap();
    let producer = FakeProducer::new(work.path());
    let differ = FakeDiff::default();

    let (result, out) = run(dir.path(), &producer, &differ, false);

    let summary = result.unwrap();
    assert_eq!(summary.checked, 2);
    assert_eq!(summary.identical, 2);
    assert_eq!(out, "All ADL files processed successfully.\n");

    let seen = differ.seen.borrow();
    assert_eq!(seen[0].0, work.path().join("saved.adl"));
    assert!(seen[0].1.ends_with("a.adl"));
}

#[test]
fn version_line_added_on_save_is_ignorable() {
    let dir = displays(&[("a.adl", RECTANGLE)]);
    let work = TempDir::new().unwrap();
    let producer = FakeProducer::new(work.path()).rewrite("a.adl", "rectangle {", "version=030111\nrectangle {");
    let differ = FakeDiff::default().with("a.adl", "@@ -1,2 +1 @@\n-version=030111\n rectangle {\n");

    let (result, out) = run(dir.path(), &producer, &differ, false);

    let summary = result.unwrap();
    assert_eq!(summary.ignorable, 1);
    assert_eq!(out, "All ADL files processed successfully.\n");
}

#[test]
fn halts_on_first_divergence() {
    let dir = displays(&[("a.adl", RECTANGLE), ("b.adl", RECTANGLE)]);
    let work = TempDir::new().unwrap();
    let producer = FakeProducer::new(work.path()).rewrite("a.adl", "clr=14", "clr=15");
    let differ = FakeDiff::default().with("a.adl", "@@ -3 +3 @@\n-\t\tclr=15\n+\t\tclr=14\n");

    let (result, out) = run(dir.path(), &producer, &differ, false);

    let err = result.unwrap_err();
    assert!(matches!(err, BatchError::Divergent { count: 1 }));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(producer.calls.get(), 1);
    assert_eq!(
        out,
        "Unexpected differences found in a.adl:\n\
         \x20 first saved difference, line 3: clr=15\n\
         \x20 first original difference, line 3: clr=14\n\
         @@ -3 +3 @@\n-\t\tclr=15\n+\t\tclr=14\n"
    );
}

#[test]
fn keep_going_checks_every_file_then_fails() {
    let dir = displays(&[
        ("a.adl", RECTANGLE),
        ("b.adl", RECTANGLE),
        ("c.adl", RECTANGLE),
    ]);
    let work = TempDir::new().unwrap();
    let producer = FakeProducer::new(work.path())
        .rewrite("a.adl", "clr=14", "clr=15")
        .rewrite("c.adl", "clr=14", "clr=16");
    let differ = FakeDiff::default()
        .with("a.adl", "@@ -3 +3 @@\n-\t\tclr=15\n+\t\tclr=14\n")
        .with("c.adl", "@@ -3 +3 @@\n-\t\tclr=16\n+\t\tclr=14\n");

    let (result, out) = run(dir.path(), &producer, &differ, true);

    assert!(matches!(result, Err(BatchError::Divergent { count: 2 })));
    assert_eq!(producer.calls.get(), 3);
    assert!(out.contains("Unexpected differences found in a.adl:"));
    assert!(out.contains("Unexpected differences found in c.adl:"));
    assert!(out.contains("2 of 3 files diverged:\n"));
    assert!(!out.contains("processed successfully"));
}

#[test]
fn producer_failure_stops_batch_with_its_status() {
    let dir = displays(&[("a.adl", RECTANGLE), ("b.adl", RECTANGLE)]);
    let work = TempDir::new().unwrap();
    let producer = FakeProducer::new(work.path()).failing_on("a.adl", 3);

    let (result, _) = run(dir.path(), &producer, &FakeDiff::default(), true);

    let err = result.unwrap_err();
    assert_eq!(err.exit_code(), 3);
    assert!(err.to_string().contains("STDERR:\ncannot open display"));
    assert_eq!(producer.calls.get(), 1);
}

#[test]
fn diff_tool_failure_stops_batch_with_its_status() {
    let dir = displays(&[("a.adl", RECTANGLE), ("b.adl", RECTANGLE)]);
    let work = TempDir::new().unwrap();
    let producer = FakeProducer::new(work.path());
    let differ = FakeDiff::failing(2);

    let (result, out) = run(dir.path(), &producer, &differ, true);

    let err = result.unwrap_err();
    assert!(matches!(err, BatchError::Diff(_)));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(producer.calls.get(), 1);
    assert_eq!(differ.seen.borrow().len(), 1);
    assert!(out.is_empty());
}

#[test]
fn missing_directory_is_rejected() {
    let work = TempDir::new().unwrap();
    let producer = FakeProducer::new(work.path());

    let (result, out) = run(
        &work.path().join("no-such-dir"),
        &producer,
        &FakeDiff::default(),
        false,
    );

    assert!(matches!(result, Err(BatchError::NotADirectory(_))));
    assert!(out.is_empty());
}
