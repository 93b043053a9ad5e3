//! Integration tests for the `nmeta` binary.
//!
//! Every test runs the binary against a fresh temp directory with HOME
//! pointed inside it, so no user configuration leaks in or out.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use serde_json::Value;

// =============================================================================
// Test Fixtures
// =============================================================================

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn nmeta(&self) -> Command {
        let home = self.path().join("home");
        let mut cmd = Command::cargo_bin("nmeta").expect("binary builds");
        cmd.current_dir(self.path())
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env_remove("NEUROMETA_CONFIG")
            .env_remove("NEUROMETA_LOG");
        cmd
    }

    fn write(&self, name: &str, contents: &str) {
        self.dir
            .child(name)
            .write_str(contents)
            .expect("failed to write fixture");
    }

    fn read_json(&self, name: &str) -> Value {
        let text = fs::read_to_string(self.path().join(name)).expect("failed to read output");
        serde_json::from_str(&text).expect("output is JSON")
    }

    /// Write the SmartSPIM example and return its file name.
    fn smartspim(&self) -> &'static str {
        self.nmeta().args(["example", "smartspim"]).assert().success();
        "aind_smartspim_instrument.json"
    }
}

const PROCESSING: &str = r#"{
  "kind": "processing",
  "schema_version": "0.2.5",
  "processing_pipeline": {
    "person": "Jane Doe",
    "data_processes": [
      {
        "name": "Image destriping",
        "software_version": "0.2.1",
        "start_date_time": "2023-10-16T10:00:00Z",
        "end_date_time": "2023-10-16T10:45:00Z",
        "input_location": "/data/raw",
        "output_location": "/data/destriped",
        "code_url": "https://example.org/destripe"
      }
    ]
  }
}"#;

// =============================================================================
// example
// =============================================================================

mod example {
    use super::*;

    #[test]
    fn writes_standard_file() {
        let ws = Workspace::new();
        ws.nmeta()
            .args(["example", "smartspim"])
            .assert()
            .success()
            .stdout(predicate::str::contains("aind_smartspim_instrument.json"));

        let value = ws.read_json("aind_smartspim_instrument.json");
        assert_eq!(value["kind"], "instrument");
        assert_eq!(value["schema_version"], "0.5.4");
        assert_eq!(value["instrument_id"], "SmartSPIM1-3");
    }

    #[test]
    fn prefix_and_directory_flags() {
        let ws = Workspace::new();
        ws.nmeta()
            .args(["example", "smartspim", "--prefix", "rig3", "--output-dir", "metadata"])
            .assert()
            .success();

        ws.dir
            .child("metadata/rig3_instrument.json")
            .assert(predicate::path::is_file());
    }

    #[test]
    fn rejects_prefix_with_separator() {
        let ws = Workspace::new();
        ws.nmeta()
            .args(["example", "smartspim", "--prefix", "a/b"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("invalid file prefix"));
    }

    #[test]
    fn quiet_suppresses_output() {
        let ws = Workspace::new();
        ws.nmeta()
            .args(["--quiet", "example", "smartspim"])
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }
}

// =============================================================================
// validate
// =============================================================================

mod validate {
    use super::*;

    #[test]
    fn accepts_valid_files() {
        let ws = Workspace::new();
        let instrument = ws.smartspim();
        ws.write("processing.json", PROCESSING);

        ws.nmeta()
            .args(["validate", instrument, "processing.json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("valid instrument v0.5.4"))
            .stdout(predicate::str::contains("valid processing v0.2.5"));
    }

    #[test]
    fn reports_every_issue() {
        let ws = Workspace::new();
        let broken = PROCESSING
            .replace("\"Image destriping\"", "\"Image sharpening\"")
            .replace("\"2023-10-16T10:45:00Z\"", "\"yesterday\"");
        ws.write("processing.json", &broken);

        ws.nmeta()
            .args(["validate", "processing.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains(
                "processing_pipeline.data_processes[0].name",
            ))
            .stderr(predicate::str::contains(
                "processing_pipeline.data_processes[0].end_date_time",
            ))
            .stderr(predicate::str::contains("1 of 1 file(s) failed validation"));
    }

    #[test]
    fn unknown_kind() {
        let ws = Workspace::new();
        ws.write("session.json", r#"{"kind": "session", "schema_version": "0.1.0"}"#);

        ws.nmeta()
            .args(["validate", "session.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("kind"));
    }

    #[test]
    fn nested_schema_is_not_a_file_kind() {
        let ws = Workspace::new();
        ws.write(
            "transform.json",
            r#"{"kind": "scale_transform", "schema_version": "0.1.0", "scale": [1, 1, 1]}"#,
        );

        ws.nmeta()
            .args(["validate", "transform.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("kind"))
            .stderr(predicate::str::contains("1 of 1 file(s) failed validation"));
    }

    #[test]
    fn not_json() {
        let ws = Workspace::new();
        ws.write("notes.json", "instrument: yes");

        ws.nmeta()
            .args(["validate", "notes.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("failed to parse"));
    }

    #[test]
    fn missing_file() {
        let ws = Workspace::new();
        ws.nmeta()
            .args(["validate", "absent.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read"));
    }
}

// =============================================================================
// normalize
// =============================================================================

mod normalize {
    use super::*;

    #[test]
    fn prints_canonical_form() {
        let ws = Workspace::new();
        ws.write("processing.json", PROCESSING);

        let output = ws
            .nmeta()
            .args(["normalize", "processing.json"])
            .output()
            .expect("runs");
        assert!(output.status.success());

        let value: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["kind", "schema_version", "described_by", "processing_pipeline", "analysis", "notes"]
        );
        let process = &value["processing_pipeline"]["data_processes"][0];
        assert_eq!(process["parameters"], serde_json::json!({}));
        assert!(process["notes"].is_null());
    }

    #[test]
    fn write_in_place_is_stable() {
        let ws = Workspace::new();
        ws.write("processing.json", PROCESSING);

        ws.nmeta()
            .args(["normalize", "processing.json", "--write"])
            .assert()
            .success();
        let first = fs::read_to_string(ws.path().join("processing.json")).unwrap();

        ws.nmeta()
            .args(["normalize", "processing.json", "--write"])
            .assert()
            .success();
        let second = fs::read_to_string(ws.path().join("processing.json")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn compact_without_defaults() {
        let ws = Workspace::new();
        ws.write("processing.json", PROCESSING);

        ws.nmeta()
            .args(["normalize", "processing.json", "--compact", "--omit-defaults"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("{\"kind\":\"processing\""))
            .stdout(predicate::str::contains("\"parameters\"").not())
            .stdout(predicate::str::contains("null").not());
    }

    #[test]
    fn refuses_invalid_input() {
        let ws = Workspace::new();
        ws.write("processing.json", &PROCESSING.replace("\"person\": \"Jane Doe\",", ""));

        ws.nmeta()
            .args(["normalize", "processing.json", "--write"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("not a valid record"));

        assert_eq!(
            fs::read_to_string(ws.path().join("processing.json")).unwrap(),
            PROCESSING.replace("\"person\": \"Jane Doe\",", "")
        );
    }
}

// =============================================================================
// describe / vocab
// =============================================================================

mod catalog {
    use super::*;

    #[test]
    fn lists_schemas() {
        Workspace::new()
            .nmeta()
            .arg("describe")
            .assert()
            .success()
            .stdout(predicate::str::contains("instrument"))
            .stdout(predicate::str::contains("acquisition_tile"));
    }

    #[test]
    fn describes_one_schema() {
        Workspace::new()
            .nmeta()
            .args(["describe", "objective"])
            .assert()
            .success()
            .stdout(predicate::str::contains("numerical_aperture"))
            .stdout(predicate::str::contains("> 0 and <= 2"))
            .stdout(predicate::str::contains("enum Manufacturer"));
    }

    #[test]
    fn lists_nested_schemas_separately() {
        Workspace::new()
            .nmeta()
            .arg("describe")
            .assert()
            .success()
            .stdout(predicate::str::contains("scale_transform"))
            .stdout(predicate::str::contains("+ only nested inside a union field"));
    }

    #[test]
    fn describes_nested_schema() {
        Workspace::new()
            .nmeta()
            .args(["describe", "affine_transform"])
            .assert()
            .success()
            .stdout(predicate::str::contains("affinetransform"));
    }

    #[test]
    fn unknown_schema_fails() {
        Workspace::new()
            .nmeta()
            .args(["describe", "mouse"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown schema 'mouse'"));
    }

    #[test]
    fn vocabulary_entries() {
        Workspace::new()
            .nmeta()
            .args(["vocab", "immersion"])
            .assert()
            .success()
            .stdout(predicate::str::contains("water"))
            .stdout(predicate::str::contains("oil"));
    }

    #[test]
    fn unknown_vocabulary_fails() {
        Workspace::new()
            .nmeta()
            .args(["vocab", "colours"])
            .assert()
            .failure();
    }
}

// =============================================================================
// config
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn set_then_get_project_value() {
        let ws = Workspace::new();
        ws.nmeta()
            .args(["config", "set", "output.prefix", "exp1"])
            .assert()
            .success();

        ws.dir
            .child(".neurometa/config.toml")
            .assert(predicate::str::contains("prefix = \"exp1\""));
        ws.nmeta()
            .args(["config", "get", "output.prefix"])
            .assert()
            .success()
            .stdout("exp1\n");
    }

    #[test]
    fn configured_prefix_names_example_file() {
        let ws = Workspace::new();
        ws.nmeta()
            .args(["config", "set", "output.prefix", "exp1"])
            .assert()
            .success();
        ws.nmeta().args(["example", "smartspim"]).assert().success();

        ws.dir
            .child("exp1_instrument.json")
            .assert(predicate::path::is_file());
    }

    #[test]
    fn global_value_is_overridden_by_project() {
        let ws = Workspace::new();
        ws.nmeta()
            .args(["config", "set", "--global", "output.pretty", "false"])
            .assert()
            .success();
        ws.dir
            .child("home/.neurometa/config.toml")
            .assert(predicate::path::is_file());

        ws.nmeta()
            .args(["config", "get", "output.pretty"])
            .assert()
            .stdout("false\n");

        ws.nmeta()
            .args(["config", "set", "output.pretty", "true"])
            .assert()
            .success();
        ws.nmeta()
            .args(["config", "get", "output.pretty"])
            .assert()
            .stdout("true\n");
    }

    #[test]
    fn list_shows_unset_keys() {
        Workspace::new()
            .nmeta()
            .args(["config", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("output.directory = (not set)"));
    }

    #[test]
    fn debug_flag_logs_loaded_files() {
        let ws = Workspace::new();
        ws.nmeta()
            .args(["config", "set", "output.prefix", "exp1"])
            .assert()
            .success();

        ws.nmeta()
            .args(["--debug", "config", "list"])
            .assert()
            .success()
            .stderr(predicate::str::contains("project config:"))
            .stderr(predicate::str::contains("[debug]").not());

        ws.nmeta()
            .args(["config", "list"])
            .assert()
            .success()
            .stderr(predicate::str::contains("project config:").not());
    }

    #[test]
    fn rejects_unknown_key() {
        Workspace::new()
            .nmeta()
            .args(["config", "set", "output.colour", "blue"])
            .assert()
            .failure();
    }

    #[test]
    fn rejects_bad_boolean() {
        Workspace::new()
            .nmeta()
            .args(["config", "set", "output.pretty", "sometimes"])
            .assert()
            .failure();
    }
}

// =============================================================================
// completion
// =============================================================================

#[test]
fn completion_script() {
    Workspace::new()
        .nmeta()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nmeta"));
}
