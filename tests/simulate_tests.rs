use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

const SCENARIOS_JSON: &str = r#"{
  "current": {
    "steps": {
      "Task_receive": { "name": "Receive invoice", "duration": 30, "resources": 1, "hourlyRate": 40 },
      "Task_approve": { "name": "Approve invoice", "duration": 60, "resources": 2, "hourlyRate": 55, "complexity": 1.2 }
    }
  },
  "optimized": {
    "steps": {
      "Task_receive": { "name": "Receive invoice", "duration": 20, "resources": 1, "hourlyRate": 40 },
      "Task_approve": { "name": "Approve invoice", "duration": 45, "resources": 1, "hourlyRate": 55, "skillLevel": "expert" }
    }
  }
}"#;

#[test]
fn simulate_saves_run_and_writes_results() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("invoice.json");
    input.write_str(SCENARIOS_JSON).unwrap();
    let output = temp.child("results.json");
    let database = temp.child("runs.db");

    let mut cmd = assert_cmd::cargo_bin_cmd!("procsim");
    cmd.args([
        "simulate",
        "-i",
        input.path().to_str().unwrap(),
        "-p",
        "invoice",
        "-o",
        output.path().to_str().unwrap(),
        "-d",
        database.path().to_str().unwrap(),
        "--seed",
        "42",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Scenario: current"))
        .stdout(predicate::str::contains("Scenario: optimized"))
        .stdout(predicate::str::contains("Compared to current:"))
        .stdout(predicate::str::contains("Simulation run saved with id 1"));

    let results = fs::read_to_string(output.path()).unwrap();
    assert!(results.contains("\"totalTime\""));
    assert!(results.contains("\"bottlenecks\""));
    assert!(results.contains("\"Task_approve\""));
    assert!(results.find("\"current\"").unwrap() < results.find("\"optimized\"").unwrap());
    database.assert(predicate::path::exists());
}

#[test]
fn simulate_with_same_seed_is_reproducible() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("invoice.json");
    input.write_str(SCENARIOS_JSON).unwrap();

    let mut outputs = Vec::new();
    for name in ["first.json", "second.json"] {
        let output = temp.child(name);
        let mut cmd = assert_cmd::cargo_bin_cmd!("procsim");
        cmd.args([
            "simulate",
            "-i",
            input.path().to_str().unwrap(),
            "-p",
            "invoice",
            "-o",
            output.path().to_str().unwrap(),
            "--no-store",
            "--seed",
            "7",
        ]);
        cmd.assert().success();
        outputs.push(fs::read_to_string(output.path()).unwrap());
    }

    assert_eq!(outputs[0], outputs[1]);
}

#[test]
fn simulate_no_store_does_not_create_database() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("invoice.json");
    input.write_str(SCENARIOS_JSON).unwrap();
    let database = temp.child("runs.db");

    let mut cmd = assert_cmd::cargo_bin_cmd!("procsim");
    cmd.args([
        "simulate",
        "-i",
        input.path().to_str().unwrap(),
        "-p",
        "invoice",
        "-d",
        database.path().to_str().unwrap(),
        "--no-store",
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Simulation Results"))
        .stdout(predicate::str::contains("saved with id").not());
    database.assert(predicate::path::missing());
}

#[test]
fn simulate_still_reports_results_when_database_is_unavailable() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("invoice.json");
    input.write_str(SCENARIOS_JSON).unwrap();
    let database = temp.path().join("missing-dir").join("runs.db");

    let mut cmd = assert_cmd::cargo_bin_cmd!("procsim");
    cmd.args([
        "simulate",
        "-i",
        input.path().to_str().unwrap(),
        "-p",
        "invoice",
        "-d",
        database.to_str().unwrap(),
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Scenario: optimized"))
        .stderr(predicate::str::contains("Warning"));
}

#[test]
fn simulate_rejects_invalid_step_and_stores_nothing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("broken.json");
    input
        .write_str(
            r#"{
  "current": { "steps": { "A": { "duration": 30 } } },
  "optimized": { "steps": { "A": { "duration": 0 } } }
}"#,
        )
        .unwrap();
    let database = temp.child("runs.db");

    let mut cmd = assert_cmd::cargo_bin_cmd!("procsim");
    cmd.args([
        "simulate",
        "-i",
        input.path().to_str().unwrap(),
        "-p",
        "invoice",
        "-d",
        database.path().to_str().unwrap(),
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to simulate scenarios"));

    let mut list = assert_cmd::cargo_bin_cmd!("procsim");
    list.args([
        "list-runs",
        "-p",
        "invoice",
        "-d",
        database.path().to_str().unwrap(),
    ]);
    list.assert()
        .success()
        .stdout(predicate::str::contains("No simulation runs for process invoice"));
}

#[test]
fn simulate_rejects_duplicate_step_ids() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("duplicate.json");
    input
        .write_str(
            r#"{ "current": { "steps": { "A": { "duration": 30 }, "A": { "duration": 40 } } } }"#,
        )
        .unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("procsim");
    cmd.args([
        "simulate",
        "-i",
        input.path().to_str().unwrap(),
        "-p",
        "invoice",
        "--no-store",
    ]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("duplicate key: A"));
}
