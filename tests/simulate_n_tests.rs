use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;

#[test]
fn simulate_n_writes_percentile_report() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("claims.json");
    input
        .write_str(
            r#"{
  "current": { "steps": { "Task_check": { "duration": 40, "hourlyRate": 50 } } },
  "optimized": { "steps": { "Task_check": { "duration": 40, "hourlyRate": 50, "complexity": 0.8 } } }
}"#,
        )
        .unwrap();
    let output = temp.child("report.yaml");

    let mut cmd = assert_cmd::cargo_bin_cmd!("procsim");
    cmd.args([
        "simulate-n",
        "-i",
        input.path().to_str().unwrap(),
        "-n",
        "200",
        "-o",
        output.path().to_str().unwrap(),
        "--seed",
        "11",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Iterations: 200"))
        .stdout(predicate::str::contains("P85 | "))
        .stdout(predicate::str::contains(
            "Simulation report for 200 iterations written to",
        ));

    let report = fs::read_to_string(output.path()).unwrap();
    assert!(report.contains("data_source: claims.json"));
    assert!(report.contains("iterations: 200"));
    assert!(report.contains("p85:"));
    assert!(!temp.path().join("report.yaml.png").exists());
}

#[test]
fn simulate_n_rejects_zero_iterations() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("claims.json");
    input
        .write_str(r#"{ "current": { "steps": { "A": { "duration": 40 } } } }"#)
        .unwrap();

    let mut cmd = assert_cmd::cargo_bin_cmd!("procsim");
    cmd.args(["simulate-n", "-i", input.path().to_str().unwrap(), "-n", "0"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("iterations must be greater than zero"));
}

#[test]
fn simulate_n_writes_histogram_next_to_report() {
    let temp = assert_fs::TempDir::new().unwrap();
    let input = temp.child("claims.yaml");
    input
        .write_str(
            r#"
current:
  steps:
    Task_check:
      duration: 40
      hourlyRate: 50
    Task_pay:
      duration: 15
      hourlyRate: 35
"#,
        )
        .unwrap();
    let output = temp.child("report.yaml");
    let output_arg = output.path().to_str().unwrap().to_string();
    let histogram_path = format!("{output_arg}.png");

    let mut cmd = assert_cmd::cargo_bin_cmd!("procsim");
    cmd.args([
        "simulate-n",
        "-i",
        input.path().to_str().unwrap(),
        "-n",
        "100",
        "-o",
        &output_arg,
        "--histogram-scenario",
        "current",
        "--seed",
        "5",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Simulation histogram written to"));

    output.assert(predicate::path::exists());
    assert!(fs::metadata(&histogram_path).is_ok());
}
