use predicates::str::contains;

mod common;

use common::write_temp_config;

const OVERLAPPING: &str = r#"
horizon_minutes = 60

[[windows]]
label = "a"
start_minute = 0
end_minute = 700
arrival_rate = 1.0
service_mean = 5.0
service_stddev = 1.0
target_capacity = 2

[[windows]]
label = "b"
start_minute = 600
end_minute = 1440
arrival_rate = 1.0
service_mean = 5.0
service_stddev = 1.0
target_capacity = 2
"#;

const GAP: &str = r#"
horizon_minutes = 60

[[windows]]
label = "morning"
start_minute = 0
end_minute = 720
arrival_rate = 1.0
service_mean = 5.0
service_stddev = 1.0
target_capacity = 2
"#;

#[test]
fn overlapping_windows_fail() {
    let path = write_temp_config("overlap", OVERLAPPING, "toml");
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dispatch-sim");
    cmd.args(["run", "--config", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: shift windows 'a' and 'b' overlap at minute 600"));
}

#[test]
fn uncovered_minutes_fail() {
    let path = write_temp_config("gap", GAP, "toml");
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dispatch-sim");
    cmd.args(["batch", "--config", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: shift windows leave minute 720 uncovered"));
}

#[test]
fn zero_horizon_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dispatch-sim");
    cmd.args(["run", "--preset", "single-shift", "--horizon", "0"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: horizon must be greater than 0 minutes"));
}

#[test]
fn zero_runs_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dispatch-sim");
    cmd.args(["batch", "--preset", "fixed-rate", "--runs", "0"]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: batch runs must be greater than 0"));
}

#[test]
fn unsupported_config_extension_fails() {
    let path = write_temp_config("yaml", "horizon_minutes: 10\n", "yaml");
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dispatch-sim");
    cmd.args(["run", "--config", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: unsupported config format 'yaml'"));
}

#[test]
fn negative_capacity_fails_to_parse() {
    let config = GAP
        .replace("end_minute = 720", "end_minute = 1440")
        .replace("target_capacity = 2", "target_capacity = -1");
    let path = write_temp_config("negative", &config, "toml");
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dispatch-sim");
    cmd.args(["run", "--config", path.to_str().unwrap()]);
    cmd.assert()
        .failure()
        .stderr(contains("Error: failed to parse TOML"));
}

#[test]
fn unknown_preset_fails() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dispatch-sim");
    cmd.args(["run", "--preset", "nope"]);
    cmd.assert()
        .failure()
        .stderr(contains("invalid value 'nope'"));
}
