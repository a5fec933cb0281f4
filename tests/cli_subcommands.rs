use predicates::str::diff;

mod common;

use common::{write_temp_config, BURST_CONFIG};

#[test]
fn list_presets_prints_supported_values() {
    let expected = concat!("dispatch-911\n", "single-shift\n", "fixed-rate\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dispatch-sim");
    cmd.arg("list-presets");
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn show_config_prints_parsed_configuration() {
    let path = write_temp_config("show", BURST_CONFIG, "toml");
    let expected = concat!(
        "Horizon: 10 min\n",
        "Seed: 1\n",
        "Batch: 5 runs from seed 404\n",
        "Windows:\n",
        "- burst [0, 1) arrivals: fixed 3.00/min, service: fixed(2.00) min, capacity: 1\n",
        "- quiet [1, 1440) arrivals: poisson 0.00/min, service: fixed(2.00) min, capacity: 1\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dispatch-sim");
    cmd.args(["show-config", "--config", path.to_str().unwrap()]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn show_config_prints_dispatch_preset() {
    let expected = concat!(
        "Horizon: 1440 min\n",
        "Seed: 404\n",
        "Batch: 5 runs from seed 404\n",
        "Windows:\n",
        "- off-peak [960, 480) arrivals: poisson 0.50/min, service: normal(5.00, 1.00) min, capacity: 12\n",
        "- morning [480, 720) arrivals: poisson 1.50/min, service: normal(7.00, 2.00) min, capacity: 12\n",
        "- peak [720, 960) arrivals: poisson 2.50/min, service: normal(10.00, 3.00) min, capacity: 12\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dispatch-sim");
    cmd.args(["show-config", "--preset", "dispatch-911"]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn batch_reports_each_seeded_run() {
    let path = write_temp_config("batch", BURST_CONFIG, "toml");
    let expected = concat!(
        "Batch:\n",
        "runs: 2\n",
        "base_seed: 7\n",
        "Runs:\n",
        "Run 0 (seed 7): total_calls=3 completed=3 avg_wait=2.00 max_wait=4.00 avg_duration=2.00\n",
        "Run 1 (seed 8): total_calls=3 completed=3 avg_wait=2.00 max_wait=4.00 avg_duration=2.00\n",
        "Aggregate:\n",
        "avg_total_calls: 3.00\n",
        "avg_wait: 2.00 min\n",
        "max_wait: 4.00 min\n",
        "avg_duration: 2.00 min\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dispatch-sim");
    cmd.args([
        "batch",
        "--config",
        path.to_str().unwrap(),
        "--runs",
        "2",
        "--base-seed",
        "7",
    ]);
    cmd.assert().success().stdout(diff(expected));
}

#[test]
fn batch_summary_omits_rows() {
    let path = write_temp_config("batch-summary", BURST_CONFIG, "toml");
    let expected = concat!(
        "Batch:\n",
        "runs: 3\n",
        "base_seed: 404\n",
        "Aggregate:\n",
        "avg_total_calls: 3.00\n",
        "avg_wait: 2.00 min\n",
        "max_wait: 4.00 min\n",
        "avg_duration: 2.00 min\n",
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dispatch-sim");
    cmd.args([
        "batch",
        "--config",
        path.to_str().unwrap(),
        "--runs",
        "3",
        "--format",
        "summary",
    ]);
    cmd.assert().success().stdout(diff(expected));
}
