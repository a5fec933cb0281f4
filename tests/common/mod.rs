#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Three calls at t=0 served by one agent in two-minute calls.
pub const BURST_CONFIG: &str = r#"
horizon_minutes = 10
seed = 1

[[windows]]
label = "burst"
start_minute = 0
end_minute = 1
arrival_rate = 3.0
arrival_process = "fixed"
service_mean = 2.0
service_stddev = 0.0
service_process = "fixed"
target_capacity = 1

[[windows]]
label = "quiet"
start_minute = 1
end_minute = 1440
arrival_rate = 0.0
service_mean = 2.0
service_stddev = 0.0
service_process = "fixed"
target_capacity = 1
"#;

/// Two five-minute calls at t=0; capacity drops to one agent at minute 1
/// while both are still busy.
pub const DRAIN_CONFIG: &str = r#"
horizon_minutes = 6
seed = 1

[[windows]]
label = "opening"
start_minute = 0
end_minute = 1
arrival_rate = 2.0
arrival_process = "fixed"
service_mean = 5.0
service_stddev = 0.0
service_process = "fixed"
target_capacity = 2

[[windows]]
label = "night"
start_minute = 1
end_minute = 1440
arrival_rate = 0.0
service_mean = 5.0
service_stddev = 0.0
service_process = "fixed"
target_capacity = 1
"#;

pub fn write_temp_config(name: &str, contents: &str, extension: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time should be available")
        .as_nanos();
    path.push(format!("dispatch-sim-{}-{}.{}", name, nanos, extension));
    fs::write(&path, contents).expect("config write should succeed");
    path
}
