use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_combodex"));
    command
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("COMBODEX_CONFIG")
        .env_remove("COMBODEX_DATA_DIR")
        .env_remove("COMBODEX_WORKERS")
        .env("RUST_LOG", "warn");
    command
}

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("combodex-{name}-{stamp}"))
}

#[test]
fn missing_command_prints_usage() {
    let output = bin().output().expect("binary should run");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: combodex"));
}

#[test]
fn stats_command_emits_statistics_json() {
    let output = bin().arg("stats").output().expect("stats should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("stats should emit json");
    assert_eq!(payload["totalChampions"], 3);
    assert_eq!(payload["totalCombos"], 5);
}

#[test]
fn analyze_command_writes_requested_outputs() {
    let dir = unique_temp_path("analyze");
    let csv = dir.join("rankings.csv");

    let output = bin()
        .args(["analyze", "--out"])
        .arg(&dir)
        .arg("--csv")
        .arg(&csv)
        .output()
        .expect("analyze should run");

    assert_eq!(output.status.code(), Some(0));
    for file in ["champions.json", "combos.json", "statistics.json", "report.json"] {
        assert!(dir.join(file).exists(), "{file} should be written");
    }
    let rankings = fs::read_to_string(&csv).expect("rankings written");
    assert_eq!(rankings.lines().count(), 6);

    let _ = fs::remove_dir_all(dir);
}

#[test]
fn similar_command_emits_pairs() {
    let output = bin()
        .args(["similar", "0.7"])
        .output()
        .expect("similar should run");

    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("similar should emit json");
    let pairs = payload.as_array().expect("pair list");
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0]["championId"], "Ahri");
}

#[test]
fn variations_command_requires_combo_id() {
    let output = bin().arg("variations").output().expect("variations should run");
    assert_eq!(output.status.code(), Some(2));

    let output = bin()
        .args(["variations", "ahri_charm_combo_v1"])
        .output()
        .expect("variations should run");
    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("variations should emit json");
    assert_eq!(payload["variations"].as_array().map(Vec::len), Some(2));
}

#[test]
fn validate_command_returns_non_zero_on_invalid_data() {
    let path = unique_temp_path("invalid-combos.json");
    fs::write(&path, r#"[{"id":"x","championId":"","abilities":[]}]"#)
        .expect("fixture should be written");

    let output = bin()
        .arg("validate")
        .arg(&path)
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("validation failed"));

    let _ = fs::remove_file(path);
}

#[test]
fn validate_command_accepts_seed_combos() {
    let output = bin().arg("validate").output().expect("validate should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("validation passed"));
}

#[test]
fn similar_command_rejects_threshold_outside_unit_range() {
    for raw in ["1.5", "-0.2", "close"] {
        let output = bin()
            .args(["similar", raw])
            .output()
            .expect("similar should run");

        assert_eq!(output.status.code(), Some(2), "threshold {raw}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("invalid threshold"));
        assert!(output.stdout.is_empty());
    }
}

#[test]
fn validate_command_reports_malformed_entries() {
    let path = unique_temp_path("mixed-combos.json");
    fs::write(
        &path,
        r#"[
            {"id":"ok","championId":"Ahri","abilities":[{"key":"Q"}]},
            {"id":"bad","championId":"Ahri","abilities":[{"key":"Q"}],"effectiveness":{"difficulty":"Insane"}}
        ]"#,
    )
    .expect("fixture should be written");

    let output = bin()
        .arg("validate")
        .arg(&path)
        .output()
        .expect("validate should run");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("combos[1]"));
    assert!(stderr.contains("entry skipped"));

    let _ = fs::remove_file(path);
}
