use std::process::Command;

use battleship_rules::{Phase, SessionState};

#[test]
fn sim_binary_smoke() {
    let snapshot = std::env::temp_dir().join(format!("battleship-sim-{}.bin", std::process::id()));
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["--seed", "12345", "--snapshot"])
        .arg(&snapshot)
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert!(v["winner"].is_string());
    assert_eq!(v["errors"], 0);

    let bytes = std::fs::read(&snapshot).expect("snapshot written");
    std::fs::remove_file(&snapshot).unwrap();
    let state: SessionState = bincode::deserialize(&bytes).unwrap();
    assert_eq!(state.rules.state().phase(), Phase::GameOver);
}

#[test]
fn sim_binary_is_reproducible() {
    let run = || {
        let output = Command::new(env!("CARGO_BIN_EXE_sim"))
            .args(["--seed", "7"])
            .output()
            .expect("failed to run sim binary");
        assert!(output.status.success());
        output.stdout
    };
    assert_eq!(run(), run());
}
