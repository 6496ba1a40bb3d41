use std::process::Command;

#[test]
fn help_lists_viewer_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_mandelview"))
        .arg("--help")
        .output()
        .expect("failed to run mandelview --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--vertex-shader"));
    assert!(stdout.contains("--fragment-shader"));
    assert!(stdout.contains("--max-iterations"));
}

#[test]
fn rejects_zero_iteration_budget() {
    let output = Command::new(env!("CARGO_BIN_EXE_mandelview"))
        .args(["--max-iterations", "0"])
        .output()
        .expect("failed to run mandelview with bad iteration count");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("iteration count"));
}

#[test]
fn rejects_non_numeric_iteration_budget() {
    let output = Command::new(env!("CARGO_BIN_EXE_mandelview"))
        .args(["--max-iterations", "plenty"])
        .output()
        .expect("failed to run mandelview with non-numeric iteration count");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid iteration count"));
}
