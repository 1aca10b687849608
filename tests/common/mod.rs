use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

pub const SAVE_FILE: &str = "treasure_hunt_progress_v1.json";

/// Run the binary against `dir` with `args`, feeding `stdin`.
/// Returns (exit code, stdout, stderr).
pub fn run_cli(dir: &Path, args: &[&str], stdin: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_treasure-hunt"))
        .arg("--data-dir")
        .arg(dir)
        .args(args)
        .env_remove("TREASURE_HUNT_LOG")
        .env_remove("TREASURE_HUNT_LOG_FORMAT")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn binary");

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

/// Run a subcommand that is expected to succeed quietly; return stdout.
pub fn ok(dir: &Path, args: &[&str]) -> String {
    let (code, stdout, stderr) = run_cli(dir, args, "");
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    assert!(stderr.is_empty(), "expected no stderr, got: {stderr}");
    stdout
}

/// Parsed `status --json` output.
pub fn status(dir: &Path) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(dir, &["status", "--json"], "");
    assert_eq!(code, 0, "status failed: {stderr}");
    serde_json::from_str(stdout.trim()).unwrap()
}

/// The saved progress record, if there is one.
pub fn saved(dir: &Path) -> Option<serde_json::Value> {
    let raw = fs::read_to_string(dir.join(SAVE_FILE)).ok()?;
    Some(serde_json::from_str(&raw).unwrap())
}

pub fn write_saved(dir: &Path, raw: &str) {
    fs::write(dir.join(SAVE_FILE), raw).unwrap();
}

pub fn write_settings(dir: &Path, toml: &str) {
    fs::write(dir.join("treasure-hunt.toml"), toml).unwrap();
}

/// Two-clue hunt: "echo" then "darkness".
pub const TWO_CLUES: &str = r#"
[[clues]]
text = "I speak without a mouth. What am I?"
answer = "echo"
hint = "A repeating sound"

[[clues]]
text = "The more of this there is, the less you see."
answer = "darkness"
"#;
