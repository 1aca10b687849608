mod common;

use common::{ok, run_cli, saved, write_settings, TWO_CLUES};
use std::fs;

#[test]
fn empty_clue_list_is_rejected_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(dir.path(), "clues = []\n");
    let (code, stdout, stderr) = run_cli(dir.path(), &["status"], "");
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("invalid puzzle set"), "got: {stderr}");
    assert!(stderr.contains("no clues"), "got: {stderr}");
}

#[test]
fn blank_answer_is_rejected_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(
        dir.path(),
        r#"
[[clues]]
text = "Unanswerable"
answer = "   "
"#,
    );
    let (code, _, stderr) = run_cli(dir.path(), &["start"], "");
    assert_eq!(code, 2);
    assert!(stderr.contains("clue 1 has a blank answer"), "got: {stderr}");
}

#[test]
fn unparsable_settings_are_an_error() {
    let dir = tempfile::tempdir().unwrap();
    write_settings(dir.path(), "cue_millis = [");
    let (code, _, stderr) = run_cli(dir.path(), &["status"], "");
    assert_eq!(code, 2);
    assert!(stderr.contains("parsing"), "got: {stderr}");
}

#[test]
fn explicit_config_file_and_storage_key() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("custom.toml");
    fs::write(&config, format!("storage_key = \"my-hunt\"\n{TWO_CLUES}")).unwrap();
    let config = config.to_str().unwrap();

    let out = ok(dir.path(), &["--config", config, "start"]);
    assert!(out.contains("Clue 1 of 2"));
    assert!(dir.path().join("my-hunt.json").is_file());
    assert_eq!(saved(dir.path()), None);
    // The explicit file replaces the default one, which is never created.
    assert!(!dir.path().join("treasure-hunt.toml").exists());
}

#[test]
fn storage_key_outside_data_dir_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data");
    fs::create_dir(&data).unwrap();
    write_settings(&data, &format!("storage_key = \"../escape\"\n{TWO_CLUES}"));
    let (code, stdout, stderr) = run_cli(&data, &["start"], "");
    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("invalid storage_key setting"), "got: {stderr}");
    assert!(!dir.path().join("escape.json").exists());
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");
    let (code, _, stderr) = run_cli(dir.path(), &["--config", missing.to_str().unwrap()], "");
    assert_eq!(code, 2);
    assert!(stderr.contains("reading"), "got: {stderr}");
}

#[test]
fn template_file_overrides_screen() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("finish.j2"),
        "All {{ total }} solved. The treasure is under the oak.",
    )
    .unwrap();
    write_settings(
        dir.path(),
        &format!("[templates.finish]\nfile = \"finish.j2\"\n{TWO_CLUES}"),
    );
    ok(dir.path(), &["start"]);
    ok(dir.path(), &["answer", "echo"]);
    let out = ok(dir.path(), &["answer", "darkness"]);
    assert!(out.contains("All 2 solved. The treasure is under the oak."));
}

#[test]
fn generated_settings_list_the_default_clues() {
    let dir = tempfile::tempdir().unwrap();
    ok(dir.path(), &["status"]);
    let contents = fs::read_to_string(dir.path().join("treasure-hunt.toml")).unwrap();
    assert!(contents.contains("storage_key = \"treasure_hunt_progress_v1\""));
    assert!(contents.contains("[[clues]]"));
    assert!(contents.contains("answer = \"darkness\""));
}
