use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn psg_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_psg"))
}

/// ~12k characters: the Thames near the start, Kurtz near the end.
fn reference_text() -> String {
    let filler = "The sea-reach stretched before us like the beginning of an interminable waterway. ";
    let mut text = String::new();
    text.push_str("The Nellie, a cruising yawl, swung to her anchor without a flutter of the sails. ");
    text.push_str(&filler.repeat(5));
    text.push_str("Here the old Thames ran broad and quiet at the decline of day. ");
    text.push_str(&filler.repeat(60));
    text.push_str("Mr. Kurtz was a remarkable man, they said at the station. ");
    text.push_str(&filler.repeat(60));
    text
}

fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();

    fs::write(data_dir.join("hod.txt"), reference_text()).unwrap();

    let config_content = format!(
        r#"[document]
path = "{}/data/hod.txt"
title = "Heart of Darkness"

[extraction]
max_budget = 3000
window_radius = 300

[server]
bind = "127.0.0.1:7340"
"#,
        root.display()
    );

    let config_path = config_dir.join("psg.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_psg(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = psg_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run psg binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_ask_returns_matching_passage() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) =
        run_psg(&config_path, &["ask", "What river does the story start on?"]);
    assert!(success, "ask failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("Thames"));
    assert!(stdout.contains("thames"), "keywords line missing: {}", stdout);
    assert!(!stdout.contains("(fallback)"));
    assert!(!stdout.contains("Kurtz"));
}

#[test]
fn test_ask_json_shape() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_psg(&config_path, &["ask", "Who is Kurtz?", "--json"]);
    assert!(success, "ask failed: stderr={}", stderr);

    let v: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(v["question"], "Who is Kurtz?");
    assert_eq!(v["textLength"], reference_text().chars().count());
    assert_eq!(v["fallback"], false);
    let context = v["context"].as_str().unwrap();
    assert!(context.contains("Kurtz"));
    assert_eq!(v["contextLength"], context.chars().count());
    assert!(v["contextLength"].as_u64().unwrap() <= 3000);
}

#[test]
fn test_ask_stop_words_only_falls_back() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_psg(&config_path, &["ask", "What is it, and why?"]);
    assert!(success);
    assert!(stdout.contains("(fallback)"));
    assert!(stdout.contains("[...]"));
    assert!(stdout.contains("The Nellie"));
}

#[test]
fn test_ask_budget_override() {
    let (_tmp, config_path) = setup_test_env();

    // A 300-radius window is ~600 chars and cannot fit in 200.
    let (stdout, _, success) = run_psg(&config_path, &["ask", "thames", "--budget", "200"]);
    assert!(success);
    assert!(stdout.contains("(fallback)"));

    let (_, stderr, success) = run_psg(&config_path, &["ask", "thames", "--budget", "0"]);
    assert!(!success);
    assert!(stderr.contains("--budget must be > 0"));
}

#[test]
fn test_ask_blank_question_fails() {
    let (_tmp, config_path) = setup_test_env();

    let (_, stderr, success) = run_psg(&config_path, &["ask", "   "]);
    assert!(!success);
    assert!(stderr.contains("question must not be empty"));
}

#[test]
fn test_keywords_command() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_psg(&config_path, &["keywords", "Why does Marlow lie?"]);
    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines.contains(&"marlow"));
    assert!(lines.contains(&"yawl"));
    assert!(!lines.contains(&"does"));

    let (stdout, _, success) = run_psg(&config_path, &["keywords", "???"]);
    assert!(success);
    assert!(stdout.contains("No keywords."));
}

#[test]
fn test_check_reports_document() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, stderr, success) = run_psg(&config_path, &["check"]);
    assert!(success, "check failed: {}", stderr);
    assert!(stdout.contains("Heart of Darkness"));
    assert!(stdout.contains(&format!("{} chars", reference_text().chars().count())));
    assert!(stdout.trim_end().ends_with("ok"));
}

#[test]
fn test_missing_document_is_reported() {
    let (tmp, config_path) = setup_test_env();
    fs::remove_file(tmp.path().join("data/hod.txt")).unwrap();

    let (_, stderr, success) = run_psg(&config_path, &["ask", "Who is Kurtz?"]);
    assert!(!success);
    assert!(stderr.contains("could not load reference text"));
    assert!(stderr.contains("hod.txt"));
}

#[test]
fn test_missing_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    let (_, stderr, success) = run_psg(&tmp.path().join("nope.toml"), &["check"]);
    assert!(!success);
    assert!(stderr.contains("Failed to read config file"));
}
