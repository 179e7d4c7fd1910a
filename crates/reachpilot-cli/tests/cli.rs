use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::path::Path;
use std::process::Output;
use tempfile::TempDir;

const OWNER: &str = "recruiter@example.com";

fn run_raw(db_path: &Path, owner: &str, json: bool, args: &[&str]) -> Output {
    let mut cmd = cargo_bin_cmd!("reachpilot");
    cmd.args(["--db-path", db_path.to_str().expect("db path")])
        .args(["--owner", owner]);
    if json {
        cmd.arg("--json");
    }
    cmd.args(args).output().expect("run command")
}

fn run_cmd(db_path: &Path, args: &[&str]) -> String {
    let output = run_raw(db_path, OWNER, false, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(db_path: &Path, args: &[&str]) -> Value {
    let output = run_raw(db_path, OWNER, true, args);
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

#[test]
fn cli_add_list_edit_delete_flow() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("reachpilot.sqlite3");

    let created = run_cmd_json(
        &db_path,
        &[
            "add",
            "--email",
            " Jane@Corp.COM ",
            "--name",
            "Jane Doe",
            "--linkedin-url",
            "https://www.linkedin.com/in/janedoe",
        ],
    );
    assert_eq!(created["email"], "jane@corp.com");
    assert_eq!(created["created_by_email"], OWNER);
    let id = created["id"].as_str().expect("id").to_string();

    let page = run_cmd_json(&db_path, &["list"]);
    let items = page["data"].as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["email"], "jane@corp.com");
    assert_eq!(page["has_more"], false);
    assert!(page.get("next_cursor").is_none());

    let edited = run_cmd_json(&db_path, &["edit", &id, "--name", "Jane A. Doe"]);
    assert_eq!(edited["name"], "Jane A. Doe");
    assert_eq!(edited["email"], "jane@corp.com");

    // An empty string clears the optional field.
    let cleared = run_cmd_json(&db_path, &["edit", &id, "--linkedin-url", ""]);
    assert!(cleared["linkedin_url"].is_null());

    let detail = run_cmd_json(&db_path, &["show", &id]);
    assert_eq!(detail["name"], "Jane A. Doe");

    run_cmd(&db_path, &["delete", &id]);
    let output = run_raw(&db_path, OWNER, false, &["show", &id]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_reports_validation_and_conflict_exit_codes() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("reachpilot.sqlite3");

    let invalid = run_raw(&db_path, OWNER, false, &["add", "--email", "not-an-email"]);
    assert_eq!(invalid.status.code(), Some(3));

    run_cmd(&db_path, &["add", "--email", "jane@corp.com"]);
    let duplicate = run_raw(&db_path, OWNER, false, &["add", "--email", "JANE@corp.com"]);
    assert_eq!(duplicate.status.code(), Some(4));

    // The same email belongs to a different owner without conflict.
    let other = run_raw(
        &db_path,
        "other@example.com",
        false,
        &["add", "--email", "jane@corp.com"],
    );
    assert!(other.status.success(), "other owner add: {:?}", other);
}

#[test]
fn cli_rejects_empty_edit_and_bad_cursor() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("reachpilot.sqlite3");

    let created = run_cmd_json(&db_path, &["add", "--email", "jane@corp.com"]);
    let id = created["id"].as_str().expect("id").to_string();

    let empty = run_raw(&db_path, OWNER, false, &["edit", &id]);
    assert_eq!(empty.status.code(), Some(3));

    let bad_cursor = run_raw(&db_path, OWNER, false, &["list", "--cursor", "garbage"]);
    assert_eq!(bad_cursor.status.code(), Some(3));

    let bad_id = run_raw(&db_path, OWNER, false, &["show", "not-a-uuid"]);
    assert_eq!(bad_id.status.code(), Some(3));
}

#[test]
fn cli_lists_newest_first_and_pages_with_cursor() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("reachpilot.sqlite3");

    for email in ["a@corp.com", "b@corp.com", "c@corp.com"] {
        run_cmd(&db_path, &["add", "--email", email]);
    }

    let first = run_cmd_json(&db_path, &["list", "--limit", "2"]);
    let items = first["data"].as_array().expect("array");
    assert_eq!(items.len(), 2);
    assert_eq!(first["has_more"], true);
    let cursor = first["next_cursor"].as_str().expect("cursor").to_string();

    let second = run_cmd_json(&db_path, &["list", "--limit", "2", "--cursor", &cursor]);
    let rest = second["data"].as_array().expect("array");
    assert_eq!(rest.len(), 1);
    assert_eq!(second["has_more"], false);

    let search = run_cmd_json(&db_path, &["list", "--search", "b@corp"]);
    let matches = search["data"].as_array().expect("array");
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["email"], "b@corp.com");
}

#[test]
fn cli_stats_counts_connections() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("reachpilot.sqlite3");

    run_cmd(&db_path, &["add", "--email", "jane@corp.com"]);
    run_cmd(
        &db_path,
        &[
            "add",
            "--email",
            "joe@corp.com",
            "--linkedin-url",
            "https://www.linkedin.com/in/joe",
        ],
    );

    let stats = run_cmd_json(&db_path, &["stats"]);
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["with_linkedin"], 1);
    assert_eq!(stats["added_this_month"], 2);
}

#[test]
fn cli_check_validates_without_a_database() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("reachpilot.sqlite3");

    let valid = run_cmd_json(
        &db_path,
        &["check", "--email", " Jane@Corp.COM ", "--name", "Jane"],
    );
    assert_eq!(valid["is_valid"], true);
    assert_eq!(valid["normalized"]["email"], "jane@corp.com");

    let invalid = run_raw(
        &db_path,
        OWNER,
        true,
        &[
            "check",
            "--email",
            "bad",
            "--linkedin-url",
            "https://www.linkedin.com.attacker.net/in/joe",
        ],
    );
    assert_eq!(invalid.status.code(), Some(3));
    let report: Value = serde_json::from_slice(&invalid.stdout).expect("parse json");
    assert_eq!(report["is_valid"], false);
    assert!(report["errors"]["email"].is_string());
    assert!(report["errors"]["linkedin_url"].is_string());

    // Nothing was created on disk.
    assert!(!db_path.exists());
}

#[test]
fn cli_emits_completions_for_its_own_commands() {
    let output = cargo_bin_cmd!("reachpilot")
        .args(["completions", "bash"])
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    let script = String::from_utf8(output.stdout).expect("utf8");
    assert!(script.contains("reachpilot"));
    assert!(script.contains("stats"));
}

#[test]
fn cli_requires_an_owner() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("reachpilot.sqlite3");

    let output = cargo_bin_cmd!("reachpilot")
        .env("XDG_CONFIG_HOME", temp.path())
        .args(["--db-path", db_path.to_str().expect("db path"), "list"])
        .output()
        .expect("run command");
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn cli_reads_owner_from_config() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("reachpilot.sqlite3");
    let config_path = temp.path().join("config.toml");
    std::fs::write(&config_path, format!("owner_email = \"{}\"\n", OWNER))
        .expect("write config");

    let output = cargo_bin_cmd!("reachpilot")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(["--config", config_path.to_str().expect("config path")])
        .args(["--json", "add", "--email", "jane@corp.com"])
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    let created: Value = serde_json::from_slice(&output.stdout).expect("parse json");
    assert_eq!(created["created_by_email"], OWNER);
}
