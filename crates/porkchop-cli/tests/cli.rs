use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const RAW_BILL: &str = r"VerDate Nov 24 2008 17:46 Dec 17, 2024 Jkt 000000 PO 00000 Frm 00001 Fmt 6652 Sfmt 6211
C:\USERS\KSALMON\APPDATA\ROAMING\SOFTQUAD\XMETAL\11.0\GEN\C\D121724.03
December 17, 2024 (5:46 p.m.)
1 DIVISION A—FURTHER CONTINUING
2 APPROPRIATIONS ACT, 2025
11 TITLE I—DEPARTMENT OF DEFENSE
12 SEC. 102. The Secretary of Defense shall submit a report
13 to Congress not later than January 15, 2025.
14 $100,000,000 for disaster relief operations.
17 Pursuant to 42 U.S.C. 3030a and Public Law 118-42,
19 authorizes $500,000,000 for FEMA operations until September 30, 2025.
";

fn porkchop() -> Command {
    Command::cargo_bin("porkchop").unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn clean_strips_artifacts() {
    let dir = TempDir::new().unwrap();
    let bill = write(&dir, "bill.txt", RAW_BILL);

    porkchop()
        .args(["clean", arg(&bill)])
        .assert()
        .success()
        .stdout(predicate::str::contains("$100,000,000 for disaster relief operations."))
        .stdout(predicate::str::contains("42 U.S.C. 3030a"))
        .stdout(predicate::str::contains("VerDate").not())
        .stdout(predicate::str::contains("(5:46 p.m.)").not());
}

#[test]
fn clean_writes_output_file() {
    let dir = TempDir::new().unwrap();
    let bill = write(&dir, "bill.txt", RAW_BILL);
    let out = dir.path().join("clean.txt");

    porkchop()
        .args(["clean", arg(&bill), "-o", arg(&out)])
        .assert()
        .success();

    let cleaned = fs::read_to_string(out).unwrap();
    assert!(cleaned.starts_with("DIVISION A—FURTHER CONTINUING"));
}

#[test]
fn chunk_summary_lists_divisions() {
    let dir = TempDir::new().unwrap();
    let bill = write(&dir, "bill.txt", RAW_BILL);

    porkchop()
        .args(["chunk", arg(&bill), "--summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("001_div_a"));
}

#[test]
fn extract_json_contains_facts() {
    let dir = TempDir::new().unwrap();
    let bill = write(&dir, "bill.txt", RAW_BILL);

    porkchop()
        .args(["extract", arg(&bill)])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""display_amount": "$100,000,000""#))
        .stdout(predicate::str::contains(r#""ref_text": "42 U.S.C. 3030a""#))
        .stdout(predicate::str::contains("January 15, 2025"));
}

#[test]
fn extract_csv_lists_funding() {
    let dir = TempDir::new().unwrap();
    let bill = write(&dir, "bill.txt", RAW_BILL);

    porkchop()
        .args(["extract", arg(&bill), "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "chunk_id,amount,amount_numeric,purpose,recipient,availability,fiscal_years",
        ))
        .stdout(predicate::str::contains("$500,000,000"));
}

#[test]
fn extract_missing_file_fails() {
    porkchop()
        .args(["extract", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn diff_renders_changelog() {
    let dir = TempDir::new().unwrap();
    let v1 = write(
        &dir,
        "v1.txt",
        "SEC. 1. Short title.\nSEC. 2. The program receives $100,000,000 for operations.\n",
    );
    let v2 = write(
        &dir,
        "v2.txt",
        "SEC. 1. Short title.\nSEC. 2. The program receives $200,000,000 for operations.\n",
    );

    porkchop()
        .args(["diff", arg(&v1), arg(&v2), "--title", "Test Act"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Changelog: Test Act"))
        .stdout(predicate::str::contains("## v1 -> v2"))
        .stdout(predicate::str::contains("- Lines added: 1"))
        .stdout(predicate::str::contains("$200,000,000"))
        .stdout(predicate::str::contains("SEC. 2: section modified"));
}

#[test]
fn diff_rejects_empty_version() {
    let dir = TempDir::new().unwrap();
    let v1 = write(&dir, "v1.txt", "SEC. 1. Short title.\n");
    let v2 = write(&dir, "v2.txt", "   \n");

    porkchop()
        .args(["diff", arg(&v1), arg(&v2)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("version v2 has no text content"));
}

#[test]
fn score_flags_memorial_bridge() {
    let dir = TempDir::new().unwrap();
    let items = write(
        &dir,
        "items.json",
        r#"[{"amount": "$5,000,000", "amount_numeric": 5000000,
             "purpose": "construction of the John Smith Memorial Bridge located in Jefferson County"}]"#,
    );

    porkchop()
        .args([
            "score",
            arg(&items),
            "--format",
            "json",
            "--title",
            "Department of Defense Appropriations Act",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""max_score": 90"#))
        .stdout(predicate::str::contains("geographic_specificity"))
        .stdout(predicate::str::contains("earmark_signals"));
}

#[test]
fn score_text_file_is_plain() {
    let dir = TempDir::new().unwrap();
    let items = write(
        &dir,
        "items.json",
        r#"[{"amount": "$5,000,000", "amount_numeric": 5000000,
             "purpose": "construction of the John Smith Memorial Bridge located in Jefferson County"}]"#,
    );
    let report = dir.path().join("report.txt");

    porkchop()
        .env("CLICOLOR_FORCE", "1")
        .args(["score", arg(&items), "-f", "text", "-o", arg(&report)])
        .assert()
        .success();

    let text = fs::read_to_string(report).unwrap();
    assert!(text.contains("High pork:"));
    assert!(!text.contains("\x1b["));
}

#[test]
fn score_reads_extract_output() {
    let dir = TempDir::new().unwrap();
    let bill = write(&dir, "bill.txt", RAW_BILL);
    let facts = dir.path().join("facts.json");

    porkchop()
        .args(["extract", arg(&bill), "-o", arg(&facts)])
        .assert()
        .success();

    porkchop()
        .args(["score", arg(&facts), "--title", "Further Continuing Appropriations Act"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Items scored: 2"));
}

#[test]
fn config_init_set_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("porkchop.json");

    porkchop()
        .args(["--config", arg(&config), "config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    porkchop()
        .args(["--config", arg(&config), "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    porkchop()
        .args(["--config", arg(&config), "config", "set", "scoring.ai_threshold", "45"])
        .assert()
        .success();

    porkchop()
        .args(["--config", arg(&config), "config", "get", "scoring.ai_threshold"])
        .assert()
        .success()
        .stdout(predicate::str::diff("45\n"));

    porkchop()
        .args(["--config", arg(&config), "config", "set", "scoring.bogus", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}
