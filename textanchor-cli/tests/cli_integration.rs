//! Integration tests for the textanchor CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const DOCUMENT: &str = "Opening remarks about the quarterly results were brief. \
Revenue grew in every region except the northern one, where a late harvest delayed \
shipments. Costs were contained through careful supplier negotiation and a hiring \
freeze. The board approved a dividend increase for shareholders after a short debate.";

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn textanchor() -> Command {
    let mut cmd = Command::cargo_bin("textanchor").unwrap();
    cmd.env_remove("TEXTANCHOR_CONFIG");
    cmd
}

#[test]
fn test_locate_exact_text_output() {
    let dir = TempDir::new().unwrap();
    let needle = write(&dir, "needle.txt", "careful supplier negotiation\n");
    let haystack = write(&dir, "doc.txt", DOCUMENT);

    textanchor()
        .arg("locate")
        .arg("--needle-file")
        .arg(&needle)
        .arg("--haystack")
        .arg(&haystack)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("exact "))
        .stdout(predicate::str::contains("confidence=1.000"))
        .stdout(predicate::str::contains("careful supplier negotiation"));
}

#[test]
fn test_locate_json_with_position() {
    let dir = TempDir::new().unwrap();
    let needle = write(&dir, "needle.txt", "zqxj vwkp yyzz qqxx");
    let haystack = write(&dir, "doc.txt", DOCUMENT);

    textanchor()
        .arg("locate")
        .arg("--needle-file")
        .arg(&needle)
        .arg("--haystack")
        .arg(&haystack)
        .args(["--chunk-index", "3", "--total-chunks", "4", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"method\": \"approximate\""))
        .stdout(predicate::str::contains("\"startOffset\""))
        .stdout(predicate::str::contains("\"matchedText\""));
}

#[test]
fn test_locate_with_chunk_boundaries() {
    let dir = TempDir::new().unwrap();
    let needle = write(
        &dir,
        "needle.txt",
        "The bord approved a dividend increse for shareholders",
    );
    let haystack = write(&dir, "doc.txt", DOCUMENT);

    let mut boundaries = Vec::new();
    let mut offset = 0;
    for (index, sentence) in DOCUMENT.split_inclusive(". ").enumerate() {
        let len = sentence.chars().count();
        boundaries.push(format!(
            r#"{{"index":{index},"startOffset":{offset},"endOffset":{}}}"#,
            offset + len
        ));
        offset += len;
    }
    let table = write(&dir, "chunks.json", &format!("[{}]", boundaries.join(",")));

    textanchor()
        .arg("locate")
        .arg("--needle-file")
        .arg(&needle)
        .arg("--haystack")
        .arg(&haystack)
        .arg("--boundaries")
        .arg(&table)
        .args(["--hint", "3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("chunk_bounded "));
}

#[test]
fn test_locate_missing_file() {
    textanchor()
        .arg("locate")
        .args(["--needle-file", "/nonexistent/needle.txt"])
        .args(["--haystack", "/nonexistent/doc.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn test_stitch_glob_in_order() {
    let dir = TempDir::new().unwrap();
    let shared = "the harvest was late and shipments slipped by a week";
    write(
        &dir,
        "part-1.txt",
        &format!("Part one opens the report and notes that {shared}"),
    );
    write(
        &dir,
        "part-2.txt",
        &format!("{shared}. Part two covers the budget."),
    );
    let output = dir.path().join("merged.txt");

    textanchor()
        .arg("stitch")
        .arg("-i")
        .arg(format!("{}/part-*.txt", dir.path().display()))
        .arg("-o")
        .arg(&output)
        .arg("--report")
        .arg("-q")
        .assert()
        .success()
        .stderr(predicate::str::contains("seam 1: Exact overlap"));

    let merged = fs::read_to_string(&output).unwrap();
    assert!(merged.starts_with("Part one opens"));
    assert!(merged.contains("Part two covers the budget."));
    assert_eq!(merged.matches(shared).count(), 1);
}

#[test]
fn test_stitch_without_overlap_uses_separator() {
    let dir = TempDir::new().unwrap();
    let a = write(&dir, "a.txt", "First segment stands alone.");
    let b = write(&dir, "b.txt", "Second segment shares nothing.");

    textanchor()
        .arg("stitch")
        .arg("-i")
        .arg(&a)
        .arg("-i")
        .arg(&b)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "First segment stands alone.\n\n---\n\nSecond segment shares nothing.",
        ));
}

#[test]
fn test_stitch_no_matches() {
    let dir = TempDir::new().unwrap();
    textanchor()
        .arg("stitch")
        .arg("-i")
        .arg(format!("{}/*.none", dir.path().display()))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_highlight_html() {
    let dir = TempDir::new().unwrap();
    let tree = write(
        &dir,
        "tree.json",
        r#"{"type":"element","tag":"p","children":[
            {"type":"text","value":"Some "},
            {"type":"element","tag":"em","children":[{"type":"text","value":"emphasised"}]},
            {"type":"text","value":" paragraph text."}
        ]}"#,
    );
    let ranges = write(
        &dir,
        "ranges.json",
        r#"[{"id":"h-1","category":"highlight","literalText":"emphasised paragraph"}]"#,
    );

    textanchor()
        .arg("highlight")
        .arg("--tree")
        .arg(&tree)
        .arg("--ranges")
        .arg(&ranges)
        .args(["-f", "html"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<p>Some <em><mark data-span-id=\"h-1\""))
        .stdout(predicate::str::contains("data-span-last=\"true\"> paragraph</mark>"));
}

#[test]
fn test_highlight_json_reports_skipped() {
    let dir = TempDir::new().unwrap();
    let tree = write(
        &dir,
        "tree.json",
        r#"{"type":"element","tag":"p","children":[{"type":"text","value":"Nothing to see."}]}"#,
    );
    let ranges = write(
        &dir,
        "ranges.json",
        r#"[{"id":"gone","category":"note","literalText":"text that never appears"}]"#,
    );

    textanchor()
        .arg("highlight")
        .arg("--tree")
        .arg(&tree)
        .arg("--ranges")
        .arg(&ranges)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"skipped\""))
        .stdout(predicate::str::contains("Nothing to see."));
}

#[test]
fn test_generate_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("textanchor.toml");

    textanchor()
        .arg("generate-config")
        .arg("-o")
        .arg(&config)
        .assert()
        .success();

    let needle = write(&dir, "needle.txt", "hiring freeze");
    let haystack = write(&dir, "doc.txt", DOCUMENT);
    textanchor()
        .arg("--config")
        .arg(&config)
        .arg("locate")
        .arg("--needle-file")
        .arg(&needle)
        .arg("--haystack")
        .arg(&haystack)
        .assert()
        .success()
        .stdout(predicate::str::contains("hiring freeze"));
}

#[test]
fn test_invalid_config_value() {
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "bad.toml", "[locator]\ntrigram_threshold = 3.0\n");
    let a = write(&dir, "a.txt", "alpha");

    textanchor()
        .args(["stitch", "-i"])
        .arg(&a)
        .arg("-c")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_help_lists_commands() {
    textanchor()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("locate"))
        .stdout(predicate::str::contains("stitch"))
        .stdout(predicate::str::contains("highlight"))
        .stdout(predicate::str::contains("generate-config"));
}
