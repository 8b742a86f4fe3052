//! Runs the `csv-joiner` binary against files in a scratch directory.

use std::path::Path;
use std::process::{Command, Output};

fn joiner(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_csv-joiner"))
        .current_dir(dir)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run csv-joiner")
}

fn write(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content).unwrap();
}

fn setup() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "file1.csv", "Name,Pos_X,Pos_Confidence\na,1.6,0.9\n");
    write(dir.path(), "file2.csv", "Name,Pos_X\nb,3.5\n");
    dir
}

#[test]
fn writes_combined_csv_by_default() {
    let dir = setup();
    let out = joiner(dir.path(), &["file1.csv", "file2.csv", "--drop-confidence"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let combined = std::fs::read_to_string(dir.path().join("combined.csv")).unwrap();
    assert_eq!(combined, "Name,Pos_X\na,2\nb,4\n");
}

#[test]
fn explicit_order_and_stdout() {
    let dir = setup();
    let out = joiner(
        dir.path(),
        &[
            "file1.csv",
            "file2.csv",
            "--order",
            "file2.csv,file1.csv",
            "--rounding",
            "half-away-from-zero",
            "-o",
            "-",
        ],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "Name,Pos_X,Pos_Confidence\nb,4,\na,2,0.9\n"
    );
}

#[test]
fn positions_with_ties_keep_upload_order() {
    let dir = setup();
    write(dir.path(), "file3.csv", "Name\nc\n");
    let out = joiner(
        dir.path(),
        &["file1.csv", "file2.csv", "file3.csv", "--positions", "2,1,1", "-o", "-"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        "Name,Pos_X,Pos_Confidence\nb,4,\nc,,\na,2,0.9\n"
    );
}

#[test]
fn config_file_supplies_defaults() {
    let dir = setup();
    write(dir.path(), "joiner.json", r#"{"drop_confidence_columns": true}"#);
    let out = joiner(
        dir.path(),
        &["file1.csv", "file2.csv", "--config", "joiner.json", "-o", "-"],
    );
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(String::from_utf8(out.stdout).unwrap(), "Name,Pos_X\na,2\nb,4\n");
}

#[test]
fn stale_order_fails_without_writing_output() {
    let dir = setup();
    let out = joiner(
        dir.path(),
        &["file1.csv", "file2.csv", "--order", "file1.csv,gone.csv"],
    );
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("gone.csv"), "{stderr}");
    assert!(!dir.path().join("combined.csv").exists());
}

#[test]
fn malformed_file_is_named_in_the_error() {
    let dir = setup();
    write(dir.path(), "broken.csv", "Name\n\"never closed\n");
    let out = joiner(dir.path(), &["file1.csv", "broken.csv"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("broken.csv"), "{stderr}");
    assert!(!dir.path().join("combined.csv").exists());
}
