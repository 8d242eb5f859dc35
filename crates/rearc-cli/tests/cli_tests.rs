//! Integration tests for rearc-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn rearc_cmd() -> Command {
    cargo_bin_cmd!("rearc")
}

/// Writes a small sample file and returns its path.
fn sample_file(dir: &Path) -> PathBuf {
    let path = dir.join("notes.txt");
    std::fs::write(&path, "meeting at noon").expect("failed to write sample file");
    path
}

#[test]
fn test_version_flag() {
    rearc_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rearc"));
}

#[test]
fn test_help_flag() {
    rearc_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("List files in an archive"))
        .stdout(predicate::str::contains("Create a new archive"));
}

#[test]
fn test_create_basic() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());
    let archive = temp.path().join("out.zip");

    rearc_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created"));

    assert!(archive.exists());
}

#[test]
fn test_create_then_ls() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());
    let archive = temp.path().join("out.zip");

    rearc_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&source)
        .assert()
        .success();

    rearc_cmd()
        .arg("ls")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.txt"));
}

#[test]
fn test_create_all_formats() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());

    for name in ["a.zip", "a.tar", "a.tar.gz", "a.tgz", "a.tar.xz", "a.7z"] {
        let archive = temp.path().join(name);
        rearc_cmd()
            .arg("create")
            .arg(&archive)
            .arg(&source)
            .assert()
            .success();
        assert!(archive.exists(), "archive {name} should exist");
    }
}

#[test]
fn test_create_from_directory() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let src_dir = temp.path().join("proj");
    std::fs::create_dir_all(src_dir.join("docs")).expect("failed to create source dir");
    std::fs::write(src_dir.join("docs/guide.md"), "# guide").expect("failed to write file");

    let archive = temp.path().join("proj.tar.gz");
    rearc_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&src_dir)
        .assert()
        .success();

    rearc_cmd()
        .arg("ls")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("proj/docs/guide.md"));
}

#[test]
fn test_extract_roundtrip() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());
    let archive = temp.path().join("out.tar.gz");
    let dest = temp.path().join("extracted");

    rearc_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&source)
        .assert()
        .success();

    rearc_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extracted"));

    let restored = std::fs::read_to_string(dest.join("notes.txt")).expect("missing entry");
    assert_eq!(restored, "meeting at noon");
}

#[test]
fn test_add_to_existing_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());
    let extra = temp.path().join("extra.txt");
    std::fs::write(&extra, "more").expect("failed to write extra file");

    let archive = temp.path().join("out.zip");
    rearc_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&source)
        .assert()
        .success();

    rearc_cmd()
        .arg("add")
        .arg(&archive)
        .arg(&extra)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive updated"));

    rearc_cmd()
        .arg("ls")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.txt"))
        .stdout(predicate::str::contains("extra.txt"));
}

#[test]
fn test_add_with_separate_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());
    let extra = temp.path().join("extra.txt");
    std::fs::write(&extra, "more").expect("failed to write extra file");

    let archive = temp.path().join("in.zip");
    let updated = temp.path().join("updated.zip");
    rearc_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&source)
        .assert()
        .success();

    rearc_cmd()
        .arg("add")
        .arg(&archive)
        .arg(&extra)
        .arg("-o")
        .arg(&updated)
        .assert()
        .success();

    // The input archive is untouched; the output holds both entries.
    rearc_cmd()
        .arg("ls")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("extra.txt").not());
    rearc_cmd()
        .arg("ls")
        .arg(&updated)
        .assert()
        .success()
        .stdout(predicate::str::contains("extra.txt"));
}

#[test]
fn test_rm_from_existing_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let src_dir = temp.path().join("src");
    std::fs::create_dir(&src_dir).expect("failed to create source dir");
    std::fs::write(src_dir.join("keep.txt"), "keep").expect("failed to write keep.txt");
    std::fs::write(src_dir.join("drop.txt"), "drop").expect("failed to write drop.txt");

    let archive = temp.path().join("out.zip");
    rearc_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&src_dir)
        .assert()
        .success();

    rearc_cmd()
        .arg("rm")
        .arg(&archive)
        .arg("src/drop.txt")
        .assert()
        .success();

    rearc_cmd()
        .arg("ls")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("src/keep.txt"))
        .stdout(predicate::str::contains("drop.txt").not());
}

#[test]
fn test_rm_missing_target_fails() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());
    let archive = temp.path().join("out.zip");

    rearc_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&source)
        .assert()
        .success();

    rearc_cmd()
        .arg("rm")
        .arg(&archive)
        .arg("ghost.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_ls_nonexistent_archive() {
    rearc_cmd()
        .arg("ls")
        .arg("nonexistent.zip")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_create_unknown_format() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());

    rearc_cmd()
        .arg("create")
        .arg(temp.path().join("out.docx"))
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported archive format"));
}

#[test]
fn test_create_format_override() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());
    let archive = temp.path().join("payload.bin");

    // `.bin` resolves to no format; the -f override carries the export.
    rearc_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&source)
        .arg("-f")
        .arg("zip")
        .assert()
        .success();

    assert!(archive.exists());
}

#[test]
fn test_create_invalid_format_tag() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());

    rearc_cmd()
        .arg("create")
        .arg(temp.path().join("out.zip"))
        .arg(&source)
        .arg("-f")
        .arg("brotli")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn test_create_nonexistent_source() {
    let temp = TempDir::new().expect("failed to create temp dir");

    rearc_cmd()
        .arg("create")
        .arg(temp.path().join("out.zip"))
        .arg(temp.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_quiet_create_has_no_stdout() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());
    let archive = temp.path().join("out.zip");

    let output = rearc_cmd()
        .arg("--quiet")
        .arg("create")
        .arg(&archive)
        .arg(&source)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert!(output.is_empty());
    assert!(archive.exists());
}

#[test]
fn test_password_protected_zip_roundtrip() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());
    let archive = temp.path().join("locked.zip");

    rearc_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&source)
        .arg("-p")
        .arg("letmein")
        .assert()
        .success();

    // Without the password the import is rejected as encrypted.
    rearc_cmd()
        .arg("ls")
        .arg(&archive)
        .assert()
        .failure()
        .stderr(predicate::str::contains("encrypted"));

    rearc_cmd()
        .arg("ls")
        .arg(&archive)
        .arg("-p")
        .arg("letmein")
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.txt"));
}

#[test]
fn test_password_protected_sevenz_roundtrip() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());
    let archive = temp.path().join("locked.7z");

    rearc_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&source)
        .arg("-p")
        .arg("s3cret")
        .assert()
        .success();

    rearc_cmd()
        .arg("extract")
        .arg(&archive)
        .arg(temp.path().join("plain"))
        .arg("-p")
        .arg("s3cret")
        .assert()
        .success();

    assert!(temp.path().join("plain/notes.txt").exists());
}

// ============================================================================
// Completion Command Tests
// ============================================================================

#[test]
fn test_completion_bash() {
    rearc_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("rearc"));
}

#[test]
fn test_completion_invalid_shell() {
    rearc_cmd()
        .arg("completion")
        .arg("invalid_shell")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

// ============================================================================
// Interactive Shell Tests
// ============================================================================

#[test]
fn test_shell_help_and_exit() {
    rearc_cmd()
        .write_stdin("help\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("open <path>"));
}

#[test]
fn test_shell_add_save_roundtrip() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());
    let archive = temp.path().join("session.zip");

    rearc_cmd()
        .write_stdin(format!(
            "add {}\nls\nsave {}\nexit\n",
            source.display(),
            archive.display()
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.txt"));

    rearc_cmd()
        .arg("ls")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("notes.txt"));
}

#[test]
fn test_shell_survives_errors() {
    // A failing command reports and the loop keeps going.
    rearc_cmd()
        .write_stdin("rm ghost.txt\nls\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("error:"))
        .stdout(predicate::str::contains("(empty)"));
}

#[test]
fn test_shell_open_failure_then_decrypt_retry() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let source = sample_file(temp.path());
    let archive = temp.path().join("locked.zip");

    rearc_cmd()
        .arg("create")
        .arg(&archive)
        .arg(&source)
        .arg("-p")
        .arg("hunter2")
        .assert()
        .success();

    rearc_cmd()
        .write_stdin(format!(
            "open {}\ndec hunter2\nls\nexit\n",
            archive.display()
        ))
        .assert()
        .success()
        .stdout(predicate::str::contains("error:"))
        .stdout(predicate::str::contains("notes.txt"));
}

#[test]
fn test_shell_info_reports_state() {
    rearc_cmd()
        .write_stdin("info\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current archive: (none)"))
        .stdout(predicate::str::contains("Encryption     : disabled"))
        .stdout(predicate::str::contains("Total entries  : 0"));
}

#[test]
fn test_shell_unknown_command() {
    rearc_cmd()
        .write_stdin("frobnicate\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command: frobnicate"));
}
