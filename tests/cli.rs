use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn code_snippet(dir: &TempDir, args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_code-snippet"))
        .args(args)
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn code-snippet");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin)
        .expect("write stdin");
    child.wait_with_output().expect("wait")
}

#[test]
fn empty_stdin_is_a_successful_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let out = code_snippet(&dir, &[], b"");

    assert!(out.status.success(), "status {:?}", out.status);
    assert!(String::from_utf8_lossy(&out.stdout).contains("Error: No input provided."));
    assert!(!dir.path().join("snippet.png").exists());
}

#[test]
fn malformed_range_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.go"), "package main\n\nfunc main() {}\n").unwrap();
    let out = code_snippet(&dir, &["main.go", "--lines", "abc"], b"");

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Error processing lines"));
    assert!(!dir.path().join("snippet.png").exists());
}

#[test]
fn inverted_range_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("main.go"), "package main\n\nfunc main() {}\n").unwrap();
    let out = code_snippet(&dir, &["main.go", "-l", "3-1"], b"");

    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("snippet.png").exists());
}

#[test]
fn piped_source_is_saved_to_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let out = code_snippet(&dir, &["-o", "out.png"], b"fn main() {}\n");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Rendering 'Stdin'..."));
    assert!(stdout.contains("Saved to out.png"));
    let png = fs::read(dir.path().join("out.png")).unwrap();
    assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
}
