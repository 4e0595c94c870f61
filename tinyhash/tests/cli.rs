use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";
const PASSWORD_MD5: &str = "5f4dcc3b5aa765d61d8327deb882cf99";

fn tinyhash(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_tinyhash"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    // Commands that fail on their arguments exit without reading stdin.
    let _ = child.stdin.take().unwrap().write_all(stdin);
    child.wait_with_output().unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).unwrap()
}

fn stderr(out: &Output) -> String {
    String::from_utf8(out.stderr.clone()).unwrap()
}

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> String {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_owned()
}

#[test]
fn sum_file_and_stdin() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "abc.txt", b"abc");

    let out = tinyhash(&["sum", &path], b"");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), format!("{}  {}\n", ABC_SHA256, path));

    let out = tinyhash(&["sum", "-a", "md5"], b"abc");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "900150983cd24fb0d6963f7d28e17f72  -\n");
}

#[test]
fn sum_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing");
    let out = tinyhash(&["sum", missing.to_str().unwrap()], b"");
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("opening"));
}

#[test]
fn check_exit_codes() {
    let out = tinyhash(&["check", "--expected", ABC_SHA256], b"abc");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "OK\n");

    let out = tinyhash(&["check", "--fixed-time", "--expected", &ABC_SHA256.to_uppercase()],
                       b"abc");
    assert_eq!(out.status.code(), Some(0));

    let out = tinyhash(&["check", "--expected", ABC_SHA256], b"abd");
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).starts_with("MISMATCH "));

    let out = tinyhash(&["check", "--fixed-time", "--expected", ABC_SHA256], b"abd");
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn check_rejects_bad_digest_text() {
    let out = tinyhash(&["check", "-a", "md5", "--expected", ABC_SHA256], b"abc");
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("expected 32 hex characters"));

    let out = tinyhash(&["check", "-a", "sha1", "--expected", "zz"], b"abc");
    assert_eq!(out.status.code(), Some(2));

    let out = tinyhash(&["check", "-a", "sha512", "--expected", "00"], b"abc");
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn chain_md5_and_unsupported_algorithms() {
    let out = tinyhash(&["chain", "-a", "md5", "--digest", PASSWORD_MD5, "user:"], b"");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "4d7afd630722ff0bf5f3c4fc08e5e8af\n");

    let twenty = "00".repeat(20);
    for alg in ["sha1", "ripemd160"] {
        let out = tinyhash(&["chain", "-a", alg, "--digest", &twenty], b"");
        assert_eq!(out.status.code(), Some(2), "{}", alg);
        assert!(stderr(&out).contains("does not support hash chaining"), "{}", alg);
    }
}

#[test]
fn soak_records_verify() {
    let dir = TempDir::new().unwrap();
    let record = dir.path().join("soak.bin");
    let record = record.to_str().unwrap();

    let out = tinyhash(&["soak", "--count", "40", "--seed", "3", "--record", record], b"");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "40 iterations, 0 failures\n");
    assert_eq!(fs::metadata(record).unwrap().len(), 40 * 40);

    let out = tinyhash(&["verify", record], b"");
    assert_eq!(out.status.code(), Some(0));
    let report = stdout(&out);
    assert_eq!(report.lines().count(), 4);
    assert!(report.lines().all(|line| line.ends_with("10 ok, 0 bad")), "{}", report);
}

#[test]
fn verify_reports_corrupted_digest() {
    let dir = TempDir::new().unwrap();
    let record = dir.path().join("soak.bin");
    let record = record.to_str().unwrap();
    let out = tinyhash(&["soak", "-a", "sha256", "--count", "3", "--record", record], b"");
    assert_eq!(out.status.code(), Some(0));

    let mut bytes = fs::read(record).unwrap();
    bytes[40 + 8] ^= 0x01;
    fs::write(record, &bytes).unwrap();

    let out = tinyhash(&["verify", record], b"");
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).contains("2 ok, 1 bad"));
}

#[test]
fn verify_rejects_malformed_files() {
    let dir = TempDir::new().unwrap();

    let truncated = write_file(&dir, "short.bin", &[0u8; 41]);
    let out = tinyhash(&["verify", &truncated], b"");
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("not a whole number"));

    let mut padded = [0u8; 40];
    padded[..4].copy_from_slice(b"MD5=");
    padded[39] = 0xff;
    let padded = write_file(&dir, "padded.bin", &padded);
    let out = tinyhash(&["verify", &padded], b"");
    assert_eq!(out.status.code(), Some(2));
    assert!(stderr(&out).contains("non-zero byte"));

    let missing = Path::new(&padded).with_extension("none").display().to_string();
    let out = tinyhash(&["verify", &missing], b"");
    assert_eq!(out.status.code(), Some(2));
}
