#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rti() -> Command {
    cargo_bin_cmd!("shiftlink")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftlink.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Initialize DB and register two workers (W1, W2) and one site (H1)
/// with sectors S1 and S2.
pub fn init_db_with_registry(db_path: &str) {
    rti()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (id, name, cpf) in [("W1", "Ana Souza", "111"), ("W2", "João Lima", "222")] {
        rti()
            .args([
                "--db", db_path, "worker", "add", "--id", id, "--name", name, "--cpf", cpf,
            ])
            .assert()
            .success();
    }

    rti()
        .args([
            "--db",
            db_path,
            "site",
            "add",
            "--id",
            "H1",
            "--name",
            "HOSPITAL CENTRAL",
        ])
        .assert()
        .success();

    for (id, name) in [("S1", "UTI"), ("S2", "PRONTO SOCORRO")] {
        rti()
            .args([
                "--db", db_path, "site", "sector", "--site", "H1", "--id", id, "--name", name,
            ])
            .assert()
            .success();
    }
}

/// Record an entry through the CLI; returns (code, punch id).
pub fn record_entry(db_path: &str, worker: &str, date: &str, time: &str) -> (String, String) {
    let out = rti()
        .args([
            "--db", db_path, "entry", "--worker", worker, "--site", "H1", "--sector", "S1",
            "--date", date, "--time", time,
        ])
        .output()
        .expect("run entry");
    assert!(out.status.success(), "entry failed: {:?}", out);

    let stdout = String::from_utf8_lossy(&out.stdout);
    let code_line = stdout
        .lines()
        .find(|l| l.contains("Code:"))
        .expect("code line");
    let after = &code_line[code_line.find("Code:").unwrap() + 5..];
    let code: String = after
        .replace("\x1b[1m", "")
        .replace("\x1b[0m", "")
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();

    let id = stdout
        .lines()
        .find_map(|l| l.trim().strip_prefix("Punch id:"))
        .expect("punch id line")
        .trim()
        .to_string();

    (code, id)
}

pub fn exit_args<'a>(
    db_path: &'a str,
    worker: &'a str,
    code: &'a str,
    date: &'a str,
    time: &'a str,
) -> Vec<&'a str> {
    vec![
        "--db", db_path, "exit", "--worker", worker, "--code", code, "--site", "H1", "--sector",
        "S2", "--date", date, "--time", time,
    ]
}
