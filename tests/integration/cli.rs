//! The `saindex` binary, end to end.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use super::common::write_fasta;

fn saindex(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_saindex"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run saindex")
}

fn stdout_line(output: &Output) -> String {
    assert!(
        output.status.success(),
        "saindex failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp path is not UTF-8")
}

#[test]
fn build_then_query_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", &[("banana", b"banana")], 3);
    let queries = write_fasta(
        dir.path(),
        "q.fa",
        &[("q_ana", b"ana"), ("q_x", b"x"), ("q_banana", b"banana")],
        80,
    );
    let index = dir.path().join("banana.sa");
    let hits = dir.path().join("hits.tsv");

    let build = saindex(&["build", path_str(&reference), path_str(&index), "--preftab", "2"]);
    let metrics = stdout_line(&build);
    let fields: Vec<&str> = metrics.split(',').collect();
    assert_eq!(fields.len(), 5, "{}", metrics);
    assert_eq!(fields[0], "6");
    assert_eq!(fields[1], "2");
    assert_eq!(fields[4], fs::metadata(&index).unwrap().len().to_string());

    let query = saindex(&["query", path_str(&index), path_str(&queries), "naive", path_str(&hits)]);
    let metrics = stdout_line(&query);
    let fields: Vec<&str> = metrics.split(',').collect();
    assert_eq!(fields.len(), 6, "{}", metrics);
    assert_eq!(&fields[..4], &["6", "2", "naive", "3"]);

    let written = fs::read_to_string(&hits).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 3);

    let ana: Vec<&str> = lines[0].split('\t').collect();
    assert_eq!(ana[..2], ["q_ana", "2"]);
    let mut offsets: Vec<&str> = ana[2..].to_vec();
    offsets.sort_unstable();
    assert_eq!(offsets, vec!["1", "3"]);

    assert_eq!(lines[1], "q_x\t0");
    assert_eq!(lines[2], "q_banana\t1\t0");
}

#[test]
fn query_to_stdout_with_json_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", &[("r", b"ACGTACGT")], 80);
    let queries = write_fasta(dir.path(), "q.fa", &[("cg", b"CG")], 80);
    let index = dir.path().join("r.sa");

    stdout_line(&saindex(&["build", path_str(&reference), path_str(&index), "--sequential"]));

    let out = saindex(&["query", path_str(&index), path_str(&queries), "simpleaccel", "-", "--json"]);
    let stdout = stdout_line(&out);
    let mut lines = stdout.lines();

    let hit = lines.next().unwrap();
    assert!(hit.starts_with("cg\t2\t"), "{}", hit);

    let metrics: serde_json::Value = serde_json::from_str(lines.next().unwrap()).unwrap();
    assert_eq!(metrics["mode"], "simpleaccel");
    assert_eq!(metrics["num_queries"], 1);
    assert_eq!(metrics["preftab"], 0);
}

#[test]
fn build_reads_json_config() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", &[("r", b"acgtacgtac")], 80);
    let config = dir.path().join("build.json");
    fs::write(&config, r#"{"prefixLen": 3, "alphabet": "uppercase"}"#).unwrap();
    let index = dir.path().join("r.sa");

    let out = saindex(&[
        "build",
        path_str(&reference),
        path_str(&index),
        "--config",
        path_str(&config),
        "--json",
    ]);
    let metrics: serde_json::Value = serde_json::from_str(&stdout_line(&out)).unwrap();
    assert_eq!(metrics["preftab"], 3);
    assert_eq!(metrics["seq_length"], 10);

    let loaded = saindex::SuffixIndex::load(&index).unwrap();
    assert_eq!(loaded.sequence().text(), b"ACGTACGTAC");
}

#[test]
fn inspect_verifies_index() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", &[("r", b"mississippi")], 80);
    let index = dir.path().join("m.sa");
    stdout_line(&saindex(&["build", path_str(&reference), path_str(&index)]));

    let out = saindex(&["inspect", path_str(&index), "--limit", "3", "--verify"]);
    let stdout = stdout_line(&out);
    assert!(stdout.contains("i\tA[i]\tS[A[i]..]"));
    assert!(stdout.contains("0\t11\t$"));
    assert!(stdout.contains("verified: ok"));
}

#[test]
fn missing_arguments_exit_nonzero() {
    let out = saindex(&["query", "index.sa"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));

    let out = saindex(&["build"]);
    assert!(!out.status.success());
}

#[test]
fn loading_garbage_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let garbage = dir.path().join("garbage.sa");
    fs::write(&garbage, b"not an index at all").unwrap();
    let queries = write_fasta(dir.path(), "q.fa", &[("q", b"A")], 80);

    let out = saindex(&["query", path_str(&garbage), path_str(&queries), "naive", "-"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("magic"));
}

#[test]
fn damaged_prefix_table_fails_without_panicking() {
    let dir = tempfile::tempdir().unwrap();
    let reference = write_fasta(dir.path(), "ref.fa", &[("banana", b"banana")], 80);
    let queries = write_fasta(dir.path(), "q.fa", &[("q", b"nax")], 80);
    let index = dir.path().join("banana.sa");
    stdout_line(&saindex(&["build", path_str(&reference), path_str(&index), "--preftab", "2"]));

    let mut bytes = fs::read(&index).unwrap();
    let end = bytes.len() - 4;
    bytes[end..].copy_from_slice(&1000i32.to_le_bytes());
    fs::write(&index, bytes).unwrap();

    let out = saindex(&["query", path_str(&index), path_str(&queries), "naive", "-"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("prefix range"));
}
