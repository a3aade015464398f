use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

/// Binary pointed at a config file that does not exist, so the user's own
/// ~/.zipmerge/config.toml never leaks into a test.
fn zipmerge(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("zipmerge").unwrap();
    cmd.env_remove("ZIPMERGE_DIR")
        .env_remove("RUST_LOG")
        .env("ZIPMERGE_CONFIG", tmp.path().join("no-such-config.toml"))
        .arg("--no-color");
    cmd
}

fn create_test_zip(dir: &Path, name: &str, files: &[(&str, &str)]) {
    let file = fs::File::create(dir.join(name)).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options =
        zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (entry_name, content) in files {
        writer.start_file(entry_name.to_string(), options).unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap();
}

/// Fixture layout: data/ holds the archives, the config path lives beside it
fn data_dir(tmp: &TempDir) -> std::path::PathBuf {
    let dir = tmp.path().join("data");
    fs::create_dir_all(&dir).unwrap();
    dir
}

// ─── Help & version ──────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    let tmp = TempDir::new().unwrap();
    zipmerge(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("zip archives"))
        .stdout(predicate::str::contains("--keep"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn test_version_flag() {
    let tmp = TempDir::new().unwrap();
    zipmerge(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("zipmerge"));
}

// ─── Merge runs ──────────────────────────────────────────────────────────────

#[test]
fn test_human_run_reports_and_cleans() {
    let tmp = TempDir::new().unwrap();
    let dir = data_dir(&tmp);
    create_test_zip(&dir, "a.zip", &[("a.csv", "h\n1\n")]);
    create_test_zip(&dir, "b.zip", &[("b.csv", "h\n2\n")]);

    zipmerge(&tmp)
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Created merged CSV"))
        .stdout(predicate::str::contains("Processed 2 zip files and 2 CSV files"))
        .stdout(predicate::str::contains("Removed 4 files during cleanup"))
        .stdout(predicate::str::contains("Process completed successfully"));

    assert_eq!(
        fs::read_to_string(dir.join("merged_data.csv")).unwrap(),
        "h\n1\n2\n"
    );
    assert!(!dir.join("a.zip").exists());
    assert!(!dir.join("b.csv").exists());
}

#[test]
fn test_directory_from_env() {
    let tmp = TempDir::new().unwrap();
    let dir = data_dir(&tmp);
    fs::write(dir.join("only.csv"), "h\n1\n").unwrap();

    zipmerge(&tmp)
        .env("ZIPMERGE_DIR", &dir)
        .arg("--quiet")
        .assert()
        .success();

    assert!(dir.join("merged_data.csv").exists());
}

#[test]
fn test_defaults_to_current_directory() {
    let tmp = TempDir::new().unwrap();
    let dir = data_dir(&tmp);
    fs::write(dir.join("only.csv"), "h\n1\n").unwrap();

    zipmerge(&tmp).current_dir(&dir).assert().success();

    assert!(dir.join("merged_data.csv").exists());
}

#[test]
fn test_nothing_to_merge_message() {
    let tmp = TempDir::new().unwrap();
    let dir = data_dir(&tmp);

    zipmerge(&tmp)
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing to merge"))
        .stdout(predicate::str::contains("Created merged CSV").not());

    assert!(!dir.join("merged_data.csv").exists());
}

#[test]
fn test_keep_flag_skips_cleanup() {
    let tmp = TempDir::new().unwrap();
    let dir = data_dir(&tmp);
    create_test_zip(&dir, "a.zip", &[("a.csv", "h\n1\n")]);

    zipmerge(&tmp)
        .arg(&dir)
        .arg("--keep")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleanup skipped"));

    assert!(dir.join("a.zip").exists());
    assert!(dir.join("a.csv").exists());
}

#[test]
fn test_output_flag() {
    let tmp = TempDir::new().unwrap();
    let dir = data_dir(&tmp);
    fs::write(dir.join("a.csv"), "h\n1\n").unwrap();

    zipmerge(&tmp)
        .arg(&dir)
        .args(["--output", "combined.csv"])
        .assert()
        .success();

    assert!(dir.join("combined.csv").exists());
    assert!(!dir.join("merged_data.csv").exists());
}

#[test]
fn test_output_flag_rejects_paths() {
    let tmp = TempDir::new().unwrap();
    let dir = data_dir(&tmp);

    zipmerge(&tmp)
        .arg(&dir)
        .args(["--output", "../out.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("plain file name"));
}

#[test]
fn test_json_output() {
    let tmp = TempDir::new().unwrap();
    let dir = data_dir(&tmp);
    create_test_zip(&dir, "a.zip", &[("a.csv", "h\n1\n")]);

    let out = zipmerge(&tmp)
        .arg(&dir)
        .args(["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["process"]["archives"].as_array().unwrap().len(), 1);
    assert_eq!(json["process"]["bytes_written"], 4);
    assert_eq!(json["process"]["overwritten_entries"].as_array().unwrap().len(), 0);
    assert_eq!(json["cleanup"]["removed"].as_array().unwrap().len(), 2);
}

#[test]
fn test_quiet_output() {
    let tmp = TempDir::new().unwrap();
    let dir = data_dir(&tmp);

    zipmerge(&tmp)
        .arg(&dir)
        .arg("--quiet")
        .assert()
        .success()
        .stdout("0  0  0  none\n");
}

#[test]
fn test_config_file_is_honored() {
    let tmp = TempDir::new().unwrap();
    let dir = data_dir(&tmp);
    // a.csv lacks a trailing newline, so the configured separator follows it
    create_test_zip(&dir, "a.zip", &[("a.csv", "h\n1"), ("b.csv", "h\n2\n")]);
    let config = tmp.path().join("custom.toml");
    fs::write(&config, "cleanup = false\nline_terminator = \"crlf\"\n").unwrap();

    zipmerge(&tmp)
        .env("ZIPMERGE_CONFIG", &config)
        .arg(&dir)
        .assert()
        .success();

    assert!(dir.join("a.zip").exists());
    assert_eq!(
        fs::read_to_string(dir.join("merged_data.csv")).unwrap(),
        "h\n1\r\n2\n"
    );
}

#[test]
fn test_entry_named_like_output_is_reported() {
    let tmp = TempDir::new().unwrap();
    let dir = data_dir(&tmp);
    create_test_zip(
        &dir,
        "odd.zip",
        &[("merged_data.csv", "h\nshadow\n"), ("real.csv", "h\nreal\n")],
    );

    zipmerge(&tmp)
        .arg(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("odd.zip"))
        .stdout(predicate::str::contains("overwritten and not merged"));

    assert_eq!(
        fs::read_to_string(dir.join("merged_data.csv")).unwrap(),
        "h\nreal\n"
    );
}

#[test]
fn test_log_file_is_written() {
    let tmp = TempDir::new().unwrap();
    let dir = data_dir(&tmp);
    fs::write(dir.join("a.csv"), "h\n1\n").unwrap();
    let log = tmp.path().join("logs/run.log");

    zipmerge(&tmp)
        .arg(&dir)
        .arg("--verbose")
        .arg("--log-file")
        .arg(&log)
        .assert()
        .success();

    let contents = fs::read_to_string(&log).unwrap();
    assert!(contents.contains("Created merged CSV"));
}

// ─── Failures ────────────────────────────────────────────────────────────────

#[test]
fn test_missing_directory_fails() {
    let tmp = TempDir::new().unwrap();

    zipmerge(&tmp)
        .arg(tmp.path().join("missing"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Directory does not exist"));
}

#[test]
fn test_corrupt_archive_fails() {
    let tmp = TempDir::new().unwrap();
    let dir = data_dir(&tmp);
    fs::write(dir.join("broken.zip"), b"not a zip").unwrap();

    zipmerge(&tmp)
        .arg(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.zip"));

    assert!(dir.join("broken.zip").exists());
}
