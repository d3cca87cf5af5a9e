use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_help_prints_usage_and_exits_zero() {
    let temp_dir = TempDir::new().unwrap();

    let mut cmd = Command::cargo_bin("optimize-images").unwrap();
    cmd.current_dir(temp_dir.path());
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Usage"));

    // Help must not touch the filesystem
    assert!(!temp_dir.path().join("images-backup").exists());
    assert!(!temp_dir.path().join("dist").exists());
}

#[test]
fn test_short_help_flag() {
    let mut cmd = Command::cargo_bin("optimize-images").unwrap();
    cmd.arg("-h");
    cmd.assert().success();
}

#[test]
fn test_unknown_flag_fails() {
    let mut cmd = Command::cargo_bin("optimize-images").unwrap();
    cmd.arg("--definitely-not-a-flag");
    cmd.assert().failure();
}

#[test]
fn test_missing_input_dir_exits_nonzero() {
    let temp_dir = TempDir::new().unwrap();

    // No images/ directory: the backup phase cannot list it, which is fatal
    let mut cmd = Command::cargo_bin("optimize-images").unwrap();
    cmd.current_dir(temp_dir.path());
    cmd.assert().failure().code(1);
}

#[test]
fn test_empty_input_dir_succeeds() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join("images")).unwrap();

    let mut cmd = Command::cargo_bin("optimize-images").unwrap();
    cmd.current_dir(temp_dir.path());
    cmd.assert().success();

    assert!(temp_dir.path().join("dist/images").is_dir());
    assert!(temp_dir.path().join("images-backup").is_dir());
}

#[test]
fn test_no_backup_skips_backup_directory() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::create_dir(temp_dir.path().join("images")).unwrap();

    let mut cmd = Command::cargo_bin("optimize-images").unwrap();
    cmd.current_dir(temp_dir.path());
    cmd.arg("--no-backup");
    cmd.assert().success();

    assert!(!temp_dir.path().join("images-backup").exists());
}

#[test]
fn test_no_webp_creates_no_webp_files() {
    let temp_dir = TempDir::new().unwrap();
    let images = temp_dir.path().join("images");
    std::fs::create_dir(&images).unwrap();
    // Not a real JPEG: its format job fails soft, but with --no-webp the WebP
    // job must not even attempt a derivation.
    std::fs::write(images.join("photo.jpg"), b"not a real jpeg").unwrap();

    let mut cmd = Command::cargo_bin("optimize-images").unwrap();
    cmd.current_dir(temp_dir.path());
    cmd.args(["--no-webp", "--no-backup"]);
    cmd.assert().success();

    let webp_files: Vec<_> = std::fs::read_dir(temp_dir.path().join("dist/images"))
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .map(|ext| ext == "webp")
                .unwrap_or(false)
        })
        .collect();
    assert!(webp_files.is_empty());
}
