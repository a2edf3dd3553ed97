//! Command line behaviour: exit codes and files left behind.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn astrocr() -> Command {
    Command::cargo_bin("astrocr").unwrap()
}

/// Write a config pointing at `tesseract_bin` and return its path.
fn write_config(dir: &Path, tesseract_bin: &Path) -> PathBuf {
    let path = dir.join("astrocr.json");
    let config = serde_json::json!({
        "ocr": { "tesseract_bin": tesseract_bin }
    });
    fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    path
}

fn write_png(path: &Path) {
    let img = image::GrayImage::from_fn(32, 16, |x, _| {
        if x < 16 {
            image::Luma([10])
        } else {
            image::Luma([240])
        }
    });
    img.save(path).unwrap();
}

/// A stand-in `tesseract` printing a fixed elements table.
#[cfg(unix)]
fn fake_tesseract(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-tesseract");
    fs::write(
        &path,
        "#!/bin/sh\n\
         if [ \"$1\" = \"--version\" ]; then echo 'tesseract 5.3.0'; exit 0; fi\n\
         printf 'Fire\\nAries\\nLeo\\nWater\\nCancer\\n'\n",
    )
    .unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_help_lists_commands() {
    astrocr()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_missing_engine_exits_with_failure() {
    let root = TempDir::new().unwrap();
    let config = write_config(root.path(), Path::new("/nonexistent/astrocr-no-tesseract"));
    fs::create_dir_all(root.path().join("inputs/images")).unwrap();
    write_png(&root.path().join("inputs/images/sunrise.png"));

    astrocr()
        .arg("--config")
        .arg(&config)
        .arg("--root")
        .arg(root.path())
        .arg("run")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("OCR dependency missing"));

    assert!(!root.path().join("docs/SOURCES.md").exists());
    assert!(!root.path().join("tmp/ocr/sunrise.json").exists());
}

#[test]
fn test_check_reports_missing_engine() {
    let root = TempDir::new().unwrap();
    let config = write_config(root.path(), Path::new("/nonexistent/astrocr-no-tesseract"));

    astrocr()
        .arg("--config")
        .arg(&config)
        .arg("check")
        .assert()
        .failure()
        .stdout(predicate::str::contains("tesseract"));
}

#[cfg(unix)]
#[test]
fn test_check_reports_engine_version() {
    let root = TempDir::new().unwrap();
    let config = write_config(root.path(), &fake_tesseract(root.path()));

    astrocr()
        .arg("--config")
        .arg(&config)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("tesseract 5.3.0 is available"));
}

#[test]
fn test_validate_empty_data_dir_succeeds() {
    let root = TempDir::new().unwrap();
    let config = write_config(root.path(), Path::new("tesseract"));

    astrocr()
        .arg("--config")
        .arg(&config)
        .arg("--root")
        .arg(root.path())
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("missing"));
}

#[test]
fn test_validate_rejects_corrupt_data() {
    let root = TempDir::new().unwrap();
    let config = write_config(root.path(), Path::new("tesseract"));
    fs::create_dir_all(root.path().join("data/astro")).unwrap();
    fs::write(root.path().join("data/astro/sunrise_table.json"), "{ not json").unwrap();

    astrocr()
        .arg("--config")
        .arg(&config)
        .arg("--root")
        .arg(root.path())
        .arg("validate")
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    astrocr()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    astrocr()
        .args(["config", "init", "--output"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_config_get_reads_explicit_file() {
    let dir = TempDir::new().unwrap();
    let config = write_config(dir.path(), Path::new("/opt/tesseract"));

    astrocr()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "ocr.tesseract_bin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/opt/tesseract"));
}

#[cfg(unix)]
#[test]
fn test_no_images_exits_with_failure() {
    let root = TempDir::new().unwrap();
    let config = write_config(root.path(), &fake_tesseract(root.path()));

    astrocr()
        .arg("--config")
        .arg(&config)
        .arg("--root")
        .arg(root.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("no images found"));

    assert!(root.path().join("inputs/images").is_dir());
}

#[cfg(unix)]
#[test]
fn test_run_with_fake_tesseract() {
    let root = TempDir::new().unwrap();
    let config = write_config(root.path(), &fake_tesseract(root.path()));
    let images = root.path().join("inputs/images");
    fs::create_dir_all(&images).unwrap();
    write_png(&images.join("zodiac_triangles.png"));
    write_png(&images.join("misc.jpg"));

    astrocr()
        .arg("--config")
        .arg(&config)
        .arg("--root")
        .arg(root.path())
        .args(["run", "--no-progress"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processed 2 image(s)"));

    let elements = fs::read_to_string(root.path().join("data/astro/elements_triangles.json")).unwrap();
    let elements: serde_json::Value = serde_json::from_str(&elements).unwrap();
    assert_eq!(elements["fire"], serde_json::json!(["Aries", "Leo"]));
    assert_eq!(elements["water"], serde_json::json!(["Cancer"]));

    assert!(root.path().join("tmp/ocr/zodiac_triangles.json").exists());
    assert!(root.path().join("tmp/ocr/misc.json").exists());
    assert!(root.path().join("docs/SOURCES.md").exists());
    assert!(root.path().join("docs/CHANGELOG_DATA.md").exists());
    assert!(!root.path().join("data/numerology/master_numbers.json").exists());
}
