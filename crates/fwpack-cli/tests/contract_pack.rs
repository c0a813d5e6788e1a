use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const VERSION_H: &str = r#"
#ifndef VERSION_H
#define VERSION_H

#define FW_VERSION_MAJOR 1
#define FW_VERSION_MINOR 5
#define FW_VERSION_DATE "2023-05-07 08:00:00"
#define FW_VERSION_FULL "v1.5"

#endif
"#;

/// Lay out a fake PlatformIO project: config, version header, and the four
/// build outputs for one environment.
fn scaffold(root: &Path, board: &str, artifacts: &[&str]) {
    let ini = format!(
        "[fwpack]\n\
         build_board = devkit\n\
         build_platform = BUILD_ATARI\n\
         \n\
         [env:devkit]\n\
         board = {board}\n"
    );
    fs::write(root.join("platformio.ini"), ini).unwrap();

    fs::create_dir_all(root.join("include")).unwrap();
    fs::write(root.join("include/version.h"), VERSION_H).unwrap();

    let build_dir = root.join(".pio/build/devkit");
    fs::create_dir_all(&build_dir).unwrap();
    for name in artifacts {
        fs::write(build_dir.join(name), format!("contents of {name}")).unwrap();
    }
}

const ALL_ARTIFACTS: [&str; 4] = [
    "bootloader.bin",
    "partitions.bin",
    "firmware.bin",
    "spiffs.bin",
];

fn fwpack() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("fwpack").unwrap()
}

#[test]
fn test_pack_produces_manifest_and_zip() {
    let temp = tempdir().unwrap();
    scaffold(temp.path(), "esp32-devkit-16mb", &ALL_ARTIFACTS);

    fwpack()
        .current_dir(temp.path())
        .arg("pack")
        .assert()
        .success()
        .stdout(predicate::str::contains("Firmware zip:"));

    let manifest_path = temp.path().join("firmware/release.json");
    assert!(manifest_path.exists(), "release.json must be written");
    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest_path).unwrap()).unwrap();
    assert_eq!(manifest["version"], "v1.5");
    assert_eq!(manifest["version_date"], "2023-05-07 08:00:00");

    let offsets: Vec<&str> = manifest["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["offset"].as_str().unwrap())
        .collect();
    assert_eq!(offsets, vec!["0x1000", "0x8000", "0x10000", "0x910000"]);

    let zip_path = temp.path().join("firmware/fwpack-ATARI-v1.5.zip");
    assert!(zip_path.exists(), "archive must be named from platform and version");

    let mut archive = zip::ZipArchive::new(fs::File::open(&zip_path).unwrap()).unwrap();
    assert_eq!(archive.len(), 5, "four images plus the manifest");
    let mut embedded = String::new();
    std::io::Read::read_to_string(&mut archive.by_name("release.json").unwrap(), &mut embedded)
        .unwrap();
    assert_eq!(
        embedded,
        fs::read_to_string(&manifest_path).unwrap(),
        "manifest inside the archive must equal the one on disk"
    );
}

#[test]
fn test_spiffs_offset_tracks_flash_size() {
    for (board, expected) in [("node-8mb", "0x60000"), ("basic-4mb", "0x250000")] {
        let temp = tempdir().unwrap();
        scaffold(temp.path(), board, &ALL_ARTIFACTS);

        fwpack().current_dir(temp.path()).arg("pack").assert().success();

        let manifest: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(temp.path().join("firmware/release.json")).unwrap(),
        )
        .unwrap();
        let files = manifest["files"].as_array().unwrap();
        assert_eq!(files[3]["filename"], "spiffs.bin");
        assert_eq!(files[3]["offset"], expected, "board {board}");
    }
}

#[test]
fn test_pack_skips_zip_when_artifact_missing() {
    let temp = tempdir().unwrap();
    // Everything but the filesystem image.
    scaffold(
        temp.path(),
        "esp32-devkit-16mb",
        &["bootloader.bin", "partitions.bin", "firmware.bin"],
    );

    fwpack()
        .current_dir(temp.path())
        .arg("pack")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("SPIFFS not available")
                .and(predicate::str::contains("Build Filesystem Image"))
                .and(predicate::str::contains("Skipping ZIP file creation")),
        );

    // The skip leaves a freshly wiped, empty output directory behind.
    let leftover = fs::read_dir(temp.path().join("firmware")).unwrap().count();
    assert_eq!(leftover, 0, "no manifest or archive on the skip path");
}

#[test]
fn test_pack_wipes_stale_output() {
    let temp = tempdir().unwrap();
    scaffold(temp.path(), "esp32-devkit-16mb", &[]);
    fs::create_dir_all(temp.path().join("firmware")).unwrap();
    fs::write(temp.path().join("firmware/stale.zip"), b"old release").unwrap();

    fwpack().current_dir(temp.path()).arg("pack").assert().success();

    assert!(
        !temp.path().join("firmware/stale.zip").exists(),
        "previous run's output must be deleted"
    );
}

#[test]
fn test_git_fallbacks_apply_without_repository() {
    let temp = tempdir().unwrap();
    scaffold(temp.path(), "esp32-devkit-16mb", &ALL_ARTIFACTS);

    fwpack().current_dir(temp.path()).arg("pack").assert().success();

    let manifest: serde_json::Value = serde_json::from_str(
        &fs::read_to_string(temp.path().join("firmware/release.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(manifest["git_commit"], "NOGIT");
    assert_eq!(
        manifest["description"], "v1.5",
        "description falls back to the version string"
    );
}

#[test]
fn test_unsupported_board_is_a_config_error() {
    let temp = tempdir().unwrap();
    scaffold(temp.path(), "esp32dev", &ALL_ARTIFACTS);

    fwpack()
        .current_dir(temp.path())
        .arg("pack")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("flash size"));
}

#[test]
fn test_missing_config_is_a_config_error() {
    let temp = tempdir().unwrap();

    fwpack()
        .current_dir(temp.path())
        .arg("pack")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("fatal"));
}

#[test]
fn test_version_prints_crate_version() {
    fwpack()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
