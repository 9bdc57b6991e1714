//! Run the built binary with an isolated config path.

use assert_cmd::cargo;
use assert_fs::prelude::*;
use std::fs;
use std::process::Command;

fn bin(cfg: &std::path::Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("export_set"));
    cmd.env("EXPORT_SET_CONFIG", cfg)
        .env_remove("EXPORT_SET_ROOT")
        .arg("--log-level")
        .arg("quiet");
    cmd
}

#[test]
fn exports_sets_from_delimited_file() {
    let tmp = assert_fs::TempDir::new().unwrap();
    let csv = tmp.child("sets.csv");
    csv.write_str("0|James Bond|Exploits of 007|007\n1|Action/Adventure|Mixed\n")
        .unwrap();
    let root = tmp.child("Movie Sets");

    let out = bin(&tmp.path().join("missing.xml"))
        .arg("--sets-folder")
        .arg(root.path())
        .arg("--csv")
        .arg(csv.path())
        .arg("--no-overwrite")
        .output()
        .expect("spawn binary");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let nfo = fs::read_to_string(root.path().join("James Bond/set.nfo")).unwrap();
    assert!(nfo.contains("<originaltitle>007</originaltitle>"), "{nfo}");
    assert!(root.path().join("Action_Adventure/set.nfo").is_file());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("2 written"), "stdout: {stdout}");
}

#[test]
fn second_run_skips_existing_descriptors() {
    let tmp = assert_fs::TempDir::new().unwrap();
    let csv = tmp.child("sets.csv");
    csv.write_str("0|Alien|Xenomorphs\n").unwrap();
    let root = tmp.child("sets");
    let cfg = tmp.path().join("missing.xml");

    let run = || {
        bin(&cfg)
            .arg("--sets-folder")
            .arg(root.path())
            .arg("--csv")
            .arg(csv.path())
            .arg("--no-overwrite")
            .output()
            .expect("spawn binary")
    };
    assert!(run().status.success());
    let before = fs::read(root.path().join("Alien/set.nfo")).unwrap();

    let out = run();
    assert!(out.status.success());
    assert_eq!(fs::read(root.path().join("Alien/set.nfo")).unwrap(), before);
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("0 written, 1 skipped"), "stdout: {stdout}");
}

#[test]
fn missing_root_fails_with_diagnostic() {
    let tmp = assert_fs::TempDir::new().unwrap();
    let csv = tmp.child("sets.csv");
    csv.write_str("0|Alien\n").unwrap();

    let out = bin(&tmp.path().join("missing.xml"))
        .arg("--csv")
        .arg(csv.path())
        .output()
        .expect("spawn binary");

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("--sets-folder"), "stderr: {stderr}");
}

#[test]
fn missing_source_fails() {
    let tmp = assert_fs::TempDir::new().unwrap();
    let out = bin(&tmp.path().join("missing.xml"))
        .arg("--sets-folder")
        .arg(tmp.path().join("sets"))
        .output()
        .expect("spawn binary");

    assert!(!out.status.success());
    assert!(!tmp.path().join("sets").exists());
}

#[test]
fn remote_root_is_refused() {
    let tmp = assert_fs::TempDir::new().unwrap();
    let csv = tmp.child("sets.csv");
    csv.write_str("0|Alien\n").unwrap();
    let out = bin(&tmp.path().join("missing.xml"))
        .arg("--sets-folder")
        .arg("smb://nas/media/sets")
        .arg("--csv")
        .arg(csv.path())
        .output()
        .expect("spawn binary");

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("smb://nas"), "stderr: {stderr}");
}

#[test]
fn print_config_reports_path_and_exits() {
    let tmp = assert_fs::TempDir::new().unwrap();
    let cfg = tmp.path().join("custom.xml");
    let out = bin(&cfg).arg("--print-config").output().expect("spawn binary");

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("custom.xml"), "stdout: {stdout}");
    assert!(!cfg.exists(), "--print-config must not create a config");
}

#[test]
fn root_from_config_file_is_used() {
    let tmp = assert_fs::TempDir::new().unwrap();
    let root = tmp.path().join("from_config");
    let csv = tmp.child("sets.csv");
    csv.write_str("0|Alien\n").unwrap();
    let cfg = tmp.child("config.xml");
    cfg.write_str(&format!(
        "<config><sets_folder>{}</sets_folder><csv_file>{}</csv_file><overwrite>false</overwrite></config>",
        root.display(),
        csv.path().display()
    ))
    .unwrap();

    let out = bin(cfg.path()).output().expect("spawn binary");
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(fs::read_to_string(root.join("Alien/set.nfo")).unwrap().contains("<title>Alien</title>"));
}
