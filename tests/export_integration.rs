//! End-to-end export runs against a temp movie set folder.

use std::fs;
use tempfile::tempdir;

use export_set::{
    CancelToken, ExportOptions, Outcome, Record, RecordSource, SanitizePolicy, TargetPlatform,
    export_sets, load_records,
};

fn options(overwrite: bool) -> ExportOptions {
    ExportOptions {
        overwrite,
        policy: SanitizePolicy::new(TargetPlatform::Unix, '_').unwrap(),
        ..Default::default()
    }
}

#[test]
fn james_bond_scenario_writes_expected_document() {
    let td = tempdir().unwrap();
    let report = export_sets(
        vec![Record::new("James Bond", "Exploits of 007", "007")],
        td.path(),
        &options(false),
        &CancelToken::new(),
    );
    assert_eq!(report.written(), 1);

    let text = fs::read_to_string(td.path().join("James Bond/set.nfo")).unwrap();
    assert_eq!(
        text,
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<set>\n\t<title>James Bond</title>\n\t<overview>Exploits of 007</overview>\n\t<originaltitle>007</originaltitle>\n</set>\n"
    );
}

#[test]
fn slash_in_name_becomes_single_folder() {
    let td = tempdir().unwrap();
    export_sets(
        vec![Record::new("Action/Adventure", "", "")],
        td.path(),
        &options(false),
        &CancelToken::new(),
    );
    assert!(td.path().join("Action_Adventure/set.nfo").is_file());
    assert!(!td.path().join("Action").exists());
}

#[test]
fn second_run_without_overwrite_changes_nothing() {
    let td = tempdir().unwrap();
    let records = vec![
        Record::new("Alien", "Xenomorphs", "Alien"),
        Record::new("Rocky", "Boxing", ""),
    ];
    let first = export_sets(records.clone(), td.path(), &options(false), &CancelToken::new());
    assert_eq!(first.written(), 2);
    let before = fs::read(td.path().join("Alien/set.nfo")).unwrap();

    let changed = vec![
        Record::new("Alien", "Something else", "Alien"),
        Record::new("Rocky", "Boxing", ""),
    ];
    let second = export_sets(changed, td.path(), &options(false), &CancelToken::new());
    assert_eq!(second.written(), 0);
    assert_eq!(second.skipped(), 2);
    assert_eq!(fs::read(td.path().join("Alien/set.nfo")).unwrap(), before);
}

#[test]
fn overwrite_replaces_overview_and_keeps_titles() {
    let td = tempdir().unwrap();
    export_sets(
        vec![Record::new("Alien", "old plot", "Alien")],
        td.path(),
        &options(false),
        &CancelToken::new(),
    );
    let report = export_sets(
        vec![Record::new("Alien", "new plot", "Alien")],
        td.path(),
        &options(true),
        &CancelToken::new(),
    );
    assert_eq!(report.written(), 1);

    let text = fs::read_to_string(td.path().join("Alien/set.nfo")).unwrap();
    let parsed = export_set::descriptor::parse(&text).unwrap();
    assert_eq!(parsed.title, "Alien");
    assert_eq!(parsed.overview, "new plot");
    assert_eq!(parsed.originaltitle, "Alien");
}

#[test]
fn file_in_place_of_set_folder_fails_only_that_record() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("Blocked"), b"not a folder").unwrap();

    let report = export_sets(
        vec![
            Record::new("Alien", "", ""),
            Record::new("Blocked", "", ""),
            Record::new("Rocky", "", ""),
        ],
        td.path(),
        &options(true),
        &CancelToken::new(),
    );
    assert_eq!(report.written(), 2);
    assert_eq!(report.failed(), 1);
    assert!(report.is_complete());
    assert!(matches!(report.records[1].outcome, Outcome::Failed { .. }));
    assert!(td.path().join("Alien/set.nfo").is_file());
    assert!(td.path().join("Rocky/set.nfo").is_file());
    assert_eq!(fs::read(td.path().join("Blocked")).unwrap(), b"not a folder");
}

#[test]
fn windows_rules_produce_portable_folders() {
    let td = tempdir().unwrap();
    let opts = ExportOptions {
        overwrite: true,
        policy: SanitizePolicy::new(TargetPlatform::Windows, '_').unwrap(),
        ..Default::default()
    };
    export_sets(
        vec![
            Record::new("Star Wars: Saga", "", ""),
            Record::new("CON", "", ""),
            Record::new("Dots...", "", ""),
        ],
        td.path(),
        &opts,
        &CancelToken::new(),
    );
    assert!(td.path().join("Star Wars_ Saga/set.nfo").is_file());
    assert!(td.path().join("CON_/set.nfo").is_file());
    assert!(td.path().join("Dots/set.nfo").is_file());
}

#[test]
fn name_only_rows_get_empty_elements() {
    let td = tempdir().unwrap();
    let src = td.path().join("sets.csv");
    fs::write(&src, "0|Alien\n").unwrap();
    let records = load_records(Some(&RecordSource::Delimited(src))).unwrap();

    let out = td.path().join("out");
    fs::create_dir(&out).unwrap();
    export_sets(records, &out, &options(false), &CancelToken::new());

    let text = fs::read_to_string(out.join("Alien/set.nfo")).unwrap();
    assert!(text.contains("<title>Alien</title>"), "{text}");
    assert!(text.contains("<overview></overview>"), "{text}");
    assert!(text.contains("<originaltitle></originaltitle>"), "{text}");
}

#[test]
fn markup_in_fields_is_escaped() {
    let td = tempdir().unwrap();
    export_sets(
        vec![Record::new("Fast & Furious", "<cars>", "")],
        td.path(),
        &options(false),
        &CancelToken::new(),
    );
    let text = fs::read_to_string(td.path().join("Fast & Furious/set.nfo")).unwrap();
    assert!(text.contains("<title>Fast &amp; Furious</title>"), "{text}");
    let parsed = export_set::descriptor::parse(&text).unwrap();
    assert_eq!(parsed.overview, "<cars>");
}

#[test]
fn no_temp_files_left_behind() {
    let td = tempdir().unwrap();
    export_sets(
        vec![Record::new("Alien", "a", ""), Record::new("Rocky", "b", "")],
        td.path(),
        &options(true),
        &CancelToken::new(),
    );
    for set in ["Alien", "Rocky"] {
        let names: Vec<_> = fs::read_dir(td.path().join(set))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["set.nfo".to_string()]);
    }
}
