mod common;

use std::fs;

use tripsheet_pdf::{
    AgencySettings, DOWNLOAD_BLOCKED_NOTICE, DownloadOutcome, TripRecord, save_selection, save_trip_pdf,
    trigger_download,
};

fn dir_names(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn empty_blob_is_not_saved() {
    common::init_logging();
    let dir = tempfile::tempdir().unwrap();
    let outcome = trigger_download(&[], dir.path(), "Tripsheet_X_1.pdf");
    assert_eq!(outcome, DownloadOutcome::Skipped);
    assert!(dir_names(dir.path()).is_empty());
}

#[test]
fn saved_file_matches_and_leaves_no_staging() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = b"%PDF-1.7 test payload".to_vec();
    let outcome = trigger_download(&bytes, dir.path(), "Tripsheet_X_1.pdf");

    let expected = dir.path().join("Tripsheet_X_1.pdf");
    assert_eq!(outcome, DownloadOutcome::Saved(expected.clone()));
    assert_eq!(fs::read(&expected).unwrap(), bytes);
    assert_eq!(dir_names(dir.path()), vec!["Tripsheet_X_1.pdf"]);
}

#[test]
fn existing_file_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.pdf"), b"old").unwrap();
    trigger_download(b"new contents", dir.path(), "a.pdf");
    assert_eq!(fs::read(dir.path().join("a.pdf")).unwrap(), b"new contents");
}

#[test]
fn unwritable_target_reports_notice() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let outcome = trigger_download(b"%PDF-", &missing, "a.pdf");
    assert_eq!(
        outcome,
        DownloadOutcome::Blocked {
            notice: DOWNLOAD_BLOCKED_NOTICE.to_string()
        }
    );
    assert!(dir_names(dir.path()).is_empty());
}

#[test]
fn single_trip_saved_under_trip_name() {
    let dir = tempfile::tempdir().unwrap();
    let trip = TripRecord {
        id: "BK-1".into(),
        ..common::sample_trip()
    };
    let outcome = save_trip_pdf(&trip, &common::settings(), dir.path()).unwrap();
    let path = dir.path().join("Tripsheet_TN_01_AB_1234_BK_1.pdf");
    assert_eq!(outcome, DownloadOutcome::Saved(path.clone()));
    assert!(fs::read(path).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn selection_saved_as_archive() {
    let dir = tempfile::tempdir().unwrap();
    let trips: Vec<_> = ["A1", "A2", "A3"]
        .iter()
        .map(|id| TripRecord {
            id: id.to_string(),
            ..common::sample_trip()
        })
        .collect();

    let outcome = save_selection(&trips, &common::settings(), dir.path()).unwrap();
    let path = dir.path().join("Vista_Travels_Tripsheets.zip");
    assert_eq!(outcome, DownloadOutcome::Saved(path.clone()));

    let entries = common::zip_entries(&fs::read(path).unwrap());
    let names: Vec<_> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "tripsheets/Tripsheet_TN_01_AB_1234_A1.pdf",
            "tripsheets/Tripsheet_TN_01_AB_1234_A2.pdf",
            "tripsheets/Tripsheet_TN_01_AB_1234_A3.pdf",
        ]
    );
}

#[test]
fn agency_name_with_separators_still_saves() {
    let dir = tempfile::tempdir().unwrap();
    let settings = AgencySettings {
        agency_name: "A/B Travels".into(),
        ..common::settings()
    };
    let trips = [
        TripRecord {
            id: "A1".into(),
            ..common::sample_trip()
        },
        TripRecord {
            id: "A2".into(),
            ..common::sample_trip()
        },
    ];

    let outcome = save_selection(&trips, &settings, dir.path()).unwrap();
    let path = dir.path().join("A_B_Travels_Tripsheets.zip");
    assert_eq!(outcome, DownloadOutcome::Saved(path.clone()));
    assert_eq!(common::zip_entries(&fs::read(path).unwrap()).len(), 2);
}

#[test]
fn empty_selection_saves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    assert!(save_selection(&[], &common::settings(), dir.path()).is_err());
    assert!(dir_names(dir.path()).is_empty());
}
