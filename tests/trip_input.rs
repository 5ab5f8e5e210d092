mod common;

use tripsheet_pdf::{AgencySettings, TripRecord, export_batch, render_trip_document};

const ROWS: &str = r#"[
    {
        "id": "A1",
        "vehicleRegNo": "TN 01 AB 1234",
        "companyName": "Vista Travels HQ",
        "source": null,
        "destination": null,
        "signature": null,
        "additionalKm": null,
        "totalKm": null,
        "totalTime": null,
        "startKm": 1000,
        "endKm": 1050,
        "tollParking": null
    },
    {
        "id": "A2",
        "vehicleRegNo": "TN 01 AB 5678",
        "startKm": "1000",
        "endKm": " 1042.5 ",
        "additionalKm": "",
        "tollParking": "80"
    }
]"#;

#[test]
fn rows_with_nulls_and_numeric_strings_load() {
    common::init_logging();
    let trips: Vec<TripRecord> = serde_json::from_str(ROWS).unwrap();
    assert_eq!(trips.len(), 2);

    assert_eq!(trips[0].source, "");
    assert_eq!(trips[0].total_time, "");
    assert_eq!(trips[0].signature, None);
    assert_eq!(trips[0].additional_km, None);
    assert_eq!(trips[0].toll_parking, 0.0);
    assert_eq!(trips[0].printed_distance_km(), 50.0);

    assert_eq!(trips[1].start_km, 1000.0);
    assert_eq!(trips[1].end_km, 1042.5);
    assert_eq!(trips[1].additional_km, None);
    assert_eq!(trips[1].toll_parking, 80.0);

    let sheet = render_trip_document(&trips[0], &common::settings()).unwrap();
    assert!(!sheet.report().source_shown);
    assert!(!sheet.report().destination_shown);
}

#[test]
fn unreadable_number_only_fails_its_own_trip() {
    let rows = r#"[
        {"id": "B1", "vehicleRegNo": "KA 05", "startKm": "twelve", "endKm": 20},
        {"id": "B2", "vehicleRegNo": "KA 06", "startKm": 10, "endKm": 20}
    ]"#;
    let trips: Vec<TripRecord> = serde_json::from_str(rows).unwrap();
    assert!(trips[0].start_km.is_nan());

    let batch = export_batch(&trips, &common::settings()).unwrap();
    assert_eq!(batch.entries, vec!["tripsheets/Tripsheet_KA_06_B2.pdf"]);
    assert_eq!(batch.failures.len(), 1);
    assert_eq!(batch.failures[0].index, 0);
}

#[test]
fn settings_accept_nulls() {
    let settings: AgencySettings =
        serde_json::from_str(r#"{"agencyName": "Metro Cabs", "email": null, "logoBase64": null}"#)
            .unwrap();
    assert_eq!(settings.agency_name, "Metro Cabs");
    assert_eq!(settings.email, "");
    assert_eq!(settings.logo_base64, None);
    assert_eq!(settings.contact_number, AgencySettings::default().contact_number);
}
