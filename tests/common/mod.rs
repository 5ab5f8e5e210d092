#![allow(dead_code)]

use std::io::{Cursor, Read};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tripsheet_pdf::surface::DrawCommand;
use tripsheet_pdf::{AgencySettings, TripRecord, TripSheet};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// The trip used throughout: 1000 -> 1050 km plus a 5 km correction.
pub fn sample_trip() -> TripRecord {
    TripRecord {
        id: String::new(),
        company_name: "Vista Travels HQ".into(),
        booked_by: "R. Kumar".into(),
        report_to: "Guest Lounge".into(),
        vehicle_reg_no: "TN-01-AB-1234".into(),
        car_type: "Innova".into(),
        trip_type: "Local".into(),
        source: "Chennai Airport".into(),
        destination: "Guindy".into(),
        start_km: 1000.0,
        end_km: 1050.0,
        additional_km: Some(5.0),
        total_km: Some(50.0),
        start_date_time: "2024-01-01T10:00".into(),
        end_date_time: "2024-01-01T14:30".into(),
        total_time: "4h 30m".into(),
        toll_parking: 120.0,
        signature: None,
        timestamp: "2024-01-01T10:00:00Z".into(),
    }
}

pub fn settings() -> AgencySettings {
    AgencySettings::default()
}

fn encode_image(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 7 % 256) as u8, (y * 11 % 256) as u8, 90])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).expect("encode test image");
    out.into_inner()
}

pub fn png_data_uri(width: u32, height: u32) -> String {
    format!(
        "data:image/png;base64,{}",
        STANDARD.encode(encode_image(width, height, image::ImageFormat::Png))
    )
}

pub fn jpeg_data_uri(width: u32, height: u32) -> String {
    format!(
        "data:image/jpeg;base64,{}",
        STANDARD.encode(encode_image(width, height, image::ImageFormat::Jpeg))
    )
}

/// PNG whose left half is fully transparent, like a cut-out agency logo.
pub fn rgba_png_data_uri(width: u32, height: u32) -> String {
    let img = image::RgbaImage::from_fn(width, height, |x, _| {
        let alpha = if x < width / 2 { 0 } else { 255 };
        image::Rgba([200, 30, 30, alpha])
    });
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).expect("encode test image");
    format!("data:image/png;base64,{}", STANDARD.encode(out.into_inner()))
}

/// Long enough to pass the structural check, but not valid base64.
pub fn corrupt_data_uri() -> String {
    format!("data:image/png;base64,{}", "@#$%".repeat(20))
}

/// Baseline y of the first text command with exactly this content.
pub fn text_y(sheet: &TripSheet, needle: &str) -> Option<f32> {
    sheet.commands().iter().find_map(|c| match c {
        DrawCommand::Text { text, y, .. } if text == needle => Some(*y),
        _ => None,
    })
}

pub fn has_text(sheet: &TripSheet, needle: &str) -> bool {
    sheet.texts().any(|t| t == needle)
}

pub fn image_commands(sheet: &TripSheet) -> Vec<(f32, f32, f32, f32)> {
    sheet
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Image { x, y, w, h, .. } => Some((*x, *y, *w, *h)),
            _ => None,
        })
        .collect()
}

/// (name, bytes) for every file in a zip, in archive order.
pub fn zip_entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).expect("zip entry");
            let mut data = Vec::new();
            file.read_to_end(&mut data).expect("read zip entry");
            (file.name().to_string(), data)
        })
        .collect()
}
