mod branding;
mod grid;
mod layout;

use crate::error::Error;
use crate::fonts::Face;
use crate::format::{format_date_only, format_date_time, format_number, is_valid_image};
use crate::images::decode_data_uri;
use crate::model::{AgencySettings, Alignment, EmbeddedImage, ImageFormat, TripRecord};
use crate::style::{
    BLACK, BORDER, CONTENT_WIDTH, FIELD_LINE_HEIGHT, FIELD_ROW_GAP, FRAME_INSET, LABEL, MARGIN, PAGE_HEIGHT,
    PAGE_WIDTH, PRIMARY, SIGNATURE_HEIGHT, SIGNATURE_WIDTH, TEXT, WHITE,
};
use crate::surface::{DrawCommand, StrokeStyle, Surface, TextStyle};

pub use branding::{BrandingOutcome, draw_branding};
pub use layout::{CellLayout, layout_cell, row_height, wrap_text};

use grid::{Metric, draw_metrics_grid};

const TITLE_Y: f32 = 32.0;
const TITLE_BAR_HEIGHT: f32 = 8.0;
const CONTACT_X: f32 = PAGE_WIDTH - MARGIN - 2.0;
const FOOTER_AGENCY: &str = "Vista Travels";
const NO_BOOKING_ID: &str = "________";
const NO_DURATION: &str = "0h 0m";
const SIGNATURE_CAPTION: &str = "Guest Signature";
/// Space kept free under the signature image for the caption.
const SIGNATURE_CAPTION_STRIP: f32 = 5.0;

const FIELD_LABEL: TextStyle = TextStyle::new(Face::Helvetica, 8.0, LABEL);
const FIELD_VALUE: TextStyle = TextStyle::new(Face::HelveticaBold, 10.0, BLACK);

/// What happened to the guest signature region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SignatureOutcome {
    Embedded(ImageFormat),
    /// No signature on the trip.
    Absent,
    /// Present but not a plausible image data URI.
    Invalid,
    /// Passed the structural check but would not decode.
    DecodeFailed,
}

impl SignatureOutcome {
    pub fn is_embedded(self) -> bool {
        matches!(self, SignatureOutcome::Embedded(_))
    }
}

/// Per-step outcomes of one render, for callers and tests that need to know
/// which fallbacks fired.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderReport {
    pub branding: BrandingOutcome,
    pub signature: SignatureOutcome,
    pub source_shown: bool,
    pub destination_shown: bool,
    pub adjusted_end_km: f64,
    pub printed_distance_km: f64,
}

/// One rendered trip sheet: the page's drawing commands plus the report.
#[derive(Clone, Debug)]
pub struct TripSheet {
    surface: Surface,
    report: RenderReport,
}

impl TripSheet {
    pub fn commands(&self) -> &[DrawCommand] {
        self.surface.commands()
    }

    pub fn images(&self) -> &[EmbeddedImage] {
        self.surface.images()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.surface.texts()
    }

    pub fn report(&self) -> &RenderReport {
        &self.report
    }

    pub fn to_pdf(&self) -> Result<Vec<u8>, Error> {
        crate::pdf::write_page(&self.surface)
    }
}

fn ensure_finite(name: &str, value: f64) -> Result<(), Error> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidTrip(format!("{name} is not a number ({value})")))
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

fn has_text(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Draw a label with its wrapped value underneath.
fn draw_field(surface: &mut Surface, label: &str, value: &str, x: f32, width: f32, y: f32) -> CellLayout {
    surface.text(label, x, y, FIELD_LABEL, Alignment::Left);
    let cell = layout_cell(value, width, &FIELD_VALUE);
    for (i, line) in cell.lines.iter().enumerate() {
        surface.text(
            line.as_str(),
            x,
            y + 5.0 + i as f32 * FIELD_LINE_HEIGHT,
            FIELD_VALUE,
            Alignment::Left,
        );
    }
    cell
}

fn draw_contact_block(surface: &mut Surface, settings: &AgencySettings) {
    let style = TextStyle::new(Face::Helvetica, 7.0, TEXT);
    let lines = [
        settings.address_line1.clone(),
        settings.address_line2.clone(),
        format!("Cell: {}", settings.contact_number),
        format!("E-mail: {}", settings.email),
    ];
    for (i, line) in lines.into_iter().enumerate() {
        surface.text(line, CONTACT_X, 12.0 + 4.0 * i as f32, style, Alignment::Right);
    }
}

fn draw_title_bar(surface: &mut Surface, trip: &TripRecord) {
    surface.fill_rect(MARGIN, TITLE_Y, CONTENT_WIDTH, TITLE_BAR_HEIGHT, PRIMARY);
    let baseline = TITLE_Y + 5.5;

    surface.text(
        "TRIP SHEET",
        MARGIN + 4.0,
        baseline,
        TextStyle::new(Face::HelveticaBold, 12.0, WHITE),
        Alignment::Left,
    );

    let small = TextStyle::new(Face::HelveticaBold, 9.0, WHITE);
    let booking = if trip.id.is_empty() { NO_BOOKING_ID } else { trip.id.as_str() };
    let mut center = format!("Booking No: {booking}");
    if !trip.trip_type.is_empty() {
        center.push_str(&format!("  |  {}", trip.trip_type));
    }
    surface.text(center, PAGE_WIDTH / 2.0, baseline, small, Alignment::Center);

    let date = format_date_only(Some(trip.start_date_time.as_str()));
    surface.text(
        format!("Date: {date}"),
        PAGE_WIDTH - MARGIN - 4.0,
        baseline,
        small,
        Alignment::Right,
    );
}

fn draw_toll_box(surface: &mut Surface, trip: &TripRecord, y: f32) {
    surface.rounded_rect(MARGIN, y, 60.0, 20.0, 2.0, StrokeStyle::new(BORDER, 0.2));
    surface.text(
        "Toll & Parking Charges:",
        MARGIN + 4.0,
        y + 6.0,
        TextStyle::new(Face::Helvetica, 9.0, LABEL),
        Alignment::Left,
    );
    surface.text(
        format!("Rs. {}", format_number(trip.toll_parking)),
        MARGIN + 4.0,
        y + 15.0,
        TextStyle::new(Face::HelveticaBold, 14.0, PRIMARY),
        Alignment::Left,
    );
}

/// Fit an image of `aspect` (height / width) inside a `w` x `h` region,
/// centred. Returns (x, y, w, h).
fn fit_into(aspect: f32, x: f32, y: f32, w: f32, h: f32) -> (f32, f32, f32, f32) {
    let (fw, fh) = if aspect * w <= h {
        (w, aspect * w)
    } else {
        (h / aspect, h)
    };
    (x + (w - fw) / 2.0, y + (h - fh) / 2.0, fw, fh)
}

fn draw_signature_box(surface: &mut Surface, signature: Option<&str>, y: f32) -> SignatureOutcome {
    let x = PAGE_WIDTH - MARGIN - SIGNATURE_WIDTH;
    surface.stroke_rect(x, y, SIGNATURE_WIDTH, SIGNATURE_HEIGHT, StrokeStyle::new(BLACK, 0.2));
    surface.text(
        SIGNATURE_CAPTION,
        x + 2.0,
        y + SIGNATURE_HEIGHT - 2.0,
        TextStyle::new(Face::Helvetica, 8.0, BLACK),
        Alignment::Left,
    );

    let Some(uri) = signature.filter(|s| !s.is_empty()) else {
        return SignatureOutcome::Absent;
    };
    if !is_valid_image(Some(uri)) {
        log::warn!("Signature is not an image data URI ({} chars), leaving box empty", uri.len());
        return SignatureOutcome::Invalid;
    }
    match decode_data_uri(uri) {
        Ok(image) => {
            let format = image.format;
            let (ix, iy, iw, ih) = fit_into(
                image.aspect_ratio(),
                x + 1.0,
                y + 1.0,
                SIGNATURE_WIDTH - 2.0,
                SIGNATURE_HEIGHT - SIGNATURE_CAPTION_STRIP,
            );
            let id = surface.add_image(image);
            surface.draw_image(id, ix, iy, iw, ih);
            SignatureOutcome::Embedded(format)
        }
        Err(e) => {
            log::warn!("Signature image render error: {e}");
            SignatureOutcome::DecodeFailed
        }
    }
}

/// Lay out one trip on a single 210 x 148 mm landscape page.
///
/// Image problems (logo, signature) degrade to fallbacks and show up in the
/// [`RenderReport`]; only values the layout cannot be computed from are errors.
pub fn render_trip_document(trip: &TripRecord, settings: &AgencySettings) -> Result<TripSheet, Error> {
    let t0 = std::time::Instant::now();
    ensure_finite("startKm", trip.start_km)?;
    ensure_finite("endKm", trip.end_km)?;
    ensure_finite("additionalKm", trip.additional_km.unwrap_or(0.0))?;
    ensure_finite("tollParking", trip.toll_parking)?;

    let mut surface = Surface::new();

    surface.stroke_rect(
        FRAME_INSET,
        FRAME_INSET,
        PAGE_WIDTH - FRAME_INSET * 2.0,
        PAGE_HEIGHT - FRAME_INSET * 2.0,
        StrokeStyle::new(PRIMARY, 0.5),
    );

    let branding = draw_branding(&mut surface, MARGIN + 2.0, 12.0, settings);
    draw_contact_block(&mut surface, settings);
    draw_title_bar(&mut surface, trip);

    let mut y = TITLE_Y + 14.0;

    let first_row = [
        draw_field(&mut surface, "Company Name", &trip.company_name, MARGIN + 2.0, 60.0, y),
        draw_field(&mut surface, "Booked By", &trip.booked_by, MARGIN + 65.0, 40.0, y),
        draw_field(&mut surface, "Report To", or_dash(&trip.report_to), MARGIN + 107.0, 40.0, y),
        draw_field(&mut surface, "Vehicle Reg No", &trip.vehicle_reg_no, MARGIN + 150.0, 30.0, y),
    ];
    y += row_height(&first_row) + FIELD_ROW_GAP;

    let mut second_row = vec![draw_field(
        &mut surface,
        "Car Type",
        or_dash(&trip.car_type),
        MARGIN + 2.0,
        60.0,
        y,
    )];
    let source_shown = has_text(&trip.source);
    if source_shown {
        second_row.push(draw_field(&mut surface, "From (Source)", &trip.source, MARGIN + 65.0, 60.0, y));
    }
    let destination_shown = has_text(&trip.destination);
    if destination_shown {
        second_row.push(draw_field(
            &mut surface,
            "To (Destination)",
            &trip.destination,
            MARGIN + 130.0,
            40.0,
            y,
        ));
    }
    y += row_height(&second_row) + FIELD_ROW_GAP;

    let adjusted_end_km = trip.adjusted_end_km();
    let printed_distance_km = trip.printed_distance_km();
    let duration = if trip.total_time.is_empty() {
        NO_DURATION
    } else {
        trip.total_time.as_str()
    };
    let rows = [
        [
            Metric { label: "Odometer (Km)", value: format_number(trip.start_km) },
            Metric { label: "Odometer (Km)", value: format_number(adjusted_end_km) },
            Metric { label: "Distance (Km)", value: format_number(printed_distance_km) },
        ],
        [
            Metric { label: "Time", value: format_date_time(Some(trip.start_date_time.as_str())) },
            Metric { label: "Time", value: format_date_time(Some(trip.end_date_time.as_str())) },
            Metric { label: "Duration", value: duration.to_string() },
        ],
    ];
    y += draw_metrics_grid(&mut surface, y, &rows) + 10.0;

    draw_toll_box(&mut surface, trip, y);
    let signature = draw_signature_box(&mut surface, trip.signature.as_deref(), y);

    let agency = if settings.agency_name.is_empty() {
        FOOTER_AGENCY
    } else {
        settings.agency_name.as_str()
    };
    surface.text(
        format!("For {agency}"),
        MARGIN + 2.0,
        PAGE_HEIGHT - 12.0,
        TextStyle::new(Face::TimesBold, 10.0, PRIMARY),
        Alignment::Left,
    );

    log::debug!(
        "render_trip_document: vehicle={} commands={} branding={:?} signature={:?} {:.1}ms",
        trip.vehicle_reg_no,
        surface.commands().len(),
        branding,
        signature,
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    Ok(TripSheet {
        surface,
        report: RenderReport {
            branding,
            signature,
            source_shown,
            destination_shown,
            adjusted_end_km,
            printed_distance_km,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_aspect_and_stays_inside() {
        let (x, y, w, h) = fit_into(0.5, 0.0, 0.0, 48.0, 15.0);
        assert!((h - 15.0).abs() < 1e-4);
        assert!((w - 30.0).abs() < 1e-4);
        assert!((x - 9.0).abs() < 1e-4);
        assert_eq!(y, 0.0);

        let (_, y, w, h) = fit_into(0.1, 0.0, 0.0, 48.0, 15.0);
        assert_eq!(w, 48.0);
        assert!((h - 4.8).abs() < 1e-4);
        assert!((y - 5.1).abs() < 1e-4);
    }

    #[test]
    fn non_finite_odometer_is_an_error() {
        let trip = TripRecord {
            end_km: f64::NAN,
            ..TripRecord::default()
        };
        let err = render_trip_document(&trip, &AgencySettings::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidTrip(_)));
    }
}
