mod download;
mod error;
mod export;
mod fonts;
mod format;
mod images;
mod model;
mod pdf;
mod render;
pub mod style;
pub mod surface;

pub use download::{DOWNLOAD_BLOCKED_NOTICE, DownloadOutcome, trigger_download};
pub use error::Error;
pub use export::{
    ARCHIVE_FOLDER, BatchExport, BatchFailure, Export, ExportFile, export_batch, export_selection,
    export_single,
};
pub use fonts::Face;
pub use format::{
    archive_file_name, format_date_only, format_date_time, format_number, is_valid_image,
    sanitize_component, trip_file_name,
};
pub use images::{ImageError, decode_data_uri, declared_format};
pub use model::{AgencySettings, Alignment, EmbeddedImage, ImageFormat, TripRecord};
pub use render::{
    BrandingOutcome, CellLayout, RenderReport, SignatureOutcome, TripSheet, draw_branding,
    layout_cell, render_trip_document, row_height, wrap_text,
};

use std::path::Path;
use std::time::Instant;

/// Render one trip and save it into `dir` under its trip-sheet file name.
pub fn save_trip_pdf(trip: &TripRecord, settings: &AgencySettings, dir: &Path) -> Result<DownloadOutcome, Error> {
    let t0 = Instant::now();

    let file = export_single(trip, settings)?;
    let t_render = t0.elapsed();

    let outcome = file.download(dir);
    let t_total = t0.elapsed();

    log::info!(
        "Timing: render={:.1}ms, save={:.1}ms, total={:.1}ms (output {} bytes)",
        t_render.as_secs_f64() * 1000.0,
        (t_total - t_render).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        file.bytes.len(),
    );

    Ok(outcome)
}

/// Export a selection (one PDF, or a zip for several trips) and save it into `dir`.
pub fn save_selection(trips: &[TripRecord], settings: &AgencySettings, dir: &Path) -> Result<DownloadOutcome, Error> {
    let t0 = Instant::now();

    let export = export_selection(trips, settings)?;
    let t_export = t0.elapsed();

    if let Export::Archive(batch) = &export {
        for failure in &batch.failures {
            log::warn!(
                "Trip #{} ({}) left out of {}: {}",
                failure.index,
                failure.vehicle_reg_no,
                batch.archive.filename,
                failure.error
            );
        }
    }

    let file = export.file();
    let outcome = file.download(dir);
    let t_total = t0.elapsed();

    log::info!(
        "Timing: export={:.1}ms, save={:.1}ms, total={:.1}ms (output {} bytes)",
        t_export.as_secs_f64() * 1000.0,
        (t_total - t_export).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        file.bytes.len(),
    );

    Ok(outcome)
}
